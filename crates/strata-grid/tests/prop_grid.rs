use proptest::prelude::*;
use strata_grid::{Cell, VoxelGrid};

fn dim() -> impl Strategy<Value = usize> {
    1usize..=8
}

fn coord() -> impl Strategy<Value = i32> {
    -12i32..=12
}

proptest! {
    // idx maps each (x,y,z) within bounds to unique in-range indices
    #[test]
    fn idx_is_unique_and_in_range(w in dim(), h in dim()) {
        let grid = VoxelGrid::allocate(w, h, 1.0);
        let expect = w * h * w;
        prop_assert_eq!(grid.total_cells(), expect);

        let mut seen = vec![false; expect];
        for x in 0..w { for y in 0..h { for z in 0..w {
            let i = grid.idx(x, y, z);
            prop_assert!(i < expect);
            prop_assert!(!seen[i]);
            seen[i] = true;
        }}}
        prop_assert!(seen.into_iter().all(|b| b));
    }

    // get is defined exactly on the in-bounds region
    #[test]
    fn get_defined_iff_in_bounds(w in dim(), h in dim(), x in coord(), y in coord(), z in coord()) {
        let grid = VoxelGrid::allocate(w, h, 1.0);
        let inside = x >= 0 && y >= 0 && z >= 0
            && (x as usize) < w && (y as usize) < h && (z as usize) < w;
        prop_assert_eq!(grid.in_bounds(x, y, z), inside);
        prop_assert_eq!(grid.get(x, y, z).is_some(), inside);
        if inside {
            prop_assert_eq!(grid.get(x, y, z), Some(Cell::EMPTY));
        }
    }

    // Writes land only in bounds; out-of-range writes change nothing
    #[test]
    fn writes_respect_bounds(w in dim(), h in dim(), x in coord(), y in coord(), z in coord(), id in 1u16..64, inst in 0u32..1000) {
        let mut grid = VoxelGrid::allocate(w, h, 1.0);
        let before = grid.clone();
        grid.set_id(x, y, z, id);
        grid.set_instance_id(x, y, z, inst);
        if grid.in_bounds(x, y, z) {
            prop_assert_eq!(grid.get(x, y, z), Some(Cell { id, instance_id: Some(inst) }));
            prop_assert_eq!(grid.count_id(id), 1);
        } else {
            prop_assert_eq!(grid, before);
        }
    }

    // A single voxel floating in an empty grid is never obscured
    #[test]
    fn lone_voxel_is_visible(w in dim(), h in dim(), x in 0i32..8, y in 0i32..8, z in 0i32..8) {
        let mut grid = VoxelGrid::allocate(w, h, 1.0);
        grid.set_id(x, y, z, 1);
        prop_assert!(!grid.is_obscured(x, y, z));
    }
}
