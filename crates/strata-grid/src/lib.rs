//! Dense voxel grid with bounds-checked accessors.
#![forbid(unsafe_code)]

mod face;

pub use face::Face;

use strata_blocks::{BlockId, EMPTY};
use strata_geom::{Aabb, Vec3};

/// One voxel: its block id plus the slot it occupies in its type's instance
/// batch. `instance_id` is only meaningful right after a meshing pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    pub id: BlockId,
    pub instance_id: Option<u32>,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        id: EMPTY,
        instance_id: None,
    };

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.id == EMPTY
    }
}

/// Square-prism block grid: `width` along X and Z, `height` along Y.
///
/// Cells live in one flat buffer indexed `x * (height * width) + y * width + z`.
/// Every accessor takes signed coordinates; out-of-range reads return `None`
/// and out-of-range writes are ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelGrid {
    width: usize,
    height: usize,
    block_size: f32,
    cells: Vec<Cell>,
}

impl VoxelGrid {
    pub fn allocate(width: usize, height: usize, block_size: f32) -> Self {
        let total = width * height * width;
        VoxelGrid {
            width,
            height,
            block_size,
            cells: vec![Cell::EMPTY; total],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn block_size(&self) -> f32 {
        self.block_size
    }

    #[inline]
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Linear index of an in-range cell. Callers must check bounds first.
    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        x * (self.height * self.width) + y * self.width + z
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < self.width
            && (y as usize) < self.height
            && (z as usize) < self.width
    }

    #[inline]
    fn checked_idx(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if self.in_bounds(x, y, z) {
            Some(self.idx(x as usize, y as usize, z as usize))
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<Cell> {
        self.checked_idx(x, y, z).map(|i| self.cells[i])
    }

    /// Block id at a coordinate; anything outside the grid reads as empty.
    #[inline]
    pub fn id_at(&self, x: i32, y: i32, z: i32) -> BlockId {
        self.get(x, y, z).map_or(EMPTY, |c| c.id)
    }

    #[inline]
    pub fn set_id(&mut self, x: i32, y: i32, z: i32, id: BlockId) {
        if let Some(i) = self.checked_idx(x, y, z) {
            self.cells[i].id = id;
        }
    }

    #[inline]
    pub fn set_instance_id(&mut self, x: i32, y: i32, z: i32, instance_id: u32) {
        if let Some(i) = self.checked_idx(x, y, z) {
            self.cells[i].instance_id = Some(instance_id);
        }
    }

    pub fn clear_instance_ids(&mut self) {
        for c in &mut self.cells {
            c.instance_id = None;
        }
    }

    /// Bitmask (by `Face::index`) of the faces whose neighbor is empty or
    /// outside the grid.
    pub fn exposed_faces(&self, x: i32, y: i32, z: i32) -> u8 {
        let mut mask = 0u8;
        for face in Face::ALL {
            let (dx, dy, dz) = face.delta();
            let nb = match (x.checked_add(dx), y.checked_add(dy), z.checked_add(dz)) {
                (Some(nx), Some(ny), Some(nz)) => self.id_at(nx, ny, nz),
                _ => EMPTY,
            };
            if nb == EMPTY {
                mask |= 1 << face.index();
            }
        }
        mask
    }

    /// True iff all six axis neighbors are non-empty. Boundary voxels are never
    /// obscured since a missing neighbor counts as empty.
    #[inline]
    pub fn is_obscured(&self, x: i32, y: i32, z: i32) -> bool {
        self.exposed_faces(x, y, z) == 0
    }

    /// World-space center of a cell.
    #[inline]
    pub fn world_position(&self, x: usize, y: usize, z: usize) -> Vec3 {
        let bs = self.block_size;
        let half = bs / 2.0;
        Vec3::new(
            x as f32 * bs + half,
            y as f32 * bs + half,
            z as f32 * bs + half,
        )
    }

    pub fn world_bounds(&self) -> Aabb {
        let w = self.width as f32 * self.block_size;
        let h = self.height as f32 * self.block_size;
        Aabb::new(Vec3::ZERO, Vec3::new(w, h, w))
    }

    /// Visits every cell in X, then Y, then Z ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize, usize), Cell)> + '_ {
        let (w, h) = (self.width, self.height);
        self.cells.iter().enumerate().map(move |(i, c)| {
            let x = i / (h * w);
            let y = (i / w) % h;
            let z = i % w;
            ((x, y, z), *c)
        })
    }

    pub fn count_id(&self, id: BlockId) -> usize {
        self.cells.iter().filter(|c| c.id == id).count()
    }
}
