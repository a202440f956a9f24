use std::collections::HashSet;
use std::time::Instant;

use strata_blocks::{BlockId, BlockRegistry, EMPTY};
use strata_grid::VoxelGrid;

use crate::batch::InstanceBatches;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshOptions {
    /// Skip voxels whose six neighbors are all solid.
    pub cull_obscured: bool,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            cull_obscured: true,
        }
    }
}

/// Scans the grid in X, Y, Z order and appends every visible voxel's center to
/// its type's batch, recording the slot back into the cell's `instance_id`.
/// Instance ids from an earlier pass are cleared first.
pub fn build_instance_batches(
    grid: &mut VoxelGrid,
    reg: &BlockRegistry,
    opts: MeshOptions,
) -> InstanceBatches {
    let t0 = Instant::now();
    grid.clear_instance_ids();
    let (w, h) = (grid.width(), grid.height());
    let mut out = InstanceBatches::for_registry(reg, grid.total_cells());
    let mut warned: HashSet<BlockId> = HashSet::new();
    let mut unknown = 0usize;

    for x in 0..w {
        for y in 0..h {
            for z in 0..w {
                let (xi, yi, zi) = (x as i32, y as i32, z as i32);
                let id = grid.id_at(xi, yi, zi);
                if id == EMPTY {
                    continue;
                }
                if opts.cull_obscured && grid.is_obscured(xi, yi, zi) {
                    out.culled += 1;
                    continue;
                }
                let pos = grid.world_position(x, y, z);
                let Some(batch) = out.slot_mut(id) else {
                    if warned.insert(id) {
                        log::warn!("mesher: block id {} not in registry; skipping", id);
                    }
                    unknown += 1;
                    continue;
                };
                let instance_id = batch.positions.len() as u32;
                batch.positions.push(pos);
                grid.set_instance_id(xi, yi, zi, instance_id);
            }
        }
    }
    out.skipped_unknown = unknown;

    log::info!(
        target: "perf",
        "ms={} mesher_instances dims=({}, {}, {}) instances={} culled={} unknown={}",
        t0.elapsed().as_millis(),
        w,
        h,
        w,
        out.total_instances(),
        out.culled,
        out.skipped_unknown
    );
    out
}
