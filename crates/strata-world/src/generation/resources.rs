use std::time::Instant;

use strata_blocks::BlockRegistry;
use strata_grid::VoxelGrid;

use super::{GenStage, GenerationStats};
use crate::noise::NoiseProvider;

/// Overlays every resource type in registry order. A later type overwrites an
/// earlier one on shared cells.
pub(super) fn apply_resource_veins(
    grid: &mut VoxelGrid,
    reg: &BlockRegistry,
    noise: &dyn NoiseProvider,
    stats: &mut GenerationStats,
) {
    let stage_start = Instant::now();
    let w = grid.width();
    let h = grid.height();
    for (ty, params) in reg.resources() {
        let (sx, sy, sz) = (params.scale_x(), params.scale_y(), params.scale_z());
        let mut claimed = 0usize;
        for x in 0..w {
            for z in 0..w {
                for y in 0..h {
                    let v = noise.noise_3d(
                        &ty.name,
                        x as f32 / sx,
                        y as f32 / sy,
                        z as f32 / sz,
                    );
                    if v > params.scarcity {
                        grid.set_id(x as i32, y as i32, z as i32, ty.id);
                        claimed += 1;
                    }
                }
            }
        }
        log::trace!("resource {} claimed {} cells", ty.name, claimed);
        stats.resource_cells.push((ty.id, claimed));
    }
    stats.record_stage_duration(GenStage::Resources, stage_start.elapsed());
}
