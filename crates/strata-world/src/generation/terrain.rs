use std::time::Instant;

use strata_blocks::{BlockId, EMPTY};
use strata_grid::VoxelGrid;

use super::{GenStage, GenerationStats};
use crate::noise::NoiseProvider;
use crate::worldgen::TerrainParams;

/// Surface row for a column: `floor(H * (offset + magnitude * noise))` clamped
/// to `[0, H - 1]`. Non-finite intermediates land on row 0.
pub fn surface_height(noise: f32, height: usize, params: &TerrainParams) -> usize {
    let max = height.saturating_sub(1);
    let raw = (height as f32 * (params.offset + params.magnitude * noise)).floor();
    if !raw.is_finite() {
        return if raw == f32::INFINITY { max } else { 0 };
    }
    if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(max)
    }
}

#[derive(Clone, Copy, Debug)]
pub(super) struct TerrainCover {
    pub surface: BlockId,
    pub subsoil: BlockId,
}

/// Heightmap pass. Cells above the column surface are cleared, cells already
/// holding a resource keep it, and the remainder become subsoil topped by the
/// surface block.
pub(super) fn apply_base_terrain(
    grid: &mut VoxelGrid,
    params: &TerrainParams,
    cover: TerrainCover,
    noise: &dyn NoiseProvider,
    stats: &mut GenerationStats,
) {
    let stage_start = Instant::now();
    let w = grid.width();
    let h = grid.height();
    for x in 0..w {
        for z in 0..w {
            let n = noise.noise_2d(
                &params.seed,
                x as f32 / params.scale,
                z as f32 / params.scale,
            );
            let top = surface_height(n, h, params);
            stats.note_surface(top);
            for y in 0..h {
                let (xi, yi, zi) = (x as i32, y as i32, z as i32);
                let existing = grid.id_at(xi, yi, zi);
                if y > top {
                    if existing != EMPTY {
                        stats.cleared_cells += 1;
                    }
                    grid.set_id(xi, yi, zi, EMPTY);
                } else if existing != EMPTY {
                    continue;
                } else if y < top {
                    grid.set_id(xi, yi, zi, cover.subsoil);
                } else {
                    grid.set_id(xi, yi, zi, cover.surface);
                }
            }
        }
    }
    stats.record_stage_duration(GenStage::Terrain, stage_start.elapsed());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(magnitude: f32, offset: f32) -> TerrainParams {
        TerrainParams {
            magnitude,
            offset,
            ..TerrainParams::default()
        }
    }

    #[test]
    fn height_follows_formula_inside_range() {
        assert_eq!(surface_height(0.0, 4, &params(0.0, 0.5)), 2);
        assert_eq!(surface_height(0.5, 28, &params(0.5, 0.2)), 12);
        assert_eq!(surface_height(-0.5, 28, &params(0.5, 0.2)), 0);
    }

    #[test]
    fn height_clamps_at_both_ends() {
        assert_eq!(surface_height(1.0, 10, &params(5.0, 0.0)), 9);
        assert_eq!(surface_height(-1.0, 10, &params(5.0, 0.0)), 0);
        assert_eq!(surface_height(0.0, 10, &params(0.0, 1.0)), 9);
    }

    #[test]
    fn non_finite_inputs_stay_in_range() {
        assert_eq!(surface_height(f32::NAN, 10, &params(0.5, 0.2)), 0);
        assert_eq!(surface_height(0.0, 10, &params(0.0, f32::INFINITY)), 9);
        assert_eq!(surface_height(0.0, 10, &params(0.0, f32::NEG_INFINITY)), 0);
    }
}
