mod resources;
mod terrain;

use std::time::{Duration, Instant};

use strata_blocks::{BlockId, BlockRegistry};
use strata_grid::VoxelGrid;
use thiserror::Error;

use crate::noise::NoiseProvider;
use crate::worldgen::{ConfigError, TerrainParams, WorldSize};

use self::resources::apply_resource_veins;
use self::terrain::{TerrainCover, apply_base_terrain};
pub use self::terrain::surface_height;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenStage {
    Initialize = 0,
    Resources = 1,
    Terrain = 2,
}

pub const GEN_STAGE_COUNT: usize = 3;
pub const GEN_STAGE_LABELS: [&str; GEN_STAGE_COUNT] = ["init", "resources", "terrain"];

impl GenStage {
    pub const ALL: [GenStage; GEN_STAGE_COUNT] =
        [GenStage::Initialize, GenStage::Resources, GenStage::Terrain];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn label(self) -> &'static str {
        GEN_STAGE_LABELS[self.index()]
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("unknown {role} block '{name}'")]
    UnknownBlock { role: &'static str, name: String },
}

#[derive(Clone, Debug, Default)]
pub struct GenerationStats {
    /// Cells written by each resource pass, in registry order. Later passes may
    /// overwrite cells counted by earlier ones.
    pub resource_cells: Vec<(BlockId, usize)>,
    pub columns: usize,
    pub surface_min: Option<usize>,
    pub surface_max: Option<usize>,
    /// Resource cells erased because they sat above their column's surface.
    pub cleared_cells: usize,
    pub stage_us: [u64; GEN_STAGE_COUNT],
}

impl GenerationStats {
    pub fn record_stage_duration(&mut self, stage: GenStage, elapsed: Duration) {
        let us = elapsed.as_micros().min(u128::from(u64::MAX)) as u64;
        let slot = &mut self.stage_us[stage.index()];
        *slot = slot.saturating_add(us);
    }

    pub fn stage_duration(&self, stage: GenStage) -> Duration {
        Duration::from_micros(self.stage_us[stage.index()])
    }

    pub fn total_us(&self) -> u64 {
        self.stage_us.iter().fold(0u64, |acc, &us| acc.saturating_add(us))
    }

    fn note_surface(&mut self, top: usize) {
        self.columns += 1;
        self.surface_min = Some(self.surface_min.map_or(top, |m| m.min(top)));
        self.surface_max = Some(self.surface_max.map_or(top, |m| m.max(top)));
    }
}

/// Runs the fixed generation sequence against an injected registry and noise source.
pub struct TerrainGenerator<'a> {
    reg: &'a BlockRegistry,
    noise: &'a dyn NoiseProvider,
}

impl<'a> TerrainGenerator<'a> {
    pub fn new(reg: &'a BlockRegistry, noise: &'a dyn NoiseProvider) -> Self {
        Self { reg, noise }
    }

    fn resolve(&self, role: &'static str, name: &str) -> Result<BlockId, GenerationError> {
        self.reg
            .id_by_name(name)
            .ok_or_else(|| GenerationError::UnknownBlock {
                role,
                name: name.to_string(),
            })
    }

    /// Builds a fresh grid: allocate empty, overlay resources, then overlay the
    /// heightmap unless `terrain.enable` is off. Inputs are validated before any
    /// storage is allocated.
    pub fn generate(
        &self,
        size: &WorldSize,
        terrain: &TerrainParams,
    ) -> Result<(VoxelGrid, GenerationStats), GenerationError> {
        size.validate()?;
        let cover = if terrain.enable {
            terrain.validate()?;
            Some(TerrainCover {
                surface: self.resolve("surface", &terrain.surface)?,
                subsoil: self.resolve("subsoil", &terrain.subsoil)?,
            })
        } else {
            None
        };

        let mut stats = GenerationStats::default();
        let t0 = Instant::now();
        let mut grid = VoxelGrid::allocate(size.width, size.height, size.block_size);
        stats.record_stage_duration(GenStage::Initialize, t0.elapsed());

        apply_resource_veins(&mut grid, self.reg, self.noise, &mut stats);
        if let Some(cover) = cover {
            apply_base_terrain(&mut grid, terrain, cover, self.noise, &mut stats);
        }

        log::debug!(
            "generated {}x{}x{} grid: resources={:?} columns={} surface={:?}..{:?} cleared={} ({}us)",
            size.width,
            size.height,
            size.width,
            stats.resource_cells,
            stats.columns,
            stats.surface_min,
            stats.surface_max,
            stats.cleared_cells,
            stats.total_us()
        );
        Ok((grid, stats))
    }
}
