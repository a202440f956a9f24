//! World handle: owns configuration, registry, grid and batches, and runs the
//! generate-then-mesh pipeline.
#![forbid(unsafe_code)]

use std::time::{Duration, Instant};

use strata_blocks::{BlockId, BlockRegistry, RegistryError};
use strata_grid::VoxelGrid;
use strata_mesh_cpu::{InstanceBatch, InstanceBatches, MeshOptions, build_instance_batches};
use strata_world::{
    ConfigError, GenerationError, GenerationStats, MeshSettings, NoiseProvider, SimplexNoise,
    TerrainGenerator, TerrainParams, WorldGenConfig, WorldSize,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Generation knobs read at every `generate()`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenSettings {
    pub terrain: TerrainParams,
    pub mesh: MeshSettings,
}

impl GenSettings {
    #[inline]
    pub fn mesh_options(&self) -> MeshOptions {
        MeshOptions {
            cull_obscured: self.mesh.cull_obscured,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RunStats {
    pub generation: GenerationStats,
    pub instances: usize,
    pub culled: usize,
    pub t_gen_ms: u32,
    pub t_mesh_ms: u32,
    pub t_total_ms: u32,
}

#[inline]
fn clamp_ms(d: Duration) -> u32 {
    d.as_millis().min(u128::from(u32::MAX)) as u32
}

pub struct World {
    pub size: WorldSize,
    pub config: GenSettings,
    registry: BlockRegistry,
    noise: Box<dyn NoiseProvider>,
    grid: VoxelGrid,
    batches: InstanceBatches,
    last_stats: Option<RunStats>,
}

impl World {
    /// Built-in catalog, simplex noise and default terrain settings. Nothing is
    /// generated until `generate()` runs.
    pub fn create(width: usize, height: usize, block_size: Option<f32>) -> Self {
        Self::with_parts(
            WorldSize::new(width, height, block_size),
            GenSettings::default(),
            BlockRegistry::builtin(),
            Box::new(SimplexNoise::new()),
        )
    }

    pub fn with_parts(
        size: WorldSize,
        config: GenSettings,
        registry: BlockRegistry,
        noise: Box<dyn NoiseProvider>,
    ) -> Self {
        let grid = VoxelGrid::allocate(0, 0, size.block_size);
        Self {
            size,
            config,
            registry,
            noise,
            grid,
            batches: InstanceBatches::default(),
            last_stats: None,
        }
    }

    /// Splits a loaded worldgen file into size, settings and registry overrides.
    pub fn from_config(
        cfg: &WorldGenConfig,
        registry: BlockRegistry,
        noise: Box<dyn NoiseProvider>,
    ) -> Result<Self, GenerateError> {
        let mut world = Self::with_parts(
            cfg.size.clone(),
            GenSettings::default(),
            registry,
            noise,
        );
        world.apply_config(cfg)?;
        Ok(world)
    }

    /// Replaces size, terrain and mesh settings and applies resource overrides.
    /// On error nothing changes.
    pub fn apply_config(&mut self, cfg: &WorldGenConfig) -> Result<(), GenerateError> {
        cfg.validate()?;
        let mut registry = self.registry.clone();
        cfg.apply_resource_overrides(&mut registry)?;
        self.registry = registry;
        self.size = cfg.size.clone();
        self.config = GenSettings {
            terrain: cfg.terrain.clone(),
            mesh: cfg.mesh.clone(),
        };
        Ok(())
    }

    /// Regenerates the grid and batches from the current configuration. The new
    /// grid is built and meshed off to the side; on error the previous grid and
    /// batches remain.
    pub fn generate(&mut self) -> Result<(), GenerateError> {
        let t0 = Instant::now();
        let (mut grid, generation) = TerrainGenerator::new(&self.registry, self.noise.as_ref())
            .generate(&self.size, &self.config.terrain)?;
        let t_gen = t0.elapsed();

        let t1 = Instant::now();
        let batches = build_instance_batches(&mut grid, &self.registry, self.config.mesh_options());
        let t_mesh = t1.elapsed();

        let stats = RunStats {
            generation,
            instances: batches.total_instances(),
            culled: batches.culled,
            t_gen_ms: clamp_ms(t_gen),
            t_mesh_ms: clamp_ms(t_mesh),
            t_total_ms: clamp_ms(t0.elapsed()),
        };
        log::info!(
            target: "perf",
            "ms={} generate dims=({}, {}, {}) gen_ms={} mesh_ms={} instances={} culled={}",
            stats.t_total_ms,
            self.size.width,
            self.size.height,
            self.size.width,
            stats.t_gen_ms,
            stats.t_mesh_ms,
            stats.instances,
            stats.culled
        );

        self.grid = grid;
        self.batches = batches;
        self.last_stats = Some(stats);
        Ok(())
    }

    #[inline]
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    #[inline]
    pub fn batches(&self) -> &InstanceBatches {
        &self.batches
    }

    pub fn batch(&self, id: BlockId) -> Option<&InstanceBatch> {
        self.batches.get(id)
    }

    /// Per-type slot count of the current batches (`width * height * width` of
    /// the last generated grid; zero before the first run).
    pub fn capacity_per_type(&self) -> usize {
        self.grid.total_cells()
    }

    pub fn last_stats(&self) -> Option<&RunStats> {
        self.last_stats.as_ref()
    }

    #[inline]
    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    /// Resource parameter edits through this handle show up on the next `generate()`.
    pub fn registry_mut(&mut self) -> &mut BlockRegistry {
        &mut self.registry
    }
}
