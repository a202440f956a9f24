use std::path::PathBuf;

use clap::Parser;
use strata_world::WorldGenConfig;

#[derive(Parser, Debug)]
#[command(name = "strata", about = "Generate a voxel terrain and report its instance batches")]
pub struct Args {
    /// World extent along X and Z
    #[arg(long)]
    pub width: Option<usize>,
    /// World extent along Y
    #[arg(long)]
    pub height: Option<usize>,
    /// Edge length of one block in world units
    #[arg(long)]
    pub block_size: Option<f32>,
    /// Worldgen TOML ([size], [terrain], [mesh], [[resources]])
    #[arg(long, default_value = "assets/worldgen/worldgen.toml")]
    pub config: PathBuf,
    /// Block catalog TOML; the built-in catalog is used when omitted
    #[arg(long)]
    pub blocks: Option<PathBuf>,
    /// Batch fully enclosed voxels too
    #[arg(long)]
    pub no_cull: bool,
    /// Skip the heightmap pass and keep only resource veins
    #[arg(long)]
    pub no_terrain: bool,
    /// Regenerate whenever the worldgen file changes
    #[arg(long)]
    pub watch: bool,
}

impl Args {
    /// Flags win over file values.
    pub fn apply_overrides(&self, cfg: &mut WorldGenConfig) {
        if let Some(w) = self.width {
            cfg.size.width = w;
        }
        if let Some(h) = self.height {
            cfg.size.height = h;
        }
        if let Some(bs) = self.block_size {
            cfg.size.block_size = bs;
        }
        if self.no_cull {
            cfg.mesh.cull_obscured = false;
        }
        if self.no_terrain {
            cfg.terrain.enable = false;
        }
    }
}
