//! Worldgen configuration, seeded noise, and the terrain generation pipeline.
#![forbid(unsafe_code)]

pub mod generation;
pub mod noise;
pub mod worldgen;

pub use generation::{
    GEN_STAGE_COUNT, GEN_STAGE_LABELS, GenStage, GenerationError, GenerationStats,
    TerrainGenerator, surface_height,
};
pub use noise::{ConstantNoise, NoiseProvider, SimplexNoise, seed_from_str};
pub use worldgen::{
    ConfigError, MeshSettings, ResourceOverride, TerrainParams, WorldGenConfig, WorldSize,
    load_config_from_path,
};
