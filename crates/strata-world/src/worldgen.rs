use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use strata_blocks::{BlockRegistry, RegistryError, ResourceParams};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read worldgen config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse worldgen config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("world {field} must be > 0")]
    ZeroDimension { field: &'static str },
    #[error("world {width}x{height}x{width} exceeds the addressable grid size")]
    TooLarge { width: usize, height: usize },
    #[error("block size must be finite and > 0, got {0}")]
    InvalidBlockSize(f32),
    #[error("terrain scale must be finite and > 0, got {0}")]
    InvalidTerrainScale(f32),
    #[error("terrain {field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Clone, Debug, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default)]
    pub size: WorldSize,
    #[serde(default)]
    pub terrain: TerrainParams,
    #[serde(default)]
    pub mesh: MeshSettings,
    #[serde(default)]
    pub resources: Vec<ResourceOverride>,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            size: WorldSize::default(),
            terrain: TerrainParams::default(),
            mesh: MeshSettings::default(),
            resources: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WorldSize {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_block_size")]
    pub block_size: f32,
}
fn default_width() -> usize {
    28
}
fn default_height() -> usize {
    28
}
fn default_block_size() -> f32 {
    1.0
}
impl Default for WorldSize {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            block_size: default_block_size(),
        }
    }
}

impl WorldSize {
    pub fn new(width: usize, height: usize, block_size: Option<f32>) -> Self {
        Self {
            width,
            height,
            block_size: block_size.unwrap_or_else(default_block_size),
        }
    }

    /// Total cell count, `width * height * width`; also the per-type batch
    /// capacity. `None` when the product overflows `usize`.
    #[inline]
    pub fn total_blocks(&self) -> Option<usize> {
        self.width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(self.width))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroDimension { field: "width" });
        }
        if self.height == 0 {
            return Err(ConfigError::ZeroDimension { field: "height" });
        }
        // Grid accessors address cells with i32 coordinates.
        let max_extent = i32::MAX as usize;
        if self.width > max_extent || self.height > max_extent || self.total_blocks().is_none() {
            return Err(ConfigError::TooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if !self.block_size.is_finite() || self.block_size <= 0.0 {
            return Err(ConfigError::InvalidBlockSize(self.block_size));
        }
        Ok(())
    }
}

/// Heightmap controls for the base terrain pass.
///
/// Column height is `floor(H * (offset + magnitude * noise))` clamped into the grid,
/// where noise is sampled at `(x / scale, z / scale)` keyed by `seed`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TerrainParams {
    #[serde(default = "default_terrain_enable")]
    pub enable: bool,
    #[serde(default = "default_terrain_scale")]
    pub scale: f32,
    #[serde(default = "default_magnitude")]
    pub magnitude: f32,
    #[serde(default = "default_offset")]
    pub offset: f32,
    #[serde(default = "default_seed")]
    pub seed: String,
    #[serde(default = "default_surface")]
    pub surface: String,
    #[serde(default = "default_subsoil")]
    pub subsoil: String,
}
fn default_terrain_enable() -> bool {
    true
}
fn default_terrain_scale() -> f32 {
    30.0
}
fn default_magnitude() -> f32 {
    0.5
}
fn default_offset() -> f32 {
    0.2
}
fn default_seed() -> String {
    "seed".into()
}
fn default_surface() -> String {
    "grass".into()
}
fn default_subsoil() -> String {
    "dirt".into()
}
impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            enable: default_terrain_enable(),
            scale: default_terrain_scale(),
            magnitude: default_magnitude(),
            offset: default_offset(),
            seed: default_seed(),
            surface: default_surface(),
            subsoil: default_subsoil(),
        }
    }
}

impl TerrainParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigError::InvalidTerrainScale(self.scale));
        }
        if !self.magnitude.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "magnitude",
                value: self.magnitude,
            });
        }
        if !self.offset.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "offset",
                value: self.offset,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MeshSettings {
    #[serde(default = "default_cull_obscured")]
    pub cull_obscured: bool,
}
fn default_cull_obscured() -> bool {
    true
}
impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            cull_obscured: default_cull_obscured(),
        }
    }
}

/// Per-resource tweak applied on top of the block catalog, matched by name.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ResourceOverride {
    pub name: String,
    #[serde(default)]
    pub scale: Option<[f32; 3]>,
    #[serde(default)]
    pub scarcity: Option<f32>,
}

impl WorldGenConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let cfg: WorldGenConfig = toml::from_str(toml_str)?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.size.validate()?;
        self.terrain.validate()
    }

    /// Writes the `[[resources]]` overrides into the registry. Every override is
    /// validated before any is applied, so a bad entry leaves the registry as it was.
    pub fn apply_resource_overrides(&self, reg: &mut BlockRegistry) -> Result<(), ConfigError> {
        let mut staged: Vec<(&str, ResourceParams)> = Vec::with_capacity(self.resources.len());
        for ov in &self.resources {
            let ty = reg
                .by_name(&ov.name)
                .ok_or_else(|| RegistryError::UnknownBlock(ov.name.clone()))?;
            let current = ty
                .resource
                .ok_or_else(|| RegistryError::NotAResource(ov.name.clone()))?;
            let next = ResourceParams {
                scale: ov.scale.unwrap_or(current.scale),
                scarcity: ov.scarcity.unwrap_or(current.scarcity),
            };
            next.validate(&ov.name)?;
            staged.push((ov.name.as_str(), next));
        }
        for (name, params) in staged {
            reg.set_resource_params(name, params)?;
        }
        Ok(())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<WorldGenConfig, ConfigError> {
    let s = fs::read_to_string(path)?;
    WorldGenConfig::from_toml_str(&s)
}
