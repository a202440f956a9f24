//! Block types, resource generation parameters, and the block registry.
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod material;
pub mod registry;
pub mod types;

pub use error::RegistryError;
pub use material::{MaterialSelector, RenderInfo};
pub use registry::{BlockRegistry, BlockType};
pub use types::{BlockId, EMPTY, FaceRole, ResourceParams};
