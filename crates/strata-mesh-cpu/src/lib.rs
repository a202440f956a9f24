//! CPU meshing crate: visibility culling and per-type instance batching.
#![forbid(unsafe_code)]

mod batch;
mod build;

pub use batch::{InstanceBatch, InstanceBatches};
pub use build::{MeshOptions, build_instance_batches};
