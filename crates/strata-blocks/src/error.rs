use thiserror::Error;

use crate::types::BlockId;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read block config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse block config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("registry has no empty block with id 0")]
    MissingEmpty,
    #[error("empty block '{0}' cannot carry resource parameters")]
    EmptyIsResource(String),
    #[error("block id {id} used by both '{first}' and '{second}'")]
    DuplicateId {
        id: BlockId,
        first: String,
        second: String,
    },
    #[error("block name '{0}' registered twice")]
    DuplicateName(String),
    #[error("block '{block}': {axis} scale must be finite and > 0, got {value}")]
    InvalidScale {
        block: String,
        axis: char,
        value: f32,
    },
    #[error("block '{block}': scarcity must be within [0, 1], got {value}")]
    InvalidScarcity { block: String, value: f32 },
    #[error("unknown block '{0}'")]
    UnknownBlock(String),
    #[error("block '{0}' is not a resource type")]
    NotAResource(String),
}
