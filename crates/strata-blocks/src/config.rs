use serde::Deserialize;

use crate::material::{MaterialSelector, RenderInfo};
use crate::types::ResourceParams;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct BlocksConfig {
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BlockDef {
    pub name: String,
    #[serde(default)]
    pub id: Option<u16>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub materials: Option<MaterialsDef>,
    #[serde(default)]
    pub resource: Option<ResourceParams>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum MaterialsDef {
    // Simple: materials = "dirt"
    Single(String),
    // Per face: materials = { top = "grass_top", side = "grass_side" }
    Faces {
        #[serde(default)]
        all: Option<String>,
        #[serde(default)]
        top: Option<String>,
        #[serde(default)]
        bottom: Option<String>,
        #[serde(default)]
        side: Option<String>,
    },
}

impl From<MaterialsDef> for MaterialSelector {
    fn from(def: MaterialsDef) -> Self {
        match def {
            MaterialsDef::Single(key) => MaterialSelector::Single(key),
            MaterialsDef::Faces {
                all,
                top,
                bottom,
                side,
            } => MaterialSelector::Faces {
                all,
                top,
                bottom,
                side,
            },
        }
    }
}

impl BlockDef {
    pub(crate) fn render_info(&self) -> RenderInfo {
        RenderInfo {
            color: self.color.clone(),
            materials: self
                .materials
                .clone()
                .map(MaterialSelector::from)
                .unwrap_or_default(),
        }
    }
}
