use std::fs;
use std::path::Path;

use hashbrown::{HashMap, HashSet};

use super::config::BlocksConfig;
use super::error::RegistryError;
use super::material::{MaterialSelector, RenderInfo};
use super::types::{BlockId, EMPTY, FaceRole, ResourceParams};

#[derive(Clone, Debug, PartialEq)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub resource: Option<ResourceParams>,
    pub render: RenderInfo,
}

impl BlockType {
    pub fn new(id: BlockId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            resource: None,
            render: RenderInfo::default(),
        }
    }

    pub fn with_resource(mut self, params: ResourceParams) -> Self {
        self.resource = Some(params);
        self
    }

    pub fn with_render(mut self, render: RenderInfo) -> Self {
        self.render = render;
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.id == EMPTY
    }

    #[inline]
    pub fn is_resource(&self) -> bool {
        self.resource.is_some()
    }

    #[inline]
    pub fn material_for(&self, role: FaceRole) -> Option<&str> {
        self.render.materials.material_for(role)
    }
}

/// Ordered catalog of block types.
///
/// Registration order is significant: resource passes run in this order and a
/// later resource overwrites an earlier one on shared cells.
#[derive(Clone, Debug)]
pub struct BlockRegistry {
    blocks: Vec<BlockType>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<BlockId, usize>,
}

impl BlockRegistry {
    /// The stock catalog: empty, grass, dirt and three resource types.
    pub fn builtin() -> Self {
        let faces = |top: &str, side: &str| MaterialSelector::Faces {
            all: None,
            top: Some(top.to_string()),
            bottom: Some(top.to_string()),
            side: Some(side.to_string()),
        };
        Self::assemble(vec![
            BlockType::new(EMPTY, "empty"),
            BlockType::new(1, "grass")
                .with_render(RenderInfo::new(Some("#CCFFCC"), faces("grass_top", "grass_side"))),
            BlockType::new(2, "dirt")
                .with_render(RenderInfo::new(Some("#816C5F"), MaterialSelector::single("dirt"))),
            BlockType::new(3, "stone")
                .with_resource(ResourceParams::new(30.0, 30.0, 30.0, 0.5))
                .with_render(RenderInfo::new(Some("#e3cba5"), MaterialSelector::single("stone"))),
            BlockType::new(4, "coalOre")
                .with_resource(ResourceParams::new(20.0, 20.0, 20.0, 0.5))
                .with_render(RenderInfo::new(
                    Some("#161616"),
                    MaterialSelector::single("coal_ore"),
                )),
            BlockType::new(5, "ironOre")
                .with_resource(ResourceParams::new(60.0, 60.0, 60.0, 0.5))
                .with_render(RenderInfo::new(
                    Some("#676767"),
                    MaterialSelector::single("iron_ore"),
                )),
        ])
    }

    pub fn from_types(blocks: Vec<BlockType>) -> Result<Self, RegistryError> {
        validate_types(&blocks)?;
        Ok(Self::assemble(blocks))
    }

    pub fn from_configs(cfg: BlocksConfig) -> Result<Self, RegistryError> {
        let mut blocks = Vec::with_capacity(cfg.blocks.len());
        for (i, def) in cfg.blocks.into_iter().enumerate() {
            let render = def.render_info();
            let id = def.id.unwrap_or(i as BlockId);
            blocks.push(BlockType {
                id,
                name: def.name,
                resource: def.resource,
                render,
            });
        }
        Self::from_types(blocks)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, RegistryError> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Self::from_configs(cfg)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    fn assemble(blocks: Vec<BlockType>) -> Self {
        let by_name = blocks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name.clone(), i))
            .collect();
        let by_id = blocks.iter().enumerate().map(|(i, t)| (t.id, i)).collect();
        Self {
            blocks,
            by_name,
            by_id,
        }
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.by_id.get(&id).map(|&i| &self.blocks[i])
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).map(|&i| self.blocks[i].id)
    }

    pub fn by_name(&self, name: &str) -> Option<&BlockType> {
        self.by_name.get(name).map(|&i| &self.blocks[i])
    }

    #[inline]
    pub fn empty_id(&self) -> BlockId {
        EMPTY
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockType> {
        self.blocks.iter()
    }

    /// Every type except the empty block, in registration order.
    pub fn non_empty(&self) -> impl Iterator<Item = &BlockType> {
        self.blocks.iter().filter(|t| !t.is_empty())
    }

    /// Resource-class types in registration order.
    pub fn resources(&self) -> impl Iterator<Item = (&BlockType, &ResourceParams)> {
        self.blocks
            .iter()
            .filter_map(|t| t.resource.as_ref().map(|p| (t, p)))
    }

    pub fn resource_ids(&self) -> Vec<BlockId> {
        self.resources().map(|(t, _)| t.id).collect()
    }

    /// Replaces the generation parameters of an existing resource type.
    pub fn set_resource_params(
        &mut self,
        name: &str,
        params: ResourceParams,
    ) -> Result<(), RegistryError> {
        let idx = *self
            .by_name
            .get(name)
            .ok_or_else(|| RegistryError::UnknownBlock(name.to_string()))?;
        let ty = &mut self.blocks[idx];
        if ty.resource.is_none() {
            return Err(RegistryError::NotAResource(name.to_string()));
        }
        params.validate(name)?;
        ty.resource = Some(params);
        Ok(())
    }

    /// Copy of this registry with every resource type removed.
    pub fn without_resources(&self) -> Self {
        Self::assemble(
            self.blocks
                .iter()
                .filter(|t| !t.is_resource())
                .cloned()
                .collect(),
        )
    }
}

/// Catalog-wide checks: unique ids and names, exactly one empty block that is
/// not a resource, and sane resource parameters.
fn validate_types(blocks: &[BlockType]) -> Result<(), RegistryError> {
    let mut seen_ids: HashMap<BlockId, &str> = HashMap::new();
    let mut seen_names: HashSet<&str> = HashSet::new();
    let mut has_empty = false;
    for ty in blocks {
        if let Some(first) = seen_ids.insert(ty.id, ty.name.as_str()) {
            return Err(RegistryError::DuplicateId {
                id: ty.id,
                first: first.to_string(),
                second: ty.name.clone(),
            });
        }
        if !seen_names.insert(ty.name.as_str()) {
            return Err(RegistryError::DuplicateName(ty.name.clone()));
        }
        if ty.is_empty() {
            if ty.is_resource() {
                return Err(RegistryError::EmptyIsResource(ty.name.clone()));
            }
            has_empty = true;
        }
        if let Some(params) = &ty.resource {
            params.validate(&ty.name)?;
        }
    }
    if !has_empty {
        return Err(RegistryError::MissingEmpty);
    }
    Ok(())
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
