use std::collections::HashMap;

use strata_blocks::{BlockId, BlockRegistry};
use strata_geom::Vec3;

/// World-space centers of every visible voxel of one block type.
///
/// `positions[i]` belongs to the grid cell whose `instance_id` is `i`.
#[derive(Clone, Debug, PartialEq)]
pub struct InstanceBatch {
    pub block_id: BlockId,
    pub name: String,
    pub positions: Vec<Vec3>,
    /// Upper bound on `count()`: the grid's total cell count.
    pub capacity: usize,
}

impl InstanceBatch {
    pub fn new(block_id: BlockId, name: impl Into<String>, capacity: usize) -> Self {
        Self {
            block_id,
            name: name.into(),
            positions: Vec::new(),
            capacity,
        }
    }

    /// Populated entries. Never the capacity.
    #[inline]
    pub fn count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Column-major 4x4 translation matrices, one per instance.
    pub fn transforms(&self) -> impl Iterator<Item = [f32; 16]> + '_ {
        self.positions.iter().map(|p| {
            [
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                p.x, p.y, p.z, 1.0,
            ]
        })
    }
}

/// One batch per non-empty registered type, in registry order.
#[derive(Clone, Debug, Default)]
pub struct InstanceBatches {
    batches: Vec<InstanceBatch>,
    slots: HashMap<BlockId, usize>,
    /// Non-empty voxels dropped because all six neighbors were solid.
    pub culled: usize,
    /// Non-empty voxels whose id is not in the registry.
    pub skipped_unknown: usize,
}

impl InstanceBatches {
    pub(crate) fn for_registry(reg: &BlockRegistry, capacity: usize) -> Self {
        let batches: Vec<InstanceBatch> = reg
            .non_empty()
            .map(|t| InstanceBatch::new(t.id, t.name.as_str(), capacity))
            .collect();
        let slots = batches
            .iter()
            .enumerate()
            .map(|(i, b)| (b.block_id, i))
            .collect();
        Self {
            batches,
            slots,
            culled: 0,
            skipped_unknown: 0,
        }
    }

    #[inline]
    pub(crate) fn slot_mut(&mut self, id: BlockId) -> Option<&mut InstanceBatch> {
        let i = *self.slots.get(&id)?;
        self.batches.get_mut(i)
    }

    pub fn get(&self, id: BlockId) -> Option<&InstanceBatch> {
        self.slots.get(&id).and_then(|&i| self.batches.get(i))
    }

    pub fn by_name(&self, name: &str) -> Option<&InstanceBatch> {
        self.batches.iter().find(|b| b.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InstanceBatch> {
        self.batches.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn total_instances(&self) -> usize {
        self.batches.iter().map(InstanceBatch::count).sum()
    }
}
