use serde::Deserialize;

use crate::error::RegistryError;

pub type BlockId = u16;

/// Id reserved for the empty (air) block in every registry.
pub const EMPTY: BlockId = 0;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FaceRole {
    Top,
    Bottom,
    Side,
}

/// Noise thresholding parameters for resource-class blocks.
///
/// Coordinates are divided by `scale` per axis before sampling 3D noise; a cell
/// becomes the resource when the sample is strictly greater than `scarcity`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct ResourceParams {
    pub scale: [f32; 3],
    pub scarcity: f32,
}

impl ResourceParams {
    #[inline]
    pub const fn new(scale_x: f32, scale_y: f32, scale_z: f32, scarcity: f32) -> Self {
        Self {
            scale: [scale_x, scale_y, scale_z],
            scarcity,
        }
    }

    #[inline]
    pub fn scale_x(&self) -> f32 {
        self.scale[0]
    }

    #[inline]
    pub fn scale_y(&self) -> f32 {
        self.scale[1]
    }

    #[inline]
    pub fn scale_z(&self) -> f32 {
        self.scale[2]
    }

    pub fn validate(&self, block: &str) -> Result<(), RegistryError> {
        for (axis, v) in ['x', 'y', 'z'].into_iter().zip(self.scale) {
            if !v.is_finite() || v <= 0.0 {
                return Err(RegistryError::InvalidScale {
                    block: block.to_string(),
                    axis,
                    value: v,
                });
            }
        }
        if !self.scarcity.is_finite() || !(0.0..=1.0).contains(&self.scarcity) {
            return Err(RegistryError::InvalidScarcity {
                block: block.to_string(),
                value: self.scarcity,
            });
        }
        Ok(())
    }
}
