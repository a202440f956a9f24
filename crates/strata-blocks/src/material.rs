use crate::types::FaceRole;

/// Material keys a renderer binds for a block. The keys are opaque to the core.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum MaterialSelector {
    #[default]
    None,
    Single(String),
    Faces {
        all: Option<String>,
        top: Option<String>,
        bottom: Option<String>,
        side: Option<String>,
    },
}

impl MaterialSelector {
    pub fn single(key: impl Into<String>) -> Self {
        MaterialSelector::Single(key.into())
    }

    /// Picks the key for a face role, falling back to `all` for per-face selectors.
    pub fn material_for(&self, role: FaceRole) -> Option<&str> {
        match self {
            MaterialSelector::None => None,
            MaterialSelector::Single(key) => Some(key.as_str()),
            MaterialSelector::Faces {
                all,
                top,
                bottom,
                side,
            } => {
                let pick = match role {
                    FaceRole::Top => top.as_ref(),
                    FaceRole::Bottom => bottom.as_ref(),
                    FaceRole::Side => side.as_ref(),
                };
                pick.or(all.as_ref()).map(String::as_str)
            }
        }
    }
}

/// Render payload passed through to the rendering collaborator untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderInfo {
    pub color: Option<String>,
    pub materials: MaterialSelector,
}

impl RenderInfo {
    pub fn new(color: Option<&str>, materials: MaterialSelector) -> Self {
        Self {
            color: color.map(str::to_string),
            materials,
        }
    }
}
