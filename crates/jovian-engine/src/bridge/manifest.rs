use serde::{Deserialize, Serialize};

use crate::api::types::BodyKind;
use crate::core::registry::BodyRegistry;
use crate::systems::controls::TunableControl;
use crate::systems::spin::StarfieldConfig;

/// What the JS shell needs to mount the scene: one entry per body in
/// transform-buffer order, the panel declaration, and the star generator
/// settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneManifest {
    pub bodies: Vec<BodyDescriptor>,
    #[serde(default)]
    pub controls: Vec<TunableControl>,
    pub starfield: StarfieldConfig,
}

/// Describes one body slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDescriptor {
    /// Slot in the transform buffer.
    pub index: u32,
    pub name: String,
    pub kind: BodyKind,
    /// Shader schema name; tells the shell which material to build.
    pub shader: String,
    pub scale: f32,
}

impl SceneManifest {
    pub fn describe(bodies: &BodyRegistry, controls: &[TunableControl], starfield: StarfieldConfig) -> Self {
        Self {
            bodies: bodies
                .iter()
                .map(|b| BodyDescriptor {
                    index: b.id.0,
                    name: b.name.clone(),
                    kind: b.kind,
                    shader: b.shader.clone(),
                    scale: b.visual_scale,
                })
                .collect(),
            controls: controls.to_vec(),
            starfield,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
