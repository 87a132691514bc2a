use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::api::error::ConfigError;
use crate::api::types::BodyKind;
use crate::components::uniforms::{is_frame_owned, ShaderSchema, UniformDecl, UniformValue};
use crate::core::orbit::OrbitState;
use crate::systems::controls::{ControlTarget, TunableControl};
use crate::systems::spin::{PlanetGroupConfig, StarfieldConfig};
use crate::systems::sun::SunConfig;

/// One body as declared by the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub name: String,
    pub kind: BodyKind,
    /// Name of a schema in [`SceneConfig::shaders`].
    pub shader: String,
    /// Ignored for the sun proxy, which takes [`SunConfig::proxy_scale`].
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Placement orbit (moons). Omitted for static bodies.
    #[serde(default)]
    pub orbit: Option<OrbitState>,
    /// Per-body starting values that differ from the shader defaults.
    #[serde(default)]
    pub uniforms: Vec<UniformDecl>,
}

fn default_scale() -> f32 {
    1.0
}

impl BodyConfig {
    pub fn new(name: impl Into<String>, kind: BodyKind, shader: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            shader: shader.into(),
            scale: 1.0,
            orbit: None,
            uniforms: Vec::new(),
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_orbit(mut self, orbit: OrbitState) -> Self {
        self.orbit = Some(orbit);
        self
    }

    /// Override a shader default for this body only.
    pub fn with_uniform(mut self, name: impl Into<String>, value: UniformValue) -> Self {
        self.uniforms.push(UniformDecl {
            name: name.into(),
            default: value,
        });
        self
    }
}

/// Everything needed to build a scene, in one place.
///
/// Radii, rates, scales and control ranges live here instead of as
/// scattered constants, so a test can build any scene it likes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Shader schemas, each declared once.
    pub shaders: Vec<ShaderSchema>,
    /// Bodies in registry (and transform-buffer) order.
    pub bodies: Vec<BodyConfig>,
    pub sun: SunConfig,
    pub planet_group: PlanetGroupConfig,
    pub starfield: StarfieldConfig,
    /// Panel controls in display order.
    pub controls: Vec<TunableControl>,
}

impl SceneConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a scene from JSON. Validation is separate (see [`validate`](Self::validate)).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Parse)
    }

    // -- Builder pattern --

    pub fn with_shader(mut self, schema: ShaderSchema) -> Self {
        self.shaders.push(schema);
        self
    }

    pub fn with_body(mut self, body: BodyConfig) -> Self {
        self.bodies.push(body);
        self
    }

    pub fn with_control(mut self, control: TunableControl) -> Self {
        self.controls.push(control);
        self
    }

    pub fn shader(&self, name: &str) -> Option<&ShaderSchema> {
        self.shaders.iter().find(|s| s.name == name)
    }

    pub fn body(&self, name: &str) -> Option<&BodyConfig> {
        self.bodies.iter().find(|b| b.name == name)
    }

    /// Check every cross-reference and range.
    ///
    /// A control bound to a frame-owned uniform is allowed but logged: the
    /// frame loop overwrites it every tick.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for shader in &self.shaders {
            if !seen.insert(shader.name.as_str()) {
                return Err(ConfigError::DuplicateShader(shader.name.clone()));
            }
        }

        let mut seen = HashSet::new();
        for body in &self.bodies {
            if !seen.insert(body.name.as_str()) {
                return Err(ConfigError::DuplicateBody(body.name.clone()));
            }
            let schema = self.shader(&body.shader).ok_or_else(|| ConfigError::UnknownShader {
                body: body.name.clone(),
                shader: body.shader.clone(),
            })?;
            // Overrides must type-check against the schema.
            let mut params = crate::components::uniforms::ShadingParams::from_schema(schema);
            for decl in &body.uniforms {
                params
                    .set(&decl.name, decl.default)
                    .map_err(|source| ConfigError::InvalidOverride {
                        body: body.name.clone(),
                        source,
                    })?;
            }
        }

        let mut seen = HashSet::new();
        for control in &self.controls {
            if !seen.insert(control.name.as_str()) {
                return Err(ConfigError::DuplicateControl(control.name.clone()));
            }
            validate_range(control)?;
            match &control.target {
                ControlTarget::Uniform { body, param } => self.validate_binding(control, body, param)?,
                ControlTarget::SunPolarAngle => validate_polar_range(control)?,
            }
        }
        Ok(())
    }

    fn validate_binding(&self, control: &TunableControl, body: &str, param: &str) -> Result<(), ConfigError> {
        let body_cfg = self.body(body).ok_or_else(|| ConfigError::UnknownControlBody {
            control: control.name.clone(),
            body: body.to_string(),
        })?;
        // Body shader existence was checked above.
        let decl = self
            .shader(&body_cfg.shader)
            .and_then(|s| s.get(param))
            .ok_or_else(|| ConfigError::UnknownControlParam {
                control: control.name.clone(),
                body: body.to_string(),
                param: param.to_string(),
            })?;
        if decl.default.as_float().is_none() {
            return Err(ConfigError::NonScalarControlParam {
                control: control.name.clone(),
                param: param.to_string(),
            });
        }
        if is_frame_owned(param) {
            log::warn!(
                "control `{}` targets frame-owned `{param}`; the frame loop will overwrite it",
                control.name
            );
        }
        Ok(())
    }
}

fn validate_range(control: &TunableControl) -> Result<(), ConfigError> {
    let reason = if !(control.min.is_finite() && control.max.is_finite() && control.value.is_finite()) {
        Some("bounds and value must be finite")
    } else if control.min > control.max {
        Some("min is greater than max")
    } else if !(control.step > 0.0) {
        Some("step must be positive")
    } else if control.value < control.min || control.value > control.max {
        Some("initial value outside [min, max]")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(ConfigError::InvalidRange {
            control: control.name.clone(),
            reason,
        }),
        None => Ok(()),
    }
}

/// The sun director takes the polar angle as-is, so its control must stay
/// inside [0, π].
fn validate_polar_range(control: &TunableControl) -> Result<(), ConfigError> {
    if control.min < 0.0 || control.max > std::f32::consts::PI {
        return Err(ConfigError::InvalidRange {
            control: control.name.clone(),
            reason: "sun polar angle range must lie within [0, pi]",
        });
    }
    Ok(())
}
