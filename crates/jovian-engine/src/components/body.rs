use std::fmt;

use glam::{Quat, Vec3};
use crate::api::types::{BodyId, BodyKind};
use crate::components::uniforms::{ShaderSchema, ShadingParams, U_SUN_POSITION, U_TIME};
use crate::core::orbit::OrbitState;
use crate::systems::shading::UniformSink;

/// World-space placement consumed by the external transform hierarchy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    pub rotation: Quat,
    /// Uniform scale.
    pub scale: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

/// One renderable in the scene.
///
/// A body owns its orbit, its uniform values and (once the JS side has
/// mounted its mesh) the sink those values are forwarded to. It never
/// holds a reference to another body.
pub struct Body {
    /// Unique identifier (also its transform-buffer slot).
    pub id: BodyId,
    /// Name used by the JS shell and the control panel to address this body.
    pub name: String,
    pub kind: BodyKind,
    /// Placement orbit. `None` for bodies that stay put (planet, atmosphere).
    pub orbit: Option<OrbitState>,
    /// Size multiplier applied to the unit sphere geometry.
    pub visual_scale: f32,
    /// Output placement, rewritten by the frame loop.
    pub placement: Placement,
    /// Current uniform values; keys fixed by the shader schema.
    pub params: ShadingParams,
    /// Name of the shader schema the params were built from.
    pub shader: String,
    pub(crate) sink: Option<Box<dyn UniformSink>>,
    /// The attached sink has received a full replay of `params`.
    pub(crate) primed: bool,
}

impl Body {
    /// Create a body whose parameters start at the schema defaults.
    pub fn new(id: BodyId, name: impl Into<String>, kind: BodyKind, schema: &ShaderSchema) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            orbit: None,
            visual_scale: 1.0,
            placement: Placement::default(),
            params: ShadingParams::from_schema(schema),
            shader: schema.name.clone(),
            sink: None,
            primed: false,
        }
    }

    // -- Builder pattern --

    pub fn with_orbit(mut self, orbit: OrbitState) -> Self {
        self.placement.position = orbit.position();
        self.orbit = Some(orbit);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.visual_scale = scale;
        self.placement.scale = scale;
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.placement.position = position;
        self
    }

    /// Whether the shader consumes the broadcast sun position.
    pub fn accepts_sun_position(&self) -> bool {
        self.params.contains(U_SUN_POSITION)
    }

    /// Whether the shader consumes elapsed time.
    pub fn accepts_time(&self) -> bool {
        self.params.contains(U_TIME)
    }

    /// A sink is attached and reports ready.
    pub fn is_ready(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| s.is_ready())
    }

    pub fn is_attached(&self) -> bool {
        self.sink.is_some()
    }

    /// Attached and ready, but not yet given a full replay.
    pub(crate) fn needs_priming(&self) -> bool {
        !self.primed && self.is_ready()
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("orbit", &self.orbit)
            .field("visual_scale", &self.visual_scale)
            .field("placement", &self.placement)
            .field("shader", &self.shader)
            .field("attached", &self.sink.is_some())
            .finish()
    }
}
