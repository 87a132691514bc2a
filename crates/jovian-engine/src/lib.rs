pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;

// Re-export key types at crate root for convenience
pub use api::config::{BodyConfig, SceneConfig};
pub use api::error::{ConfigError, ParamError};
pub use api::types::{BodyId, BodyKind};
pub use components::body::{Body, Placement};
pub use components::uniforms::{
    is_frame_owned, ShaderSchema, ShadingParams, UniformDecl, UniformValue,
    FRAME_OWNED_PARAMS, U_SUN_POSITION, U_TIME,
};
pub use core::clock::SceneClock;
pub use core::orbit::{spherical_to_cartesian, wrap_angle, OrbitState};
pub use core::orrery::Orrery;
pub use core::registry::BodyRegistry;
pub use renderer::transform::{BodyTransform, TransformBuffer};
pub use bridge::manifest::{BodyDescriptor, SceneManifest};
pub use systems::controls::{ControlSurface, ControlTarget, TunableControl};
pub use systems::orbits::{BroadcastReport, FrameInputs};
pub use systems::shading::{PushOutcome, UniformSink};
pub use systems::spin::{PlanetGroupConfig, PlanetSpin, StarfieldConfig, StarfieldDrift};
pub use systems::sun::{SunConfig, SunDirector};
