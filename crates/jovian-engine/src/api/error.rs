//! Construction-time and parameter errors.
//!
//! Nothing here reaches the user at runtime: the frame loop turns
//! [`ParamError`] into a logged, skipped write, and [`ConfigError`] only
//! surfaces while a scene is being built.

/// Errors raised while parsing or validating a [`SceneConfig`](crate::SceneConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON (de)serialization failed.
    #[error("scene JSON error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Two bodies share a name.
    #[error("duplicate body name `{0}`")]
    DuplicateBody(String),

    /// A body references a shader that was never declared.
    #[error("body `{body}` references unknown shader `{shader}`")]
    UnknownShader { body: String, shader: String },

    /// A per-body uniform override does not fit the body's shader.
    #[error("body `{body}`: bad uniform override: {source}")]
    InvalidOverride {
        body: String,
        #[source]
        source: ParamError,
    },

    /// Two shaders share a name.
    #[error("duplicate shader name `{0}`")]
    DuplicateShader(String),

    /// Two controls share a name.
    #[error("duplicate control name `{0}`")]
    DuplicateControl(String),

    /// A control targets a body that does not exist.
    #[error("control `{control}` targets unknown body `{body}`")]
    UnknownControlBody { control: String, body: String },

    /// A control targets a parameter its body's shader does not declare.
    #[error("control `{control}` targets `{param}`, which body `{body}` does not declare")]
    UnknownControlParam {
        control: String,
        body: String,
        param: String,
    },

    /// A control targets a parameter that is not a float.
    #[error("control `{control}` targets non-float parameter `{param}`")]
    NonScalarControlParam { control: String, param: String },

    /// `min > max`, a non-positive step, or a default outside the range.
    #[error("control `{control}` has an invalid range: {reason}")]
    InvalidRange { control: String, reason: &'static str },
}

/// Errors from writing a single shading parameter.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    /// The shader schema does not declare this name.
    #[error("unknown shading parameter `{0}`")]
    Unknown(String),

    /// The value's type differs from the declared type.
    #[error("parameter `{name}` expects {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },
}
