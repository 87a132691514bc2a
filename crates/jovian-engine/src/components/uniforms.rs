//! Shading parameters: typed values, per-shader schemas, and the
//! per-body value map whose keys are fixed by the schema.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::error::ParamError;

/// Name of the elapsed-time uniform written every frame.
pub const U_TIME: &str = "uTime";
/// Name of the sun-position uniform written every frame.
pub const U_SUN_POSITION: &str = "uSunPosition";

/// Parameters the per-frame updater owns. If a control also targets one of
/// these, the updater's write lands last before the draw and wins.
pub const FRAME_OWNED_PARAMS: [&str; 2] = [U_TIME, U_SUN_POSITION];

/// Whether `name` is written by the frame loop.
pub fn is_frame_owned(name: &str) -> bool {
    FRAME_OWNED_PARAMS.contains(&name)
}

/// A value bound to a shader uniform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniformValue {
    Float(f32),
    Vec3(Vec3),
    /// RGB in [0, 1], sRGB as written in the scene's hex literals.
    Color(Vec3),
}

impl UniformValue {
    /// Parse a `#rrggbb` (or `rrggbb`) literal into a color value.
    pub fn color_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            return None;
        }
        let channel = |i: usize| -> Option<f32> {
            let byte = u8::from_str_radix(digits.get(i..i + 2)?, 16).ok()?;
            Some(byte as f32 / 255.0)
        };
        Some(UniformValue::Color(Vec3::new(channel(0)?, channel(2)?, channel(4)?)))
    }

    /// Type tag for diagnostics and the JS sink.
    pub fn type_name(&self) -> &'static str {
        match self {
            UniformValue::Float(_) => "float",
            UniformValue::Vec3(_) => "vec3",
            UniformValue::Color(_) => "color",
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match *self {
            UniformValue::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Components as a triple; floats put their value in `x`.
    pub fn components(&self) -> [f32; 3] {
        match *self {
            UniformValue::Float(v) => [v, 0.0, 0.0],
            UniformValue::Vec3(v) | UniformValue::Color(v) => v.to_array(),
        }
    }

    fn same_type(&self, other: &UniformValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// One declared uniform: name plus default (which also fixes the type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformDecl {
    pub name: String,
    pub default: UniformValue,
}

/// The uniform layout of one shader, declared once and shared by
/// every body using it and by the controls that bind into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaderSchema {
    pub name: String,
    pub uniforms: Vec<UniformDecl>,
}

impl ShaderSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uniforms: Vec::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, default: UniformValue) -> Self {
        self.uniforms.push(UniformDecl {
            name: name.into(),
            default,
        });
        self
    }

    pub fn get(&self, name: &str) -> Option<&UniformDecl> {
        self.uniforms.iter().find(|u| u.name == name)
    }
}

/// A body's current uniform values.
///
/// Keys and types are frozen at creation from the schema; `set` only
/// replaces values.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadingParams {
    entries: Vec<(String, UniformValue)>,
}

impl ShadingParams {
    pub fn from_schema(schema: &ShaderSchema) -> Self {
        Self {
            entries: schema
                .uniforms
                .iter()
                .map(|u| (u.name.clone(), u.default))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Replace the value of a declared parameter.
    pub fn set(&mut self, name: &str, value: UniformValue) -> Result<(), ParamError> {
        let slot = self
            .entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
            .ok_or_else(|| ParamError::Unknown(name.to_string()))?;
        if !slot.same_type(&value) {
            return Err(ParamError::TypeMismatch {
                name: name.to_string(),
                expected: slot.type_name(),
                actual: value.type_name(),
            });
        }
        *slot = value;
        Ok(())
    }

    /// Iterate in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, UniformValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
