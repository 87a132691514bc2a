//! Live-tunable parameter surface.
//!
//! A static, ordered declaration of range-bounded sliders. Each control is
//! bound either to one float uniform of one body or to the sun's polar
//! angle. Changes are applied immediately (no queue, no undo) through the
//! same bridge the frame loop uses.

use serde::{Deserialize, Serialize};

use crate::api::types::BodyId;
use crate::components::uniforms::UniformValue;
use crate::core::registry::BodyRegistry;
use crate::systems::shading::{self, PushOutcome};
use crate::systems::sun::SunDirector;

/// What a control writes into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlTarget {
    /// A float uniform on a named body.
    Uniform { body: String, param: String },
    /// The sun director's polar angle.
    SunPolarAngle,
}

/// One slider as declared in the scene config and shown by the panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TunableControl {
    /// Unique key the panel reports changes under.
    pub name: String,
    /// Panel label; the panel falls back to `name` when empty.
    #[serde(default)]
    pub label: String,
    /// Panel folder ("Planet", "Sun", ...).
    #[serde(default)]
    pub folder: String,
    /// Current value (initial value at declaration).
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub target: ControlTarget,
}

impl TunableControl {
    /// A control bound to a body uniform; the uniform name doubles as the key.
    pub fn uniform(body: &str, param: &str, value: f32, min: f32, max: f32, step: f32) -> Self {
        Self {
            name: param.to_string(),
            label: String::new(),
            folder: String::new(),
            value,
            min,
            max,
            step,
            target: ControlTarget::Uniform {
                body: body.to_string(),
                param: param.to_string(),
            },
        }
    }

    pub fn sun_polar(name: &str, value: f32, min: f32, max: f32, step: f32) -> Self {
        Self {
            name: name.to_string(),
            label: String::new(),
            folder: String::new(),
            value,
            min,
            max,
            step,
            target: ControlTarget::SunPolarAngle,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn in_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// The declared controls plus their resolved body bindings.
#[derive(Debug, Clone, Default)]
pub struct ControlSurface {
    controls: Vec<TunableControl>,
    /// Resolved body per control; `None` for sun-bound controls.
    bound: Vec<Option<BodyId>>,
}

impl ControlSurface {
    /// Bind declarations against the registry. Unresolvable bindings are
    /// kept (the config validator already reported them) but write nowhere.
    pub fn bind(controls: Vec<TunableControl>, bodies: &BodyRegistry) -> Self {
        let bound = controls
            .iter()
            .map(|c| match &c.target {
                ControlTarget::Uniform { body, .. } => bodies.id_of(body),
                ControlTarget::SunPolarAngle => None,
            })
            .collect();
        Self { controls, bound }
    }

    pub fn get(&self, name: &str) -> Option<&TunableControl> {
        self.controls.iter().find(|c| c.name == name)
    }

    /// Declarations in panel order.
    pub fn controls(&self) -> &[TunableControl] {
        &self.controls
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// User moved a slider. Clamps, stores, and writes through immediately.
    /// Returns the value actually applied, or `None` for an unknown control
    /// or a non-finite input.
    pub fn set(
        &mut self,
        name: &str,
        value: f32,
        bodies: &mut BodyRegistry,
        sun: &mut SunDirector,
    ) -> Option<f32> {
        let Some(idx) = self.controls.iter().position(|c| c.name == name) else {
            log::warn!("unknown control `{name}`");
            return None;
        };
        if !value.is_finite() {
            log::warn!("control `{name}`: ignoring non-finite value");
            return None;
        }
        let applied = self.controls[idx].clamp(value);
        self.controls[idx].value = applied;
        self.write(idx, bodies, sun);
        Some(applied)
    }

    /// Re-write every control (scene start).
    pub fn apply_all(&self, bodies: &mut BodyRegistry, sun: &mut SunDirector) {
        for idx in 0..self.controls.len() {
            self.write(idx, bodies, sun);
        }
    }

    /// Re-write the controls bound to one body (its renderable just attached).
    pub fn apply_for_body(&self, id: BodyId, bodies: &mut BodyRegistry) -> usize {
        let mut applied = 0;
        for (control, bound) in self.controls.iter().zip(&self.bound) {
            if *bound != Some(id) {
                continue;
            }
            if let Some(outcome) = Self::write_uniform(control, id, bodies) {
                if outcome == PushOutcome::Applied {
                    applied += 1;
                }
            }
        }
        applied
    }

    fn write(&self, idx: usize, bodies: &mut BodyRegistry, sun: &mut SunDirector) {
        let control = &self.controls[idx];
        match (&control.target, self.bound[idx]) {
            (ControlTarget::SunPolarAngle, _) => {
                sun.set_polar((control.value as f64).clamp(0.0, std::f64::consts::PI));
            }
            (ControlTarget::Uniform { .. }, Some(id)) => {
                Self::write_uniform(control, id, bodies);
            }
            (ControlTarget::Uniform { body, .. }, None) => {
                log::warn!("control `{}`: body `{body}` not in scene", control.name);
            }
        }
    }

    fn write_uniform(control: &TunableControl, id: BodyId, bodies: &mut BodyRegistry) -> Option<PushOutcome> {
        let ControlTarget::Uniform { param, .. } = &control.target else {
            return None;
        };
        let body = bodies.get_mut(id)?;
        Some(shading::push(body, param, UniformValue::Float(control.value)))
    }
}
