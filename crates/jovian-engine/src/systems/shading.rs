//! Shading-parameter bridge.
//!
//! The animation core never sees shader internals: it pushes named values
//! into a body, and the body forwards them to whatever [`UniformSink`] the
//! renderer attached. Renderables mount asynchronously, so a body without
//! a ready sink simply skips the write; the next push after it becomes
//! ready goes through.

use crate::components::body::Body;
use crate::components::uniforms::UniformValue;

/// Receiver of uniform writes for one body (a three.js material on the web,
/// a recorder in tests).
pub trait UniformSink {
    /// Whether the underlying GPU-side parameter set exists yet.
    fn is_ready(&self) -> bool {
        true
    }

    /// Write one uniform. The value type already matches the declaration.
    fn set_uniform(&mut self, name: &str, value: UniformValue);
}

/// Result of a single push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// Stored and forwarded to the sink.
    Applied,
    /// No sink, or sink not ready. Nothing changed.
    Deferred,
    /// Unknown name or wrong type for this body's shader. Nothing changed.
    Rejected,
}

/// Push one value into a body's shading parameters.
///
/// Never fails loudly: a not-ready body is skipped, a bad name or type is
/// logged and skipped.
pub fn push(body: &mut Body, name: &str, value: UniformValue) -> PushOutcome {
    let Some(sink) = body.sink.as_deref_mut() else {
        return PushOutcome::Deferred;
    };
    if !sink.is_ready() {
        return PushOutcome::Deferred;
    }
    match body.params.set(name, value) {
        Ok(()) => {
            sink.set_uniform(name, value);
            PushOutcome::Applied
        }
        Err(err) => {
            log::warn!("{}: {}", body.name, err);
            PushOutcome::Rejected
        }
    }
}

/// Install a sink on a body and replay every current value into it.
/// Returns the previously attached sink, if any.
pub fn attach(body: &mut Body, mut sink: Box<dyn UniformSink>) -> Option<Box<dyn UniformSink>> {
    body.primed = sink.is_ready();
    if body.primed {
        for (name, value) in body.params.iter() {
            sink.set_uniform(name, value);
        }
    }
    log::info!("{}: renderable attached ({} uniforms)", body.name, body.params.len());
    body.sink.replace(sink)
}

/// Remove a body's sink. Later pushes are deferred until a new attach.
pub fn detach(body: &mut Body) -> Option<Box<dyn UniformSink>> {
    let sink = body.sink.take();
    body.primed = false;
    if sink.is_some() {
        log::info!("{}: renderable detached", body.name);
    }
    sink
}

/// Replay every current value into an already-attached sink. Used when a
/// sink that was attached before it was ready reports ready.
pub fn flush(body: &mut Body) -> bool {
    let Some(sink) = body.sink.as_deref_mut() else {
        return false;
    };
    if !sink.is_ready() {
        return false;
    }
    for (name, value) in body.params.iter() {
        sink.set_uniform(name, value);
    }
    body.primed = true;
    true
}


#[cfg(test)]
mod tests {
    use super::testing::Recorder;
    use super::*;
    use crate::api::types::{BodyId, BodyKind};
    use crate::components::uniforms::{ShaderSchema, U_SUN_POSITION, U_TIME};
    use glam::Vec3;

    fn planet() -> Body {
        let schema = ShaderSchema::new("planet")
            .with(U_TIME, UniformValue::Float(0.0))
            .with("uNoiseDensity", UniformValue::Float(-40.0))
            .with(U_SUN_POSITION, UniformValue::Vec3(Vec3::ZERO));
        Body::new(BodyId(0), "planet", BodyKind::Planet, &schema)
    }

    #[test]
    fn push_without_sink_is_deferred() {
        let mut body = planet();
        let out = push(&mut body, U_TIME, UniformValue::Float(1.0));
        assert_eq!(out, PushOutcome::Deferred);
        assert_eq!(body.params.get(U_TIME), Some(UniformValue::Float(0.0)));
    }

    #[test]
    fn attach_then_converge() {
        let mut body = planet();
        // Several frames before the mesh mounts.
        for i in 0..3 {
            let out = push(&mut body, U_TIME, UniformValue::Float(i as f32));
            assert_eq!(out, PushOutcome::Deferred);
        }
        let rec = Recorder::ready();
        attach(&mut body, rec.sink());
        // Attach replays defaults.
        assert_eq!(rec.count(), 3);
        assert_eq!(rec.last("uNoiseDensity"), Some(UniformValue::Float(-40.0)));

        let out = push(&mut body, U_TIME, UniformValue::Float(4.0));
        assert_eq!(out, PushOutcome::Applied);
        assert_eq!(rec.last(U_TIME), Some(UniformValue::Float(4.0)));
        assert_eq!(body.params.get(U_TIME), Some(UniformValue::Float(4.0)));
    }

    #[test]
    fn attached_but_not_ready_defers() {
        let mut body = planet();
        let rec = Recorder::not_ready();
        attach(&mut body, rec.sink());
        assert_eq!(rec.count(), 0);
        assert_eq!(push(&mut body, U_TIME, UniformValue::Float(1.0)), PushOutcome::Deferred);

        rec.ready.set(true);
        assert!(body.needs_priming());
        assert!(flush(&mut body));
        assert!(!body.needs_priming());
        assert_eq!(rec.count(), 3);
        assert_eq!(push(&mut body, U_TIME, UniformValue::Float(2.0)), PushOutcome::Applied);
        assert_eq!(rec.last(U_TIME), Some(UniformValue::Float(2.0)));
    }

    #[test]
    fn bad_writes_are_rejected_not_forwarded() {
        let mut body = planet();
        let rec = Recorder::ready();
        attach(&mut body, rec.sink());
        let before = rec.count();
        assert_eq!(push(&mut body, "uMissing", UniformValue::Float(1.0)), PushOutcome::Rejected);
        assert_eq!(push(&mut body, U_TIME, UniformValue::Vec3(Vec3::ONE)), PushOutcome::Rejected);
        assert_eq!(rec.count(), before);
    }

    #[test]
    fn detach_returns_to_deferred() {
        let mut body = planet();
        let rec = Recorder::ready();
        attach(&mut body, rec.sink());
        assert!(detach(&mut body).is_some());
        assert!(!body.is_attached());
        assert_eq!(push(&mut body, U_TIME, UniformValue::Float(1.0)), PushOutcome::Deferred);
        assert!(detach(&mut body).is_none());
        assert!(!flush(&mut body));
    }

    #[test]
    fn reattach_hands_back_old_sink() {
        let mut body = planet();
        let first = Recorder::ready();
        let second = Recorder::ready();
        assert!(attach(&mut body, first.sink()).is_none());
        assert!(attach(&mut body, second.sink()).is_some());
        push(&mut body, U_TIME, UniformValue::Float(9.0));
        assert_eq!(second.last(U_TIME), Some(UniformValue::Float(9.0)));
        assert_ne!(first.last(U_TIME), Some(UniformValue::Float(9.0)));
    }
}
