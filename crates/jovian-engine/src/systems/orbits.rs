use glam::Vec3;

use crate::components::body::Body;
use crate::components::uniforms::{UniformValue, U_SUN_POSITION, U_TIME};
use crate::systems::shading::{self, PushOutcome};

/// Per-frame values every body shades against. Computed once per tick,
/// before any body is touched, so all bodies see the same sun.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInputs {
    pub elapsed: f64,
    pub sun_position: Vec3,
}

/// Advance a body's placement orbit, if it has one, and move it there.
/// Bodies without an orbit keep whatever placement they were given.
pub fn update_orbit(body: &mut Body, delta: f64) {
    if let Some(orbit) = body.orbit.as_mut() {
        orbit.advance(delta);
        body.placement.position = orbit.position();
    }
}

/// Forward the frame-owned uniforms to a body, limited to the ones its
/// shader declares.
pub fn broadcast(body: &mut Body, frame: &FrameInputs) -> BroadcastReport {
    let mut report = BroadcastReport::default();
    if body.accepts_time() {
        report.record(shading::push(body, U_TIME, UniformValue::Float(frame.elapsed as f32)));
    }
    if body.accepts_sun_position() {
        report.record(shading::push(body, U_SUN_POSITION, UniformValue::Vec3(frame.sun_position)));
    }
    report
}

/// Tally of one body's broadcast, mostly for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub applied: u32,
    pub deferred: u32,
}

impl BroadcastReport {
    fn record(&mut self, outcome: PushOutcome) {
        match outcome {
            PushOutcome::Applied => self.applied += 1,
            PushOutcome::Deferred => self.deferred += 1,
            PushOutcome::Rejected => {}
        }
    }
}
