//! Circular spherical-coordinate orbits. Pure math, no engine dependencies.
//!
//! Angles accumulate in f64; conversion to f32 happens only when a
//! position is handed to the renderer.

use std::f64::consts::TAU;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Wrap an angle into [0, 2π).
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Y-up spherical to Cartesian.
///
/// `polar` is measured from +Y, `azimuth` from +X toward -Z
/// (counterclockwise seen from +Y, like a positive yaw). `(r, π/2, 0)` lies
/// on +X and `polar = π/2` sweeps the XZ (orbital) plane.
pub fn spherical_to_cartesian(radius: f64, polar: f64, azimuth: f64) -> Vec3 {
    let (sin_p, cos_p) = polar.sin_cos();
    let (sin_a, cos_a) = azimuth.sin_cos();
    Vec3::new(
        (radius * sin_p * cos_a) as f32,
        (radius * cos_p) as f32,
        (-radius * sin_p * sin_a) as f32,
    )
}

/// Position on a sphere around the scene center plus its sweep rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitState {
    /// Distance from center. Constant for the life of the scene.
    pub radius: f64,
    /// Angle from +Y in [0, π].
    pub polar: f64,
    /// Angle in the XZ plane in [0, 2π).
    #[serde(default)]
    pub azimuth: f64,
    /// Radians per second added to `azimuth`.
    #[serde(default)]
    pub angular_rate: f64,
}

impl OrbitState {
    /// An equatorial orbit starting at `azimuth`.
    pub fn equatorial(radius: f64, azimuth: f64, angular_rate: f64) -> Self {
        Self {
            radius,
            polar: std::f64::consts::FRAC_PI_2,
            azimuth: wrap_angle(azimuth),
            angular_rate,
        }
    }

    /// Sweep forward by `delta` seconds.
    pub fn advance(&mut self, delta: f64) {
        self.azimuth = wrap_angle(self.azimuth + self.angular_rate * delta);
    }

    pub fn position(&self) -> Vec3 {
        spherical_to_cartesian(self.radius, self.polar, self.azimuth)
    }

    /// Seconds per revolution, or None for a stationary orbit.
    pub fn period(&self) -> Option<f64> {
        if self.angular_rate == 0.0 {
            None
        } else {
            Some(TAU / self.angular_rate.abs())
        }
    }
}
