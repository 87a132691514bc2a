//! Planet group spin/tilt and starfield drift.

use glam::{EulerRot, Quat};
use serde::{Deserialize, Serialize};

use crate::core::orbit::wrap_angle;

/// Planet group configuration. The planet mesh and its atmosphere shell
/// share one transform so they turn together; moons are not members.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetGroupConfig {
    /// Static tilt about X, radians.
    pub tilt: f32,
    /// Yaw rate, rad/s. Negative spins clockwise seen from +Y.
    pub rotation_rate: f64,
}

impl Default for PlanetGroupConfig {
    fn default() -> Self {
        Self {
            tilt: 0.055,
            rotation_rate: -0.15,
        }
    }
}

/// Yaw-over-time plus fixed tilt for the planet group.
#[derive(Debug, Clone)]
pub struct PlanetSpin {
    rotation_rate: f64,
    tilt: f32,
    rotation_y: f64,
}

impl PlanetSpin {
    pub fn new(rotation_rate: f64, tilt: f32) -> Self {
        Self {
            rotation_rate,
            tilt,
            rotation_y: 0.0,
        }
    }

    pub fn from_config(config: &PlanetGroupConfig) -> Self {
        Self::new(config.rotation_rate, config.tilt)
    }

    /// Absolute yaw for this elapsed time (not wrapped; gets converted to a quaternion anyway).
    pub fn update(&mut self, elapsed: f64) -> f64 {
        self.rotation_y = elapsed * self.rotation_rate;
        self.rotation_y
    }

    pub fn rotation_y(&self) -> f64 {
        self.rotation_y
    }

    /// Group orientation: tilt about X, then yaw about the tilted Y.
    /// The yaw is wrapped before narrowing so long sessions keep f32 precision.
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.tilt, wrap_angle(self.rotation_y) as f32, 0.0)
    }
}

/// Starfield configuration. Everything except `drift_rate` is handed to the
/// JS points generator untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub radius: f32,
    pub depth: f32,
    pub count: u32,
    pub factor: f32,
    pub fade: bool,
    /// Yaw rate, rad/s.
    pub drift_rate: f64,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            radius: 80.0,
            depth: 10.0,
            count: 100,
            factor: 7.0,
            fade: true,
            drift_rate: 0.01,
        }
    }
}

/// Incremental yaw for the background stars.
#[derive(Debug, Clone, Default)]
pub struct StarfieldDrift {
    rate: f64,
    yaw: f64,
}

impl StarfieldDrift {
    pub fn new(rate: f64) -> Self {
        Self { rate, yaw: 0.0 }
    }

    pub fn update(&mut self, delta: f64) -> f64 {
        self.yaw = wrap_angle(self.yaw + delta * self.rate);
        self.yaw
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw as f32)
    }
}
