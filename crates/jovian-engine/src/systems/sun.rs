//! Sun director: one spherical coordinate sweeping around the scene.
//!
//! The resulting position is a *shading* input broadcast to every body that
//! declares `uSunPosition`; the visible sun proxy is placed further out
//! along the same direction.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::orbit::OrbitState;

/// Sun configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunConfig {
    /// Lighting orbit. `angular_rate` is the sweep speed in rad/s.
    pub orbit: OrbitState,
    /// The proxy mesh sits at `position * proxy_distance`.
    pub proxy_distance: f32,
    /// Proxy mesh scale.
    pub proxy_scale: f32,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            orbit: OrbitState::equatorial(90.0, std::f64::consts::PI / 1.5, 0.01),
            proxy_distance: 2.0,
            proxy_scale: 1.0,
        }
    }
}

/// Sweeps the light around the scene and exposes its Cartesian position.
#[derive(Debug, Clone)]
pub struct SunDirector {
    orbit: OrbitState,
    position: Vec3,
    proxy_distance: f32,
    proxy_scale: f32,
}

impl SunDirector {
    pub fn new(config: &SunConfig) -> Self {
        Self {
            orbit: config.orbit,
            position: config.orbit.position(),
            proxy_distance: config.proxy_distance,
            proxy_scale: config.proxy_scale,
        }
    }

    /// Advance the sweep by one frame and return the new sun position.
    /// `_elapsed` is accepted for symmetry with the other frame systems; the
    /// sweep is incremental so a polar change never causes a jump in azimuth.
    pub fn update(&mut self, _elapsed: f64, delta: f64) -> Vec3 {
        self.orbit.advance(delta);
        self.position = self.orbit.position();
        self.position
    }

    /// Override the polar angle. Bounds are the caller's job (the control
    /// surface clamps to [0, π]).
    pub fn set_polar(&mut self, polar: f64) {
        self.orbit.polar = polar;
        self.position = self.orbit.position();
    }

    pub fn polar(&self) -> f64 {
        self.orbit.polar
    }

    pub fn azimuth(&self) -> f64 {
        self.orbit.azimuth
    }

    /// Position from the most recent update.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Where the visible sun mesh goes.
    pub fn proxy_position(&self) -> Vec3 {
        self.position * self.proxy_distance
    }

    pub fn proxy_scale(&self) -> f32 {
        self.proxy_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    fn director(azimuth: f64, rate: f64) -> SunDirector {
        SunDirector::new(&SunConfig {
            orbit: OrbitState::equatorial(1.0, azimuth, rate),
            proxy_distance: 2.0,
            proxy_scale: 1.0,
        })
    }

    #[test]
    fn starts_at_configured_position() {
        let sun = director(0.0, 0.0);
        assert!((sun.position() - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn sweeps_by_rate_times_delta() {
        let mut sun = director(0.0, 1.0);
        let p = sun.update(1.0, FRAC_PI_2);
        assert!((sun.azimuth() - FRAC_PI_2).abs() < 1e-12);
        assert!((p - Vec3::NEG_Z).length() < 1e-6, "got {p:?}");
    }

    #[test]
    fn azimuth_wraps() {
        let mut sun = director(6.0, 1.0);
        sun.update(1.0, 1.0);
        assert!((sun.azimuth() - (7.0 - TAU)).abs() < 1e-9);
    }

    #[test]
    fn polar_override_moves_sun_off_plane() {
        let mut sun = director(0.0, 0.0);
        sun.set_polar(0.0);
        assert!((sun.position() - Vec3::Y).length() < 1e-6);
        sun.set_polar(PI);
        assert!((sun.position() + Vec3::Y).length() < 1e-6);
        // Sticks across updates.
        sun.update(0.0, 0.016);
        assert_eq!(sun.polar(), PI);
    }

    #[test]
    fn proxy_sits_further_out() {
        let sun = director(0.0, 0.0);
        assert!((sun.proxy_position() - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn default_matches_jupiter_lighting() {
        let cfg = SunConfig::default();
        assert_eq!(cfg.orbit.radius, 90.0);
        assert!((cfg.orbit.azimuth - TAU / 3.0).abs() < 1e-12);
        assert_eq!(cfg.proxy_distance, 2.0);
    }
}
