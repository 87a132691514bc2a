use crate::api::config::SceneConfig;
use crate::api::error::ConfigError;
use crate::api::types::{BodyId, BodyKind};
use crate::bridge::manifest::SceneManifest;
use crate::components::body::Body;
use crate::core::clock::SceneClock;
use crate::core::registry::BodyRegistry;
use crate::renderer::transform::{BodyTransform, TransformBuffer};
use crate::systems::controls::ControlSurface;
use crate::systems::orbits::{self, FrameInputs};
use crate::systems::shading::{self, UniformSink};
use crate::systems::spin::{PlanetSpin, StarfieldConfig, StarfieldDrift};
use crate::systems::sun::SunDirector;

/// The animation core: owns every body and drives one render tick at a time.
pub struct Orrery {
    clock: SceneClock,
    sun: SunDirector,
    spin: PlanetSpin,
    drift: StarfieldDrift,
    bodies: BodyRegistry,
    controls: ControlSurface,
    transforms: TransformBuffer,
    starfield: StarfieldConfig,
}

impl Orrery {
    /// Validate the config and build the scene. Controls are applied once
    /// so bodies and the sun start at the panel's initial values.
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut sun = SunDirector::new(&config.sun);
        let spin = PlanetSpin::from_config(&config.planet_group);
        let mut bodies = BodyRegistry::new();

        for cfg in &config.bodies {
            let schema = config.shader(&cfg.shader).ok_or_else(|| ConfigError::UnknownShader {
                body: cfg.name.clone(),
                shader: cfg.shader.clone(),
            })?;
            let mut body = Body::new(bodies.next_id(), cfg.name.as_str(), cfg.kind, schema).with_scale(cfg.scale);
            if let Some(orbit) = cfg.orbit {
                body = body.with_orbit(orbit);
            }
            for decl in &cfg.uniforms {
                body.params
                    .set(&decl.name, decl.default)
                    .map_err(|source| ConfigError::InvalidOverride {
                        body: cfg.name.clone(),
                        source,
                    })?;
            }
            match cfg.kind {
                BodyKind::Planet | BodyKind::Atmosphere => body.placement.rotation = spin.orientation(),
                BodyKind::Sun => {
                    body = body.with_scale(sun.proxy_scale()).with_position(sun.proxy_position());
                }
                BodyKind::Moon | BodyKind::Starfield => {}
            }
            bodies.spawn(body);
        }

        let controls = ControlSurface::bind(config.controls, &bodies);
        controls.apply_all(&mut bodies, &mut sun);

        log::info!(
            "scene built: {} bodies, {} shaders, {} controls",
            bodies.len(),
            config.shaders.len(),
            controls.len()
        );

        let mut orrery = Self {
            clock: SceneClock::new(),
            drift: StarfieldDrift::new(config.starfield.drift_rate),
            transforms: TransformBuffer::with_capacity(bodies.len()),
            starfield: config.starfield,
            sun,
            spin,
            bodies,
            controls,
        };
        // The sun may have moved if a control set its polar angle.
        let sun_id = orrery.bodies.of_kind(BodyKind::Sun).next().map(|b| b.id);
        if let Some(id) = sun_id {
            let proxy = orrery.sun.proxy_position();
            if let Some(body) = orrery.bodies.get_mut(id) {
                body.placement.position = proxy;
            }
        }
        orrery.rebuild_transforms();
        Ok(orrery)
    }

    /// Parse, validate, and build in one step.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::new(SceneConfig::from_json(json)?)
    }

    /// One render tick. Returns the new elapsed time.
    ///
    /// Order: clock, sun, group spin and star drift, then every body with
    /// the same frame inputs, then the transform buffer.
    pub fn tick(&mut self, delta: f64) -> f64 {
        let elapsed = self.clock.advance(delta);
        let sun_position = self.sun.update(elapsed, delta);
        self.spin.update(elapsed);
        self.drift.update(delta);

        let frame = FrameInputs { elapsed, sun_position };
        let group = self.spin.orientation();
        let stars = self.drift.orientation();
        let proxy = self.sun.proxy_position();
        let proxy_scale = self.sun.proxy_scale();
        let first_frame = self.clock.frames() == 1;

        for idx in 0..self.bodies.len() {
            let id = BodyId(idx as u32);
            // A sink that became ready since the last tick gets the full
            // state, then the controls bound to it.
            if self.bodies.get(id).is_some_and(Body::needs_priming) {
                if let Some(body) = self.bodies.get_mut(id) {
                    shading::flush(body);
                }
                self.controls.apply_for_body(id, &mut self.bodies);
            }
            let Some(body) = self.bodies.get_mut(id) else {
                continue;
            };

            orbits::update_orbit(body, delta);
            match body.kind {
                BodyKind::Planet | BodyKind::Atmosphere => body.placement.rotation = group,
                BodyKind::Starfield => body.placement.rotation = stars,
                BodyKind::Sun => {
                    body.placement.position = proxy;
                    body.placement.scale = proxy_scale;
                }
                BodyKind::Moon => {}
            }

            let report = orbits::broadcast(body, &frame);
            if first_frame && report.deferred > 0 {
                log::debug!("{}: no renderable yet, {} uniforms deferred", body.name, report.deferred);
            }
        }

        self.rebuild_transforms();
        elapsed
    }

    /// Attach a renderable's sink to the named body. The body's current
    /// params and bound controls are replayed right away if the sink is ready.
    pub fn attach(&mut self, name: &str, sink: Box<dyn UniformSink>) -> Option<BodyId> {
        let Some(id) = self.bodies.id_of(name) else {
            log::warn!("attach: unknown body `{name}`");
            return None;
        };
        let body = self.bodies.get_mut(id)?;
        shading::attach(body, sink);
        self.controls.apply_for_body(id, &mut self.bodies);
        Some(id)
    }

    /// Detach the named body's sink. Returns whether one was attached.
    pub fn detach(&mut self, name: &str) -> bool {
        let Some(id) = self.bodies.id_of(name) else {
            log::warn!("detach: unknown body `{name}`");
            return false;
        };
        self.bodies
            .get_mut(id)
            .and_then(shading::detach)
            .is_some()
    }

    /// Apply a panel change. Returns the clamped value actually applied.
    pub fn set_control(&mut self, name: &str, value: f32) -> Option<f32> {
        self.controls.set(name, value, &mut self.bodies, &mut self.sun)
    }

    pub fn manifest(&self) -> SceneManifest {
        SceneManifest::describe(&self.bodies, self.controls.controls(), self.starfield)
    }

    fn rebuild_transforms(&mut self) {
        self.transforms.clear();
        for body in self.bodies.iter() {
            self.transforms.push(BodyTransform::from_placement(&body.placement));
        }
    }

    // -- Accessors --

    pub fn clock(&self) -> &SceneClock {
        &self.clock
    }

    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    pub fn sun(&self) -> &SunDirector {
        &self.sun
    }

    pub fn spin(&self) -> &PlanetSpin {
        &self.spin
    }

    pub fn bodies(&self) -> &BodyRegistry {
        &self.bodies
    }

    pub fn controls(&self) -> &ControlSurface {
        &self.controls
    }

    pub fn transforms(&self) -> &TransformBuffer {
        &self.transforms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::BodyConfig;
    use crate::components::uniforms::{ShaderSchema, UniformValue, U_SUN_POSITION, U_TIME};
    use crate::core::orbit::OrbitState;
    use crate::systems::controls::TunableControl;
    use crate::systems::shading::testing::Recorder;
    use glam::{Quat, Vec3};
    use std::f32::consts::PI;

    fn config() -> SceneConfig {
        SceneConfig::new()
            .with_shader(
                ShaderSchema::new("planet")
                    .with(U_TIME, UniformValue::Float(0.0))
                    .with("uNoiseDensity", UniformValue::Float(-40.0))
                    .with(U_SUN_POSITION, UniformValue::Vec3(Vec3::ZERO)),
            )
            .with_shader(
                ShaderSchema::new("atmosphere")
                    .with(U_SUN_POSITION, UniformValue::Vec3(Vec3::ZERO))
                    .with("uAtmosphereDayColor", UniformValue::color_hex("#d4c6bc").unwrap()),
            )
            .with_shader(
                ShaderSchema::new("moon")
                    .with(U_TIME, UniformValue::Float(0.0))
                    .with("uAnimationSpeed", UniformValue::Float(0.1))
                    .with(U_SUN_POSITION, UniformValue::Vec3(Vec3::ZERO)),
            )
            .with_shader(ShaderSchema::new("plain"))
            .with_body(BodyConfig::new("planet", BodyKind::Planet, "planet").with_scale(4.0))
            .with_body(BodyConfig::new("atmosphere", BodyKind::Atmosphere, "atmosphere").with_scale(4.15))
            .with_body(
                BodyConfig::new("io", BodyKind::Moon, "moon")
                    .with_scale(0.1)
                    .with_orbit(OrbitState::equatorial(8.0, 0.0, 0.5))
                    .with_uniform("uAnimationSpeed", UniformValue::Float(2.1)),
            )
            .with_body(
                BodyConfig::new("europa", BodyKind::Moon, "moon")
                    .with_scale(0.2)
                    .with_orbit(OrbitState::equatorial(30.0, 0.0, 0.1)),
            )
            .with_body(BodyConfig::new("sun", BodyKind::Sun, "plain"))
            .with_body(BodyConfig::new("stars", BodyKind::Starfield, "plain"))
            .with_control(TunableControl::uniform("planet", "uNoiseDensity", -40.0, -100.0, 100.0, 0.01))
            .with_control(TunableControl::uniform("planet", U_TIME, 0.0, 0.0, 100.0, 0.01))
            .with_control(TunableControl::sun_polar("phi", PI / 2.0, 0.0, PI, 0.01))
    }

    fn orrery() -> Orrery {
        Orrery::new(config()).unwrap()
    }

    fn param(o: &Orrery, body: &str, name: &str) -> Option<UniformValue> {
        o.bodies().find(body).and_then(|b| b.params.get(name))
    }

    #[test]
    fn builds_bodies_in_config_order() {
        let o = orrery();
        assert_eq!(o.bodies().len(), 6);
        assert_eq!(o.bodies().id_of("io"), Some(BodyId(2)));
        assert_eq!(o.transforms().instance_count(), 6);
        // Per-body override on a shared schema.
        assert_eq!(param(&o, "io", "uAnimationSpeed"), Some(UniformValue::Float(2.1)));
        assert_eq!(param(&o, "europa", "uAnimationSpeed"), Some(UniformValue::Float(0.1)));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = config().with_body(BodyConfig::new("io", BodyKind::Moon, "moon"));
        assert!(matches!(Orrery::new(cfg), Err(ConfigError::DuplicateBody(_))));
        assert!(matches!(Orrery::from_json("not json"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn every_body_sees_the_same_sun() {
        let mut o = orrery();
        let io = Recorder::ready();
        let europa = Recorder::ready();
        let planet = Recorder::ready();
        o.attach("io", io.sink());
        o.attach("europa", europa.sink());
        o.attach("planet", planet.sink());

        o.tick(0.5);
        let expected = UniformValue::Vec3(o.sun().position());
        assert_eq!(io.last(U_SUN_POSITION), Some(expected));
        assert_eq!(europa.last(U_SUN_POSITION), Some(expected));
        assert_eq!(planet.last(U_SUN_POSITION), Some(expected));
        assert_eq!(io.last(U_TIME), Some(UniformValue::Float(0.5)));
    }

    #[test]
    fn moons_diverge_by_rate() {
        let mut o = orrery();
        o.tick(1.0);
        o.tick(1.0);
        let io = o.bodies().find("io").and_then(|b| b.orbit).unwrap();
        let europa = o.bodies().find("europa").and_then(|b| b.orbit).unwrap();
        assert!((io.azimuth - 1.0).abs() < 1e-12);
        assert!((europa.azimuth - 0.2).abs() < 1e-12);
        assert!((io.azimuth / europa.azimuth - 5.0).abs() < 1e-9);
        let placed = o.bodies().find("io").unwrap().placement.position;
        assert!((placed - io.position()).length() < 1e-6);
    }

    #[test]
    fn control_change_visible_next_frame() {
        let mut o = orrery();
        let rec = Recorder::ready();
        o.attach("planet", rec.sink());
        assert_eq!(o.set_control("uNoiseDensity", 12.0), Some(12.0));
        o.tick(1.0 / 60.0);
        assert_eq!(param(&o, "planet", "uNoiseDensity"), Some(UniformValue::Float(12.0)));
        assert_eq!(rec.last("uNoiseDensity"), Some(UniformValue::Float(12.0)));
    }

    #[test]
    fn frame_owned_collision_is_overwritten_by_tick() {
        let mut o = orrery();
        let rec = Recorder::ready();
        o.attach("planet", rec.sink());
        o.set_control(U_TIME, 42.0);
        assert_eq!(rec.last(U_TIME), Some(UniformValue::Float(42.0)));
        o.tick(0.25);
        assert_eq!(rec.last(U_TIME), Some(UniformValue::Float(0.25)));
        assert_eq!(param(&o, "planet", U_TIME), Some(UniformValue::Float(0.25)));
    }

    #[test]
    fn attach_then_converge() {
        let mut o = orrery();
        for _ in 0..3 {
            o.tick(0.5);
        }
        o.set_control("uNoiseDensity", 7.0);

        let rec = Recorder::ready();
        assert_eq!(o.attach("planet", rec.sink()), Some(BodyId(0)));
        // Replay carries the control value written while unattached.
        assert_eq!(rec.last("uNoiseDensity"), Some(UniformValue::Float(7.0)));

        o.tick(0.5);
        assert_eq!(rec.last(U_TIME), Some(UniformValue::Float(2.0)));
    }

    #[test]
    fn late_ready_sink_is_primed_on_tick() {
        let mut o = orrery();
        let rec = Recorder::not_ready();
        o.attach("io", rec.sink());
        o.tick(0.5);
        assert_eq!(rec.count(), 0);

        rec.ready.set(true);
        o.tick(0.5);
        assert_eq!(rec.last("uAnimationSpeed"), Some(UniformValue::Float(2.1)));
        assert_eq!(rec.last(U_TIME), Some(UniformValue::Float(1.0)));
    }

    #[test]
    fn detach_stops_writes() {
        let mut o = orrery();
        let rec = Recorder::ready();
        o.attach("europa", rec.sink());
        o.tick(0.1);
        assert!(o.detach("europa"));
        assert!(!o.detach("europa"));
        let before = rec.count();
        o.tick(0.1);
        assert_eq!(rec.count(), before);
    }

    #[test]
    fn unknown_body_attach_is_ignored() {
        let mut o = orrery();
        assert!(o.attach("callisto", Recorder::ready().sink()).is_none());
        assert!(!o.detach("callisto"));
    }

    #[test]
    fn planet_group_spins_and_tilts() {
        let mut o = orrery();
        o.tick(10.0);
        assert_eq!(o.spin().rotation_y(), -1.5);
        let planet = o.bodies().find("planet").unwrap().placement.rotation;
        let atmosphere = o.bodies().find("atmosphere").unwrap().placement.rotation;
        assert_eq!(planet, atmosphere);
        assert_eq!(planet, o.spin().orientation());
        assert_eq!(o.bodies().find("io").unwrap().placement.rotation, Quat::IDENTITY);
    }

    #[test]
    fn starfield_drifts() {
        let mut o = orrery();
        o.tick(10.0);
        let stars = o.bodies().find("stars").unwrap().placement.rotation;
        assert!(stars.abs_diff_eq(Quat::from_rotation_y(0.1), 1e-6));
    }

    #[test]
    fn sun_proxy_starts_at_controlled_polar() {
        // The phi control moves the light off the configured polar angle
        // before the first tick; the proxy must already follow it.
        let mut cfg = config();
        cfg.sun.orbit.polar = 0.3;
        let o = Orrery::new(cfg).unwrap();
        let proxy = o.bodies().find("sun").unwrap().placement.position;
        assert!((o.sun().polar() - std::f64::consts::FRAC_PI_2).abs() < 1e-6);
        assert!((proxy - o.sun().position() * 2.0).length() < 1e-4);
        let slot = o.bodies().id_of("sun").unwrap().index() * BodyTransform::FLOATS;
        assert!((o.transforms().as_floats()[slot + 1] - proxy.y).abs() < 1e-6);
    }

    #[test]
    fn sun_proxy_sits_at_twice_the_light() {
        let mut o = orrery();
        o.tick(1.0);
        let proxy = o.bodies().find("sun").unwrap().placement.position;
        assert!((proxy - o.sun().position() * 2.0).length() < 1e-4);
    }

    #[test]
    fn sun_polar_control_moves_light() {
        let mut o = orrery();
        let rec = Recorder::ready();
        o.attach("atmosphere", rec.sink());
        o.set_control("phi", 0.0);
        o.tick(0.1);
        let Some(UniformValue::Vec3(sun)) = rec.last(U_SUN_POSITION) else {
            panic!("no sun position written");
        };
        assert!((sun - Vec3::new(0.0, 90.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn transform_buffer_tracks_placements() {
        let mut o = orrery();
        o.tick(0.75);
        let floats = o.transforms().as_floats();
        assert_eq!(floats.len(), 6 * BodyTransform::FLOATS);
        let io = o.bodies().find("io").unwrap();
        let slot = io.id.index() * BodyTransform::FLOATS;
        assert_eq!(floats[slot], io.placement.position.x);
        assert_eq!(floats[slot + 2], io.placement.position.z);
        assert_eq!(floats[slot + 7], 0.1);
    }

    #[test]
    fn manifest_lists_bodies_and_controls() {
        let o = orrery();
        let manifest = o.manifest();
        assert_eq!(manifest.bodies.len(), 6);
        assert_eq!(manifest.bodies[4].kind, BodyKind::Sun);
        assert_eq!(manifest.controls.len(), 3);
    }
}
