use std::f32::consts::PI as PI_F32;
use std::f64::consts::{FRAC_PI_2, PI};

use glam::Vec3;
use jovian_engine::{
    BodyConfig, BodyKind, OrbitState, PlanetGroupConfig, SceneConfig, ShaderSchema, StarfieldConfig,
    SunConfig, TunableControl, UniformValue, U_SUN_POSITION, U_TIME,
};

const DAY_COLOR: Vec3 = Vec3::new(212.0 / 255.0, 198.0 / 255.0, 188.0 / 255.0); // #d4c6bc
const TWILIGHT_COLOR: Vec3 = Vec3::new(237.0 / 255.0, 101.0 / 255.0, 9.0 / 255.0); // #ed6509

fn planet_shader() -> ShaderSchema {
    ShaderSchema::new("planet")
        .with(U_TIME, UniformValue::Float(0.0))
        .with("uAnimationSpeed", UniformValue::Float(0.01))
        .with(U_SUN_POSITION, UniformValue::Vec3(Vec3::ZERO))
        .with("uPrimaryWaveAmplitudeScale", UniformValue::Float(0.2))
        .with("uSecondaryWaveFrequencyScale", UniformValue::Float(1.5))
        .with("uSecondaryWaveAmplitudeScale", UniformValue::Float(0.15))
        .with("uDirectionalNoiseGranularity", UniformValue::Float(5.5))
        .with("uNoiseDensity", UniformValue::Float(-40.0))
        .with("uNoiseIntensity", UniformValue::Float(0.35))
        .with("uNoiseSpread", UniformValue::Float(1.0))
}

fn atmosphere_shader() -> ShaderSchema {
    ShaderSchema::new("atmosphere")
        .with(U_SUN_POSITION, UniformValue::Vec3(Vec3::ZERO))
        .with("uAtmosphereDayColor", UniformValue::Color(DAY_COLOR))
        .with("uAtmosphereTwilightColor", UniformValue::Color(TWILIGHT_COLOR))
}

fn moon_shader() -> ShaderSchema {
    ShaderSchema::new("moon")
        .with(U_TIME, UniformValue::Float(0.0))
        .with("uAnimationSpeed", UniformValue::Float(0.1))
        .with(U_SUN_POSITION, UniformValue::Vec3(Vec3::ZERO))
}

/// `radius`, `scale`, `rate`, starting azimuth, noise animation speed.
const MOONS: [(&str, f64, f32, f64, f64, f32); 3] = [
    ("io", 8.0, 0.1, 0.5, 0.0, 2.1),
    ("europa", 30.0, 0.2, 0.1, PI, 0.1),
    ("ganymede", 50.0, 0.3, 0.07, 0.0, 0.03),
];

/// `(uniform, min, max, step, label)` for the "Planet" panel folder.
const PLANET_CONTROLS: [(&str, f32, f32, f32, &str); 8] = [
    ("uAnimationSpeed", -3.0, 3.0, 0.001, "Noise animation speed"),
    ("uPrimaryWaveAmplitudeScale", -0.5, 0.5, 0.01, "Primary wave amplitude"),
    ("uSecondaryWaveFrequencyScale", 0.0, 100.0, 0.01, "Secondary wave frequency"),
    ("uSecondaryWaveAmplitudeScale", -0.5, 0.5, 0.01, "Secondary wave amplitude"),
    ("uDirectionalNoiseGranularity", -10.0, 10.0, 0.01, "Noise directional granularity"),
    ("uNoiseDensity", -100.0, 100.0, 0.01, "Noise density"),
    ("uNoiseIntensity", -1.0, 1.0, 0.01, "Noise intensity"),
    ("uNoiseSpread", 0.0, 50.0, 0.01, "Noise spread"),
];

/// Jupiter with its atmosphere shell, three Galilean moons, a starfield
/// and the sun proxy.
pub fn jupiter() -> SceneConfig {
    let planet = planet_shader();

    let mut config = SceneConfig {
        sun: SunConfig {
            orbit: OrbitState {
                radius: 90.0,
                polar: FRAC_PI_2,
                azimuth: PI / 1.5,
                angular_rate: 0.01,
            },
            proxy_distance: 2.0,
            proxy_scale: 1.0,
        },
        planet_group: PlanetGroupConfig {
            tilt: 0.055,
            rotation_rate: -0.15,
        },
        starfield: StarfieldConfig::default(),
        ..SceneConfig::default()
    }
    .with_shader(planet.clone())
    .with_shader(atmosphere_shader())
    .with_shader(moon_shader())
    .with_shader(ShaderSchema::new("basic"))
    .with_shader(ShaderSchema::new("points"))
    .with_body(BodyConfig::new("planet", BodyKind::Planet, "planet").with_scale(4.0))
    .with_body(BodyConfig::new("atmosphere", BodyKind::Atmosphere, "atmosphere").with_scale(4.15));

    for (name, radius, scale, rate, start, speed) in MOONS {
        config = config.with_body(
            BodyConfig::new(name, BodyKind::Moon, "moon")
                .with_scale(scale)
                .with_orbit(OrbitState::equatorial(radius, start, rate))
                .with_uniform("uAnimationSpeed", UniformValue::Float(speed)),
        );
    }

    config = config
        .with_body(BodyConfig::new("sun", BodyKind::Sun, "basic"))
        .with_body(BodyConfig::new("stars", BodyKind::Starfield, "points"));

    for (param, min, max, step, label) in PLANET_CONTROLS {
        let value = planet
            .get(param)
            .and_then(|decl| decl.default.as_float())
            .unwrap_or(min);
        config = config.with_control(
            TunableControl::uniform("planet", param, value, min, max, step)
                .with_label(label)
                .in_folder("Planet"),
        );
    }

    config
        .with_control(
            TunableControl::sun_polar("phi", PI_F32 / 2.0, 0.0, PI_F32, 0.01)
                .with_label("phi")
                .in_folder("Sun"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use jovian_engine::Orrery;

    #[test]
    fn jupiter_scene_is_valid() {
        let config = jupiter();
        config.validate().unwrap();
        assert_eq!(config.bodies.len(), 7);
        assert_eq!(config.controls.len(), 9);
    }

    #[test]
    fn atmosphere_colors_match_hex() {
        let day = UniformValue::color_hex("#d4c6bc").unwrap();
        let twilight = UniformValue::color_hex("#ed6509").unwrap();
        let schema = atmosphere_shader();
        assert_eq!(schema.get("uAtmosphereDayColor").unwrap().default, day);
        assert_eq!(schema.get("uAtmosphereTwilightColor").unwrap().default, twilight);
    }

    #[test]
    fn moons_have_distinct_periods() {
        let config = jupiter();
        let mut periods: Vec<f64> = config
            .bodies
            .iter()
            .filter_map(|b| b.orbit)
            .filter_map(|o| o.period())
            .collect();
        assert_eq!(periods.len(), 3);
        periods.sort_by(|a, b| a.total_cmp(b));
        periods.dedup();
        assert_eq!(periods.len(), 3);
    }

    #[test]
    fn sun_starts_on_the_equator() {
        let mut orrery = Orrery::new(jupiter()).unwrap();
        let start = orrery.sun().position();
        assert!(start.y.abs() < 1e-3);
        assert!((start.length() - 90.0).abs() < 1e-3);
        orrery.tick(1.0 / 60.0);
        let proxy = orrery.bodies().find("sun").unwrap().placement.position;
        assert!((proxy.length() - 180.0).abs() < 1e-2);
    }

    #[test]
    fn config_survives_json() {
        let config = jupiter();
        let json = config.to_json().unwrap();
        let back = SceneConfig::from_json(&json).unwrap();
        assert_eq!(back, config);
    }
}
