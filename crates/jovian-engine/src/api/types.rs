use serde::{Deserialize, Serialize};

/// Unique identifier for a body in the registry.
/// Also the body's index in the packed transform buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl BodyId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a body is, for the JS shell (geometry/material choice) and for
/// deciding which per-frame systems touch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    /// The gas giant itself. Member of the planet group.
    Planet,
    /// Translucent back-faced shell around the planet. Member of the planet group.
    Atmosphere,
    /// Orbiting satellite with its own placement orbit.
    Moon,
    /// Visible sun proxy, placed along the light direction.
    Sun,
    /// Background star points, slowly yawing.
    Starfield,
}

impl BodyKind {
    /// Bodies that ride the planet group's spin and tilt.
    pub fn in_planet_group(self) -> bool {
        matches!(self, BodyKind::Planet | BodyKind::Atmosphere)
    }
}
