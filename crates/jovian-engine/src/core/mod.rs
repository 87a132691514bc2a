pub mod clock;
pub mod orbit;
pub mod orrery;
pub mod registry;
