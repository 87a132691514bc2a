pub mod controls;
pub mod orbits;
pub mod shading;
pub mod spin;
pub mod sun;
