pub mod body;
pub mod uniforms;
