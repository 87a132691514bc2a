pub mod transform;

pub use transform::{BodyTransform, TransformBuffer};
