use bytemuck::{Pod, Zeroable};

use crate::components::body::Placement;

/// Per-body world transform for the JS scene graph.
/// 8 floats = 32 bytes per body, in registry order.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyTransform {
    pub px: f32,
    pub py: f32,
    pub pz: f32,
    pub qx: f32,
    pub qy: f32,
    pub qz: f32,
    pub qw: f32,
    pub scale: f32,
}

impl BodyTransform {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_placement(placement: &Placement) -> Self {
        let p = placement.position;
        let q = placement.rotation;
        Self {
            px: p.x,
            py: p.y,
            pz: p.z,
            qx: q.x,
            qy: q.y,
            qz: q.z,
            qw: q.w,
            scale: placement.scale,
        }
    }
}

/// Packed transforms, rebuilt at the end of every tick.
pub struct TransformBuffer {
    instances: Vec<BodyTransform>,
}

impl TransformBuffer {
    pub fn new() -> Self {
        Self::with_capacity(8)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: BodyTransform) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Flat float view (`instance_count() * FLOATS` values).
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for TransformBuffer {
    fn default() -> Self {
        Self::new()
    }
}
