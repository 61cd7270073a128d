//! Per-frame body transforms shared with the host renderer.
//! Must stay in sync with the TypeScript reader.
//!
//! Layout (all values f32):
//! ```text
//! [Transforms: body_count × 8 floats]   id, x, y, z, rotation, visible, category, pad
//! [Events:     event_count × 4 floats]  kind, a, b, c
//! ```
//!
//! Both sections are separate buffers; the host reads each through a raw
//! pointer plus a count.

use bytemuck::{Pod, Zeroable};
use glam::{DVec3, Vec3};

use crate::api::types::{BodyCategory, BodyId, SimEvent};

/// Receives one transform per body per frame.
pub trait SceneSink {
    /// Called once before the first body of a frame.
    fn begin_frame(&mut self) {}

    fn push_body(
        &mut self,
        id: BodyId,
        category: BodyCategory,
        position: DVec3,
        rotation: f64,
        visible: bool,
    );
}

/// One body's transform on the wire: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyTransform {
    pub id: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Spin angle, or heading for comets (radians).
    pub rotation: f32,
    /// 1.0 visible, 0.0 hidden.
    pub visible: f32,
    /// `BodyCategory::code`.
    pub category: f32,
    pub _pad: f32,
}

impl BodyTransform {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Transform buffer rebuilt every frame.
pub struct TransformBuffer {
    pub transforms: Vec<BodyTransform>,
}

impl TransformBuffer {
    pub fn new() -> Self {
        Self {
            transforms: Vec::with_capacity(64),
        }
    }

    pub fn clear(&mut self) {
        self.transforms.clear();
    }

    pub fn body_count(&self) -> u32 {
        self.transforms.len() as u32
    }

    /// Raw pointer to transform data for host reads.
    pub fn transforms_ptr(&self) -> *const f32 {
        self.transforms.as_ptr() as *const f32
    }

    /// The buffer viewed as flat floats.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(self.transforms.as_slice())
    }
}

impl Default for TransformBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneSink for TransformBuffer {
    fn begin_frame(&mut self) {
        self.clear();
    }

    fn push_body(
        &mut self,
        id: BodyId,
        category: BodyCategory,
        position: DVec3,
        rotation: f64,
        visible: bool,
    ) {
        let p = position.as_vec3();
        self.transforms.push(BodyTransform {
            id: id.0 as f32,
            x: p.x,
            y: p.y,
            z: p.z,
            rotation: rotation as f32,
            visible: if visible { 1.0 } else { 0.0 },
            category: category.code(),
            _pad: 0.0,
        });
    }
}

/// Raw pointer to event data for host reads.
pub fn events_ptr(events: &[SimEvent]) -> *const f32 {
    events.as_ptr() as *const f32
}
