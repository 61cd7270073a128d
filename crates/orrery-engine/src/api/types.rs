use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Unique identifier for a body in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(pub u32);

/// What kind of object a body is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyCategory {
    Star,
    Planet,
    Dwarf,
    Moon,
    Comet,
}

impl BodyCategory {
    /// Numeric code written into the transform buffer.
    pub fn code(self) -> f32 {
        match self {
            BodyCategory::Star => 0.0,
            BodyCategory::Planet => 1.0,
            BodyCategory::Dwarf => 2.0,
            BodyCategory::Moon => 3.0,
            BodyCategory::Comet => 4.0,
        }
    }
}

/// Comet left the inner system (`a` = body id).
pub const EVENT_COMET_DEPARTED: f32 = 1.0;
/// Comet came back on a new pass (`a` = body id).
pub const EVENT_COMET_RETURNED: f32 = 2.0;
/// Selection changed (`a` = body id, or -1 when cleared).
pub const EVENT_SELECTION: f32 = 3.0;

/// A simulation event handed to the host page once per tick.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SimEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SimEvent {
    pub const FLOATS: usize = 4;

    pub fn comet_departed(id: BodyId) -> Self {
        Self { kind: EVENT_COMET_DEPARTED, a: id.0 as f32, ..Self::default() }
    }

    pub fn comet_returned(id: BodyId) -> Self {
        Self { kind: EVENT_COMET_RETURNED, a: id.0 as f32, ..Self::default() }
    }

    pub fn selection(id: Option<BodyId>) -> Self {
        Self {
            kind: EVENT_SELECTION,
            a: id.map(|id| id.0 as f32).unwrap_or(-1.0),
            ..Self::default()
        }
    }
}
