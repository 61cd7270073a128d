use crate::api::types::BodyId;
use crate::systems::format::Locale;

/// Commands the host page sends to the simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// Focus a body and start reporting its metrics.
    Select(BodyId),
    /// Focus a body by name (case-insensitive).
    SelectByName(String),
    /// Clear the focus.
    Deselect,
    /// Change simulated seconds per real second. 0 pauses.
    SetTimeMultiplier(f64),
    /// Change the language of formatted durations.
    SetLocale(Locale),
}

/// A queue of control events.
/// The host writes events into the queue; the simulation drains them at the
/// start of each tick.
pub struct ControlQueue {
    events: Vec<ControlEvent>,
}

impl ControlQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, event: ControlEvent) {
        self.events.push(event);
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&mut self) -> Vec<ControlEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for ControlQueue {
    fn default() -> Self {
        Self::new()
    }
}
