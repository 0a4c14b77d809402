//! Event bus for broadcasting game events

use crate::event::GameEvent;

/// Events pushed before or between frames. Every system sees the full
/// queue during the next frame; the loop clears it afterwards.
pub struct EventBus {
    events: Vec<GameEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event onto the bus
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Iterate pending events in push order
    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    /// Drain all events from the bus, returning them
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
