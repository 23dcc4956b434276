//! Queued page input

use crate::event::PageEvent;

/// FIFO of page input, drained once per session pump.
///
/// Back-to-back scroll events collapse into the latest one, the way a browser
/// only reports the final position of a scroll burst between frames.
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<PageEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event, replacing a trailing scroll with a newer one
    pub fn push(&mut self, event: PageEvent) {
        if let (PageEvent::Scroll(y), Some(PageEvent::Scroll(last))) =
            (&event, self.events.last_mut())
        {
            *last = *y;
            return;
        }
        self.events.push(event);
    }

    /// Take every pending event in arrival order
    pub fn drain(&mut self) -> Vec<PageEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.events.len()
    }
}
