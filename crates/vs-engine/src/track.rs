//! Fixed-capacity event list for one sequencer track.

use heapless::Vec;
use vs_ir::{Millis, SeqEvent};

/// Default number of events a track can hold.
pub const MAX_EVENTS: usize = 128;

/// Events in insertion order, plus the span they cover.
#[derive(Clone, Debug, Default)]
pub struct Track<const N: usize = MAX_EVENTS> {
    events: Vec<SeqEvent, N>,
    /// Largest `time_offset + duration` over the events
    span: Millis,
}

impl<const N: usize> Track<N> {
    pub const fn new() -> Self {
        Self { events: Vec::new(), span: 0 }
    }

    /// Append an event, handing it back if the track is full.
    pub fn push(&mut self, event: SeqEvent) -> Result<(), SeqEvent> {
        self.events.push(event)?;
        self.span = self.span.max(event.end());
        Ok(())
    }

    /// Remove every event.
    pub fn clear(&mut self) {
        self.events.clear();
        self.span = 0;
    }

    /// Time from pattern start to the end of the last note.
    pub fn span(&self) -> Millis {
        self.span
    }

    pub fn events(&self) -> &[SeqEvent] {
        &self.events
    }

    pub(crate) fn events_mut(&mut self) -> &mut [SeqEvent] {
        &mut self.events
    }

    pub(crate) fn reset_fired(&mut self) {
        for event in self.events.iter_mut() {
            event.fired = false;
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.events.is_full()
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}
