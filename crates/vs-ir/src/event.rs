//! Sequencer event record.

use crate::instrument::Instrument;
use crate::note::Note;
use crate::time::Millis;

/// One scheduled note on a track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeqEvent {
    /// When the note starts, relative to the pattern start
    pub time_offset: Millis,
    /// MIDI channel (0-15)
    pub channel: u8,
    /// Program selected on the channel before the note plays
    pub instrument: Instrument,
    /// Pitch
    pub note: Note,
    /// Note-on velocity (0-127)
    pub velocity: u8,
    /// How long the note sounds before its note-off
    pub duration: Millis,
    /// Set once the event has played in the current pattern repetition
    pub fired: bool,
}

impl SeqEvent {
    /// Create an event that has not fired yet.
    pub fn new(
        time_offset: Millis,
        channel: u8,
        instrument: Instrument,
        note: Note,
        velocity: u8,
        duration: Millis,
    ) -> Self {
        Self {
            time_offset,
            channel,
            instrument,
            note,
            velocity,
            duration,
            fired: false,
        }
    }

    /// Time at which the note ends, relative to the pattern start.
    pub fn end(&self) -> Millis {
        self.time_offset.saturating_add(self.duration)
    }
}
