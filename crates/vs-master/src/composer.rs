//! Cursor-based pattern building with note names.
//!
//! ```ignore
//! let mut song = synth.compose();
//! song.track(0)?
//!     .instrument(Instrument::Marimba)
//!     .note("C4", 200)?
//!     .rest(100)
//!     .chord(&["E4", "G4", "B4"], 400)?;
//! ```

use arrayvec::{ArrayString, ArrayVec};
use thiserror::Error;
use vs_engine::{SequenceError, Sequencer, MAX_EVENTS, MAX_TRACKS};
use vs_ir::{Instrument, Millis, Note, SeqEvent};

use crate::config::COMPOSER_VELOCITY;

/// Most notes a single chord or arpeggio call accepts.
pub const MAX_CHORD: usize = 16;

/// Error type for composing.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    /// The name did not parse as a note in range (shown truncated).
    #[error("unknown note name {0:?}")]
    UnknownNote(ArrayString<16>),
    #[error("more than {max} notes in one call")]
    TooManyNotes { max: usize },
    #[error(transparent)]
    Sequence(#[from] SequenceError),
}

/// Hands out composers for the tracks of one sequencer.
pub struct Song<'a, const TRACKS: usize = MAX_TRACKS, const EVENTS: usize = MAX_EVENTS> {
    sequencer: &'a mut Sequencer<TRACKS, EVENTS>,
}

impl<'a, const TRACKS: usize, const EVENTS: usize> Song<'a, TRACKS, EVENTS> {
    pub fn new(sequencer: &'a mut Sequencer<TRACKS, EVENTS>) -> Self {
        Self { sequencer }
    }

    /// Start writing `track` from the top. The track is cleared first.
    pub fn track(&mut self, track: usize) -> Result<TrackComposer<'_, TRACKS, EVENTS>, SequenceError> {
        TrackComposer::new(&mut *self.sequencer, track)
    }
}

/// Appends events to one track at a moving time cursor.
#[derive(Debug)]
pub struct TrackComposer<'a, const TRACKS: usize = MAX_TRACKS, const EVENTS: usize = MAX_EVENTS> {
    sequencer: &'a mut Sequencer<TRACKS, EVENTS>,
    track: usize,
    cursor: Millis,
    channel: u8,
    instrument: Instrument,
    velocity: u8,
}

impl<'a, const TRACKS: usize, const EVENTS: usize> TrackComposer<'a, TRACKS, EVENTS> {
    /// Clear `track` and position the cursor at 0.
    pub fn new(sequencer: &'a mut Sequencer<TRACKS, EVENTS>, track: usize) -> Result<Self, SequenceError> {
        sequencer.clear_track(track)?;
        Ok(Self {
            sequencer,
            track,
            cursor: 0,
            channel: 0,
            instrument: Instrument::AcousticGrandPiano,
            velocity: COMPOSER_VELOCITY,
        })
    }

    /// Program for the notes that follow.
    pub fn instrument(&mut self, instrument: Instrument) -> &mut Self {
        self.instrument = instrument;
        self
    }

    /// MIDI channel for the notes that follow.
    pub fn channel(&mut self, channel: u8) -> &mut Self {
        self.channel = channel & 0x0F;
        self
    }

    /// Velocity for the notes that follow.
    pub fn velocity(&mut self, velocity: u8) -> &mut Self {
        self.velocity = velocity;
        self
    }

    /// Advance the cursor without adding anything.
    pub fn rest(&mut self, ms: Millis) -> &mut Self {
        self.cursor = self.cursor.saturating_add(ms);
        self
    }

    /// One note lasting `duration`; the cursor moves past it.
    pub fn note(&mut self, name: &str, duration: Millis) -> Result<&mut Self, ComposeError> {
        let note = parse(name)?;
        self.push(self.cursor, note, duration)?;
        self.cursor = self.cursor.saturating_add(duration);
        Ok(self)
    }

    /// Several notes starting together; the cursor moves by `duration`.
    ///
    /// Every name is checked before anything is added.
    pub fn chord(&mut self, names: &[&str], duration: Millis) -> Result<&mut Self, ComposeError> {
        for note in parse_all(names)? {
            self.push(self.cursor, note, duration)?;
        }
        self.cursor = self.cursor.saturating_add(duration);
        Ok(self)
    }

    /// Notes one after another, each lasting `step`.
    pub fn arp(&mut self, names: &[&str], step: Millis) -> Result<&mut Self, ComposeError> {
        for note in parse_all(names)? {
            self.push(self.cursor, note, step)?;
            self.cursor = self.cursor.saturating_add(step);
        }
        Ok(self)
    }

    /// Cursor position, i.e. the length written so far.
    pub fn length(&self) -> Millis {
        self.cursor
    }

    fn push(&mut self, offset: Millis, note: Note, duration: Millis) -> Result<(), SequenceError> {
        let event = SeqEvent::new(offset, self.channel, self.instrument, note, self.velocity, duration);
        self.sequencer.add_event(self.track, event)
    }
}

fn parse(name: &str) -> Result<Note, ComposeError> {
    Note::from_name(name).ok_or_else(|| {
        let mut shown = ArrayString::new();
        for ch in name.chars() {
            if shown.try_push(ch).is_err() {
                break;
            }
        }
        ComposeError::UnknownNote(shown)
    })
}

fn parse_all(names: &[&str]) -> Result<ArrayVec<Note, MAX_CHORD>, ComposeError> {
    let mut notes = ArrayVec::new();
    for name in names {
        notes
            .try_push(parse(name)?)
            .map_err(|_| ComposeError::TooManyNotes { max: MAX_CHORD })?;
    }
    Ok(notes)
}
