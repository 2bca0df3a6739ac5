//! Core types for the vsseq MIDI sequencer.
//!
//! Shared vocabulary between the engine, the chip driver and the facade:
//! General MIDI instruments, note numbers, sequencer events, channel
//! messages and millisecond clock arithmetic.
//!
//! Designed to be `no_std` and allocation-free.

#![cfg_attr(not(feature = "std"), no_std)]

mod event;
mod instrument;
mod message;
mod note;
mod time;
mod traits;

pub use event::SeqEvent;
pub use instrument::Instrument;
pub use message::{
    cc, has_single_data_byte, MidiMessage, CHANNELS, CONTROL_CHANGE, DATA_MAX, NOTE_OFF, NOTE_ON,
    PROGRAM_CHANGE,
};
pub use note::Note;
pub use time::{deadline_reached, elapsed, Millis};
pub use traits::{Clock, MidiSink};
