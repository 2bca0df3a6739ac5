//! Sequencing engine for vsseq.
//!
//! Fixed-capacity tracks, a wrapping pattern clock, per-channel program
//! deduplication and a bounded pool of scheduled note-offs. Nothing here
//! allocates; everything is driven by [`Engine::update`] with the current
//! millisecond clock reading.

#![cfg_attr(not(feature = "std"), no_std)]

mod channel;
mod engine;
pub mod sequencer;
mod track;
mod voice_pool;

#[cfg(test)]
mod testing;

pub use channel::InstrumentCache;
pub use engine::{Engine, NoteRequest};
pub use sequencer::{SequenceError, Sequencer, MAX_TRACKS};
pub use track::{Track, MAX_EVENTS};
pub use voice_pool::{ActiveVoice, VoiceId, VoicePool, MAX_VOICES, RELEASE_VELOCITY};
