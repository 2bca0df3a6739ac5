//! The engine: instrument cache, voice pool and sequencer behind one
//! per-tick entry point.

use tracing::debug;
use vs_ir::{Instrument, Millis, MidiMessage, MidiSink, Note, SeqEvent};

use crate::channel::InstrumentCache;
use crate::sequencer::{Sequencer, MAX_TRACKS};
use crate::track::MAX_EVENTS;
use crate::voice_pool::{VoiceId, VoicePool, MAX_VOICES, RELEASE_VELOCITY};

/// A note to start now and release after `duration`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoteRequest {
    pub channel: u8,
    /// Program to select first; `None` keeps whatever the channel has
    pub instrument: Option<Instrument>,
    pub note: Note,
    pub velocity: u8,
    pub duration: Millis,
}

impl From<&SeqEvent> for NoteRequest {
    fn from(event: &SeqEvent) -> Self {
        Self {
            channel: event.channel,
            instrument: Some(event.instrument),
            note: event.note,
            velocity: event.velocity,
            duration: event.duration,
        }
    }
}

/// Sequencer and voice scheduling state.
///
/// Holds no clock and no device: every call takes the current time and a
/// [`MidiSink`] to transmit through.
#[derive(Clone, Debug)]
pub struct Engine<
    const TRACKS: usize = MAX_TRACKS,
    const EVENTS: usize = MAX_EVENTS,
    const VOICES: usize = MAX_VOICES,
> {
    instruments: InstrumentCache,
    voices: VoicePool<VOICES>,
    sequencer: Sequencer<TRACKS, EVENTS>,
    release_velocity: u8,
}

impl<const TRACKS: usize, const EVENTS: usize, const VOICES: usize> Engine<TRACKS, EVENTS, VOICES> {
    pub fn new() -> Self {
        Self {
            instruments: InstrumentCache::new(),
            voices: VoicePool::new(),
            sequencer: Sequencer::new(),
            release_velocity: RELEASE_VELOCITY,
        }
    }

    /// Velocity carried by scheduled note-offs.
    pub fn with_release_velocity(mut self, velocity: u8) -> Self {
        self.release_velocity = velocity;
        self
    }

    /// Select a program on a channel, skipping the message if unchanged.
    pub fn select_instrument<S: MidiSink>(
        &mut self,
        sink: &mut S,
        channel: u8,
        instrument: Instrument,
    ) -> Result<bool, S::Error> {
        self.instruments.select(sink, channel, instrument)
    }

    /// Start a note now and schedule its release. Same path the sequencer
    /// fires events through.
    pub fn play_note<S: MidiSink>(
        &mut self,
        sink: &mut S,
        now: Millis,
        request: NoteRequest,
    ) -> Result<Option<VoiceId>, S::Error> {
        trigger(&mut self.instruments, &mut self.voices, sink, now, request)
    }

    /// Per-tick work: release due notes, then fire due sequencer events.
    pub fn update<S: MidiSink>(&mut self, sink: &mut S, now: Millis) -> Result<(), S::Error> {
        #[cfg(feature = "alloc_check")]
        return assert_no_alloc::assert_no_alloc(|| self.tick(sink, now));

        #[cfg(not(feature = "alloc_check"))]
        self.tick(sink, now)
    }

    fn tick<S: MidiSink>(&mut self, sink: &mut S, now: Millis) -> Result<(), S::Error> {
        self.voices.retire_due(sink, now, self.release_velocity)?;

        let Self { instruments, voices, sequencer, .. } = self;
        sequencer.advance(now, |_, event| {
            trigger(&mut *instruments, &mut *voices, &mut *sink, now, NoteRequest::from(event))
                .map(|_| ())
        })?;
        Ok(())
    }

    pub fn sequencer(&self) -> &Sequencer<TRACKS, EVENTS> {
        &self.sequencer
    }

    pub fn sequencer_mut(&mut self) -> &mut Sequencer<TRACKS, EVENTS> {
        &mut self.sequencer
    }

    pub fn voices(&self) -> &VoicePool<VOICES> {
        &self.voices
    }

    pub fn voices_mut(&mut self) -> &mut VoicePool<VOICES> {
        &mut self.voices
    }

    pub fn instruments(&self) -> &InstrumentCache {
        &self.instruments
    }

    pub fn instruments_mut(&mut self) -> &mut InstrumentCache {
        &mut self.instruments
    }
}

impl<const TRACKS: usize, const EVENTS: usize, const VOICES: usize> Default
    for Engine<TRACKS, EVENTS, VOICES>
{
    fn default() -> Self {
        Self::new()
    }
}

/// Program select (deduplicated), note-on, release scheduling.
fn trigger<S: MidiSink, const VOICES: usize>(
    instruments: &mut InstrumentCache,
    voices: &mut VoicePool<VOICES>,
    sink: &mut S,
    now: Millis,
    request: NoteRequest,
) -> Result<Option<VoiceId>, S::Error> {
    let channel = request.channel & 0x0F;
    if let Some(instrument) = request.instrument {
        instruments.select(sink, channel, instrument)?;
    }
    sink.send(MidiMessage::NoteOn {
        channel,
        note: request.note,
        velocity: request.velocity,
    })?;
    debug!(channel, note = request.note.number(), velocity = request.velocity, "note on");
    Ok(voices.schedule_off(channel, request.note, now.wrapping_add(request.duration)))
}
