//! Synth facade for vsseq.
//!
//! Owns the chip driver, the clock and the engine, and exposes the
//! operations a sketch calls: [`Synth::begin`] once at startup, the
//! immediate note and controller calls, track editing, and
//! [`Synth::update`] on every pass of the main loop.

#![cfg_attr(not(feature = "std"), no_std)]

mod clock;
mod composer;
mod config;

use tracing::{debug, warn};
use vs_engine::NoteRequest;
use vs_ir::{MidiSink, CHANNELS, DATA_MAX};

pub use clock::{ClockFn, ManualClock};
#[cfg(feature = "std")]
pub use clock::MonotonicClock;
pub use composer::{ComposeError, Song, TrackComposer, MAX_CHORD};
pub use config::{SynthConfig, COMPOSER_VELOCITY, DEFAULT_VELOCITY};

// Re-export common types so callers don't need the lower crates directly.
pub use vs_device::{ControlBus, DeviceError, PluginError, PollFn, ReadyPoll, Select, Spin, Vs1053};
#[cfg(feature = "std")]
pub use vs_device::{CaptureBus, InjectedFault};
pub use vs_engine::{Engine, SequenceError, MAX_EVENTS, MAX_TRACKS, MAX_VOICES};
pub use vs_ir::{cc, Clock, Instrument, MidiMessage, Millis, Note, SeqEvent};

/// Largest bass enhancer amplitude the chip accepts.
pub const BASS_MAX: u8 = 15;

/// Chip, clock and sequencing engine.
pub struct Synth<B: ControlBus, C: Clock, P: ReadyPoll = Spin> {
    device: Vs1053<B, P>,
    clock: C,
    engine: Engine,
    config: SynthConfig,
}

impl<B: ControlBus, C: Clock> Synth<B, C, Spin> {
    pub fn new(bus: B, clock: C) -> Self {
        Self::with_config(bus, clock, SynthConfig::default())
    }

    pub fn with_config(bus: B, clock: C, config: SynthConfig) -> Self {
        Self::from_device(Vs1053::new(bus), clock, config)
    }
}

impl<B: ControlBus, C: Clock, P: ReadyPoll> Synth<B, C, P> {
    /// Wrap an already constructed driver, e.g. one with a custom
    /// [`ReadyPoll`].
    pub fn from_device(device: Vs1053<B, P>, clock: C, config: SynthConfig) -> Self {
        Self {
            device,
            clock,
            engine: Engine::new().with_release_velocity(config.release_velocity),
            config,
        }
    }

    // --- Startup ---

    /// Load the MIDI plugin and write the initial volume.
    ///
    /// The program cache is emptied since the chip forgets its programs.
    pub fn begin(&mut self) -> Result<(), DeviceError<B::Error>> {
        let words = self.device.load_plugin(self.config.plugin)?;
        let (left, right) = self.config.volume;
        self.device.set_volume(left, right)?;
        self.engine.instruments_mut().reset();
        debug!(words, "synth ready");
        Ok(())
    }

    // --- Immediate playback ---

    /// Select `instrument` on `channel`. Nothing is sent if the channel
    /// already has it.
    pub fn set_instrument(&mut self, channel: u8, instrument: Instrument) -> Result<(), DeviceError<B::Error>> {
        self.engine.select_instrument(&mut self.device, channel, instrument)?;
        Ok(())
    }

    pub fn note_on(&mut self, channel: u8, note: Note, velocity: u8) -> Result<(), DeviceError<B::Error>> {
        let velocity = clamp("velocity", velocity, DATA_MAX);
        self.device.send(MidiMessage::NoteOn { channel, note, velocity })
    }

    pub fn note_off(&mut self, channel: u8, note: Note, velocity: u8) -> Result<(), DeviceError<B::Error>> {
        let velocity = clamp("velocity", velocity, DATA_MAX);
        self.device.send(MidiMessage::NoteOff { channel, note, velocity })
    }

    /// Start a note now and release it from [`update`](Self::update) once
    /// `duration` has passed. If the voice pool is full the note still
    /// sounds but is never released.
    pub fn play_note_async(
        &mut self,
        channel: u8,
        instrument: Option<Instrument>,
        note: Note,
        duration: Millis,
        velocity: u8,
    ) -> Result<(), DeviceError<B::Error>> {
        let now = self.clock.now_ms();
        let request = NoteRequest {
            channel,
            instrument,
            note,
            velocity: clamp("velocity", velocity, DATA_MAX),
            duration,
        };
        self.engine.play_note(&mut self.device, now, request)?;
        Ok(())
    }

    /// [`play_note_async`](Self::play_note_async) at [`DEFAULT_VELOCITY`]
    /// on the channel's current program.
    pub fn play_note(&mut self, channel: u8, note: Note, duration: Millis) -> Result<(), DeviceError<B::Error>> {
        self.play_note_async(channel, None, note, duration, DEFAULT_VELOCITY)
    }

    // --- Controllers ---

    pub fn control_change(&mut self, channel: u8, controller: u8, value: u8) -> Result<(), DeviceError<B::Error>> {
        let controller = clamp("controller", controller, DATA_MAX);
        let value = clamp("controller value", value, DATA_MAX);
        debug!(channel, controller, value, "control change");
        self.device.send(MidiMessage::ControlChange { channel, controller, value })
    }

    /// Stereo position on `channel`; 0 left, 64 centre, 127 right.
    pub fn set_pan(&mut self, channel: u8, pan: u8) -> Result<(), DeviceError<B::Error>> {
        let pan = clamp("pan", pan, DATA_MAX);
        self.control_change(channel, cc::PAN, pan)
    }

    /// Reverb send, sent on channel 0.
    pub fn set_reverb(&mut self, level: u8) -> Result<(), DeviceError<B::Error>> {
        let level = clamp("reverb", level, DATA_MAX);
        self.control_change(0, cc::REVERB, level)
    }

    /// Volume controller on channel 0.
    pub fn set_master_volume(&mut self, volume: u8) -> Result<(), DeviceError<B::Error>> {
        let volume = clamp("master volume", volume, DATA_MAX);
        self.control_change(0, cc::VOLUME, volume)
    }

    pub fn set_channel_volume(&mut self, channel: u8, volume: u8) -> Result<(), DeviceError<B::Error>> {
        let volume = clamp("channel volume", volume, DATA_MAX);
        self.control_change(channel, cc::VOLUME, volume)
    }

    /// Bass enhancer amplitude, 0 (off) to [`BASS_MAX`].
    pub fn set_bass_boost(&mut self, amount: u8) -> Result<(), DeviceError<B::Error>> {
        let amount = clamp("bass boost", amount, BASS_MAX);
        self.device.set_bass_amplitude(amount)
    }

    /// Release every note on every channel and forget all scheduled
    /// note-offs.
    pub fn all_notes_off(&mut self) -> Result<(), DeviceError<B::Error>> {
        let velocity = self.config.release_velocity;
        for channel in 0..CHANNELS as u8 {
            for note in Note::all() {
                self.device.send(MidiMessage::NoteOff { channel, note, velocity })?;
            }
        }
        self.engine.voices_mut().clear();
        debug!("all notes off");
        Ok(())
    }

    // --- Sequencer ---

    pub fn clear_track(&mut self, track: usize) -> Result<(), SequenceError> {
        self.engine.sequencer_mut().clear_track(track)
    }

    /// Append `event` to `track`. Fails when the track does not exist or
    /// is full.
    pub fn add_event(&mut self, track: usize, event: SeqEvent) -> Result<(), SequenceError> {
        self.engine.sequencer_mut().add_event(track, event)
    }

    /// Build tracks with note names instead of raw events.
    pub fn compose(&mut self) -> Song<'_> {
        Song::new(self.engine.sequencer_mut())
    }

    /// Start playing from the top. A `loop_ms` of 0 loops at the end of
    /// the longest event.
    pub fn start_sequencer(&mut self, loop_ms: Millis) {
        let now = self.clock.now_ms();
        self.engine.sequencer_mut().start(now, loop_ms);
    }

    pub fn stop_sequencer(&mut self) {
        self.engine.sequencer_mut().stop();
    }

    pub fn is_running(&self) -> bool {
        self.engine.sequencer().is_running()
    }

    /// Release due notes and fire due events. Call often; timing is only as
    /// fine as the gap between calls.
    pub fn update(&mut self) -> Result<(), DeviceError<B::Error>> {
        let now = self.clock.now_ms();
        self.engine.update(&mut self.device, now)
    }

    // --- Accessors ---

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn device(&self) -> &Vs1053<B, P> {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut Vs1053<B, P> {
        &mut self.device
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    pub fn into_parts(self) -> (Vs1053<B, P>, C) {
        (self.device, self.clock)
    }
}

fn clamp(what: &'static str, value: u8, max: u8) -> u8 {
    if value > max {
        warn!(what, value, max, "out of range, clamped");
        max
    } else {
        value
    }
}
