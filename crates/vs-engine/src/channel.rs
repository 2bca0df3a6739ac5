//! Per-channel program memory.

use tracing::debug;
use vs_ir::{Instrument, MidiMessage, MidiSink, CHANNELS};

/// Last program sent on each MIDI channel.
///
/// Some chip firmwares retrigger sounding voices on every program change,
/// so a select that would not change the program sends nothing.
#[derive(Clone, Debug, Default)]
pub struct InstrumentCache {
    programs: [Option<Instrument>; CHANNELS],
}

impl InstrumentCache {
    /// Create a cache with every channel unknown.
    pub const fn new() -> Self {
        Self { programs: [None; CHANNELS] }
    }

    /// Program last sent on `channel` (masked to 0-15), if any.
    pub fn get(&self, channel: u8) -> Option<Instrument> {
        self.programs[(channel & 0x0F) as usize]
    }

    /// Select `instrument` on `channel`, sending a program change only if
    /// the channel is not already known to be on it.
    ///
    /// Returns whether a message went out. The cache is only updated once
    /// the send succeeded.
    pub fn select<S: MidiSink>(
        &mut self,
        sink: &mut S,
        channel: u8,
        instrument: Instrument,
    ) -> Result<bool, S::Error> {
        let channel = channel & 0x0F;
        let slot = &mut self.programs[channel as usize];
        if *slot == Some(instrument) {
            debug!(channel, program = instrument.program(), "program change skipped");
            return Ok(false);
        }
        sink.send(MidiMessage::ProgramChange { channel, instrument })?;
        *slot = Some(instrument);
        debug!(channel, program = instrument.program(), "program change");
        Ok(true)
    }

    /// Mark `channel` unknown so the next select transmits.
    pub fn forget(&mut self, channel: u8) {
        self.programs[(channel & 0x0F) as usize] = None;
    }

    /// Mark every channel unknown, e.g. after the chip was reset.
    pub fn reset(&mut self) {
        self.programs = [None; CHANNELS];
    }
}
