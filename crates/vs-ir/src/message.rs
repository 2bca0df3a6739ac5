//! MIDI channel voice messages and their wire encoding.

use crate::instrument::Instrument;
use crate::note::Note;

/// Status nibble for note off.
pub const NOTE_OFF: u8 = 0x80;
/// Status nibble for note on.
pub const NOTE_ON: u8 = 0x90;
/// Status nibble for control change.
pub const CONTROL_CHANGE: u8 = 0xB0;
/// Status nibble for program change (one data byte).
pub const PROGRAM_CHANGE: u8 = 0xC0;

/// Controller numbers used by the synth.
pub mod cc {
    /// Channel volume (coarse).
    pub const VOLUME: u8 = 7;
    /// Pan position, 64 = centre.
    pub const PAN: u8 = 10;
    /// Reverb send level.
    pub const REVERB: u8 = 91;
    /// Release every sounding note on the channel.
    pub const ALL_NOTES_OFF: u8 = 123;
}

/// Number of MIDI channels.
pub const CHANNELS: usize = 16;

/// Largest value a MIDI data byte can carry.
pub const DATA_MAX: u8 = 0x7F;

/// True if `status` belongs to a message class that carries a single data
/// byte on the wire.
#[inline]
pub const fn has_single_data_byte(status: u8) -> bool {
    status & 0xF0 == PROGRAM_CHANGE
}

/// A channel voice message.
///
/// Channels are 0-15; higher bits are masked off on encode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MidiMessage {
    NoteOn { channel: u8, note: Note, velocity: u8 },
    NoteOff { channel: u8, note: Note, velocity: u8 },
    ProgramChange { channel: u8, instrument: Instrument },
    ControlChange { channel: u8, controller: u8, value: u8 },
}

impl MidiMessage {
    /// The channel this message addresses (0-15).
    pub fn channel(&self) -> u8 {
        match *self {
            MidiMessage::NoteOn { channel, .. }
            | MidiMessage::NoteOff { channel, .. }
            | MidiMessage::ProgramChange { channel, .. }
            | MidiMessage::ControlChange { channel, .. } => channel & 0x0F,
        }
    }

    /// Status byte: message class nibble combined with the channel.
    pub fn status(&self) -> u8 {
        let class = match self {
            MidiMessage::NoteOn { .. } => NOTE_ON,
            MidiMessage::NoteOff { .. } => NOTE_OFF,
            MidiMessage::ProgramChange { .. } => PROGRAM_CHANGE,
            MidiMessage::ControlChange { .. } => CONTROL_CHANGE,
        };
        class | self.channel()
    }

    /// The two data bytes, saturated to 127. The second is meaningless for
    /// program change.
    pub fn data(&self) -> (u8, u8) {
        match *self {
            MidiMessage::NoteOn { note, velocity, .. }
            | MidiMessage::NoteOff { note, velocity, .. } => (note.number(), velocity.min(DATA_MAX)),
            MidiMessage::ProgramChange { instrument, .. } => (instrument.program(), 0),
            MidiMessage::ControlChange { controller, value, .. } => {
                (controller.min(DATA_MAX), value.min(DATA_MAX))
            }
        }
    }

    /// Wire bytes and how many of them are significant (2 or 3).
    pub fn encode(&self) -> ([u8; 3], usize) {
        let status = self.status();
        let (d1, d2) = self.data();
        let len = if has_single_data_byte(status) { 2 } else { 3 };
        ([status, d1, d2], len)
    }

    /// Decode one message from the front of `bytes`, returning it with the
    /// number of bytes consumed.
    ///
    /// Returns `None` for truncated input, a missing status byte, or a
    /// message class outside this enum.
    pub fn decode(bytes: &[u8]) -> Option<(MidiMessage, usize)> {
        let status = *bytes.first()?;
        if status & 0x80 == 0 {
            return None;
        }
        let channel = status & 0x0F;
        let d1 = *bytes.get(1)?;
        if status & 0xF0 == PROGRAM_CHANGE {
            let instrument = Instrument::try_from(d1).ok()?;
            return Some((MidiMessage::ProgramChange { channel, instrument }, 2));
        }
        let d2 = *bytes.get(2)?;
        let message = match status & 0xF0 {
            NOTE_ON => MidiMessage::NoteOn { channel, note: Note::try_from(d1).ok()?, velocity: d2 },
            NOTE_OFF => MidiMessage::NoteOff { channel, note: Note::try_from(d1).ok()?, velocity: d2 },
            CONTROL_CHANGE => MidiMessage::ControlChange { channel, controller: d1, value: d2 },
            _ => return None,
        };
        Some((message, 3))
    }
}
