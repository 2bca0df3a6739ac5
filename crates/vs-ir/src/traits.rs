//! Seams between the engine and the outside world.

use crate::message::MidiMessage;
use crate::time::Millis;

/// Something that accepts MIDI messages, typically the synth chip driver.
pub trait MidiSink {
    /// Error raised by the underlying transport.
    type Error;

    /// Transmit one message. Returns once the bytes are on the wire.
    fn send(&mut self, message: MidiMessage) -> Result<(), Self::Error>;
}

/// Free-running millisecond clock.
pub trait Clock {
    /// Current reading. Wraps at `u32::MAX`.
    fn now_ms(&mut self) -> Millis;
}

impl<S: MidiSink + ?Sized> MidiSink for &mut S {
    type Error = S::Error;

    fn send(&mut self, message: MidiMessage) -> Result<(), Self::Error> {
        (**self).send(message)
    }
}
