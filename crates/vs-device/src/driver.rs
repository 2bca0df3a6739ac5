//! VS1053 serial control/data protocol.

use tracing::{debug, trace};
use vs_ir::{has_single_data_byte, MidiMessage, MidiSink};

use crate::error::DeviceError;
use crate::plugin::PluginWrites;
use crate::traits::{ControlBus, ReadyPoll, Select, Spin};

/// Command tag opening a control-interface register write.
pub const SCI_WRITE: u8 = 0x02;
/// Tag opening a data-interface byte frame.
pub const SDI_BYTE: u8 = 0x00;

/// Mode register.
pub const SCI_MODE: u8 = 0x00;
/// Bass/treble enhancer register.
pub const SCI_BASS: u8 = 0x02;
/// Volume register: high byte left, low byte right, 0 = loudest, 0.5 dB steps.
pub const SCI_VOL: u8 = 0x0B;

/// Driver for a VS1053-class decoder running the realtime MIDI plugin.
///
/// Every frame waits for the chip's data-request line first. The wait has
/// no timeout: a chip that never becomes ready stalls the caller.
pub struct Vs1053<B, P = Spin> {
    bus: B,
    poll: P,
}

impl<B: ControlBus> Vs1053<B, Spin> {
    /// Create a driver that busy-spins while the chip is busy.
    pub fn new(bus: B) -> Self {
        Self { bus, poll: Spin }
    }
}

impl<B: ControlBus, P: ReadyPoll> Vs1053<B, P> {
    /// Create a driver with a custom idle strategy for the ready wait.
    pub fn with_poll(bus: B, poll: P) -> Self {
        Self { bus, poll }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Release the bus.
    pub fn into_inner(self) -> B {
        self.bus
    }

    /// Block until the chip asserts its data-request line.
    fn wait_ready(&mut self) -> Result<(), DeviceError<B::Error>> {
        while !self.bus.is_ready().map_err(DeviceError::Bus)? {
            self.poll.idle();
        }
        Ok(())
    }

    /// Write a 16-bit control register as two bytes.
    pub fn write_register(&mut self, address: u8, high: u8, low: u8) -> Result<(), DeviceError<B::Error>> {
        self.wait_ready()?;
        trace!(address, high, low, "sci write");
        self.bus
            .write_frame(Select::Control, &[SCI_WRITE, address, high, low])
            .map_err(DeviceError::Bus)
    }

    /// Write a 16-bit control register.
    pub fn write_register_word(&mut self, address: u8, value: u16) -> Result<(), DeviceError<B::Error>> {
        let [high, low] = value.to_be_bytes();
        self.write_register(address, high, low)
    }

    /// Send one byte on the data interface.
    pub fn send_midi_byte(&mut self, byte: u8) -> Result<(), DeviceError<B::Error>> {
        self.wait_ready()?;
        self.bus
            .write_frame(Select::Data, &[SDI_BYTE, byte])
            .map_err(DeviceError::Bus)
    }

    /// Send a channel message byte by byte. `data2` is skipped for program
    /// change, which carries a single data byte.
    pub fn send_midi_message(&mut self, command: u8, data1: u8, data2: u8) -> Result<(), DeviceError<B::Error>> {
        self.send_midi_byte(command)?;
        self.send_midi_byte(data1)?;
        if !has_single_data_byte(command) {
            self.send_midi_byte(data2)?;
        }
        Ok(())
    }

    /// Replay a plugin image into the chip's registers.
    ///
    /// The whole image is validated before the first write, so a malformed
    /// image leaves the chip untouched. Returns the number of register
    /// writes performed.
    pub fn load_plugin(&mut self, image: &[u16]) -> Result<usize, DeviceError<B::Error>> {
        let total = PluginWrites::new(image).try_fold(0usize, |n, write| write.map(|_| n + 1))?;
        for write in PluginWrites::new(image).flatten() {
            self.write_register_word(write.register, write.value)?;
        }
        debug!(words = image.len(), writes = total, "plugin loaded");
        Ok(total)
    }

    /// Set output attenuation per side in 0.5 dB steps (0 = loudest).
    pub fn set_volume(&mut self, left: u8, right: u8) -> Result<(), DeviceError<B::Error>> {
        self.write_register(SCI_VOL, left, right)
    }

    /// Set the bass enhancer amplitude (0 = off, 15 = +15 dB).
    ///
    /// Values above 15 are truncated to the register's four bits; callers
    /// clamp first.
    pub fn set_bass_amplitude(&mut self, amplitude: u8) -> Result<(), DeviceError<B::Error>> {
        self.write_register(SCI_BASS, (amplitude & 0x0F) << 4, 0x00)
    }
}

impl<B: ControlBus, P: ReadyPoll> MidiSink for Vs1053<B, P> {
    type Error = DeviceError<B::Error>;

    fn send(&mut self, message: MidiMessage) -> Result<(), Self::Error> {
        let ([command, data1, data2], _) = message.encode();
        self.send_midi_message(command, data1, data2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{CaptureBus, Transfer};
    use crate::traits::PollFn;
    use crate::plugin::REALTIME_MIDI_PLUGIN;
    use crate::PluginError;
    use vs_ir::{Instrument, Note};

    #[test]
    fn register_write_frame_layout() {
        let mut dev = Vs1053::new(CaptureBus::new());
        dev.write_register(SCI_VOL, 0x20, 0x21).unwrap();
        assert_eq!(
            dev.bus().transfers(),
            &[Transfer { select: Select::Control, bytes: vec![0x02, 0x0B, 0x20, 0x21] }]
        );
    }

    #[test]
    fn midi_byte_frame_layout() {
        let mut dev = Vs1053::new(CaptureBus::new());
        dev.send_midi_byte(0x90).unwrap();
        assert_eq!(
            dev.bus().transfers(),
            &[Transfer { select: Select::Data, bytes: vec![0x00, 0x90] }]
        );
    }

    #[test]
    fn program_change_omits_second_data_byte() {
        let mut dev = Vs1053::new(CaptureBus::new());
        dev.send_midi_message(0xC2, 19, 0x55).unwrap();
        assert_eq!(dev.bus().midi_bytes(), vec![0xC2, 19]);

        dev.bus_mut().clear();
        dev.send_midi_message(0x92, 60, 100).unwrap();
        assert_eq!(dev.bus().midi_bytes(), vec![0x92, 60, 100]);
    }

    #[test]
    fn sink_encodes_messages() {
        let mut dev = Vs1053::new(CaptureBus::new());
        dev.send(MidiMessage::ProgramChange { channel: 1, instrument: Instrument::Cello }).unwrap();
        dev.send(MidiMessage::NoteOn { channel: 1, note: Note::G3, velocity: 90 }).unwrap();
        assert_eq!(dev.bus().midi_bytes(), vec![0xC1, 42, 0x91, 55, 90]);
    }

    #[test]
    fn waits_for_ready_before_every_frame() {
        let mut idles = 0;
        {
            let mut dev = Vs1053::with_poll(CaptureBus::new().with_busy_polls(3), PollFn(|| idles += 1));
            dev.send_midi_message(0x90, 60, 100).unwrap();
            assert_eq!(dev.bus().transfers().len(), 3);
        }
        assert_eq!(idles, 9);
    }

    #[test]
    fn plugin_load_replays_every_word() {
        let mut dev = Vs1053::new(CaptureBus::new());
        let writes = dev.load_plugin(&REALTIME_MIDI_PLUGIN).unwrap();
        assert_eq!(writes, 22);
        let regs = dev.bus().register_writes();
        assert_eq!(regs.len(), 22);
        assert_eq!(regs[0], (0x07, 0x8050));
        assert_eq!(regs[1], (0x06, 0x0030));
        assert_eq!(regs[21], (0x0a, 0x0050));
    }

    #[test]
    fn malformed_plugin_writes_nothing() {
        let mut dev = Vs1053::new(CaptureBus::new());
        let err = dev.load_plugin(&[0x0007, 0x0001, 0x8050, 0x0006, 0x0004]).unwrap_err();
        assert!(matches!(err, DeviceError::Plugin(PluginError::Truncated { offset: 3 })));
        assert!(dev.bus().transfers().is_empty());
    }

    #[test]
    fn bus_failure_propagates() {
        let mut dev = Vs1053::new(CaptureBus::new().fail_after(1));
        dev.send_midi_byte(0x90).unwrap();
        let err = dev.send_midi_byte(60).unwrap_err();
        assert!(matches!(err, DeviceError::Bus(_)));
    }

    #[test]
    fn bass_amplitude_lands_in_high_nibble() {
        let mut dev = Vs1053::new(CaptureBus::new());
        dev.set_bass_amplitude(15).unwrap();
        assert_eq!(dev.bus().register_writes(), vec![(SCI_BASS, 0xF000)]);
    }
}
