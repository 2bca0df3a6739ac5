//! Wire-level behaviour of the driver against the capture bus.

use vs_device::{
    CaptureBus, DeviceError, InjectedFault, PluginError, PollFn, Select, Transfer, Vs1053,
    REALTIME_MIDI_PLUGIN, SCI_MODE, SCI_WRITE, SDI_BYTE,
};
use vs_ir::{Instrument, MidiMessage, MidiSink, Note};

#[test]
fn every_frame_waits_for_ready() {
    let mut idles = 0;
    let bus = CaptureBus::new().with_busy_polls(3);
    let mut dev = Vs1053::with_poll(bus, PollFn(|| idles += 1));
    dev.send(MidiMessage::NoteOn { channel: 0, note: Note::C4, velocity: 100 }).unwrap();
    let polls = dev.bus().polls();
    drop(dev);
    // Three busy answers then one ready answer per byte.
    assert_eq!(polls, 3 * 4);
    assert_eq!(idles, 3 * 3);
}

#[test]
fn program_change_is_two_bytes_on_the_wire() {
    let mut dev = Vs1053::new(CaptureBus::new());
    dev.send(MidiMessage::ProgramChange { channel: 9, instrument: Instrument::SteelDrums }).unwrap();
    assert_eq!(
        dev.bus().transfers(),
        &[
            Transfer { select: Select::Data, bytes: vec![SDI_BYTE, 0xC9] },
            Transfer { select: Select::Data, bytes: vec![SDI_BYTE, Instrument::SteelDrums.program()] },
        ]
    );
}

#[test]
fn realtime_plugin_replays_as_register_writes() {
    let mut dev = Vs1053::new(CaptureBus::new());
    let writes = dev.load_plugin(&REALTIME_MIDI_PLUGIN).unwrap();
    assert_eq!(writes, 22);
    let regs = dev.bus().register_writes();
    assert_eq!(regs.first(), Some(&(0x07, 0x8050)));
    assert_eq!(regs.last(), Some(&(0x0A, 0x0050)));
    assert!(dev.bus().transfers().iter().all(|t| t.select == Select::Control && t.bytes[0] == SCI_WRITE));
}

#[test]
fn compressed_records_expand() {
    // Register 0x06 gets 0x1234 three times, then SCI_MODE gets two words.
    let image = [0x0006, 0x8003, 0x1234, SCI_MODE as u16, 0x0002, 0x0800, 0x0804];
    let mut dev = Vs1053::new(CaptureBus::new());
    assert_eq!(dev.load_plugin(&image).unwrap(), 5);
    assert_eq!(
        dev.bus().register_writes(),
        vec![(0x06, 0x1234), (0x06, 0x1234), (0x06, 0x1234), (SCI_MODE, 0x0800), (SCI_MODE, 0x0804)]
    );
}

#[test]
fn malformed_plugin_writes_nothing() {
    let mut dev = Vs1053::new(CaptureBus::new());
    let truncated = [0x0007, 0x0003, 0x0001, 0x0002];
    assert!(matches!(
        dev.load_plugin(&truncated),
        Err(DeviceError::Plugin(PluginError::Truncated { offset: 0 }))
    ));
    let bad_register = [0x0007, 0x0001, 0x0000, 0x0123, 0x0001, 0x0000];
    assert!(matches!(
        dev.load_plugin(&bad_register),
        Err(DeviceError::Plugin(PluginError::InvalidRegister { offset: 3, address: 0x0123 }))
    ));
    assert!(dev.bus().transfers().is_empty());
}

#[test]
fn bus_failure_stops_the_message() {
    let mut dev = Vs1053::new(CaptureBus::new().fail_after(1));
    let err = dev.send(MidiMessage::NoteOff { channel: 0, note: Note::A4, velocity: 64 }).unwrap_err();
    assert!(matches!(err, DeviceError::Bus(InjectedFault(1))));
    assert_eq!(dev.bus().midi_bytes(), vec![0x80]);
}
