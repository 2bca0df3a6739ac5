//! End-to-end playback through the synth facade and the capture bus.
//!
//! Every assertion here is on the bytes the chip would receive.

use vs_master::{
    cc, CaptureBus, Instrument, ManualClock, MidiMessage, Millis, Note, SeqEvent, SequenceError,
    Synth, MAX_EVENTS, MAX_TRACKS, MAX_VOICES,
};

type TestSynth = Synth<CaptureBus, ManualClock>;

fn synth() -> TestSynth {
    let mut synth = Synth::new(CaptureBus::new(), ManualClock::new(0));
    synth.begin().unwrap();
    synth.device_mut().bus_mut().clear();
    synth
}

/// Advance to `now`, run one update and return what was sent.
fn tick(synth: &mut TestSynth, now: Millis) -> Vec<MidiMessage> {
    synth.clock_mut().set(now);
    synth.update().unwrap();
    let sent = synth.device().bus().midi_messages();
    synth.device_mut().bus_mut().clear();
    sent
}

/// Run 1 ms updates over `range`, collecting `(time, note)` for every
/// note-on.
fn note_ons(synth: &mut TestSynth, range: std::ops::Range<Millis>) -> Vec<(Millis, Note)> {
    let mut fired = Vec::new();
    for now in range {
        for message in tick(synth, now) {
            if let MidiMessage::NoteOn { note, .. } = message {
                fired.push((now, note));
            }
        }
    }
    fired
}

fn event(offset: Millis, note: Note) -> SeqEvent {
    SeqEvent::new(offset, 0, Instrument::AcousticGrandPiano, note, 100, 200)
}

#[test]
fn duplicate_program_select_sends_once() {
    let mut synth = synth();
    synth.set_instrument(6, Instrument::Harpsichord).unwrap();
    synth.set_instrument(6, Instrument::Harpsichord).unwrap();
    assert_eq!(synth.device().bus().midi_bytes(), vec![0xC6, Instrument::Harpsichord.program()]);
}

#[test]
fn pattern_loops_and_refires_in_order() {
    let mut synth = synth();
    for offset in [0, 500, 1000] {
        synth.add_event(0, event(offset, Note::C4)).unwrap();
    }
    synth.start_sequencer(0);
    assert_eq!(synth.engine().sequencer().period(), 1200);

    let fired: Vec<Millis> = note_ons(&mut synth, 0..2400).into_iter().map(|(t, _)| t).collect();
    assert_eq!(fired, vec![0, 500, 1000, 1200, 1700, 2200]);
}

#[test]
fn explicit_loop_length_overrides_span() {
    let mut synth = synth();
    synth.add_event(0, event(0, Note::C4)).unwrap();
    synth.add_event(0, event(300, Note::E4)).unwrap();
    synth.start_sequencer(250);

    let fired = note_ons(&mut synth, 0..760);
    // The event past the loop end never plays.
    assert_eq!(fired, vec![(0, Note::C4), (250, Note::C4), (500, Note::C4), (750, Note::C4)]);
}

#[test]
fn restart_refires_played_events() {
    let mut synth = synth();
    synth.add_event(0, event(0, Note::G4)).unwrap();
    synth.start_sequencer(1000);
    assert_eq!(note_ons(&mut synth, 0..10), vec![(0, Note::G4)]);

    synth.stop_sequencer();
    assert!(note_ons(&mut synth, 10..20).is_empty());

    synth.clock_mut().set(20);
    synth.start_sequencer(1000);
    assert_eq!(note_ons(&mut synth, 20..30), vec![(20, Note::G4)]);
}

#[test]
fn empty_sequencer_is_silent() {
    let mut synth = synth();
    synth.start_sequencer(0);
    assert_eq!(synth.engine().sequencer().period(), 1);
    assert!(note_ons(&mut synth, 0..100).is_empty());
}

#[test]
fn lower_track_fires_first_at_same_offset() {
    let mut synth = synth();
    synth.add_event(3, event(100, Note::A4)).unwrap();
    synth.add_event(1, event(100, Note::F4)).unwrap();
    synth.add_event(2, event(100, Note::G4)).unwrap();
    synth.start_sequencer(0);
    let fired: Vec<Note> = note_ons(&mut synth, 0..150).into_iter().map(|(_, n)| n).collect();
    assert_eq!(fired, vec![Note::F4, Note::G4, Note::A4]);
}

#[test]
fn master_volume_over_range_matches_full_scale() {
    let mut over = synth();
    over.set_master_volume(200).unwrap();
    let mut full = synth();
    full.set_master_volume(127).unwrap();
    assert_eq!(over.device().bus().transfers(), full.device().bus().transfers());
    assert_eq!(over.device().bus().midi_bytes(), vec![0xB0, cc::VOLUME, 127]);
}

#[test]
fn voice_pool_overflow_drops_newest_release() {
    let mut synth = synth();
    let notes: Vec<Note> = (0..=MAX_VOICES as u8).map(|n| Note::try_from(40 + n).unwrap()).collect();
    for (i, note) in notes.iter().enumerate() {
        synth.clock_mut().set(i as Millis);
        synth.play_note_async(0, None, *note, 1_000, 100).unwrap();
    }
    assert_eq!(synth.engine().voices().active_count(), MAX_VOICES);
    assert_eq!(synth.engine().voices().dropped(), 1);
    synth.device_mut().bus_mut().clear();

    let mut released = Vec::new();
    for now in 0..1_100 {
        for message in tick(&mut synth, now) {
            if let MidiMessage::NoteOff { note, .. } = message {
                released.push((now, note));
            }
        }
    }
    let expected: Vec<(Millis, Note)> = notes[..MAX_VOICES]
        .iter()
        .enumerate()
        .map(|(i, note)| (1_000 + i as Millis, *note))
        .collect();
    assert_eq!(released, expected);
}

#[test]
fn full_track_rejects_and_keeps_existing_events() {
    let mut synth = synth();
    for i in 0..MAX_EVENTS as Millis {
        synth.add_event(0, event(i * 10, Note::C4)).unwrap();
    }
    assert_eq!(
        synth.add_event(0, event(5, Note::D4)),
        Err(SequenceError::TrackFull { track: 0, capacity: MAX_EVENTS })
    );
    assert_eq!(
        synth.add_event(MAX_TRACKS, event(0, Note::C4)),
        Err(SequenceError::NoSuchTrack { track: MAX_TRACKS, tracks: MAX_TRACKS })
    );
    assert_eq!(synth.engine().sequencer().track(0).unwrap().len(), MAX_EVENTS);
}

#[test]
fn composed_song_plays_with_program_changes() {
    let mut synth = synth();
    {
        let mut song = synth.compose();
        song.track(0)
            .unwrap()
            .instrument(Instrument::Marimba)
            .channel(2)
            .note("C4", 100)
            .unwrap()
            .chord(&["E4", "G4"], 100)
            .unwrap();
    }
    synth.start_sequencer(0);

    let first = tick(&mut synth, 0);
    assert_eq!(
        first,
        vec![
            MidiMessage::ProgramChange { channel: 2, instrument: Instrument::Marimba },
            MidiMessage::NoteOn { channel: 2, note: Note::C4, velocity: 110 },
        ]
    );
    let second = tick(&mut synth, 100);
    assert_eq!(
        second,
        vec![
            MidiMessage::NoteOff { channel: 2, note: Note::C4, velocity: 64 },
            MidiMessage::NoteOn { channel: 2, note: Note::E4, velocity: 110 },
            MidiMessage::NoteOn { channel: 2, note: Note::G4, velocity: 110 },
        ]
    );
    // Second pass: the program is cached, so no program change.
    let again = tick(&mut synth, 200);
    assert_eq!(
        again,
        vec![
            MidiMessage::NoteOff { channel: 2, note: Note::E4, velocity: 64 },
            MidiMessage::NoteOff { channel: 2, note: Note::G4, velocity: 64 },
            MidiMessage::NoteOn { channel: 2, note: Note::C4, velocity: 110 },
        ]
    );
}

#[test]
fn clock_wrap_keeps_timing() {
    let mut synth = synth();
    let start = u32::MAX - 50;
    synth.clock_mut().set(start);
    synth.play_note_async(0, None, Note::C4, 100, 100).unwrap();
    synth.device_mut().bus_mut().clear();

    assert!(tick(&mut synth, start.wrapping_add(99)).is_empty());
    assert_eq!(
        tick(&mut synth, start.wrapping_add(100)),
        vec![MidiMessage::NoteOff { channel: 0, note: Note::C4, velocity: 64 }]
    );
}
