//! vsseq CLI: host-side simulation of the synth.
//!
//! Composes a short demo pattern, runs it against an in-memory bus with a
//! simulated clock and prints every MIDI message the chip would receive.
//!
//! Usage:
//!   cargo run --bin vs-cli -- [duration_ms] [--tick ms]
//!
//! Set `RUST_LOG=debug` to see the engine's own logging.

use std::env;
use std::process;

use tracing_subscriber::EnvFilter;
use vs_master::{
    CaptureBus, ComposeError, Instrument, ManualClock, MidiMessage, Millis, Note, SeqEvent, Synth,
};

type HostSynth = Synth<CaptureBus, ManualClock>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let duration: Millis = match args.get(1).filter(|a| !a.starts_with("--")) {
        Some(arg) => arg.parse().unwrap_or_else(|_| usage()),
        None => 4_000,
    };
    let tick: Millis = args
        .iter()
        .position(|a| a == "--tick")
        .map(|i| args.get(i + 1).and_then(|v| v.parse().ok()).unwrap_or_else(|| usage()))
        .unwrap_or(1)
        .max(1);

    let mut synth = Synth::new(CaptureBus::new(), ManualClock::new(0));
    if let Err(e) = synth.begin() {
        eprintln!("Failed to start synth: {}", e);
        process::exit(1);
    }
    let plugin_writes = synth.device().bus().register_writes().len();

    if let Err(e) = synth.set_reverb(40) {
        eprintln!("Failed to set reverb: {}", e);
        process::exit(1);
    }
    if let Err(e) = compose_demo(&mut synth) {
        eprintln!("Failed to compose demo: {}", e);
        process::exit(1);
    }

    println!("Register writes at startup: {}", plugin_writes);
    println!("Pattern length:  {} ms", synth.engine().sequencer().period());
    println!("Simulating:      {} ms in {} ms ticks", duration, tick);
    println!();

    // The reverb send is still in the capture and prints at 0 ms.
    synth.start_sequencer(0);
    run(&mut synth, duration, tick);

    let voices = synth.engine().voices();
    println!();
    println!("Voices still sounding: {}", voices.active_count());
    println!("Voices dropped:        {}", voices.dropped());
}

fn usage() -> ! {
    eprintln!("Usage: vs-cli [duration_ms] [--tick ms]");
    process::exit(1);
}

/// Bass line, chord pad and a hi-hat on the drum channel.
fn compose_demo(synth: &mut HostSynth) -> Result<(), ComposeError> {
    {
        let mut song = synth.compose();

        song.track(0)?
            .instrument(Instrument::AcousticBass)
            .channel(0)
            .note("C2", 400)?
            .note("C2", 200)?
            .note("G2", 200)?
            .note("A#1", 400)?
            .rest(200)
            .note("F2", 200)?;

        song.track(1)?
            .instrument(Instrument::Pad2Warm)
            .channel(1)
            .velocity(70)
            .chord(&["C4", "Eb4", "G4"], 800)?
            .chord(&["Bb3", "D4", "F4"], 800)?;

        song.track(2)?
            .instrument(Instrument::Vibraphone)
            .channel(2)
            .rest(800)
            .arp(&["G5", "F5", "Eb5", "D5"], 100)?;
    }

    // Raw events work alongside the composer; channel 9 is drums.
    for step in 0..8 {
        let event = SeqEvent::new(step * 200, 9, Instrument::default(), Note::Fs2, 80, 50);
        if let Err(e) = synth.add_event(3, event) {
            tracing::warn!("hi-hat dropped: {}", e);
        }
    }
    Ok(())
}

fn run(synth: &mut HostSynth, duration: Millis, tick: Millis) {
    let mut now = 0;
    while now <= duration {
        synth.clock_mut().set(now);
        if let Err(e) = synth.update() {
            eprintln!("Bus failure at {} ms: {}", now, e);
            process::exit(1);
        }
        for message in synth.device().bus().midi_messages() {
            println!("{:>6} ms  {}", now, describe(&message));
        }
        synth.device_mut().bus_mut().clear();
        match now.checked_add(tick) {
            Some(next) => now = next,
            None => break,
        }
    }
}

fn describe(message: &MidiMessage) -> String {
    match *message {
        MidiMessage::NoteOn { channel, note, velocity } => {
            format!("ch{:<2} note on   {:<4} vel {}", channel, note.to_string(), velocity)
        }
        MidiMessage::NoteOff { channel, note, velocity } => {
            format!("ch{:<2} note off  {:<4} vel {}", channel, note.to_string(), velocity)
        }
        MidiMessage::ProgramChange { channel, instrument } => {
            format!("ch{:<2} program   {}", channel, instrument)
        }
        MidiMessage::ControlChange { channel, controller, value } => {
            format!("ch{:<2} control   #{} = {}", channel, controller, value)
        }
    }
}
