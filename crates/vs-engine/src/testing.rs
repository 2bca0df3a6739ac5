//! Sink double shared by the unit tests.

use vs_ir::{MidiMessage, MidiSink};

/// Records every message; optionally starts failing after `fail_after` sends.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub sent: Vec<MidiMessage>,
    pub fail_after: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(count: usize) -> Self {
        Self { sent: Vec::new(), fail_after: Some(count) }
    }

    pub fn take(&mut self) -> Vec<MidiMessage> {
        core::mem::take(&mut self.sent)
    }
}

impl MidiSink for RecordingSink {
    type Error = ();

    fn send(&mut self, message: MidiMessage) -> Result<(), ()> {
        if self.fail_after.is_some_and(|n| self.sent.len() >= n) {
            return Err(());
        }
        self.sent.push(message);
        Ok(())
    }
}
