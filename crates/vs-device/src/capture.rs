//! In-memory bus that records every frame, for host-side tests and
//! simulation.

use thiserror::Error;
use vs_ir::MidiMessage;

use crate::driver::{SCI_WRITE, SDI_BYTE};
use crate::traits::{ControlBus, Select};

/// A frame clocked out while one select line was active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub select: Select,
    pub bytes: Vec<u8>,
}

/// Failure injected by [`CaptureBus::fail_after`].
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("injected bus fault after {0} transfers")]
pub struct InjectedFault(pub usize);

/// Recording bus double.
///
/// Optionally reports "not ready" a fixed number of times before each
/// frame, and can start failing after a given number of transfers.
#[derive(Clone, Debug, Default)]
pub struct CaptureBus {
    transfers: Vec<Transfer>,
    busy_polls: u32,
    busy_left: u32,
    polls: usize,
    fail_after: Option<usize>,
}

impl CaptureBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer "not ready" `polls` times before every frame.
    pub fn with_busy_polls(mut self, polls: u32) -> Self {
        self.busy_polls = polls;
        self.busy_left = polls;
        self
    }

    /// Reject every transfer once `count` transfers have been recorded.
    pub fn fail_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    /// Number of times the ready line was sampled.
    pub fn polls(&self) -> usize {
        self.polls
    }

    pub fn clear(&mut self) {
        self.transfers.clear();
    }

    /// Payload bytes of every data-interface frame, in order.
    pub fn midi_bytes(&self) -> Vec<u8> {
        self.transfers
            .iter()
            .filter(|t| t.select == Select::Data)
            .filter_map(|t| match t.bytes.as_slice() {
                [SDI_BYTE, byte] => Some(*byte),
                _ => None,
            })
            .collect()
    }

    /// The data-interface stream decoded into messages. Stops at the first
    /// byte sequence that does not decode.
    pub fn midi_messages(&self) -> Vec<MidiMessage> {
        let bytes = self.midi_bytes();
        let mut messages = Vec::new();
        let mut rest = bytes.as_slice();
        while let Some((message, len)) = MidiMessage::decode(rest) {
            messages.push(message);
            rest = &rest[len..];
        }
        messages
    }

    /// Every control register write as `(register, value)`.
    pub fn register_writes(&self) -> Vec<(u8, u16)> {
        self.transfers
            .iter()
            .filter(|t| t.select == Select::Control)
            .filter_map(|t| match t.bytes.as_slice() {
                [SCI_WRITE, register, high, low] => {
                    Some((*register, u16::from_be_bytes([*high, *low])))
                }
                _ => None,
            })
            .collect()
    }
}

impl ControlBus for CaptureBus {
    type Error = InjectedFault;

    fn is_ready(&mut self) -> Result<bool, Self::Error> {
        self.polls += 1;
        if self.busy_left > 0 {
            self.busy_left -= 1;
            return Ok(false);
        }
        Ok(true)
    }

    fn write_frame(&mut self, select: Select, frame: &[u8]) -> Result<(), Self::Error> {
        if let Some(limit) = self.fail_after {
            if self.transfers.len() >= limit {
                return Err(InjectedFault(limit));
            }
        }
        self.transfers.push(Transfer { select, bytes: frame.to_vec() });
        self.busy_left = self.busy_polls;
        Ok(())
    }
}
