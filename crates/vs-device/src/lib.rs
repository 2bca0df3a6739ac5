//! Serial bus driver for VS1053-class MIDI synth chips.
//!
//! Frames register writes and MIDI bytes for the chip's control and data
//! interfaces, gated on its data-request handshake, and installs the
//! realtime MIDI plugin at startup.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
mod capture;
mod driver;
mod error;
mod plugin;
mod traits;

#[cfg(feature = "std")]
pub use capture::{CaptureBus, InjectedFault, Transfer};
pub use driver::{Vs1053, SCI_BASS, SCI_MODE, SCI_VOL, SCI_WRITE, SDI_BYTE};
pub use error::{DeviceError, PluginError};
pub use plugin::{PluginWrite, PluginWrites, REALTIME_MIDI_PLUGIN};
pub use traits::{ControlBus, PollFn, ReadyPoll, Select, Spin};
