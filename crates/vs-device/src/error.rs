//! Driver error types.

use thiserror::Error;

/// A malformed plugin image.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PluginError {
    /// A record header or its payload runs past the end of the image.
    #[error("plugin image truncated in record starting at word {offset}")]
    Truncated { offset: usize },
    /// A record targets a register outside the 8-bit address space.
    #[error("plugin record at word {offset} targets invalid register {address:#06x}")]
    InvalidRegister { offset: usize, address: u16 },
}

/// Error type for chip operations.
#[derive(Debug, Error)]
pub enum DeviceError<E: core::fmt::Debug> {
    /// The bus implementation reported a failure.
    #[error("bus transfer failed: {0:?}")]
    Bus(E),
    /// The plugin image could not be parsed. Nothing was written.
    #[error(transparent)]
    Plugin(#[from] PluginError),
}
