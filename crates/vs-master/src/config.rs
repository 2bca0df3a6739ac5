//! Synth configuration.

use vs_device::REALTIME_MIDI_PLUGIN;
use vs_engine::RELEASE_VELOCITY;

/// Note-on velocity when the caller has no preference.
pub const DEFAULT_VELOCITY: u8 = 100;

/// Velocity the composer uses for notes.
pub const COMPOSER_VELOCITY: u8 = 110;

/// Startup and playback settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SynthConfig {
    /// Plugin image written by `begin`
    pub plugin: &'static [u16],
    /// Volume register attenuation (left, right) written by `begin`, in
    /// 0.5 dB steps, 0 = loudest
    pub volume: (u8, u8),
    /// Velocity of scheduled note-offs
    pub release_velocity: u8,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            plugin: &REALTIME_MIDI_PLUGIN,
            volume: (0, 0),
            release_velocity: RELEASE_VELOCITY,
        }
    }
}
