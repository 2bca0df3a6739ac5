//! Millisecond clocks for the synth.

use vs_ir::{Clock, Millis};

/// A clock advanced by hand. Used for tests and offline simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManualClock {
    now: Millis,
}

impl ManualClock {
    pub const fn new(start: Millis) -> Self {
        Self { now: start }
    }

    pub fn set(&mut self, now: Millis) {
        self.now = now;
    }

    /// Move forward by `ms`, wrapping like a hardware counter.
    pub fn advance(&mut self, ms: Millis) {
        self.now = self.now.wrapping_add(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&mut self) -> Millis {
        self.now
    }
}

/// Adapts a `millis()`-style function, e.g. a HAL timer read.
#[derive(Clone, Copy, Debug)]
pub struct ClockFn<F>(pub F);

impl<F: FnMut() -> Millis> Clock for ClockFn<F> {
    fn now_ms(&mut self) -> Millis {
        (self.0)()
    }
}

/// Wall clock measured from construction.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: std::time::Instant::now() }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for MonotonicClock {
    fn now_ms(&mut self) -> Millis {
        // Truncation wraps the same way a 32-bit hardware counter does.
        self.origin.elapsed().as_millis() as Millis
    }
}
