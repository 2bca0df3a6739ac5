//! Bus abstraction and ready-wait strategy.

/// Which of the chip's two select lines frames a transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Select {
    /// Serial control interface (register reads/writes).
    Control,
    /// Serial data interface (MIDI/audio bytes).
    Data,
}

/// The serial bus wiring between the host and the chip.
///
/// Implementors own the pin and SPI peripherals. The driver never touches
/// them directly.
pub trait ControlBus {
    /// Transport error.
    type Error: core::fmt::Debug;

    /// Sample the chip's data-request line. `true` means it can take the
    /// next frame.
    fn is_ready(&mut self) -> Result<bool, Self::Error>;

    /// Drive `select` active, clock out `frame`, release `select`.
    fn write_frame(&mut self, select: Select, frame: &[u8]) -> Result<(), Self::Error>;
}

impl<B: ControlBus + ?Sized> ControlBus for &mut B {
    type Error = B::Error;

    fn is_ready(&mut self) -> Result<bool, Self::Error> {
        (**self).is_ready()
    }

    fn write_frame(&mut self, select: Select, frame: &[u8]) -> Result<(), Self::Error> {
        (**self).write_frame(select, frame)
    }
}

/// What the driver does between two polls of the ready line.
pub trait ReadyPoll {
    fn idle(&mut self);
}

/// Busy-spin with a CPU hint. Never yields.
#[derive(Clone, Copy, Debug, Default)]
pub struct Spin;

impl ReadyPoll for Spin {
    #[inline]
    fn idle(&mut self) {
        core::hint::spin_loop();
    }
}

/// Run a caller-supplied closure between polls, e.g. to yield to a
/// cooperative scheduler or feed a watchdog.
#[derive(Clone, Copy, Debug)]
pub struct PollFn<F>(pub F);

impl<F: FnMut()> ReadyPoll for PollFn<F> {
    fn idle(&mut self) {
        (self.0)()
    }
}
