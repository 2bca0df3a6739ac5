//! Millisecond clock arithmetic.
//!
//! The host clock is a free-running `u32` millisecond counter that wraps
//! roughly every 49.7 days. All comparisons go through these helpers so
//! the sequencer and voice pool keep working across the wrap.

/// A millisecond reading or duration.
pub type Millis = u32;

/// Time elapsed from `since` to `now`, modulo the counter width.
#[inline]
pub const fn elapsed(now: Millis, since: Millis) -> Millis {
    now.wrapping_sub(since)
}

/// True once `now` has reached `deadline`.
///
/// Deadlines less than half the counter range in the past count as reached,
/// so a deadline scheduled just before the wrap still fires just after it.
#[inline]
pub const fn deadline_reached(now: Millis, deadline: Millis) -> bool {
    (now.wrapping_sub(deadline) as i32) >= 0
}
