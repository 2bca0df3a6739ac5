//! Multi-track pattern sequencer.
//!
//! Each track holds events at millisecond offsets from the pattern start.
//! The pattern loops either every `loop_length` ms, or, when that is zero,
//! every `max(track span)` ms. [`Sequencer::advance`] is polled with the
//! current clock reading and fires every event whose offset the pattern
//! position has passed, once per repetition.

use thiserror::Error;
use tracing::{debug, trace, warn};
use vs_ir::{elapsed, Millis, SeqEvent};

use crate::track::{Track, MAX_EVENTS};

/// Default number of tracks.
pub const MAX_TRACKS: usize = 8;

/// Error type for sequence editing.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SequenceError {
    #[error("track {track} does not exist (sequencer has {tracks})")]
    NoSuchTrack { track: usize, tracks: usize },
    #[error("track {track} is full ({capacity} events)")]
    TrackFull { track: usize, capacity: usize },
}

/// Tracks plus the pattern clock.
#[derive(Clone, Debug)]
pub struct Sequencer<const TRACKS: usize = MAX_TRACKS, const EVENTS: usize = MAX_EVENTS> {
    tracks: [Track<EVENTS>; TRACKS],
    running: bool,
    /// Clock reading captured by `start`
    start_time: Millis,
    /// Explicit pattern period, 0 = derive from track spans
    loop_length: Millis,
    /// Repetition index seen on the last advance
    cycle: u32,
}

impl<const TRACKS: usize, const EVENTS: usize> Sequencer<TRACKS, EVENTS> {
    /// Create a stopped sequencer with empty tracks.
    pub fn new() -> Self {
        Self {
            tracks: core::array::from_fn(|_| Track::new()),
            running: false,
            start_time: 0,
            loop_length: 0,
            cycle: 0,
        }
    }

    fn track_mut(&mut self, track: usize) -> Result<&mut Track<EVENTS>, SequenceError> {
        self.tracks
            .get_mut(track)
            .ok_or(SequenceError::NoSuchTrack { track, tracks: TRACKS })
    }

    /// Remove every event from `track`.
    pub fn clear_track(&mut self, track: usize) -> Result<(), SequenceError> {
        self.track_mut(track)?.clear();
        debug!(track, "track cleared");
        Ok(())
    }

    /// Append `event` to `track`. The event starts unfired.
    pub fn add_event(&mut self, track: usize, mut event: SeqEvent) -> Result<(), SequenceError> {
        event.fired = false;
        let slot = self.track_mut(track)?;
        if slot.push(event).is_err() {
            warn!(track, capacity = EVENTS, "track full, event dropped");
            return Err(SequenceError::TrackFull { track, capacity: EVENTS });
        }
        debug!(
            track,
            offset = event.time_offset,
            channel = event.channel,
            program = event.instrument.program(),
            note = event.note.number(),
            velocity = event.velocity,
            duration = event.duration,
            "event added"
        );
        Ok(())
    }

    /// Start (or restart) playback from the top of the pattern at `now`.
    ///
    /// `loop_length` of 0 loops on the longest track span.
    pub fn start(&mut self, now: Millis, loop_length: Millis) {
        self.start_time = now;
        self.loop_length = loop_length;
        self.cycle = 0;
        self.running = true;
        for track in &mut self.tracks {
            track.reset_fired();
        }
        debug!(now, loop_length, "sequencer started");
    }

    /// Stop firing events. Tracks are left as they are.
    pub fn stop(&mut self) {
        self.running = false;
        debug!("sequencer stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Explicit loop length passed to the last `start`.
    pub fn loop_length(&self) -> Millis {
        self.loop_length
    }

    /// Current pattern period. Never zero.
    pub fn period(&self) -> Millis {
        let period = if self.loop_length > 0 {
            self.loop_length
        } else {
            self.tracks.iter().map(|t| t.span()).max().unwrap_or(0)
        };
        period.max(1)
    }

    /// Position within the pattern at `now`, if running.
    pub fn position(&self, now: Millis) -> Option<Millis> {
        self.running
            .then(|| elapsed(now, self.start_time) % self.period())
    }

    pub fn track(&self, track: usize) -> Option<&Track<EVENTS>> {
        self.tracks.get(track)
    }

    pub fn tracks(&self) -> &[Track<EVENTS>] {
        &self.tracks
    }

    /// Fire every due event at `now` through `fire`, track by track in
    /// insertion order. Returns how many fired.
    ///
    /// An event fires when its offset is at or before the pattern position
    /// and it has not fired this repetition. On the first advance of a new
    /// repetition every event becomes eligible again. If `fire` fails the
    /// event stays unfired and the error is returned immediately.
    pub fn advance<E, F>(&mut self, now: Millis, mut fire: F) -> Result<usize, E>
    where
        F: FnMut(usize, &SeqEvent) -> Result<(), E>,
    {
        if !self.running {
            return Ok(0);
        }

        let elapsed = elapsed(now, self.start_time);
        let period = self.period();
        let position = elapsed % period;
        let cycle = elapsed / period;

        if cycle != self.cycle {
            trace!(cycle, period, "pattern wrapped");
            self.cycle = cycle;
            for track in &mut self.tracks {
                track.reset_fired();
            }
        }

        let mut fired = 0;
        for (index, track) in self.tracks.iter_mut().enumerate() {
            for event in track.events_mut() {
                if !event.fired && event.time_offset <= position {
                    fire(index, &*event)?;
                    event.fired = true;
                    fired += 1;
                    trace!(track = index, position, note = event.note.number(), "event fired");
                } else if event.fired && event.time_offset > position {
                    event.fired = false;
                }
            }
        }
        Ok(fired)
    }
}

impl<const TRACKS: usize, const EVENTS: usize> Default for Sequencer<TRACKS, EVENTS> {
    fn default() -> Self {
        Self::new()
    }
}
