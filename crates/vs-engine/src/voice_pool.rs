//! VoicePool: fixed slots tracking when each sounding note must be released.

use tracing::{debug, warn};
use vs_ir::{deadline_reached, Millis, MidiMessage, MidiSink, Note};

/// Identifier for a voice slot in the pool.
pub type VoiceId = usize;

/// Default number of simultaneously scheduled note-offs.
pub const MAX_VOICES: usize = 32;

/// Note-off velocity used when a voice is released.
pub const RELEASE_VELOCITY: u8 = 64;

/// A sounding note waiting for its note-off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveVoice {
    pub channel: u8,
    pub note: Note,
    /// Clock reading at which the note-off is due.
    pub off_time: Millis,
}

/// Fixed pool of pending note-offs.
///
/// Allocation takes the first free slot. When every slot is taken the new
/// request is dropped and its note keeps sounding until something else
/// silences it, so `N` must cover the densest expected polyphony.
#[derive(Clone, Debug)]
pub struct VoicePool<const N: usize = MAX_VOICES> {
    /// Voice slots (None = free).
    slots: [Option<ActiveVoice>; N],
    /// Requests dropped because the pool was full.
    dropped: u32,
}

impl<const N: usize> VoicePool<N> {
    /// Create a new empty voice pool.
    pub const fn new() -> Self {
        Self { slots: [None; N], dropped: 0 }
    }

    /// Schedule a note-off for `note` on `channel` at `off_time`.
    ///
    /// Returns the slot used, or `None` if the pool is exhausted.
    pub fn schedule_off(&mut self, channel: u8, note: Note, off_time: Millis) -> Option<VoiceId> {
        let Some(id) = self.slots.iter().position(Option::is_none) else {
            self.dropped = self.dropped.saturating_add(1);
            warn!(channel, note = note.number(), capacity = N, "no free voice slot, note-off dropped");
            return None;
        };
        self.slots[id] = Some(ActiveVoice { channel, note, off_time });
        debug!(voice = id, channel, note = note.number(), off_time, "note-off scheduled");
        Some(id)
    }

    /// Send a note-off for every voice whose off time has been reached and
    /// free its slot. Returns the number of voices retired.
    ///
    /// If the sink fails, the failing voice stays allocated and is retried
    /// on the next call.
    pub fn retire_due<S: MidiSink>(
        &mut self,
        sink: &mut S,
        now: Millis,
        release_velocity: u8,
    ) -> Result<usize, S::Error> {
        let mut retired = 0;
        for slot in &mut self.slots {
            let Some(voice) = *slot else { continue };
            if !deadline_reached(now, voice.off_time) {
                continue;
            }
            sink.send(MidiMessage::NoteOff {
                channel: voice.channel,
                note: voice.note,
                velocity: release_velocity,
            })?;
            *slot = None;
            retired += 1;
        }
        Ok(retired)
    }

    /// Get a pending voice by slot.
    pub fn get(&self, id: VoiceId) -> Option<&ActiveVoice> {
        self.slots.get(id).and_then(|s| s.as_ref())
    }

    /// Iterate pending voices with their slot ids.
    pub fn iter(&self) -> impl Iterator<Item = (VoiceId, &ActiveVoice)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|v| (i, v)))
    }

    /// Free every slot without sending anything.
    pub fn clear(&mut self) {
        self.slots = [None; N];
    }

    /// Count of active (occupied) voice slots.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Total note-offs dropped because the pool was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<const N: usize> Default for VoicePool<N> {
    fn default() -> Self {
        Self::new()
    }
}
