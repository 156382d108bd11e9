//! Sounding/idle lifecycle with timed auto-release.
//!
//! The scheduler does not own timers. The host arms a one-shot timer per
//! trigger and later reports back through `release_elapsed`; each note
//! carries a count of releases still in flight, so a re-trigger restarts
//! the audible window (earlier firings are absorbed by the count) and a
//! firing for a removed note is a no-op.

use std::collections::HashMap;

use crate::core::note::{NoteId, NoteState};
use crate::core::registry::NoteRegistry;
use crate::error::EngineError;

#[derive(Debug, Default)]
pub struct PlaybackScheduler {
    pending_releases: HashMap<NoteId, u32>,
}

impl PlaybackScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a note sounding and account for the release the host will
    /// arm. Re-triggering an already sounding note stacks another
    /// pending release, which is what restarts its window.
    pub fn trigger(&mut self, registry: &mut NoteRegistry, id: NoteId) -> Result<(), EngineError> {
        let note = registry.get_mut(id).ok_or(EngineError::NotFound(id))?;
        note.state = NoteState::Sounding;
        *self.pending_releases.entry(id).or_insert(0) += 1;
        Ok(())
    }

    /// Host timer hook. Returns true when the note actually fell back to
    /// Idle; a stale firing (note re-triggered since, or removed) does
    /// nothing.
    pub fn release_elapsed(&mut self, registry: &mut NoteRegistry, id: NoteId) -> bool {
        let Some(count) = self.pending_releases.get_mut(&id) else {
            return false;
        };
        *count -= 1;
        if *count > 0 {
            return false;
        }
        self.pending_releases.remove(&id);

        match registry.get_mut(id) {
            Some(note) => {
                note.state = NoteState::Idle;
                true
            }
            // Removed while the timer was in flight.
            None => false,
        }
    }

    /// Forget pending releases for a removed note so later firings are
    /// no-ops.
    pub fn cancel(&mut self, id: NoteId) {
        self.pending_releases.remove(&id);
    }

    /// Silence everything: every note goes Idle and all in-flight
    /// releases become stale.
    pub fn stop_all(&mut self, registry: &mut NoteRegistry) {
        self.pending_releases.clear();
        for note in registry.iter_mut() {
            note.state = NoteState::Idle;
        }
    }
}
