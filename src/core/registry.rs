//! Note registry: owns the note set, allocates ids, keeps
//! frequency and buffer in lockstep.

use crate::config::EngineConfig;
use crate::core::note::{Note, NoteId, NoteState};
use crate::core::{pitch, tone};
use crate::error::EngineError;

/// Insertion-ordered note store. Ids count up monotonically and are
/// never reused, even after removal.
#[derive(Debug, Default)]
pub struct NoteRegistry {
    notes: Vec<Note>,
    next_id: u64,
}

impl NoteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a note at `position` in the Idle state and return its id.
    pub fn add(&mut self, position: f32, config: &EngineConfig) -> NoteId {
        let id = NoteId(self.next_id);
        self.next_id += 1;

        let frequency = derive_frequency(position, config);
        let buffer = tone::synthesize(frequency, config.duration_secs, config.sample_rate, config.amplitude);
        self.notes.push(Note {
            id,
            position,
            frequency,
            buffer,
            state: NoteState::Idle,
        });
        id
    }

    /// Move a note to a new position, replacing its frequency and buffer
    /// together. Id and state are untouched.
    pub fn retune(&mut self, id: NoteId, position: f32, config: &EngineConfig) -> Result<(), EngineError> {
        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(EngineError::NotFound(id))?;

        let frequency = derive_frequency(position, config);
        note.position = position;
        note.frequency = frequency;
        note.buffer = tone::synthesize(frequency, config.duration_secs, config.sample_rate, config.amplitude);
        Ok(())
    }

    /// Delete a note, returning it so the caller can see whether it was
    /// sounding when removed.
    pub fn remove(&mut self, id: NoteId) -> Result<Note, EngineError> {
        let pos = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or(EngineError::NotFound(id))?;
        Ok(self.notes.remove(pos))
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn get_mut(&mut self, id: NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| n.id == id)
    }

    /// Notes in insertion order.
    pub fn all(&self) -> &[Note] {
        &self.notes
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Note> {
        self.notes.iter_mut()
    }

    /// Buffers of every sounding note, in insertion order.
    pub fn sounding_buffers(&self) -> Vec<&[f32]> {
        self.notes
            .iter()
            .filter(|n| n.is_sounding())
            .map(|n| n.buffer.as_slice())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

fn derive_frequency(position: f32, config: &EngineConfig) -> f32 {
    pitch::position_to_freq(
        position,
        config.line_start,
        config.line_end,
        config.min_freq,
        config.max_freq,
    )
}
