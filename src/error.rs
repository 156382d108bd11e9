use thiserror::Error;

use crate::core::note::NoteId;

/// Errors surfaced by the note engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The referenced note is not in the registry.
    #[error("no note with id {0}")]
    NotFound(NoteId),

    /// Buffers of differing lengths reached the mixer. Buffers are all
    /// synthesized at the configured length, so this indicates a
    /// synthesis bug rather than a caller mistake.
    #[error("buffer length mismatch: expected {expected} samples, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
}
