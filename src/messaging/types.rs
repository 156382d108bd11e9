use crate::core::note::NoteId;

/// Commands the UI collaborator sends the engine. Everything that
/// mutates the note set flows through this queue, including release
/// timer firings, so operations never interleave.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineMessage {
    AddNote(f32),
    RetuneNote(NoteId, f32),
    RemoveNote(NoteId),
    TriggerNote(NoteId),
    /// Sent by the release timer armed at trigger time.
    ReleaseElapsed(NoteId),
    StopAll,
}
