use std::fmt;

/// Stable note identifier, unique for the registry's lifetime and never
/// reused after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(pub u64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a note currently contributes to the mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteState {
    Idle,
    Sounding,
}

/// A marker on the line, bound to the tone derived from its position.
#[derive(Debug, Clone)]
pub struct Note {
    pub id: NoteId,
    /// Raw line coordinate the frequency was derived from.
    pub position: f32,
    pub frequency: f32,
    /// Precomputed tone, regenerated wholesale on retune.
    pub buffer: Vec<f32>,
    pub state: NoteState,
}

impl Note {
    pub fn is_sounding(&self) -> bool {
        self.state == NoteState::Sounding
    }
}
