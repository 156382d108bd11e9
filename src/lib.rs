//! Note-line audio engine.
//!
//! Markers placed along a horizontal line are each bound to a sine tone
//! whose pitch follows the marker's position on a logarithmic C3 to C6
//! scale. Triggered markers sound together, mixed and normalized so the
//! output never clips. The crate contains no rendering or input
//! decoding; a UI collaborator drives [`core::NoteEngine`] directly or
//! through [`messaging::MessageBus`], and playback goes to an
//! [`playback::AudioSink`].

pub mod config;
pub mod core;
pub mod error;
pub mod messaging;
pub mod playback;
pub mod utils;
pub mod wav;

pub use config::EngineConfig;
pub use core::{Note, NoteEngine, NoteId, NoteState};
pub use error::EngineError;
