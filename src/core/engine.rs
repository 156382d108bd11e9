//! Note engine facade: the surface the UI collaborator drives.

use std::path::Path;

use anyhow::Result;

use crate::config::EngineConfig;
use crate::core::mix;
use crate::core::note::{Note, NoteId};
use crate::core::registry::NoteRegistry;
use crate::core::scheduler::PlaybackScheduler;
use crate::error::EngineError;
use crate::playback::AudioSink;

/// Owns the registry, the scheduler, and the sink. Every mutation goes
/// through one of the methods below, so registry changes, state flips,
/// and mix recomputation never interleave.
pub struct NoteEngine {
    config: EngineConfig,
    registry: NoteRegistry,
    scheduler: PlaybackScheduler,
    sink: Box<dyn AudioSink>,
}

impl NoteEngine {
    pub fn new(config: EngineConfig, sink: Box<dyn AudioSink>) -> Self {
        Self {
            config,
            registry: NoteRegistry::new(),
            scheduler: PlaybackScheduler::new(),
            sink,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Place a marker at `position` and return its id. The note starts
    /// idle; nothing plays until it is triggered.
    pub fn add_note(&mut self, position: f32) -> NoteId {
        let id = self.registry.add(position, &self.config);
        if let Some(note) = self.registry.get(id) {
            log::debug!("added note {id} at {position} ({:.2} Hz)", note.frequency);
        }
        id
    }

    /// Move a marker. Frequency and buffer are re-derived together; id
    /// and sounding state stay as they were.
    pub fn retune_note(&mut self, id: NoteId, position: f32) -> Result<(), EngineError> {
        self.registry.retune(id, position, &self.config)?;
        log::debug!("retuned note {id} to {position}");
        Ok(())
    }

    /// Delete a marker. A note that was sounding is dropped from the mix
    /// immediately and its pending release becomes a no-op.
    pub fn remove_note(&mut self, id: NoteId) -> Result<(), EngineError> {
        let note = self.registry.remove(id)?;
        self.scheduler.cancel(id);
        log::debug!("removed note {id}");
        if note.is_sounding() {
            self.emit_mix()?;
        }
        Ok(())
    }

    /// Start (or restart) a note's audible window and hand the sink the
    /// mix over everything now sounding. The caller is expected to arm a
    /// release timer for `duration_secs` and report back through
    /// `release_elapsed`.
    pub fn trigger_note(&mut self, id: NoteId) -> Result<(), EngineError> {
        self.scheduler.trigger(&mut self.registry, id)?;
        log::debug!("triggered note {id}");
        self.emit_mix()
    }

    /// Host timer hook for a trigger armed `duration_secs` ago. Firing
    /// on a removed or re-triggered note does nothing.
    pub fn release_elapsed(&mut self, id: NoteId) {
        if self.scheduler.release_elapsed(&mut self.registry, id) {
            log::debug!("note {id} released");
        }
    }

    pub fn query_frequency(&self, id: NoteId) -> Result<f32, EngineError> {
        self.registry
            .get(id)
            .map(|n| n.frequency)
            .ok_or(EngineError::NotFound(id))
    }

    /// Notes in insertion order, for the collaborator to render.
    pub fn notes(&self) -> &[Note] {
        self.registry.all()
    }

    /// Return every note to idle and cut the audio with a silent buffer.
    pub fn stop_all(&mut self) {
        self.scheduler.stop_all(&mut self.registry);
        let silence = vec![0.0f32; self.config.frame_len()];
        self.sink.play(&silence, self.config.sample_rate);
    }

    /// Write the mix over the currently sounding notes to a WAV file.
    /// With nothing sounding this bounces one buffer of silence.
    pub fn bounce_mix(&self, path: &Path) -> Result<()> {
        let buffers = self.registry.sounding_buffers();
        let mixed = mix::mix(&buffers, self.config.frame_len())?;
        crate::wav::write_wav_16bit(path, &mixed, self.config.sample_rate)
    }

    /// Recompute the mix over all sounding notes and hand one snapshot
    /// to the sink.
    fn emit_mix(&mut self) -> Result<(), EngineError> {
        let buffers = self.registry.sounding_buffers();
        let mixed = mix::mix(&buffers, self.config.frame_len())?;
        self.sink.play(&mixed, self.config.sample_rate);
        Ok(())
    }
}
