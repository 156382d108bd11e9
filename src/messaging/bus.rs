use std::sync::{Arc, RwLock};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::EngineMessage;
use crate::core::engine::NoteEngine;
use crate::core::note::NoteId;

/// MessageBus serializes commands from the UI collaborator into engine
/// calls over a single queue.
pub struct MessageBus {
    sender: Sender<EngineMessage>,
    receiver: Receiver<EngineMessage>,
    engine: Arc<RwLock<NoteEngine>>,
}

impl MessageBus {
    /// Create a new message bus connected to the engine
    pub fn new(engine: Arc<RwLock<NoteEngine>>) -> Self {
        let (sender, receiver) = unbounded();

        MessageBus {
            sender,
            receiver,
            engine,
        }
    }

    /// Get a sender that can be cloned and passed to UI components
    pub fn sender(&self) -> Sender<EngineMessage> {
        self.sender.clone()
    }

    pub fn send(&self, msg: EngineMessage) -> Result<(), crossbeam_channel::SendError<EngineMessage>> {
        self.sender.send(msg)
    }

    /// Drain pending messages, handling at most `max_messages`. Returns
    /// how many were handled.
    pub fn process_messages(&self, max_messages: usize) -> usize {
        let mut count = 0;

        while count < max_messages {
            match self.receiver.try_recv() {
                Ok(msg) => {
                    count += 1;
                    self.handle_message(msg);
                }
                Err(_) => break,
            }
        }
        count
    }

    /// Handle an individual message
    fn handle_message(&self, msg: EngineMessage) {
        match msg {
            EngineMessage::AddNote(position) => {
                if let Ok(mut engine) = self.engine.write() {
                    engine.add_note(position);
                }
            }
            EngineMessage::RetuneNote(id, position) => {
                if let Ok(mut engine) = self.engine.write() {
                    if let Err(e) = engine.retune_note(id, position) {
                        log::warn!("retune failed: {e}");
                    }
                }
            }
            EngineMessage::RemoveNote(id) => {
                if let Ok(mut engine) = self.engine.write() {
                    if let Err(e) = engine.remove_note(id) {
                        log::warn!("remove failed: {e}");
                    }
                }
            }
            EngineMessage::TriggerNote(id) => {
                let duration = {
                    let Ok(mut engine) = self.engine.write() else { return };
                    match engine.trigger_note(id) {
                        Ok(()) => engine.config().duration_secs,
                        Err(e) => {
                            log::warn!("trigger failed: {e}");
                            return;
                        }
                    }
                };
                self.arm_release_timer(id, duration);
            }
            EngineMessage::ReleaseElapsed(id) => {
                if let Ok(mut engine) = self.engine.write() {
                    engine.release_elapsed(id);
                }
            }
            EngineMessage::StopAll => {
                if let Ok(mut engine) = self.engine.write() {
                    engine.stop_all();
                }
            }
        }
    }

    /// One-shot timer for the audible window. The firing feeds back into
    /// the same queue, so it is serialized with every other operation.
    fn arm_release_timer(&self, id: NoteId, duration_secs: f32) {
        let sender = self.sender.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_secs_f32(duration_secs));
            // Receiver may be gone on shutdown.
            let _ = sender.send(EngineMessage::ReleaseElapsed(id));
        });
    }
}
