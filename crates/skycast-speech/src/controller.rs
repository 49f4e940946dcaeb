//! The speech playback controller.
//!
//! Owns the one background speech task the application is allowed to
//! have. Task creation is guarded by a single-slot registry (a mutexed
//! `Option<JoinHandle>`), not by UI affordances: a second start while a
//! task is live gets [`SpeechError::Busy`]. Cancellation is an explicit
//! token observed at sentence boundaries, so stopping takes effect after
//! at most the sentence currently in flight.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{Builder, JoinHandle};

use skycast_weather::sentences;

use crate::engine::SpeechEngine;
use crate::error::SpeechError;

/// Observable playback state, derived from the task slot and the
/// cancellation token rather than stored separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechState {
    Idle,
    Speaking,
    /// Stop was requested but the worker has not yet observed the token.
    Cancelling,
}

pub struct SpeechController {
    engine: Arc<dyn SpeechEngine>,
    cancel: Arc<AtomicBool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl SpeechController {
    pub fn new(engine: Arc<dyn SpeechEngine>) -> Self {
        Self {
            engine,
            cancel: Arc::new(AtomicBool::new(false)),
            task: Mutex::new(None),
        }
    }

    /// Start reading `text` aloud on a background thread, one sentence
    /// per utterance.
    ///
    /// Returns [`SpeechError::NothingToSay`] for text without sentences
    /// and [`SpeechError::Busy`] while a previous task is still live; in
    /// both cases no task is spawned.
    pub fn start(&self, text: &str) -> Result<(), SpeechError> {
        let list = sentences(text);
        if list.is_empty() {
            return Err(SpeechError::NothingToSay);
        }

        let mut slot = self.task.lock();
        if let Some(handle) = slot.as_ref() {
            if !handle.is_finished() {
                return Err(SpeechError::Busy);
            }
        }
        *slot = None;

        self.cancel.store(false, Ordering::SeqCst);
        let engine = Arc::clone(&self.engine);
        let cancel = Arc::clone(&self.cancel);

        let handle = Builder::new()
            .name("skycast-speech".to_string())
            .spawn(move || {
                for sentence in list {
                    // Token is checked before each utterance; a set token
                    // drops the remaining sentences.
                    if cancel.load(Ordering::SeqCst) {
                        tracing::debug!("speech cancelled at sentence boundary");
                        break;
                    }
                    if let Err(e) = engine.speak(&sentence) {
                        tracing::warn!("speech task aborted: {e}");
                        break;
                    }
                }
            })
            .map_err(|e| SpeechError::Engine(format!("failed to spawn speech task: {e}")))?;

        *slot = Some(handle);
        tracing::info!("speech task started");
        Ok(())
    }

    /// Request cancellation of the running task. A no-op when idle.
    ///
    /// Sets the token and interrupts the in-flight utterance; the worker
    /// exits at the next sentence boundary.
    pub fn stop(&self) {
        let slot = self.task.lock();
        match slot.as_ref() {
            Some(handle) if !handle.is_finished() => {
                self.cancel.store(true, Ordering::SeqCst);
                self.engine.interrupt();
                tracing::info!("speech stop requested");
            }
            _ => {}
        }
    }

    pub fn state(&self) -> SpeechState {
        let mut slot = self.task.lock();
        match slot.as_ref() {
            Some(handle) if !handle.is_finished() => {
                if self.cancel.load(Ordering::SeqCst) {
                    SpeechState::Cancelling
                } else {
                    SpeechState::Speaking
                }
            }
            Some(_) => {
                // Reap the finished task so the slot is free again.
                *slot = None;
                SpeechState::Idle
            }
            None => SpeechState::Idle,
        }
    }

    /// True while a task is live (speaking or cancelling).
    pub fn is_active(&self) -> bool {
        self.state() != SpeechState::Idle
    }
}
