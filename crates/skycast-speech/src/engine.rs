//! Speech synthesis engines.
//!
//! An engine speaks one utterance at a time and blocks the calling thread
//! until the utterance finishes. `interrupt` is the one call allowed from
//! another thread: it cuts the in-flight utterance short so the blocked
//! `speak` returns early.

use parking_lot::Mutex;
use std::io::Write;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::Duration;

use crate::error::SpeechError;

/// How often a blocked `speak` polls for utterance completion.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

pub trait SpeechEngine: Send + Sync {
    /// Speak a single utterance, blocking until it finishes or is
    /// interrupted. An interrupted utterance is not an error.
    fn speak(&self, sentence: &str) -> Result<(), SpeechError>;

    /// Cut the current utterance short. Callable from a different thread
    /// than the one blocked in [`speak`](Self::speak); a no-op when
    /// nothing is being spoken.
    fn interrupt(&self);
}

/// Drives a platform speech program as a child process, one process per
/// utterance. The utterance is written to the child's stdin and the
/// child speaks it; interruption kills the in-flight child.
#[derive(Debug)]
pub struct SubprocessEngine {
    program: String,
    args: Vec<String>,
    current: Mutex<Option<Child>>,
}

impl SubprocessEngine {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
            current: Mutex::new(None),
        }
    }

    /// The conventional speech program for the current platform. All of
    /// them read the utterance from stdin.
    pub fn platform_default() -> Self {
        #[cfg(target_os = "macos")]
        {
            Self::new("say", &[])
        }
        #[cfg(target_os = "windows")]
        {
            Self::new(
                "powershell",
                &[
                    "-NoProfile",
                    "-Command",
                    "Add-Type -AssemblyName System.Speech; \
                     (New-Object System.Speech.Synthesis.SpeechSynthesizer)\
                     .Speak([Console]::In.ReadToEnd())",
                ],
            )
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            Self::new("espeak-ng", &[])
        }
    }
}

impl SpeechEngine for SubprocessEngine {
    fn speak(&self, sentence: &str) -> Result<(), SpeechError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SpeechError::Engine(format!("failed to run {}: {e}", self.program)))?;

        if let Some(mut stdin) = child.stdin.take() {
            // A write failure means the child is already gone; the poll
            // loop below reaps it.
            if let Err(e) = stdin.write_all(sentence.as_bytes()) {
                tracing::debug!("failed to hand utterance to {}: {e}", self.program);
            }
        }

        *self.current.lock() = Some(child);

        loop {
            let mut slot = self.current.lock();
            let Some(running) = slot.as_mut() else {
                return Ok(());
            };
            match running.try_wait() {
                Ok(Some(status)) => {
                    *slot = None;
                    if !status.success() {
                        // Killed by interrupt, or the program refused the
                        // utterance; either way the utterance is over.
                        tracing::debug!(%status, "utterance ended early");
                    }
                    return Ok(());
                }
                Ok(None) => {}
                Err(e) => {
                    *slot = None;
                    return Err(SpeechError::Engine(e.to_string()));
                }
            }
            drop(slot);
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn interrupt(&self) {
        let mut slot = self.current.lock();
        if let Some(child) = slot.as_mut() {
            if let Err(e) = child.kill() {
                tracing::debug!("interrupt: child already gone: {e}");
            }
        }
    }
}

/// Engine backed by the `tts` crate (platform speech APIs).
#[cfg(feature = "native-tts")]
pub struct TtsEngine {
    tts: Mutex<tts::Tts>,
}

#[cfg(feature = "native-tts")]
impl TtsEngine {
    pub fn new() -> Result<Self, SpeechError> {
        let tts = tts::Tts::default().map_err(|e| SpeechError::Engine(e.to_string()))?;
        Ok(Self {
            tts: Mutex::new(tts),
        })
    }
}

#[cfg(feature = "native-tts")]
impl SpeechEngine for TtsEngine {
    fn speak(&self, sentence: &str) -> Result<(), SpeechError> {
        self.tts
            .lock()
            .speak(sentence, false)
            .map_err(|e| SpeechError::Engine(e.to_string()))?;

        // `tts` queues asynchronously; block at utterance granularity so
        // the controller's sentence-boundary cancellation holds.
        loop {
            match self.tts.lock().is_speaking() {
                Ok(true) => {}
                Ok(false) => return Ok(()),
                Err(e) => return Err(SpeechError::Engine(e.to_string())),
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn interrupt(&self) {
        if let Err(e) = self.tts.lock().stop() {
            tracing::warn!("failed to stop speech engine: {e}");
        }
    }
}
