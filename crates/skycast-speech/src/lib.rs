//! Cancellable read-aloud playback for Skycast
//!
//! Converts narrative text into a background speech task that speaks one
//! sentence per utterance and can be cancelled at sentence boundaries.
//! The synthesis engine itself sits behind [`SpeechEngine`], so the
//! controller logic is testable without audio output.

pub mod controller;
pub mod engine;
pub mod error;

pub use controller::{SpeechController, SpeechState};
pub use engine::{SpeechEngine, SubprocessEngine};
pub use error::SpeechError;

#[cfg(feature = "native-tts")]
pub use engine::TtsEngine;
