use thiserror::Error;

/// Speech playback errors.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// The narrative text was empty, or contained no sentences.
    #[error("nothing to speak")]
    NothingToSay,

    /// A speech task is already running; only one may be live at a time.
    #[error("speech is already in progress")]
    Busy,

    /// The underlying synthesis engine failed.
    #[error("speech engine error: {0}")]
    Engine(String),
}

impl SpeechError {
    /// Message suitable for a user-facing dialog.
    pub fn user_message(&self) -> &'static str {
        match self {
            SpeechError::NothingToSay => "No weather data to speak.",
            SpeechError::Busy => "Already speaking. Stop the current playback first.",
            SpeechError::Engine(_) => "Speech output failed. Check your speech engine.",
        }
    }
}
