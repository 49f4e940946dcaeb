//! Spoken-narrative rendering of a forecast.
//!
//! One sentence per sample, delimited by `". "`. The delimiter doubles as
//! the cancellation boundary for speech playback, so the split here and
//! the sentence iteration in the speech crate must agree.

use crate::types::Forecast;

/// Sentence delimiter used when building and when splitting the narrative.
pub const SENTENCE_DELIMITER: &str = ". ";

/// Build the spoken narrative for a forecast: one sentence per sample,
/// in sample order, each terminated with the delimiter.
pub fn narrative(forecast: &Forecast) -> String {
    let mut text = String::new();
    for s in &forecast.samples {
        text.push_str(&format!(
            "On {}, the temperature is {:.1} degrees Celsius with {}{}",
            s.date.format("%Y-%m-%d"),
            s.temperature,
            s.description,
            SENTENCE_DELIMITER
        ));
    }
    text
}

/// Split narrative text into the sentences spoken one utterance at a time.
/// Empty fragments (e.g. after the trailing delimiter) are dropped.
pub fn sentences(text: &str) -> Vec<String> {
    text.split(SENTENCE_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
