use serde::{Deserialize, Serialize};

/// Beam width hint for the translation model, widened for longer inputs.
pub fn search_width(text: &str) -> u32 {
    search_width_for_words(text.split_whitespace().count())
}

pub fn search_width_for_words(word_count: usize) -> u32 {
    match word_count {
        0..=20 => 3,
        21..=50 => 5,
        51..=100 => 7,
        _ => 9,
    }
}

/// What the dubbing stage does when the translator fails for a sentence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationFailurePolicy {
    /// Abort the whole request.
    #[default]
    Fatal,
    /// Keep the source text and continue.
    Passthrough,
}
