//! Decodes an English word into aligned letter parts and sound parts, and
//! classifies it against the VC / CVC / CVCE / CVCVC syllable shapes.
//!
//! Both the [`Decoder`] and the [`PatternClassifier`] borrow the rule tables
//! and the pronunciation dictionary immutably, so one loaded set of tables
//! can serve any number of threads.

pub mod decoder;
pub mod pattern;

#[cfg(test)]
mod test_utils;

pub use decoder::Decoder;
pub use pattern::{PatternClassifier, PatternOptions, Shape};

/// Errors surfaced by decoding and shape classification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The word has no pronunciation entry.
    #[error("word '{word}' not found in the pronunciation dictionary")]
    UnknownWord { word: String },

    /// The word breaks the single-vowel-letter assumption of a shape.
    #[error("word '{word}' is inconsistent with the {shape} shape: {reason}")]
    Consistency {
        word: String,
        shape: Shape,
        reason: &'static str,
    },
}
