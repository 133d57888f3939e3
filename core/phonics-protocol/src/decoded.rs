use core::fmt;

use alloc::string::String;
use alloc::vec::Vec;

use crate::phoneme::Phoneme;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// The rule category that produced a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[repr(u8)]
pub enum Indicator {
    ShortVowel = 0,
    LongVowel = 1,
    HardConsonant = 2,
    SoftConsonant = 3,
    LetterCombo = 4,
    SilentE = 5,
    Undecodable = 6,
}

impl Indicator {
    pub const ALL: [Indicator; 7] = [
        Indicator::ShortVowel,
        Indicator::LongVowel,
        Indicator::HardConsonant,
        Indicator::SoftConsonant,
        Indicator::LetterCombo,
        Indicator::SilentE,
        Indicator::Undecodable,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Indicator::ShortVowel => "SHORT_VOWEL",
            Indicator::LongVowel => "LONG_VOWEL",
            Indicator::HardConsonant => "HARD_CONSONANT",
            Indicator::SoftConsonant => "SOFT_CONSONANT",
            Indicator::LetterCombo => "LETTER_COMBO",
            Indicator::SilentE => "SILENT_E",
            Indicator::Undecodable => "UNDECODABLE",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One aligned letter-part / sound-part pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Segment {
    pub letter_part: String,
    /// Empty for silent letters.
    pub sound_part: Vec<Phoneme>,
    pub indicator: Indicator,
}

impl Segment {
    pub fn new(letter_part: impl Into<String>, sound_part: Vec<Phoneme>, indicator: Indicator) -> Self {
        Self {
            letter_part: letter_part.into(),
            sound_part,
            indicator,
        }
    }
}

/// Result of decoding one word. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct DecodedWord {
    word: String,
    segments: Vec<Segment>,
    decodable: bool,
}

impl DecodedWord {
    pub fn new(word: String, segments: Vec<Segment>, decodable: bool) -> Self {
        Self {
            word,
            segments,
            decodable,
        }
    }

    /// The normalized (lowercase) word that was decoded.
    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn decodable(&self) -> bool {
        self.decodable
    }

    pub fn letter_parts(&self) -> impl Iterator<Item = &str> + '_ {
        self.segments.iter().map(|s| s.letter_part.as_str())
    }

    pub fn sound_parts(&self) -> impl Iterator<Item = &[Phoneme]> + '_ {
        self.segments.iter().map(|s| s.sound_part.as_slice())
    }

    pub fn indicators(&self) -> impl Iterator<Item = Indicator> + '_ {
        self.segments.iter().map(|s| s.indicator)
    }

    pub fn has_indicator(&self, indicator: Indicator) -> bool {
        self.indicators().any(|i| i == indicator)
    }

    /// Concatenation of every letter part.
    pub fn spelling(&self) -> String {
        self.letter_parts().collect()
    }

    /// Concatenation of every sound part.
    pub fn sounds(&self) -> Vec<Phoneme> {
        self.sound_parts().flatten().copied().collect()
    }
}
