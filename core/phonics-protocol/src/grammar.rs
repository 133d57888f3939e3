use core::fmt;

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Universal part-of-speech tags, as produced by the external tagger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum PartOfSpeech {
    Adjective = 0,
    Adposition = 1,
    Adverb = 2,
    Auxiliary = 3,
    Conjunction = 4,
    CoordinatingConjunction = 5,
    Determiner = 6,
    Interjection = 7,
    Noun = 8,
    Numeral = 9,
    Particle = 10,
    Pronoun = 11,
    ProperNoun = 12,
    Punctuation = 13,
    SubordinatingConjunction = 14,
    Symbol = 15,
    Verb = 16,
    Other = 17,
    Space = 18,
}

impl PartOfSpeech {
    /// Parses the uppercase tag (`"NOUN"`, `"CCONJ"`, ...).
    pub fn from_tag(tag: &str) -> Option<Self> {
        let pos = match tag {
            "ADJ" => Self::Adjective,
            "ADP" => Self::Adposition,
            "ADV" => Self::Adverb,
            "AUX" => Self::Auxiliary,
            "CONJ" => Self::Conjunction,
            "CCONJ" => Self::CoordinatingConjunction,
            "DET" => Self::Determiner,
            "INTJ" => Self::Interjection,
            "NOUN" => Self::Noun,
            "NUM" => Self::Numeral,
            "PART" => Self::Particle,
            "PRON" => Self::Pronoun,
            "PROPN" => Self::ProperNoun,
            "PUNCT" => Self::Punctuation,
            "SCONJ" => Self::SubordinatingConjunction,
            "SYM" => Self::Symbol,
            "VERB" => Self::Verb,
            "X" => Self::Other,
            "SPACE" => Self::Space,
            _ => return None,
        };
        Some(pos)
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Self::Adjective => "ADJ",
            Self::Adposition => "ADP",
            Self::Adverb => "ADV",
            Self::Auxiliary => "AUX",
            Self::Conjunction => "CONJ",
            Self::CoordinatingConjunction => "CCONJ",
            Self::Determiner => "DET",
            Self::Interjection => "INTJ",
            Self::Noun => "NOUN",
            Self::Numeral => "NUM",
            Self::Particle => "PART",
            Self::Pronoun => "PRON",
            Self::ProperNoun => "PROPN",
            Self::Punctuation => "PUNCT",
            Self::SubordinatingConjunction => "SCONJ",
            Self::Symbol => "SYM",
            Self::Verb => "VERB",
            Self::Other => "X",
            Self::Space => "SPACE",
        }
    }

    /// Plain-English name used in feature records.
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Adjective => "adjective",
            Self::Adposition => "adposition",
            Self::Adverb => "adverb",
            Self::Auxiliary => "auxiliary",
            Self::Conjunction => "conjunction",
            Self::CoordinatingConjunction => "coordinating conjunction",
            Self::Determiner => "determiner",
            Self::Interjection => "interjection",
            Self::Noun => "noun",
            Self::Numeral => "numeral",
            Self::Particle => "particle",
            Self::Pronoun => "pronoun",
            Self::ProperNoun => "proper noun",
            Self::Punctuation => "punctuation",
            Self::SubordinatingConjunction => "subordinating conjunction",
            Self::Symbol => "symbol",
            Self::Verb => "verb",
            Self::Other => "other",
            Self::Space => "space",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for tag in ["ADJ", "CCONJ", "PROPN", "X", "SPACE"] {
            let pos = PartOfSpeech::from_tag(tag).unwrap();
            assert_eq!(pos.tag(), tag);
        }
        assert_eq!(PartOfSpeech::from_tag("noun"), None);
    }

    #[test]
    fn test_describe() {
        assert_eq!(PartOfSpeech::SubordinatingConjunction.describe(), "subordinating conjunction");
        assert_eq!(PartOfSpeech::Other.describe(), "other");
    }
}
