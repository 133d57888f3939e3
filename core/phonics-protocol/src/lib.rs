#![no_std] // Shared with the WASM build

#[macro_use]
extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod decoded;
pub mod grammar;
pub mod model;
pub mod phoneme;

// Re-export core types for convenience
pub use decoded::{DecodedWord, Indicator, Segment};
pub use grammar::PartOfSpeech;
pub use model::*;
pub use phoneme::{is_vowel_letter, ParsePhonemeError, Phoneme, PhonemeClass};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use rkyv::{from_bytes, to_bytes};

    #[test]
    fn test_phoneme_serialization() {
        let original = Phoneme::Zh;

        let bytes = to_bytes::<_, 256>(&original).expect("Failed to serialize Phoneme");
        let deserialized: Phoneme = from_bytes(&bytes).expect("Failed to deserialize Phoneme");

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_bundle_serialization() {
        let mut rules = RuleTables::default();
        rules.short_vowels = CategoryTable::new("short_vowels")
            .with("a", vec![vec![Phoneme::Ae]]);
        rules.prefixes = CategoryTable::new("prefixes")
            .with("un-", vec![vec![Phoneme::Ah, Phoneme::N]]);

        let dictionary = PronunciationDictionary::from_entries(vec![PronunciationEntry {
            word: "at".to_string(),
            sounds: vec![Phoneme::Ae, Phoneme::T],
        }]);

        let mut original = PhonicsData::new(rules, dictionary);
        original.ranks.push("at".to_string());
        original.pos_lexicon.push(PosEntry {
            word: "at".to_string(),
            pos: PartOfSpeech::Adposition,
        });

        // Simulate writing the compiled bundle and loading it back
        let bytes = to_bytes::<_, 1024>(&original).expect("Failed to serialize PhonicsData");
        let loaded: PhonicsData = from_bytes(&bytes).expect("Failed to deserialize PhonicsData");

        assert_eq!(loaded, original);
        assert_eq!(loaded.version, DATA_VERSION);
        assert_eq!(loaded.dictionary.lookup("at"), Some(&[Phoneme::Ae, Phoneme::T][..]));
    }

    #[test]
    fn test_phoneme_layout() {
        assert_eq!(core::mem::size_of::<Phoneme>(), 1);
        assert_eq!(core::mem::size_of::<Option<Phoneme>>(), 1);
    }
}
