use std::collections::BTreeSet;
use std::fmt;

use phonics_protocol::{is_vowel_letter, Phoneme, PronunciationDictionary, RuleTables};
use serde::{Deserialize, Serialize};

use crate::DecodeError;

const MORE_VOWEL_LETTERS: &str = "more vowel letters than vowel sounds";

/// Canonical phonics syllable shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Shape {
    /// Vowel, consonant: "at", "of".
    Vc,
    /// Consonant, vowel, consonant: "cat".
    Cvc,
    /// CVC with a trailing silent e that makes the vowel long: "cake".
    Cvce,
    /// Two closed syllables: "robin".
    Cvcvc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Consonant,
    Vowel,
}

impl Slot {
    fn admits(self, sound: Phoneme) -> bool {
        match self {
            Slot::Vowel => sound.is_vowel(),
            Slot::Consonant => !sound.is_vowel(),
        }
    }
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Vc, Shape::Cvc, Shape::Cvce, Shape::Cvcvc];

    fn slots(self) -> &'static [Slot] {
        use Slot::{Consonant as C, Vowel as V};
        match self {
            Shape::Vc => &[V, C],
            Shape::Cvc | Shape::Cvce => &[C, V, C],
            Shape::Cvcvc => &[C, V, C, V, C],
        }
    }

    fn silent_e(self) -> bool {
        self == Shape::Cvce
    }

    pub const fn name(self) -> &'static str {
        match self {
            Shape::Vc => "VC",
            Shape::Cvc => "CVC",
            Shape::Cvce => "CVCE",
            Shape::Cvcvc => "CVCVC",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tolerances for the shape predicates. The default is strict: single
/// consonant letters only, short vowels only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternOptions {
    /// Consonant blends and digraphs accepted where one consonant is expected.
    pub allowed_blends: BTreeSet<String>,
    pub include_long_vowels: bool,
}

impl PatternOptions {
    pub fn with_blends<I, S>(blends: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_blends: blends.into_iter().map(Into::into).collect(),
            include_long_vowels: false,
        }
    }

    pub fn long_vowels(mut self, include: bool) -> Self {
        self.include_long_vowels = include;
        self
    }

    fn accepts_consonants(&self, letters: &str) -> bool {
        letters.chars().count() == 1 || self.allowed_blends.contains(letters)
    }
}

/// Answers "does this word have shape S?" from its spelling and pronunciation.
#[derive(Debug, Clone, Copy)]
pub struct PatternClassifier<'a> {
    rules: &'a RuleTables,
    dictionary: &'a PronunciationDictionary,
}

impl<'a> PatternClassifier<'a> {
    pub fn new(rules: &'a RuleTables, dictionary: &'a PronunciationDictionary) -> Self {
        Self { rules, dictionary }
    }

    pub fn is_vc(&self, word: &str, options: &PatternOptions) -> Result<bool, DecodeError> {
        self.matches(Shape::Vc, word, options)
    }

    pub fn is_cvc(&self, word: &str, options: &PatternOptions) -> Result<bool, DecodeError> {
        self.matches(Shape::Cvc, word, options)
    }

    pub fn is_cvce(&self, word: &str, options: &PatternOptions) -> Result<bool, DecodeError> {
        self.matches(Shape::Cvce, word, options)
    }

    pub fn is_cvcvc(&self, word: &str, options: &PatternOptions) -> Result<bool, DecodeError> {
        self.matches(Shape::Cvcvc, word, options)
    }

    /// Checks `word` against `shape`.
    ///
    /// Returns `Ok(false)` for an ordinary mismatch. Returns
    /// [`DecodeError::Consistency`] when the pronunciation fits the shape but
    /// the spelling carries more vowel letters than the shape has vowel
    /// sounds, which points at a dictionary or rule problem rather than a
    /// negative answer.
    pub fn matches(
        &self,
        shape: Shape,
        word: &str,
        options: &PatternOptions,
    ) -> Result<bool, DecodeError> {
        let word = word.to_lowercase();
        let sounds = self
            .dictionary
            .lookup(&word)
            .ok_or_else(|| DecodeError::UnknownWord { word: word.clone() })?;

        let slots = shape.slots();
        if sounds.len() != slots.len() || !slots.iter().zip(sounds).all(|(slot, s)| slot.admits(*s)) {
            return Ok(false);
        }

        if !self.vowel_quality_fits(shape, sounds, options) {
            return Ok(false);
        }

        // VC holds one vowel letter, so any vowel letter past the first
        // character is inconsistent whatever the first letter is.
        if shape == Shape::Vc && word.chars().skip(1).any(is_vowel_letter) {
            return Err(DecodeError::Consistency {
                word: word.clone(),
                shape,
                reason: MORE_VOWEL_LETTERS,
            });
        }

        let letters = if shape.silent_e() {
            match word.strip_suffix('e') {
                Some(rest) => rest,
                None => return Ok(false),
            }
        } else {
            word.as_str()
        };

        let consonants = match split_letters(shape, &word, letters)? {
            Some(groups) => groups,
            None => return Ok(false),
        };

        Ok(consonants.iter().all(|group| options.accepts_consonants(group)))
    }

    fn vowel_quality_fits(&self, shape: Shape, sounds: &[Phoneme], options: &PatternOptions) -> bool {
        let mut vowels = sounds.iter().copied().filter(|s| s.is_vowel());
        if shape.silent_e() {
            vowels.all(|v| self.rules.is_long_vowel_sound(v))
        } else if options.include_long_vowels {
            true
        } else {
            vowels.all(|v| self.rules.is_short_vowel_sound(v))
        }
    }
}

/// Splits the spelling along the shape's slots and returns the consonant runs.
///
/// `Ok(None)` means the letters simply do not follow the shape.
fn split_letters<'w>(
    shape: Shape,
    word: &str,
    letters: &'w str,
) -> Result<Option<Vec<&'w str>>, DecodeError> {
    let inconsistent = |reason| DecodeError::Consistency {
        word: word.to_string(),
        shape,
        reason,
    };

    let mut rest = letters;
    let mut consonants = Vec::new();

    for slot in shape.slots() {
        match slot {
            Slot::Vowel => {
                let mut chars = rest.chars();
                match chars.next() {
                    Some(letter) if is_vowel_letter(letter) => rest = chars.as_str(),
                    _ => return Ok(None),
                }
                if rest.starts_with(is_vowel_letter) {
                    return Err(inconsistent("two vowel letters spell a single vowel sound"));
                }
            }
            Slot::Consonant => {
                let end = rest.find(is_vowel_letter).unwrap_or(rest.len());
                if end == 0 {
                    return Ok(None);
                }
                consonants.push(&rest[..end]);
                rest = &rest[end..];
            }
        }
    }

    if !rest.is_empty() {
        return Err(inconsistent(MORE_VOWEL_LETTERS));
    }

    Ok(Some(consonants))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{dictionary, rules};

    fn strict() -> PatternOptions {
        PatternOptions::default()
    }

    #[test]
    fn test_vc_positive() {
        let (rules, dict) = (rules(), dictionary());
        let classifier = PatternClassifier::new(&rules, &dict);

        assert!(classifier.is_vc("at", &strict()).unwrap());
        assert!(classifier.is_vc("of", &strict()).unwrap());
    }

    #[test]
    fn test_vc_rejects_three_sounds() {
        let (rules, dict) = (rules(), dictionary());
        let classifier = PatternClassifier::new(&rules, &dict);

        assert!(!classifier.is_vc("cat", &strict()).unwrap());
        assert!(!classifier.is_vc("fox", &strict()).unwrap());
    }

    #[test]
    fn test_vc_blends_must_be_allowed() {
        let (rules, dict) = (rules(), dictionary());
        let classifier = PatternClassifier::new(&rules, &dict);

        assert!(!classifier.is_vc("egg", &strict()).unwrap());
        assert!(classifier
            .is_vc("egg", &PatternOptions::with_blends(["gg"]))
            .unwrap());
    }

    #[test]
    fn test_vc_long_vowels_are_opt_in() {
        let (rules, dict) = (rules(), dictionary());
        let classifier = PatternClassifier::new(&rules, &dict);

        // Long vowel, so strict mode answers before looking at the letters.
        assert!(!classifier.is_vc("eat", &strict()).unwrap());

        let err = classifier
            .is_vc("eat", &strict().long_vowels(true))
            .unwrap_err();
        assert!(matches!(err, DecodeError::Consistency { shape: Shape::Vc, .. }));
    }

    #[test]
    fn test_vc_second_vowel_letter_is_an_error() {
        let (rules, dict) = (rules(), dictionary());
        let classifier = PatternClassifier::new(&rules, &dict);

        let err = classifier.is_vc("are", &strict()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Consistency {
                word: "are".to_string(),
                shape: Shape::Vc,
                reason: "more vowel letters than vowel sounds",
            }
        );
    }

    #[test]
    fn test_vc_consonant_first_with_extra_vowels_is_an_error() {
        let (rules, dict) = (rules(), dictionary());
        let classifier = PatternClassifier::new(&rules, &dict);

        // "heir" sounds like VC (EH R) but spells two more vowel letters.
        let err = classifier.is_vc("heir", &strict()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Consistency {
                word: "heir".to_string(),
                shape: Shape::Vc,
                reason: "more vowel letters than vowel sounds",
            }
        );

        // Other shapes only see a sound-count mismatch.
        assert!(!classifier.is_cvc("heir", &strict()).unwrap());
    }

    #[test]
    fn test_cvc() {
        let (rules, dict) = (rules(), dictionary());
        let classifier = PatternClassifier::new(&rules, &dict);

        assert!(classifier.is_cvc("cat", &strict()).unwrap());
        assert!(!classifier.is_cvc("at", &strict()).unwrap());
        assert!(!classifier.is_cvc("ship", &strict()).unwrap());
        assert!(classifier
            .is_cvc("ship", &PatternOptions::with_blends(["sh"]))
            .unwrap());
        // An allowed blend still has to be a single sound.
        assert!(!classifier
            .is_cvc("strap", &PatternOptions::with_blends(["str"]))
            .unwrap());
    }

    #[test]
    fn test_cvc_vowel_team_is_an_error() {
        let (rules, dict) = (rules(), dictionary());
        let classifier = PatternClassifier::new(&rules, &dict);

        assert!(!classifier.is_cvc("boat", &strict()).unwrap());
        let err = classifier
            .is_cvc("boat", &strict().long_vowels(true))
            .unwrap_err();
        assert!(matches!(err, DecodeError::Consistency { shape: Shape::Cvc, .. }));
    }

    #[test]
    fn test_cvce() {
        let (rules, dict) = (rules(), dictionary());
        let classifier = PatternClassifier::new(&rules, &dict);

        assert!(classifier.is_cvce("cake", &strict()).unwrap());
        assert!(classifier.is_cvce("time", &strict()).unwrap());
        // Short vowel, no trailing e.
        assert!(!classifier.is_cvce("cat", &strict()).unwrap());
        // Vowel first, so only two sounds.
        assert!(!classifier.is_cvce("ate", &strict()).unwrap());
        assert!(classifier
            .is_cvce("shape", &PatternOptions::with_blends(["sh"]))
            .unwrap());
    }

    #[test]
    fn test_cvcvc() {
        let (rules, dict) = (rules(), dictionary());
        let classifier = PatternClassifier::new(&rules, &dict);

        assert!(classifier.is_cvcvc("robin", &strict()).unwrap());
        assert!(classifier.is_cvcvc("lemon", &strict()).unwrap());
        assert!(!classifier.is_cvcvc("rabbit", &strict()).unwrap());
        assert!(classifier
            .is_cvcvc("rabbit", &PatternOptions::with_blends(["bb"]))
            .unwrap());
        assert!(!classifier.is_cvcvc("cat", &strict()).unwrap());
    }

    #[test]
    fn test_unknown_word_is_propagated() {
        let (rules, dict) = (rules(), dictionary());
        let classifier = PatternClassifier::new(&rules, &dict);

        for shape in Shape::ALL {
            let err = classifier.matches(shape, "blorft", &strict()).unwrap_err();
            assert!(matches!(err, DecodeError::UnknownWord { .. }));
        }
    }

    #[test]
    fn test_options_from_json() {
        let options: PatternOptions =
            serde_json::from_str(r#"{"allowed_blends": ["sh", "ck"]}"#).unwrap();

        assert!(!options.include_long_vowels);
        assert!(options.accepts_consonants("ck"));
        assert!(!options.accepts_consonants("th"));
    }
}
