use core::fmt;
use core::str::FromStr;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use bitflags::bitflags;
use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

bitflags! {
    /// Articulatory classes a phoneme belongs to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct PhonemeClass: u16 {
        // Broad split (Bits 0-1)
        const VOWEL = 1;
        const CONSONANT = 2;

        // Vowel qualities (Bits 2-3)
        const DIPHTHONG = 4;
        const R_COLORED = 8;

        // Manner of articulation (Bits 4-9)
        const STOP = 16;
        const FRICATIVE = 32;
        const AFFRICATE = 64;
        const NASAL = 128;
        const LIQUID = 256;
        const GLIDE = 512;
    }
}

const VOW: PhonemeClass = PhonemeClass::VOWEL;
const DIPH: PhonemeClass = PhonemeClass::VOWEL.union(PhonemeClass::DIPHTHONG);
const STOP: PhonemeClass = PhonemeClass::CONSONANT.union(PhonemeClass::STOP);
const FRIC: PhonemeClass = PhonemeClass::CONSONANT.union(PhonemeClass::FRICATIVE);
const AFFR: PhonemeClass = PhonemeClass::CONSONANT.union(PhonemeClass::AFFRICATE);
const NAS: PhonemeClass = PhonemeClass::CONSONANT.union(PhonemeClass::NASAL);
const LIQ: PhonemeClass = PhonemeClass::CONSONANT.union(PhonemeClass::LIQUID);
const GLIDE: PhonemeClass = PhonemeClass::CONSONANT.union(PhonemeClass::GLIDE);

macro_rules! define_phonemes {
    ($($variant:ident => $symbol:literal, $class:expr;)*) => {
        /// One ARPAbet pronunciation unit, stress markers removed.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
        #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
        #[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
        #[archive(check_bytes)]
        #[repr(u8)]
        pub enum Phoneme {
            $($variant,)*
        }

        impl Phoneme {
            /// The full inventory in ARPAbet order.
            pub const ALL: &'static [Phoneme] = &[$(Phoneme::$variant,)*];

            pub const fn symbol(self) -> &'static str {
                match self {
                    $(Phoneme::$variant => $symbol,)*
                }
            }

            pub const fn class(self) -> PhonemeClass {
                match self {
                    $(Phoneme::$variant => $class,)*
                }
            }
        }
    };
}

define_phonemes! {
    Aa => "AA", VOW;
    Ae => "AE", VOW;
    Ah => "AH", VOW;
    Ao => "AO", VOW;
    Aw => "AW", DIPH;
    Ay => "AY", DIPH;
    B => "B", STOP;
    Ch => "CH", AFFR;
    D => "D", STOP;
    Dh => "DH", FRIC;
    Eh => "EH", VOW;
    Er => "ER", VOW.union(PhonemeClass::R_COLORED);
    Ey => "EY", DIPH;
    F => "F", FRIC;
    G => "G", STOP;
    Hh => "HH", FRIC;
    Ih => "IH", VOW;
    Iy => "IY", VOW;
    Jh => "JH", AFFR;
    K => "K", STOP;
    L => "L", LIQ;
    M => "M", NAS;
    N => "N", NAS;
    Ng => "NG", NAS;
    Ow => "OW", DIPH;
    Oy => "OY", DIPH;
    P => "P", STOP;
    R => "R", LIQ;
    S => "S", FRIC;
    Sh => "SH", FRIC;
    T => "T", STOP;
    Th => "TH", FRIC;
    Uh => "UH", VOW;
    Uw => "UW", VOW;
    V => "V", FRIC;
    W => "W", GLIDE;
    Y => "Y", GLIDE;
    Z => "Z", FRIC;
    Zh => "ZH", FRIC;
}

impl Phoneme {
    /// Vowel-sound classifier.
    pub const fn is_vowel(self) -> bool {
        self.class().contains(PhonemeClass::VOWEL)
    }

    /// Parses a whitespace separated pronunciation such as `"K AE1 T"`.
    pub fn parse_sequence(text: &str) -> Result<Vec<Phoneme>, ParsePhonemeError> {
        text.split_whitespace().map(str::parse).collect()
    }

    /// Renders a sequence back to its space separated form.
    pub fn join(sounds: &[Phoneme]) -> String {
        let mut out = String::new();
        for (i, sound) in sounds.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(sound.symbol());
        }
        out
    }
}

/// Vowel letters as the pattern classifiers count them; `y` is a consonant here.
pub fn is_vowel_letter(letter: char) -> bool {
    matches!(letter, 'a' | 'e' | 'i' | 'o' | 'u')
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePhonemeError(pub String);

impl fmt::Display for ParsePhonemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown phoneme symbol '{}'", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParsePhonemeError {}

impl FromStr for Phoneme {
    type Err = ParsePhonemeError;

    /// Accepts `AH`, `AH0`, `ah1`; the stress digit is dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bare = s.trim_end_matches(|c: char| c.is_ascii_digit());
        Phoneme::ALL
            .iter()
            .copied()
            .find(|p| p.symbol().eq_ignore_ascii_case(bare))
            .ok_or_else(|| ParsePhonemeError(s.to_string()))
    }
}

impl TryFrom<String> for Phoneme {
    type Error = ParsePhonemeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Phoneme> for String {
    fn from(p: Phoneme) -> String {
        p.symbol().to_string()
    }
}

impl fmt::Display for Phoneme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_size() {
        assert_eq!(Phoneme::ALL.len(), 39);
        let vowels = Phoneme::ALL.iter().filter(|p| p.is_vowel()).count();
        assert_eq!(vowels, 15);
    }

    #[test]
    fn test_stress_is_stripped() {
        assert_eq!("AH0".parse::<Phoneme>(), Ok(Phoneme::Ah));
        assert_eq!("ey1".parse::<Phoneme>(), Ok(Phoneme::Ey));
        assert_eq!("NG".parse::<Phoneme>(), Ok(Phoneme::Ng));
        assert!("QX".parse::<Phoneme>().is_err());
    }

    #[test]
    fn test_sequence_round_trip() {
        let sounds = Phoneme::parse_sequence("K AE1 T").unwrap();
        assert_eq!(sounds, vec![Phoneme::K, Phoneme::Ae, Phoneme::T]);
        assert_eq!(Phoneme::join(&sounds), "K AE T");
    }

    #[test]
    fn test_classes() {
        assert!(Phoneme::Er.class().contains(PhonemeClass::R_COLORED));
        assert!(Phoneme::Ay.class().contains(PhonemeClass::DIPHTHONG));
        assert!(!Phoneme::Y.is_vowel());
        assert!(Phoneme::Ch.class().contains(PhonemeClass::AFFRICATE));
    }

    #[test]
    fn test_vowel_letters() {
        assert!("aeiou".chars().all(is_vowel_letter));
        assert!(!is_vowel_letter('y'));
        assert!(!is_vowel_letter('\''));
    }
}
