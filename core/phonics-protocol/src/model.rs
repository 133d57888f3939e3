use core::fmt;

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use rkyv::{Archive, Deserialize, Serialize};

use crate::decoded::Indicator;
use crate::grammar::PartOfSpeech;
use crate::phoneme::Phoneme;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Bumped whenever the archived layout of [`PhonicsData`] changes.
pub const DATA_VERSION: u32 = 1;

/// A letter pattern and every phoneme sequence it may be read as.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct TableEntry {
    /// Display form; affixes carry a hyphen (`"un-"`, `"-ing"`).
    pub pattern: String,
    pub sounds: Vec<Vec<Phoneme>>,
}

impl TableEntry {
    pub fn new(pattern: impl Into<String>, sounds: Vec<Vec<Phoneme>>) -> Self {
        Self {
            pattern: pattern.into(),
            sounds,
        }
    }

    /// The pattern with display hyphens removed.
    pub fn letters(&self) -> Cow<'_, str> {
        if self.pattern.contains('-') {
            Cow::Owned(self.pattern.replace('-', ""))
        } else {
            Cow::Borrowed(&self.pattern)
        }
    }

    /// True if `sounds` is one of the registered readings.
    pub fn admits(&self, sounds: &[Phoneme]) -> bool {
        self.sounds.iter().any(|s| s.as_slice() == sounds)
    }
}

/// An ordered rule table. Entry order is the tie-break order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct CategoryTable {
    pub name: String,
    pub entries: Vec<TableEntry>,
}

impl CategoryTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Builder-style append, mostly for tests and hand-built tables.
    pub fn with(mut self, pattern: &str, sounds: Vec<Vec<Phoneme>>) -> Self {
        self.entries.push(TableEntry::new(pattern, sounds));
        self
    }

    pub fn iter(&self) -> core::slice::Iter<'_, TableEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose pattern is exactly `letter`, in table order.
    pub fn entries_for(&self, letter: char) -> impl Iterator<Item = &TableEntry> + '_ {
        self.entries.iter().filter(move |e| {
            let mut chars = e.pattern.chars();
            chars.next() == Some(letter) && chars.next().is_none()
        })
    }

    fn vowel_sounds(&self) -> impl Iterator<Item = Phoneme> + '_ {
        self.entries
            .iter()
            .flat_map(|e| e.sounds.iter())
            .flatten()
            .copied()
            .filter(|p| p.is_vowel())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    EmptyPattern { table: String },
    NoSounds { table: String, pattern: String },
    NotSingleLetter { table: String, pattern: String },
    SilentAffix { table: String, pattern: String },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::EmptyPattern { table } => {
                write!(f, "table '{}' has an entry with an empty letter pattern", table)
            }
            TableError::NoSounds { table, pattern } => {
                write!(f, "entry '{}' in table '{}' has no phoneme sequences", pattern, table)
            }
            TableError::NotSingleLetter { table, pattern } => {
                write!(f, "entry '{}' in sound table '{}' must be a single letter", pattern, table)
            }
            TableError::SilentAffix { table, pattern } => {
                write!(f, "affix '{}' in table '{}' has an empty phoneme sequence", pattern, table)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TableError {}

/// All phonics rules the decoder consults. Loaded once, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct RuleTables {
    pub short_vowels: CategoryTable,
    pub long_vowels: CategoryTable,
    pub hard_consonants: CategoryTable,
    pub soft_consonants: CategoryTable,
    pub letter_combinations: CategoryTable,
    pub prefixes: CategoryTable,
    pub suffixes: CategoryTable,
    /// Extra named sets that only feed the phoneme bitmaps.
    #[cfg_attr(feature = "serde", serde(default))]
    pub feature_sets: Vec<CategoryTable>,
}

impl RuleTables {
    /// The single-letter sound tables in decoding priority order.
    pub fn sound_categories(&self) -> [(Indicator, &CategoryTable); 4] {
        [
            (Indicator::ShortVowel, &self.short_vowels),
            (Indicator::LongVowel, &self.long_vowels),
            (Indicator::HardConsonant, &self.hard_consonants),
            (Indicator::SoftConsonant, &self.soft_consonants),
        ]
    }

    /// Tables that get a phoneme bitmap, in output order.
    pub fn bitmap_tables(&self) -> impl Iterator<Item = &CategoryTable> + '_ {
        [
            &self.hard_consonants,
            &self.soft_consonants,
            &self.short_vowels,
            &self.long_vowels,
        ]
        .into_iter()
        .chain(self.feature_sets.iter())
    }

    pub fn is_short_vowel_sound(&self, sound: Phoneme) -> bool {
        sound.is_vowel() && self.short_vowels.vowel_sounds().any(|p| p == sound)
    }

    pub fn is_long_vowel_sound(&self, sound: Phoneme) -> bool {
        sound.is_vowel() && self.long_vowels.vowel_sounds().any(|p| p == sound)
    }

    /// Rejects tables the decoder cannot make progress with.
    pub fn validate(&self) -> Result<(), TableError> {
        for (_, table) in self.sound_categories() {
            for entry in table.iter() {
                check_entry(table, entry)?;
                if entry.pattern.chars().count() != 1 {
                    return Err(TableError::NotSingleLetter {
                        table: table.name.clone(),
                        pattern: entry.pattern.clone(),
                    });
                }
            }
        }

        for entry in self.letter_combinations.iter() {
            check_entry(&self.letter_combinations, entry)?;
        }

        for table in [&self.prefixes, &self.suffixes] {
            for entry in table.iter() {
                check_entry(table, entry)?;
                if entry.sounds.iter().any(|s| s.is_empty()) {
                    return Err(TableError::SilentAffix {
                        table: table.name.clone(),
                        pattern: entry.pattern.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

fn check_entry(table: &CategoryTable, entry: &TableEntry) -> Result<(), TableError> {
    if entry.letters().is_empty() {
        return Err(TableError::EmptyPattern {
            table: table.name.clone(),
        });
    }
    if entry.sounds.is_empty() {
        return Err(TableError::NoSounds {
            table: table.name.clone(),
            pattern: entry.pattern.clone(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct PronunciationEntry {
    pub word: String,
    pub sounds: Vec<Phoneme>,
}

/// Word to pronunciation map, sorted by word for binary search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct PronunciationDictionary {
    entries: Vec<PronunciationEntry>,
}

impl PronunciationDictionary {
    /// Words are lowercased; on duplicates the first pronunciation wins.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = PronunciationEntry>,
    {
        let mut entries: Vec<PronunciationEntry> = entries
            .into_iter()
            .map(|mut e| {
                e.word = e.word.to_lowercase();
                e
            })
            .collect();
        entries.sort_by(|a, b| a.word.cmp(&b.word));
        entries.dedup_by(|later, kept| later.word == kept.word);
        Self { entries }
    }

    pub fn lookup(&self, word: &str) -> Option<&[Phoneme]> {
        let key = word.to_lowercase();
        self.entries
            .binary_search_by(|e| e.word.as_str().cmp(key.as_str()))
            .ok()
            .map(|idx| self.entries[idx].sounds.as_slice())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.lookup(word).is_some()
    }

    pub fn entries(&self) -> &[PronunciationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct PosEntry {
    pub word: String,
    pub pos: PartOfSpeech,
}

/// The compiled bundle written by the rules compiler.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct PhonicsData {
    pub version: u32,
    pub rules: RuleTables,
    pub dictionary: PronunciationDictionary,
    /// Words by descending frequency.
    pub ranks: Vec<String>,
    pub pos_lexicon: Vec<PosEntry>,
}

impl PhonicsData {
    pub fn new(rules: RuleTables, dictionary: PronunciationDictionary) -> Self {
        Self {
            version: DATA_VERSION,
            rules,
            dictionary,
            ranks: Vec::new(),
            pos_lexicon: Vec::new(),
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "phonics data v{}: {} words, {} ranked, {} tagged",
            self.version,
            self.dictionary.len(),
            self.ranks.len(),
            self.pos_lexicon.len()
        )
    }
}
