use std::collections::HashMap;

use phonics_protocol::{PartOfSpeech, PosEntry};

/// Black-box part-of-speech tagger.
pub trait PosTagger {
    fn tag(&self, word: &str) -> Option<PartOfSpeech>;
}

impl<F> PosTagger for F
where
    F: Fn(&str) -> Option<PartOfSpeech>,
{
    fn tag(&self, word: &str) -> Option<PartOfSpeech> {
        self(word)
    }
}

/// Tagger backed by a precomputed word -> tag list.
#[derive(Debug, Clone, Default)]
pub struct LexiconTagger {
    tags: HashMap<String, PartOfSpeech>,
}

impl LexiconTagger {
    /// The first tag listed for a word wins.
    pub fn from_entries<'e, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'e PosEntry>,
    {
        let mut tags = HashMap::new();
        for entry in entries {
            tags.entry(entry.word.to_lowercase()).or_insert(entry.pos);
        }
        Self { tags }
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, word: &str) -> Option<PartOfSpeech> {
        self.tags.get(&word.to_lowercase()).copied()
    }
}

/// Word-frequency ranks: zero-based position in the frequency list.
#[derive(Debug, Clone, Default)]
pub struct WordRanks {
    index_map: HashMap<String, usize>,
}

impl WordRanks {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index_map = HashMap::new();
        for (rank, word) in words.into_iter().enumerate() {
            index_map.entry(word.as_ref().to_lowercase()).or_insert(rank);
        }
        Self { index_map }
    }

    pub fn rank(&self, word: &str) -> Option<usize> {
        self.index_map.get(&word.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.index_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index_map.is_empty()
    }
}
