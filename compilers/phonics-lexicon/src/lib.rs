pub mod bundle;
pub mod cmudict;
pub mod wordlist;

use phonics_protocol::{PhonicsData, RuleTables, TableError};
use tracing::info;

pub use bundle::{from_bundle, to_bundle};
pub use cmudict::{parse_cmudict, parse_line, RawLine};
pub use wordlist::{parse_pos_lexicon, parse_word_list};

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("line {line}: cannot parse '{text}'")]
    Syntax { line: usize, text: String },

    #[error("line {line}: unknown phoneme '{symbol}'")]
    Phoneme { line: usize, symbol: String },

    #[error("line {line}: unknown part-of-speech tag '{tag}'")]
    PosTag { line: usize, tag: String },

    #[error("invalid rules file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("corrupt phonics bundle: {0}")]
    Archive(String),

    #[error("bundle version {found} does not match expected version {expected}")]
    Version { found: u32, expected: u32 },
}

/// Raw text of every input the compiler reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sources<'a> {
    pub rules_json: &'a str,
    pub cmudict: &'a str,
    pub ranks: Option<&'a str>,
    pub pos_lexicon: Option<&'a str>,
}

/// Parses and validates the JSON rule tables.
pub fn load_rules(json: &str) -> Result<RuleTables, LexiconError> {
    let rules: RuleTables = serde_json::from_str(json)?;
    rules.validate()?;
    Ok(rules)
}

/// Sources -> one bundle, ready to be archived.
pub fn compile(sources: Sources<'_>) -> Result<PhonicsData, LexiconError> {
    let rules = load_rules(sources.rules_json)?;
    let dictionary = parse_cmudict(sources.cmudict)?;

    let mut data = PhonicsData::new(rules, dictionary);
    if let Some(text) = sources.ranks {
        data.ranks = parse_word_list(text);
    }
    if let Some(text) = sources.pos_lexicon {
        data.pos_lexicon = parse_pos_lexicon(text)?;
    }

    info!("{}", data.describe());
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use phonics_protocol::{PartOfSpeech, Phoneme};

    const RULES: &str = r#"{
        "short_vowels": {"name": "short_vowels", "entries": [
            {"pattern": "a", "sounds": [["AE"]]}
        ]},
        "long_vowels": {"name": "long_vowels", "entries": []},
        "hard_consonants": {"name": "hard_consonants", "entries": [
            {"pattern": "c", "sounds": [["K"]]},
            {"pattern": "t", "sounds": [["T"]]}
        ]},
        "soft_consonants": {"name": "soft_consonants", "entries": []},
        "letter_combinations": {"name": "letter_combinations", "entries": []},
        "prefixes": {"name": "prefixes", "entries": []},
        "suffixes": {"name": "suffixes", "entries": [
            {"pattern": "-s", "sounds": [["S"], ["Z"]]}
        ]}
    }"#;

    #[test]
    fn test_compile_bundle() {
        let data = compile(Sources {
            rules_json: RULES,
            cmudict: ";;; tiny\nCAT  K AE1 T\nCATS  K AE1 T S\n",
            ranks: Some("the\ncat\n\ncats\n"),
            pos_lexicon: Some("cat\tNOUN\n"),
        })
        .unwrap();

        assert_eq!(data.dictionary.len(), 2);
        assert_eq!(data.rules.suffixes.entries[0].sounds[1], vec![Phoneme::Z]);
        assert!(data.rules.feature_sets.is_empty());
        assert_eq!(data.ranks, vec!["the", "cat", "cats"]);
        assert_eq!(data.pos_lexicon[0].pos, PartOfSpeech::Noun);
    }

    #[test]
    fn test_rules_are_validated() {
        let broken = RULES.replace(r#"{"pattern": "t", "sounds": [["T"]]}"#, r#"{"pattern": "tt", "sounds": [["T"]]}"#);
        let err = load_rules(&broken).unwrap_err();
        assert!(matches!(err, LexiconError::Table(TableError::NotSingleLetter { .. })));
    }

    #[test]
    fn test_rules_reject_unknown_phoneme() {
        let broken = RULES.replace(r#"[["AE"]]"#, r#"[["QQ"]]"#);
        assert!(matches!(load_rules(&broken), Err(LexiconError::Json(_))));
    }
}
