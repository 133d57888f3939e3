use nom::{
    bytes::complete::take_while1,
    character::complete::{space0, space1},
    combinator::all_consuming,
    sequence::{terminated, tuple},
    IResult,
};
use phonics_protocol::{PartOfSpeech, PosEntry};

use crate::LexiconError;

/// Frequency list, most frequent first. Blank lines are ignored.
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn field(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace())(input)
}

fn pos_line(input: &str) -> IResult<&str, (&str, &str, &str)> {
    all_consuming(tuple((field, space1, terminated(field, space0))))(input)
}

/// `word<TAB>TAG` lines, as exported from the tagger.
pub fn parse_pos_lexicon(text: &str) -> Result<Vec<PosEntry>, LexiconError> {
    let mut entries = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }

        let (_, (word, _, tag)) = pos_line(raw.trim_start()).map_err(|_| LexiconError::Syntax {
            line,
            text: raw.to_string(),
        })?;

        let pos = PartOfSpeech::from_tag(tag).ok_or_else(|| LexiconError::PosTag {
            line,
            tag: tag.to_string(),
        })?;

        entries.push(PosEntry {
            word: word.to_lowercase(),
            pos,
        });
    }

    Ok(entries)
}
