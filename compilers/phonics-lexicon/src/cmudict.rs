use nom::{
    bytes::complete::take_while1,
    character::complete::{char, digit1, space0, space1},
    combinator::{all_consuming, map, map_res},
    multi::separated_list1,
    sequence::{delimited, terminated, tuple},
    IResult,
};
use phonics_protocol::{Phoneme, PronunciationDictionary, PronunciationEntry};
use tracing::debug;

use crate::LexiconError;

/// One line of a CMU-style pronunciation dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawLine<'a> {
    Blank,
    Comment,
    Entry {
        word: &'a str,
        /// `Some(2)` for `WORD(2)`, an alternate pronunciation.
        variant: Option<u32>,
        symbols: Vec<&'a str>,
    },
}

fn token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace())(input)
}

fn symbol(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric())(input)
}

fn variant(input: &str) -> IResult<&str, u32> {
    delimited(char('('), map_res(digit1, str::parse), char(')'))(input)
}

/// Splits `WORD(2)` into `("WORD", Some(2))`. Words that merely contain a
/// parenthesis, like `(PAREN`, are kept whole.
fn split_variant(word: &str) -> (&str, Option<u32>) {
    if let Some(open) = word.rfind('(').filter(|&i| i > 0) {
        if let Ok((_, n)) = all_consuming(variant)(&word[open..]) {
            return (&word[..open], Some(n));
        }
    }
    (word, None)
}

fn entry(input: &str) -> IResult<&str, RawLine<'_>> {
    map(
        tuple((token, space1, terminated(separated_list1(space1, symbol), space0))),
        |(raw_word, _, symbols)| {
            let (word, variant) = split_variant(raw_word);
            RawLine::Entry {
                word,
                variant,
                symbols,
            }
        },
    )(input)
}

/// Classifies one line; `None` if it is malformed.
pub fn parse_line(line: &str) -> Option<RawLine<'_>> {
    let line = line.trim_end();
    if line.trim_start().is_empty() {
        return Some(RawLine::Blank);
    }
    if line.starts_with(";;;") {
        return Some(RawLine::Comment);
    }
    all_consuming(entry)(line).ok().map(|(_, parsed)| parsed)
}

/// Reads a whole dictionary. Alternate pronunciations are dropped so the
/// first pronunciation of each word wins.
pub fn parse_cmudict(text: &str) -> Result<PronunciationDictionary, LexiconError> {
    let mut entries = Vec::new();
    let mut alternates = 0usize;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let parsed = parse_line(raw).ok_or_else(|| LexiconError::Syntax {
            line,
            text: raw.to_string(),
        })?;

        let RawLine::Entry {
            word,
            variant,
            symbols,
        } = parsed
        else {
            continue;
        };

        if variant.is_some() {
            alternates += 1;
            continue;
        }

        let sounds = symbols
            .iter()
            .map(|s| {
                s.parse::<Phoneme>().map_err(|_| LexiconError::Phoneme {
                    line,
                    symbol: s.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        entries.push(PronunciationEntry {
            word: word.to_string(),
            sounds,
        });
    }

    let dictionary = PronunciationDictionary::from_entries(entries);
    debug!(
        words = dictionary.len(),
        alternates, "parsed pronunciation dictionary"
    );
    Ok(dictionary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry_line() {
        let parsed = parse_line("ABOUT  AH0 B AW1 T").unwrap();
        assert_eq!(
            parsed,
            RawLine::Entry {
                word: "ABOUT",
                variant: None,
                symbols: vec!["AH0", "B", "AW1", "T"],
            }
        );
    }

    #[test]
    fn test_parse_variant_and_odd_words() {
        match parse_line("READ(1)  R EH1 D").unwrap() {
            RawLine::Entry { word, variant, .. } => {
                assert_eq!(word, "READ");
                assert_eq!(variant, Some(1));
            }
            other => panic!("Expected entry, got {:?}", other),
        }

        match parse_line("(PAREN  P ER0 EH1 N").unwrap() {
            RawLine::Entry { word, variant, .. } => {
                assert_eq!(word, "(PAREN");
                assert_eq!(variant, None);
            }
            other => panic!("Expected entry, got {:?}", other),
        }

        match parse_line("WON'T\tW OW1 N T  ").unwrap() {
            RawLine::Entry { word, symbols, .. } => {
                assert_eq!(word, "WON'T");
                assert_eq!(symbols.len(), 4);
            }
            other => panic!("Expected entry, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_and_comment() {
        assert_eq!(parse_line("   "), Some(RawLine::Blank));
        assert_eq!(parse_line(";;; # CMUdict"), Some(RawLine::Comment));
        assert_eq!(parse_line("LONELYWORD"), None);
    }

    #[test]
    fn test_parse_dictionary() {
        let text = ";;; header\n\nREAD  R IY1 D\nREAD(1)  R EH1 D\nCat  K AE1 T\n";
        let dict = parse_cmudict(text).unwrap();

        assert_eq!(dict.len(), 2);
        assert_eq!(dict.lookup("read"), Some(&[Phoneme::R, Phoneme::Iy, Phoneme::D][..]));
        assert!(dict.contains("cat"));
    }

    #[test]
    fn test_dictionary_errors_carry_line() {
        let err = parse_cmudict("CAT  K AE1 T\nDOG  D XX G\n").unwrap_err();
        assert!(matches!(err, LexiconError::Phoneme { line: 2, ref symbol } if symbol == "XX"));

        let err = parse_cmudict("CAT  K AE1 T\nDOG\n").unwrap_err();
        assert!(matches!(err, LexiconError::Syntax { line: 2, .. }));
    }
}
