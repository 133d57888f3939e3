use phonics_protocol::{
    DecodedWord, Indicator, Phoneme, PronunciationDictionary, RuleTables, Segment,
};
use tracing::{debug, trace};

use crate::pattern::PatternClassifier;
use crate::DecodeError;

/// What is left to decode: two shrinking views into the word and its sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor<'w> {
    letters: &'w str,
    sounds: &'w [Phoneme],
}

impl<'w> Cursor<'w> {
    fn leading_letter(&self) -> Option<char> {
        self.letters.chars().next()
    }

    /// Consumes `letters` bytes from the front and `sounds` phonemes.
    fn advance(self, letters: usize, sounds: usize) -> Self {
        Self {
            letters: &self.letters[letters..],
            sounds: &self.sounds[sounds..],
        }
    }

    /// Drops `letters` bytes and `sounds` phonemes from the back.
    fn truncate(self, letters: usize, sounds: usize) -> Self {
        Self {
            letters: &self.letters[..self.letters.len() - letters],
            sounds: &self.sounds[..self.sounds.len() - sounds],
        }
    }

    fn exhausted(&self) -> bool {
        self.letters.is_empty()
    }
}

/// Outcome of one stage of the rule chain.
struct Step<'w> {
    /// `None` when letters were skipped without producing a segment.
    segment: Option<Segment>,
    rest: Cursor<'w>,
}

/// Greedy, non-backtracking phonics decoder.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    rules: &'a RuleTables,
    dictionary: &'a PronunciationDictionary,
}

impl<'a> Decoder<'a> {
    pub fn new(rules: &'a RuleTables, dictionary: &'a PronunciationDictionary) -> Self {
        Self { rules, dictionary }
    }

    pub fn rules(&self) -> &'a RuleTables {
        self.rules
    }

    /// Shape classifier over the same tables.
    pub fn classifier(&self) -> PatternClassifier<'a> {
        PatternClassifier::new(self.rules, self.dictionary)
    }

    pub fn pronunciation(&self, word: &str) -> Result<&'a [Phoneme], DecodeError> {
        self.dictionary
            .lookup(word)
            .ok_or_else(|| DecodeError::UnknownWord {
                word: word.to_lowercase(),
            })
    }

    /// Splits `word` into aligned letter/sound segments.
    ///
    /// Affixes are stripped first (prefix from the front, suffix from the
    /// back), then the body is decoded left to right by the first matching
    /// rule: letter combination, punctuation skip, silent e, and the sound
    /// categories in priority order. When nothing matches, the rest of the
    /// word becomes one `UNDECODABLE` segment and decoding stops.
    pub fn decode(&self, word: &str) -> Result<DecodedWord, DecodeError> {
        let word = word.to_lowercase();
        let sounds = self.pronunciation(&word)?;

        let mut cursor = Cursor {
            letters: &word,
            sounds,
        };

        let prefix = self.strip_prefix(&mut cursor);
        let suffix = self.strip_suffix(&word, sounds, &mut cursor);

        let mut segments: Vec<Segment> = prefix.into_iter().collect();
        let mut decodable = true;

        while !cursor.exhausted() {
            let step = self.step(cursor);
            cursor = step.rest;

            if let Some(segment) = step.segment {
                trace!(
                    word = %word,
                    letters = %segment.letter_part,
                    sounds = %Phoneme::join(&segment.sound_part),
                    indicator = %segment.indicator,
                    "segment"
                );
                if segment.indicator == Indicator::Undecodable {
                    decodable = false;
                    debug!(word = %word, rest = %segment.letter_part, "word is not decodable");
                }
                segments.push(segment);
            }
        }

        // Letters ran out before the sounds did.
        if !cursor.sounds.is_empty() {
            decodable = false;
            debug!(
                word = %word,
                sounds = %Phoneme::join(cursor.sounds),
                "sounds left over after the last letter"
            );
            segments.push(Segment::new(
                "",
                cursor.sounds.to_vec(),
                Indicator::Undecodable,
            ));
        }

        segments.extend(suffix);

        Ok(DecodedWord::new(word, segments, decodable))
    }

    /// One pass through the rule chain; the first stage that matches wins.
    fn step<'w>(&self, cursor: Cursor<'w>) -> Step<'w> {
        self.letter_combination(cursor)
            .or_else(|| skip_punctuation(cursor))
            .or_else(|| silent_e(cursor))
            .or_else(|| self.sound_category(cursor))
            .unwrap_or_else(|| undecodable(cursor))
    }

    fn strip_prefix(&self, cursor: &mut Cursor<'_>) -> Option<Segment> {
        for entry in self.rules.prefixes.iter() {
            let letters = entry.letters();
            if !cursor.letters.starts_with(letters.as_ref()) {
                continue;
            }
            if let Some(sounds) = entry.sounds.iter().find(|s| cursor.sounds.starts_with(s)) {
                *cursor = cursor.advance(letters.len(), sounds.len());
                return Some(Segment::new(letters, sounds.clone(), Indicator::LetterCombo));
            }
        }
        None
    }

    /// The suffix is matched against the whole word, then taken only if what
    /// remains after the prefix still ends with it.
    fn strip_suffix(
        &self,
        word: &str,
        sounds: &[Phoneme],
        cursor: &mut Cursor<'_>,
    ) -> Option<Segment> {
        for entry in self.rules.suffixes.iter() {
            let letters = entry.letters();
            if !word.ends_with(letters.as_ref()) || !cursor.letters.ends_with(letters.as_ref()) {
                continue;
            }
            let found = entry
                .sounds
                .iter()
                .find(|s| sounds.ends_with(s) && cursor.sounds.len() >= s.len());
            if let Some(suffix_sounds) = found {
                *cursor = cursor.truncate(letters.len(), suffix_sounds.len());
                return Some(Segment::new(
                    letters,
                    suffix_sounds.clone(),
                    Indicator::LetterCombo,
                ));
            }
        }
        None
    }

    fn letter_combination<'w>(&self, cursor: Cursor<'w>) -> Option<Step<'w>> {
        self.rules.letter_combinations.iter().find_map(|entry| {
            let letters = entry.letters();
            // Every step has to consume a letter or the loop never ends.
            if letters.is_empty() || !cursor.letters.starts_with(letters.as_ref()) {
                return None;
            }
            let sounds = entry.sounds.iter().find(|s| cursor.sounds.starts_with(s))?;
            Some(Step {
                rest: cursor.advance(letters.len(), sounds.len()),
                segment: Some(Segment::new(letters, sounds.clone(), Indicator::LetterCombo)),
            })
        })
    }

    fn sound_category<'w>(&self, cursor: Cursor<'w>) -> Option<Step<'w>> {
        let letter = cursor.leading_letter()?;
        for (indicator, table) in self.rules.sound_categories() {
            for entry in table.entries_for(letter) {
                if let Some(sounds) = entry.sounds.iter().find(|s| cursor.sounds.starts_with(s)) {
                    return Some(Step {
                        rest: cursor.advance(letter.len_utf8(), sounds.len()),
                        segment: Some(Segment::new(letter, sounds.clone(), indicator)),
                    });
                }
            }
        }
        None
    }
}

/// Apostrophes and other non-letters contribute no segment.
fn skip_punctuation(cursor: Cursor<'_>) -> Option<Step<'_>> {
    let letter = cursor.leading_letter()?;
    if letter.is_alphabetic() {
        return None;
    }
    Some(Step {
        segment: None,
        rest: cursor.advance(letter.len_utf8(), 0),
    })
}

fn silent_e(cursor: Cursor<'_>) -> Option<Step<'_>> {
    if cursor.leading_letter()? != 'e' {
        return None;
    }
    if cursor.sounds.first().is_some_and(|s| s.is_vowel()) {
        return None;
    }
    Some(Step {
        segment: Some(Segment::new("e", Vec::new(), Indicator::SilentE)),
        rest: cursor.advance(1, 0),
    })
}

/// Terminal stage: absorbs everything that is left.
fn undecodable(cursor: Cursor<'_>) -> Step<'_> {
    Step {
        segment: Some(Segment::new(
            cursor.letters,
            cursor.sounds.to_vec(),
            Indicator::Undecodable,
        )),
        rest: cursor.advance(cursor.letters.len(), cursor.sounds.len()),
    }
}
