use bitflags::bitflags;
use phonics_decoder::{DecodeError, Decoder, PatternClassifier, PatternOptions, Shape};
use phonics_protocol::{Indicator, PartOfSpeech, Phoneme, PronunciationDictionary, RuleTables};
use serde::Serialize;
use tracing::warn;

use crate::bitmap::{phoneme_bitmaps, PhonemeBitmap};
use crate::lookup::{PosTagger, WordRanks};
use crate::FeatureError;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct PatternFlags: u8 {
        const VC = 1;
        const CVC = 2;
        const CVCE = 4;
        const CVCVC = 8;
        const SILENT_E = 16;
        const DECODABLE = 32;
    }
}

impl From<Shape> for PatternFlags {
    fn from(shape: Shape) -> Self {
        match shape {
            Shape::Vc => PatternFlags::VC,
            Shape::Cvc => PatternFlags::CVC,
            Shape::Cvce => PatternFlags::CVCE,
            Shape::Cvcvc => PatternFlags::CVCVC,
        }
    }
}

/// Flat feature row for one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureRecord {
    pub word: String,
    pub rank: usize,
    pub part_of_speech: String,
    pub is_vc: bool,
    pub is_cvc: bool,
    pub is_cvce: bool,
    pub is_cvcvc: bool,
    pub has_silent_e: bool,
    pub letter_parts: Vec<String>,
    /// Space separated ARPAbet symbols, empty for silent letters.
    pub sound_parts: Vec<String>,
    pub indicators: Vec<Indicator>,
    pub decodable: bool,
    pub bitmaps: Vec<PhonemeBitmap>,
}

impl FeatureRecord {
    pub fn flags(&self) -> PatternFlags {
        let mut flags = PatternFlags::empty();
        flags.set(PatternFlags::VC, self.is_vc);
        flags.set(PatternFlags::CVC, self.is_cvc);
        flags.set(PatternFlags::CVCE, self.is_cvce);
        flags.set(PatternFlags::CVCVC, self.is_cvcvc);
        flags.set(PatternFlags::SILENT_E, self.has_silent_e);
        flags.set(PatternFlags::DECODABLE, self.decodable);
        flags
    }
}

/// Decoder + shape classifier + rank and tag lookups, glued into one row.
pub struct FeatureExtractor<'a> {
    rules: &'a RuleTables,
    decoder: Decoder<'a>,
    classifier: PatternClassifier<'a>,
    ranks: &'a WordRanks,
    tagger: &'a dyn PosTagger,
    options: PatternOptions,
}

impl<'a> FeatureExtractor<'a> {
    pub fn new(
        rules: &'a RuleTables,
        dictionary: &'a PronunciationDictionary,
        ranks: &'a WordRanks,
        tagger: &'a dyn PosTagger,
        options: PatternOptions,
    ) -> Self {
        let decoder = Decoder::new(rules, dictionary);
        Self {
            rules,
            decoder,
            classifier: decoder.classifier(),
            ranks,
            tagger,
            options,
        }
    }

    pub fn extract(&self, word: &str) -> Result<FeatureRecord, FeatureError> {
        let word = word.to_lowercase();

        let rank = self
            .ranks
            .rank(&word)
            .ok_or_else(|| FeatureError::Unranked { word: word.clone() })?;
        let part_of_speech = self.tagger.tag(&word).unwrap_or(PartOfSpeech::Other);
        let decoded = self.decoder.decode(&word)?;

        let mut flags = self.shape_flags(&word)?;
        flags.set(PatternFlags::SILENT_E, decoded.has_indicator(Indicator::SilentE));
        flags.set(PatternFlags::DECODABLE, decoded.decodable());

        Ok(FeatureRecord {
            rank,
            part_of_speech: part_of_speech.describe().to_string(),
            is_vc: flags.contains(PatternFlags::VC),
            is_cvc: flags.contains(PatternFlags::CVC),
            is_cvce: flags.contains(PatternFlags::CVCE),
            is_cvcvc: flags.contains(PatternFlags::CVCVC),
            has_silent_e: flags.contains(PatternFlags::SILENT_E),
            letter_parts: decoded.letter_parts().map(str::to_string).collect(),
            sound_parts: decoded.sound_parts().map(Phoneme::join).collect(),
            indicators: decoded.indicators().collect(),
            decodable: flags.contains(PatternFlags::DECODABLE),
            bitmaps: phoneme_bitmaps(self.rules, &decoded),
            word,
        })
    }

    /// One result per input word, in input order.
    pub fn extract_all<I, S>(&self, words: I) -> Vec<Result<FeatureRecord, FeatureError>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        words
            .into_iter()
            .map(|word| self.extract(word.as_ref()))
            .collect()
    }

    /// An inconsistent spelling counts as "no match" here; the classifier
    /// itself still reports it to direct callers.
    fn shape_flags(&self, word: &str) -> Result<PatternFlags, DecodeError> {
        let mut flags = PatternFlags::empty();
        for shape in Shape::ALL {
            match self.classifier.matches(shape, word, &self.options) {
                Ok(true) => flags |= PatternFlags::from(shape),
                Ok(false) => {}
                Err(DecodeError::Consistency { reason, .. }) => {
                    warn!(word, shape = %shape, reason, "inconsistent spelling, shape not matched");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(flags)
    }
}
