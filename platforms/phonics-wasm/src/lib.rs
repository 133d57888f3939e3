use phonics_decoder::{Decoder, PatternOptions};
use phonics_features::{FeatureExtractor, LexiconTagger, WordRanks};
use phonics_lexicon::from_bundle;
use phonics_protocol::{Indicator, Phoneme, PhonicsData};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// One segment as sent to JavaScript.
#[derive(Debug, Serialize)]
pub struct SegmentView {
    pub letters: String,
    pub sounds: String,
    pub indicator: Indicator,
}

#[derive(Debug, Serialize)]
pub struct DecodeReport {
    pub word: String,
    pub segments: Vec<SegmentView>,
    pub decodable: bool,
}

/// The engine instance running in the browser.
#[wasm_bindgen]
pub struct PhonicsEngine {
    // Deserialized once; decoders borrow from it per call.
    data: PhonicsData,
    ranks: WordRanks,
    tagger: LexiconTagger,
    options: PatternOptions,
}

impl PhonicsEngine {
    pub fn from_data(data: PhonicsData) -> Self {
        let ranks = WordRanks::new(&data.ranks);
        let tagger = LexiconTagger::from_entries(&data.pos_lexicon);
        Self {
            data,
            ranks,
            tagger,
            options: PatternOptions::default(),
        }
    }

    pub fn decode_report(&self, word: &str) -> Result<DecodeReport, String> {
        let decoded = Decoder::new(&self.data.rules, &self.data.dictionary)
            .decode(word)
            .map_err(|e| e.to_string())?;

        let segments = decoded
            .segments()
            .iter()
            .map(|s| SegmentView {
                letters: s.letter_part.clone(),
                sounds: Phoneme::join(&s.sound_part),
                indicator: s.indicator,
            })
            .collect();

        Ok(DecodeReport {
            word: decoded.word().to_string(),
            segments,
            decodable: decoded.decodable(),
        })
    }
}

#[wasm_bindgen]
impl PhonicsEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(data: Vec<u8>) -> Result<PhonicsEngine, JsValue> {
        let data = from_bundle(&data).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_data(data))
    }

    /// Replaces the pattern options with a JS object
    /// (`{ allowed_blends: [...], include_long_vowels: bool }`).
    #[wasm_bindgen(js_name = setOptions)]
    pub fn set_options(&mut self, options: JsValue) -> Result<(), JsValue> {
        self.options = serde_wasm_bindgen::from_value(options)?;
        Ok(())
    }

    /// Word -> feature record.
    pub fn analyze(&self, word: &str) -> Result<JsValue, JsValue> {
        let extractor = FeatureExtractor::new(
            &self.data.rules,
            &self.data.dictionary,
            &self.ranks,
            &self.tagger,
            self.options.clone(),
        );
        let record = extractor
            .extract(word)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(serde_wasm_bindgen::to_value(&record)?)
    }

    pub fn decode(&self, word: &str) -> Result<JsValue, JsValue> {
        let report = self.decode_report(word).map_err(|e| JsValue::from_str(&e))?;
        Ok(serde_wasm_bindgen::to_value(&report)?)
    }

    #[wasm_bindgen(js_name = debugInfo)]
    pub fn debug_info(&self) -> String {
        self.data.describe()
    }
}
