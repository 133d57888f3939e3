pub mod bitmap;
pub mod extractor;
pub mod lookup;

pub use bitmap::{phoneme_bitmaps, PhonemeBitmap};
pub use extractor::{FeatureExtractor, FeatureRecord, PatternFlags};
pub use lookup::{LexiconTagger, PosTagger, WordRanks};

use phonics_decoder::DecodeError;

#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("word '{word}' is not in the frequency list")]
    Unranked { word: String },
}
