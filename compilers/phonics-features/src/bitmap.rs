use phonics_protocol::{CategoryTable, DecodedWord, RuleTables};
use serde::Serialize;

/// One bit per table entry: did the decoding read that letter pattern with
/// one of the entry's sounds?
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhonemeBitmap {
    pub name: String,
    pub bits: Vec<u8>,
}

impl PhonemeBitmap {
    pub fn is_set(&self, index: usize) -> bool {
        self.bits.get(index).is_some_and(|b| *b == 1)
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|b| **b == 1).count()
    }
}

/// Only the first segment spelled like the entry is inspected.
fn table_bitmap(table: &CategoryTable, decoded: &DecodedWord) -> PhonemeBitmap {
    let bits = table
        .iter()
        .map(|entry| {
            let letters = entry.letters();
            let first = decoded
                .segments()
                .iter()
                .find(|s| s.letter_part == letters.as_ref());
            u8::from(first.is_some_and(|s| entry.admits(&s.sound_part)))
        })
        .collect();

    PhonemeBitmap {
        name: table.name.clone(),
        bits,
    }
}

pub fn phoneme_bitmaps(rules: &RuleTables, decoded: &DecodedWord) -> Vec<PhonemeBitmap> {
    rules
        .bitmap_tables()
        .map(|table| table_bitmap(table, decoded))
        .collect()
}
