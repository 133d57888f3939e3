//! Small rule tables and dictionary shared by the unit tests.

use phonics_protocol::{
    CategoryTable, Phoneme, PronunciationDictionary, PronunciationEntry, RuleTables,
};

pub fn seq(text: &str) -> Vec<Phoneme> {
    Phoneme::parse_sequence(text).unwrap()
}

fn table(name: &str, rows: &[(&str, &[&str])]) -> CategoryTable {
    rows.iter().fold(CategoryTable::new(name), |t, (pattern, sounds)| {
        t.with(pattern, sounds.iter().map(|s| seq(s)).collect())
    })
}

pub fn rules() -> RuleTables {
    RuleTables {
        short_vowels: table(
            "short_vowels",
            &[("a", &["AE"]), ("e", &["EH"]), ("i", &["IH"]), ("o", &["AA"]), ("u", &["AH"])],
        ),
        long_vowels: table(
            "long_vowels",
            &[("a", &["EY"]), ("e", &["IY"]), ("i", &["AY"]), ("o", &["OW"]), ("u", &["Y UW", "UW"])],
        ),
        hard_consonants: table(
            "hard_consonants",
            &[
                ("b", &["B"]), ("c", &["K"]), ("d", &["D"]), ("f", &["F"]), ("g", &["G"]),
                ("h", &["HH"]), ("j", &["JH"]), ("k", &["K"]), ("l", &["L"]), ("m", &["M"]),
                ("n", &["N"]), ("p", &["P"]), ("q", &["K"]), ("r", &["R"]), ("s", &["S"]),
                ("t", &["T"]), ("v", &["V"]), ("w", &["W"]), ("x", &["K S"]), ("y", &["Y"]),
                ("z", &["Z"]),
            ],
        ),
        soft_consonants: table(
            "soft_consonants",
            &[("c", &["S"]), ("g", &["JH"]), ("s", &["Z"])],
        ),
        letter_combinations: table(
            "letter_combinations",
            &[
                ("sh", &["SH"]), ("ch", &["CH", "K"]), ("th", &["TH", "DH"]), ("ck", &["K"]),
                ("ng", &["NG"]), ("ee", &["IY"]), ("ea", &["IY", "EH"]), ("oa", &["OW"]),
                ("ai", &["EY"]), ("ay", &["EY"]), ("igh", &["AY"]), ("ph", &["F"]),
            ],
        ),
        prefixes: table(
            "prefixes",
            &[("un-", &["AH N"]), ("re-", &["R IY", "R IH"]), ("dis-", &["D IH S"])],
        ),
        suffixes: table(
            "suffixes",
            &[
                ("-ing", &["IH NG"]), ("-ed", &["D", "T", "IH D"]), ("-es", &["IH Z"]),
                ("-s", &["S", "Z"]), ("-ly", &["L IY"]),
            ],
        ),
        feature_sets: vec![table(
            "digraphs",
            &[("sh", &["SH"]), ("ch", &["CH"]), ("th", &["TH", "DH"])],
        )],
    }
}

pub fn dictionary() -> PronunciationDictionary {
    let rows = [
        ("at", "AE1 T"),
        ("of", "AH1 V"),
        ("egg", "EH1 G"),
        ("eat", "IY1 T"),
        ("are", "AA1 R"),
        ("heir", "EH1 R"),
        ("ate", "EY1 T"),
        ("cat", "K AE1 T"),
        ("cake", "K EY1 K"),
        ("gem", "JH EH1 M"),
        ("ship", "SH IH1 P"),
        ("shape", "SH EY1 P"),
        ("boat", "B OW1 T"),
        ("time", "T AY1 M"),
        ("fox", "F AA1 K S"),
        ("robin", "R AA1 B AH0 N"),
        ("rabbit", "R AE1 B AH0 T"),
        ("lemon", "L EH1 M AH0 N"),
        ("mishap", "M IH1 S HH AE2 P"),
        ("uncle", "AH1 NG K AH0 L"),
        ("unlocking", "AH0 N L AA1 K IH0 NG"),
        ("reheat", "R IY0 HH IY1 T"),
        ("ring", "R IH1 NG"),
        ("won't", "W OW1 N T"),
        ("rhythm", "R IH1 DH AH0 M"),
        ("rhythms", "R IH1 DH AH0 M Z"),
        ("strap", "S T R AE1 P"),
    ];
    PronunciationDictionary::from_entries(rows.iter().map(|(word, sounds)| PronunciationEntry {
        word: word.to_string(),
        sounds: seq(sounds),
    }))
}
