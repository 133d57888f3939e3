use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use phonics_decoder::{DecodeError, PatternClassifier, PatternOptions, Shape};
pub use phonics_lexicon::{from_bundle, to_bundle};
use phonics_lexicon::Sources;
use phonics_protocol::{DecodedWord, PhonicsData, Phoneme};
use tracing::info;

/// Input files for `compile`.
#[derive(Debug, Clone)]
pub struct SourcePaths {
    pub rules: PathBuf,
    pub dict: PathBuf,
    pub ranks: Option<PathBuf>,
    pub pos: Option<PathBuf>,
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

fn read_optional(path: Option<&PathBuf>) -> Result<Option<String>> {
    path.map(|p| read(p)).transpose()
}

/// Reads and compiles every source into one bundle.
pub fn compile_files(paths: &SourcePaths) -> Result<PhonicsData> {
    info!(rules = %paths.rules.display(), dict = %paths.dict.display(), "reading sources");

    let rules_json = read(&paths.rules)?;
    let cmudict = read(&paths.dict)?;
    let ranks = read_optional(paths.ranks.as_ref())?;
    let pos_lexicon = read_optional(paths.pos.as_ref())?;

    let data = phonics_lexicon::compile(Sources {
        rules_json: &rules_json,
        cmudict: &cmudict,
        ranks: ranks.as_deref(),
        pos_lexicon: pos_lexicon.as_deref(),
    })?;
    Ok(data)
}

pub fn write_bundle(data: &PhonicsData, path: &Path) -> Result<()> {
    let bytes = to_bundle(data)?;
    fs::write(path, &bytes).with_context(|| format!("cannot write {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "bundle written");
    Ok(())
}

pub fn read_bundle(path: &Path) -> Result<PhonicsData> {
    let bytes = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    from_bundle(&bytes).with_context(|| format!("cannot load {}", path.display()))
}

/// Strict options when no file is given.
pub fn load_options(path: Option<&Path>) -> Result<PatternOptions> {
    match path {
        Some(path) => {
            let text = read(path)?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid pattern options in {}", path.display()))
        }
        None => Ok(PatternOptions::default()),
    }
}

/// `c /K/ HARD_CONSONANT`, one segment per line, then the verdict.
pub fn format_decoded(decoded: &DecodedWord) -> String {
    let mut out = format!("{}\n", decoded.word());
    for segment in decoded.segments() {
        out.push_str(&format!(
            "  {} /{}/ {}\n",
            segment.letter_part,
            Phoneme::join(&segment.sound_part),
            segment.indicator
        ));
    }
    let verdict = if decoded.decodable() { "decodable" } else { "not decodable" };
    out.push_str(&format!("  => {verdict}\n"));
    out
}

/// One line per shape: `CVC: true` or `CVC: error: ...`.
pub fn format_shapes(
    classifier: &PatternClassifier<'_>,
    word: &str,
    options: &PatternOptions,
) -> Result<String, DecodeError> {
    let mut out = format!("{word}\n");
    for shape in Shape::ALL {
        match classifier.matches(shape, word, options) {
            Ok(answer) => out.push_str(&format!("  {shape}: {answer}\n")),
            Err(err @ DecodeError::Consistency { .. }) => {
                out.push_str(&format!("  {shape}: error: {err}\n"))
            }
            Err(err) => return Err(err),
        }
    }
    Ok(out)
}
