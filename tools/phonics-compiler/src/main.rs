use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use phonics_compiler::{
    compile_files, format_decoded, format_shapes, load_options, read_bundle, write_bundle,
    SourcePaths,
};
use phonics_decoder::Decoder;
use phonics_features::{FeatureExtractor, LexiconTagger, WordRanks};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Compiles phonics tables and decodes words with them")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the rule tables, parse the lexicons and write an rkyv bundle.
    Compile {
        #[arg(long, value_name = "FILE")]
        rules: PathBuf,

        /// CMU pronouncing dictionary.
        #[arg(long, value_name = "FILE")]
        dict: PathBuf,

        /// Word list ordered by frequency.
        #[arg(long, value_name = "FILE")]
        ranks: Option<PathBuf>,

        /// `word<TAB>TAG` part-of-speech lexicon.
        #[arg(long, value_name = "FILE")]
        pos: Option<PathBuf>,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Print the letter/sound segments of each word.
    Decode {
        #[arg(short, long, value_name = "FILE")]
        data: PathBuf,

        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Print the VC, CVC, CVCE and CVCVC answers for each word.
    Classify {
        #[arg(short, long, value_name = "FILE")]
        data: PathBuf,

        /// JSON pattern options.
        #[arg(long, value_name = "FILE")]
        options: Option<PathBuf>,

        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Print one JSON feature record per word.
    Features {
        #[arg(short, long, value_name = "FILE")]
        data: PathBuf,

        #[arg(long, value_name = "FILE")]
        options: Option<PathBuf>,

        #[arg(required = true)]
        words: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Compile {
            rules,
            dict,
            ranks,
            pos,
            output,
        } => {
            let data = compile_files(&SourcePaths {
                rules,
                dict,
                ranks,
                pos,
            })?;
            write_bundle(&data, &output)?;
            println!("{}", data.describe());
        }
        Command::Decode { data, words } => {
            let data = read_bundle(&data)?;
            let decoder = Decoder::new(&data.rules, &data.dictionary);
            for word in &words {
                match decoder.decode(word) {
                    Ok(decoded) => print!("{}", format_decoded(&decoded)),
                    Err(err) => error!("{err}"),
                }
            }
        }
        Command::Classify {
            data,
            options,
            words,
        } => {
            let options = load_options(options.as_deref())?;
            let data = read_bundle(&data)?;
            let classifier = Decoder::new(&data.rules, &data.dictionary).classifier();
            for word in &words {
                match format_shapes(&classifier, word, &options) {
                    Ok(text) => print!("{text}"),
                    Err(err) => error!("{err}"),
                }
            }
        }
        Command::Features {
            data,
            options,
            words,
        } => {
            let options = load_options(options.as_deref())?;
            let data = read_bundle(&data)?;
            let ranks = WordRanks::new(&data.ranks);
            let tagger = LexiconTagger::from_entries(&data.pos_lexicon);
            info!(ranked = ranks.len(), "extracting features");

            let extractor =
                FeatureExtractor::new(&data.rules, &data.dictionary, &ranks, &tagger, options);
            let mut records = Vec::new();
            for (word, result) in words.iter().zip(extractor.extract_all(&words)) {
                match result {
                    Ok(record) => records.push(record),
                    Err(err) => error!(word = %word, "{err}"),
                }
            }
            let json = serde_json::to_string_pretty(&records).context("cannot encode features")?;
            println!("{json}");
        }
    }

    Ok(())
}
