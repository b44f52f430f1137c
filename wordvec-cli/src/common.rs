use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, arg, value_parser};

use wordvec_core::{StopWordPreset, Vectorizer};

///
/// Options shared by every subcommand that turns text into vectors.
///
pub fn vectorizer_args() -> Vec<Arg> {
    vec![
        arg!(-c --config <config> "A TOML file with vectorizer settings").required(false),
        arg!(-s --"stop-words" <preset> "Stop word list to use (default or none)")
            .required(false),
        arg!(-m --"min-count" <count> "Drop words seen fewer times than this")
            .required(false)
            .value_parser(value_parser!(f64)),
        arg!(-n --"normalize-keys" "Collapse punctuation in words into underscores"),
    ]
}

///
/// Build a vectorizer from the config file (if any), then apply
/// command line overrides on top of it.
///
pub fn build_vectorizer(matches: &ArgMatches) -> Result<Vectorizer> {
    let mut vectorizer = match matches.get_one::<String>("config") {
        Some(path) => Vectorizer::from_config(path)
            .with_context(|| format!("Failed to load vectorizer config from {}", path))?,
        None => Vectorizer::default(),
    };

    if let Some(preset) = matches.get_one::<String>("stop-words") {
        let preset = StopWordPreset::from_str(preset)?;
        vectorizer = vectorizer.with_stop_words(preset);
    }

    if let Some(min_count) = matches.get_one::<f64>("min-count") {
        vectorizer = vectorizer.with_min_count(*min_count);
    }

    if matches.get_flag("normalize-keys") {
        vectorizer = vectorizer.with_normalized_keys(true);
    }

    Ok(vectorizer)
}
