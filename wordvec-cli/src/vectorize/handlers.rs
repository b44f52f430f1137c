use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::common::build_vectorizer;

pub fn run_vectorize(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .context("A path to a text file is required.")?;

    let vectorizer = build_vectorizer(matches)?;
    let mut vector = vectorizer
        .vectorize_file(input)
        .with_context(|| format!("Failed to vectorize {}", input))?;

    if matches.get_flag("unit") {
        vector = vector.normalized()?;
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, &vector)?;
    writeln!(handle)?;

    Ok(())
}
