use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ArgMatches;

use wordvec_core::{Similarity, similarity_of};

use crate::common::build_vectorizer;

pub fn run_compare(matches: &ArgMatches) -> Result<()> {
    let first = matches
        .get_one::<String>("first")
        .context("A path to the first text file is required.")?;
    let second = matches
        .get_one::<String>("second")
        .context("A path to the second text file is required.")?;

    let vectorizer = build_vectorizer(matches)?;
    let a = vectorizer
        .vectorize_file(first)
        .with_context(|| format!("Failed to vectorize {}", first))?;
    let b = vectorizer
        .vectorize_file(second)
        .with_context(|| format!("Failed to vectorize {}", second))?;

    let similarity = similarity_of(&a, &b)
        .with_context(|| format!("Cannot compare {} and {}", first, second))?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_similarity(&mut handle, &similarity, matches.get_flag("json"))?;

    Ok(())
}

fn write_similarity<W: Write>(out: &mut W, similarity: &Similarity, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, similarity)?;
        writeln!(out)?;
    } else {
        writeln!(out, "dot\t{}", similarity.dot)?;
        writeln!(out, "cosine\t{}", similarity.cosine)?;
        writeln!(out, "angle\t{}", similarity.angle)?;
    }
    Ok(())
}
