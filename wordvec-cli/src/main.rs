mod common;
mod compare;
mod vectorize;

use anyhow::Result;
use clap::{Command, arg};
use tracing_subscriber::EnvFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "wordvec";
    pub const VERBOSE_FILTER: &str = "wordvec_core=debug,wordvec=debug";
    pub const DEFAULT_FILTER: &str = "warn";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Represent text as sparse word vectors and measure how similar documents are.")
        .subcommand_required(true)
        .arg(arg!(-v --verbose "Print debug logging to stderr").global(true))
        .subcommand(vectorize::cli::create_vectorize_cli())
        .subcommand(compare::cli::create_compare_cli())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(consts::VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(consts::DEFAULT_FILTER))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        //
        // VECTORIZE
        //
        Some((vectorize::cli::VECTORIZE_CMD, matches)) => {
            vectorize::handlers::run_vectorize(matches)?;
        }

        //
        // COMPARE
        //
        Some((compare::cli::COMPARE_CMD, matches)) => {
            compare::handlers::run_compare(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
