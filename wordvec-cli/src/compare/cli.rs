use clap::{Arg, Command, arg};

use crate::common::vectorizer_args;

pub const COMPARE_CMD: &str = "compare";

pub fn create_compare_cli() -> Command {
    Command::new(COMPARE_CMD)
        .author("Databio")
        .about("Measure how similar two text files are (dot product, cosine, angle).")
        .arg_required_else_help(true)
        .arg(Arg::new("first").required(true).help("The first text file"))
        .arg(Arg::new("second").required(true).help("The second text file"))
        .args(vectorizer_args())
        .arg(arg!(--json "Print the result as JSON"))
}
