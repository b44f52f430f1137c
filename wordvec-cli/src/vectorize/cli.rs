use clap::{Arg, Command, arg};

use crate::common::vectorizer_args;

pub const VECTORIZE_CMD: &str = "vectorize";

pub fn create_vectorize_cli() -> Command {
    Command::new(VECTORIZE_CMD)
        .author("Databio")
        .about("Count the words of a text file and print the vector as JSON.")
        .arg_required_else_help(true)
        .arg(Arg::new("input").required(true).help("The text file to vectorize"))
        .args(vectorizer_args())
        .arg(arg!(-u --unit "Scale the vector to unit length before printing"))
}
