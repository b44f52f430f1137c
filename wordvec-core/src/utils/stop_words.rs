use std::fs::read_to_string;
use std::path::Path;

use fxhash::FxHashSet as HashSet;

/// Common English words that carry little meaning for similarity.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "", "the", "of", "to", "and", "a", "in", "is", "it", "you", "that", "he", "was", "for", "on",
    "are", "with", "as", "i", "can", "they", "be", "at", "one", "have", "this", "from", "or",
    "had", "by", "but", "some", "what", "there", "we", "out", "other", "were", "all", "your",
    "when", "up", "use", "word", "how", "said", "an", "she", "which", "do", "their", "time", "if",
    "will", "way", "about", "many", "then", "them", "would", "write", "like", "so", "these", "her",
    "long", "make", "thing", "him", "see", "two", "has", "look", "more",
];

///
/// Build a lookup set out of any list of words.
///
pub fn stop_word_set<S: AsRef<str>>(words: &[S]) -> HashSet<String> {
    words.iter().map(|w| w.as_ref().to_string()).collect()
}

///
/// Read stop words from a file: one word per line, blank lines and
/// lines starting with `#` are skipped.
///
pub fn read_stop_words_file(path: &Path) -> std::io::Result<Vec<String>> {
    let contents = read_to_string(path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect())
}
