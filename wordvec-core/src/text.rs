use std::sync::LazyLock;

use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
use regex::Regex;

// anything that is not a word character, whitespace or a colon
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s:]").expect("punctuation pattern is valid"));

static NON_WORD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("non-word pattern is valid"));

///
/// Split raw text into lowercase tokens.
///
/// Punctuation is replaced by spaces before splitting on whitespace, so
/// `"Hello, World!"` yields `["hello", "world"]`. Colons survive and stay
/// part of the token they touch.
///
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned = PUNCTUATION.replace_all(text, " ");
    cleaned
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

///
/// Count how often each token occurs, skipping anything in `exclude`.
///
pub fn count_tokens<I, S>(tokens: I, exclude: &HashSet<String>) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut counts: HashMap<String, u64> = HashMap::default();
    for token in tokens {
        let token = token.into();
        if exclude.contains(&token) {
            continue;
        }
        *counts.entry(token).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

///
/// Produce a canonical identifier for an arbitrary label: every run of
/// non-word characters collapses into one `_`, outer underscores are
/// stripped and the result is lowercased.
///
/// ```rust
/// use wordvec_core::normalize_key;
///
/// assert_eq!(normalize_key("Hello *** **** *** World"), "hello_world");
/// ```
///
pub fn normalize_key(raw: &str) -> String {
    let replaced = NON_WORD_RUN.replace_all(raw, "_");
    replaced.trim_matches('_').to_lowercase()
}
