use std::f64::consts::FRAC_PI_2;
use std::fs::read_to_string;

use approx::assert_relative_eq;
use pretty_assertions::assert_eq;
use rstest::*;

use wordvec_core::{DEFAULT_STOP_WORDS, SparseVector, Vectorizer, similarity_of};

#[fixture]
fn path_to_corpus() -> &'static str {
    "../tests/data/corpus"
}

fn load(dir: &str, name: &str) -> SparseVector {
    let text = read_to_string(format!("{dir}/{name}")).unwrap();
    SparseVector::from_text(&text, DEFAULT_STOP_WORDS).unwrap()
}

#[rstest]
fn test_related_documents_are_closer(path_to_corpus: &str) {
    let rust = load(path_to_corpus, "rust.txt");
    let rust_again = load(path_to_corpus, "rust_again.txt");
    let baking = load(path_to_corpus, "baking.txt");

    let (r1, r2) = SparseVector::comparable_pair(&rust, &rust_again);
    let (r3, b) = SparseVector::comparable_pair(&rust, &baking);

    let related = r1.angle(&r2).unwrap();
    let unrelated = r3.angle(&b).unwrap();

    assert!(related < unrelated);
    assert!(unrelated <= FRAC_PI_2);
}

#[rstest]
fn test_stop_words_file_removes_shared_boilerplate(path_to_corpus: &str) {
    // "chapter" and "page" are the only words the rust and baking texts share
    let rust = load(path_to_corpus, "rust.txt");
    let baking = load(path_to_corpus, "baking.txt");
    let common = rust.intersect(&baking);
    let mut shared: Vec<&str> = common.keys().collect();
    shared.sort();
    assert_eq!(shared, vec!["chapter", "page"]);

    let vectorizer = Vectorizer::from_config("../tests/data/vectorizer.toml").unwrap();
    let rust = vectorizer
        .vectorize_file(format!("{path_to_corpus}/rust.txt"))
        .unwrap();
    let baking = vectorizer
        .vectorize_file(format!("{path_to_corpus}/baking.txt"))
        .unwrap();

    assert!(rust.intersect(&baking).is_empty());
}

#[rstest]
fn test_unrelated_documents_are_orthogonal_without_boilerplate(path_to_corpus: &str) {
    let vectorizer = Vectorizer::default().with_extra_stop_words(&["chapter", "page", "1", "7"]);
    let rust = vectorizer
        .vectorize_file(format!("{path_to_corpus}/rust.txt"))
        .unwrap();
    let baking = vectorizer
        .vectorize_file(format!("{path_to_corpus}/baking.txt"))
        .unwrap();

    let sim = similarity_of(&rust, &baking).unwrap();
    assert_eq!(sim.dot, 0.0);
    assert_relative_eq!(sim.angle, FRAC_PI_2);
}

#[rstest]
fn test_similarity_is_symmetric(path_to_corpus: &str) {
    let rust = load(path_to_corpus, "rust.txt");
    let rust_again = load(path_to_corpus, "rust_again.txt");

    let forward = similarity_of(&rust, &rust_again).unwrap();
    let backward = similarity_of(&rust_again, &rust).unwrap();

    assert_eq!(forward, backward);
}

#[rstest]
fn test_term_frequency_algebra(path_to_corpus: &str) {
    let rust = load(path_to_corpus, "rust.txt");
    let rust_again = load(path_to_corpus, "rust_again.txt");

    let combined = rust.add(&rust_again).unwrap();
    assert_eq!(combined.weight("rust"), rust.weight("rust") + rust_again.weight("rust"));

    let shared_only = combined.intersect(&rust).intersect(&rust_again);
    for key in shared_only.keys() {
        assert!(rust.contains_key(key) && rust_again.contains_key(key));
    }

    let ratio = rust_again.div(&rust).unwrap();
    // missing from the divisor: divided by one
    assert_eq!(ratio.weight("collector"), rust_again.weight("collector"));
    // missing from the numerator: zero
    assert_eq!(ratio.weight("borrowing"), 0.0);
}
