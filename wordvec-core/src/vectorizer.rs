use std::fs::read_to_string;
use std::path::Path;

use fxhash::FxHashSet as HashSet;
use serde::Serialize;

use crate::config::{StopWordPreset, StopWords, VectorizerConfig};
use crate::error::{VectorizerError, WordVectorError};
use crate::sparse_vector::SparseVector;
use crate::text::normalize_key;
use crate::utils::stop_words::{DEFAULT_STOP_WORDS, read_stop_words_file, stop_word_set};

///
/// How close two documents are, measured on their aligned vectors.
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Similarity {
    pub dot: f64,
    pub cosine: f64,
    /// radians
    pub angle: f64,
}

///
/// Turns text into sparse vectors with a fixed set of preprocessing rules.
///
pub struct Vectorizer {
    exclude: HashSet<String>,
    min_count: Option<f64>,
    normalize_keys: bool,
}

impl Default for Vectorizer {
    fn default() -> Self {
        Self {
            exclude: stop_word_set(DEFAULT_STOP_WORDS),
            min_count: None,
            normalize_keys: false,
        }
    }
}

impl Vectorizer {
    pub fn new(exclude: HashSet<String>, min_count: Option<f64>, normalize_keys: bool) -> Self {
        Self {
            exclude,
            min_count,
            normalize_keys,
        }
    }

    ///
    /// Create a vectorizer from a TOML config file. A relative
    /// `stop_words_file` is looked up next to the config file.
    ///
    pub fn from_config<P: AsRef<Path>>(cfg_path: P) -> Result<Self, VectorizerError> {
        let cfg_path = cfg_path.as_ref();
        let config = VectorizerConfig::try_from(cfg_path)?;

        let mut exclude = match &config.stop_words {
            None | Some(StopWords::Preset(StopWordPreset::Default)) => {
                stop_word_set(DEFAULT_STOP_WORDS)
            }
            Some(StopWords::Preset(StopWordPreset::None)) => HashSet::default(),
            Some(StopWords::Custom(words)) => words.iter().map(|w| w.to_lowercase()).collect(),
        };

        if let Some(file) = &config.stop_words_file {
            let config_dir = cfg_path.parent().unwrap_or(Path::new("."));
            let words = read_stop_words_file(&config_dir.join(file))?;
            exclude.extend(words);
        }

        log::info!(
            "Loaded vectorizer config from {} ({} stop words)",
            cfg_path.display(),
            exclude.len()
        );

        Ok(Self {
            exclude,
            min_count: config.min_count,
            normalize_keys: config.normalize_keys.unwrap_or(false),
        })
    }

    pub fn with_stop_words(mut self, preset: StopWordPreset) -> Self {
        self.exclude = match preset {
            StopWordPreset::Default => stop_word_set(DEFAULT_STOP_WORDS),
            StopWordPreset::None => HashSet::default(),
        };
        self
    }

    pub fn with_extra_stop_words<S: AsRef<str>>(mut self, words: &[S]) -> Self {
        self.exclude
            .extend(words.iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    pub fn with_min_count(mut self, min_count: f64) -> Self {
        self.min_count = Some(min_count);
        self
    }

    pub fn with_normalized_keys(mut self, normalize_keys: bool) -> Self {
        self.normalize_keys = normalize_keys;
        self
    }

    pub fn stop_words(&self) -> &HashSet<String> {
        &self.exclude
    }

    ///
    /// Vectorize one document. Returns `None` for empty text.
    ///
    /// Keys are normalized first (when enabled), so the `min_count`
    /// threshold sees the merged counts.
    ///
    pub fn vectorize(&self, text: &str) -> Result<Option<SparseVector>, VectorizerError> {
        let Some(mut vector) = SparseVector::from_text_excluding(text, &self.exclude) else {
            return Ok(None);
        };

        if self.normalize_keys {
            vector = vector.map_keys(normalize_key)?;
        }
        if let Some(min_count) = self.min_count {
            vector = vector.filter_above(min_count);
        }

        Ok(Some(vector))
    }

    pub fn vectorize_file<P: AsRef<Path>>(&self, path: P) -> Result<SparseVector, VectorizerError> {
        let text = read_to_string(path.as_ref())?;
        self.vectorize(&text)?
            .ok_or_else(|| VectorizerError::EmptyDocument(path.as_ref().display().to_string()))
    }

    ///
    /// Vectorize both documents, align them and measure their similarity.
    ///
    pub fn similarity(&self, a: &str, b: &str) -> Result<Similarity, VectorizerError> {
        let va = self
            .vectorize(a)?
            .ok_or_else(|| VectorizerError::EmptyDocument("first document".to_string()))?;
        let vb = self
            .vectorize(b)?
            .ok_or_else(|| VectorizerError::EmptyDocument("second document".to_string()))?;

        Ok(similarity_of(&va, &vb)?)
    }
}

///
/// Similarity of two vectors after aligning them over their key union.
///
pub fn similarity_of(
    a: &SparseVector,
    b: &SparseVector,
) -> Result<Similarity, WordVectorError> {
    let (ca, cb) = SparseVector::comparable_pair(a, b);
    let cosine = ca.cosine_similarity(&cb)?;

    Ok(Similarity {
        dot: ca.dot(&cb),
        cosine,
        angle: cosine.acos(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn config_path() -> &'static str {
        "../tests/data/vectorizer.toml"
    }

    #[rstest]
    fn test_default_vectorizer_drops_stop_words() {
        let vectorizer = Vectorizer::default();
        let v = vectorizer.vectorize("The cat and the hat").unwrap().unwrap();

        assert_eq!(v.get("cat"), Some(1.0));
        assert_eq!(v.get("the"), None);
    }

    #[rstest]
    fn test_new_with_explicit_settings() {
        let exclude = stop_word_set(&["hat"]);
        let vectorizer = Vectorizer::new(exclude, Some(2.0), true);

        let v = vectorizer
            .vectorize("the hat, the cat: the hat")
            .unwrap()
            .unwrap();
        assert_eq!(v.get("the"), Some(3.0));
        assert_eq!(v.get("hat"), None);
        // "cat:" is normalized to "cat" and then falls under the threshold
        assert_eq!(v.get("cat"), None);
        assert_eq!(v.len(), 1);
    }

    #[rstest]
    fn test_vectorize_empty_text() {
        let vectorizer = Vectorizer::default();
        assert!(vectorizer.vectorize("").unwrap().is_none());
    }

    #[rstest]
    fn test_no_stop_words() {
        let vectorizer = Vectorizer::default().with_stop_words(StopWordPreset::None);
        let v = vectorizer.vectorize("The cat and the hat").unwrap().unwrap();
        assert_eq!(v.get("the"), Some(2.0));
    }

    #[rstest]
    fn test_extra_stop_words() {
        let vectorizer = Vectorizer::default().with_extra_stop_words(&["Cat"]);
        let v = vectorizer.vectorize("The cat and the hat").unwrap().unwrap();
        assert_eq!(v.get("cat"), None);
        assert_eq!(v.get("hat"), Some(1.0));
    }

    #[rstest]
    fn test_min_count() {
        let vectorizer = Vectorizer::default().with_min_count(2.0);
        let v = vectorizer
            .vectorize("red fish blue fish red fish")
            .unwrap()
            .unwrap();
        assert_eq!(v.get("fish"), Some(3.0));
        assert_eq!(v.get("red"), Some(2.0));
        assert_eq!(v.get("blue"), None);
    }

    #[rstest]
    fn test_normalized_keys_merge_before_threshold() {
        let vectorizer = Vectorizer::default()
            .with_normalized_keys(true)
            .with_min_count(2.0);
        // "key:value" and "key_value" collapse onto the same normalized key
        let v = vectorizer
            .vectorize("Key:Value key_value sample")
            .unwrap()
            .unwrap();
        assert_eq!(v.get("key_value"), Some(2.0));
        assert_eq!(v.get("sample"), None);
    }

    #[rstest]
    fn test_from_config(config_path: &str) {
        let vectorizer = Vectorizer::from_config(config_path).unwrap();

        assert!(vectorizer.stop_words().contains("the"));
        // from the stop words file next to the config
        assert!(vectorizer.stop_words().contains("chapter"));
        assert!(vectorizer.stop_words().contains("page"));
        assert_eq!(vectorizer.min_count, Some(2.0));
        assert!(vectorizer.normalize_keys);
    }

    #[rstest]
    fn test_from_config_custom_stop_words() {
        let vectorizer =
            Vectorizer::from_config("../tests/data/vectorizer_custom_stop_words.toml").unwrap();
        assert_eq!(vectorizer.stop_words().len(), 2);
        assert!(vectorizer.stop_words().contains("lorem"));
    }

    #[rstest]
    fn test_from_config_bad_preset() {
        let result = Vectorizer::from_config("../tests/data/vectorizer_bad_preset.toml");
        assert!(matches!(result, Err(VectorizerError::Config(_))));
    }

    #[rstest]
    fn test_vectorize_file() {
        let vectorizer = Vectorizer::default();
        let v = vectorizer
            .vectorize_file("../tests/data/corpus/rust.txt")
            .unwrap();
        assert_eq!(v.get("rust"), Some(3.0));
    }

    #[rstest]
    fn test_vectorize_empty_file() {
        let vectorizer = Vectorizer::default();
        let result = vectorizer.vectorize_file("../tests/data/corpus/empty.txt");
        assert!(matches!(result, Err(VectorizerError::EmptyDocument(_))));
    }

    #[rstest]
    fn test_similarity_identical_text() {
        let vectorizer = Vectorizer::default();
        let sim = vectorizer
            .similarity("hello world", "World, hello!")
            .unwrap();
        assert_relative_eq!(sim.cosine, 1.0, epsilon = 1e-12);
        assert_relative_eq!(sim.dot, 2.0);
        assert!(sim.angle.abs() < 1e-6);
    }

    #[rstest]
    fn test_similarity_of_vectors() {
        let v1 = SparseVector::from_mapping([("hello", 1), ("world", 1)]).unwrap();
        let v2 = SparseVector::from_mapping([("hello", 1), ("dave", 2)]).unwrap();
        let sim = similarity_of(&v1, &v2).unwrap();

        assert_eq!(sim.dot, 1.0);
        assert_relative_eq!(sim.cosine, 1.0 / 10.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(sim.angle, sim.cosine.acos());
    }

    #[rstest]
    fn test_similarity_empty_documents() {
        let vectorizer = Vectorizer::default();
        assert!(matches!(
            vectorizer.similarity("", "hello"),
            Err(VectorizerError::EmptyDocument(_))
        ));
        assert!(matches!(
            vectorizer.similarity("the of and", "hello"),
            Err(VectorizerError::Vector(WordVectorError::ZeroLength))
        ));
    }
}
