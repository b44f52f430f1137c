use std::collections::BTreeMap;

use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, WordVectorError};
use crate::text::{count_tokens, tokenize};
use crate::utils::fsum;
use crate::utils::stop_words::stop_word_set;

///
/// Anything that can be stored as a vector weight.
///
/// Integers are widened to `f64`; counts up to 2^53 stay exact.
///
pub trait Numeric: Copy {
    fn to_weight(self) -> f64;
}

macro_rules! impl_numeric {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                fn to_weight(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_numeric!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

impl<T: Numeric> Numeric for &T {
    fn to_weight(self) -> f64 {
        (*self).to_weight()
    }
}

/// A sparse vector with named dimensions.
///
/// Maps string keys ("words") to finite `f64` weights. A key that is not
/// present has an implicit weight of zero. Every write goes through
/// [`SparseVector::insert`], which refuses NaN and infinities, so a vector
/// never holds a non-numeric weight.
///
/// Combining two vectors never touches either operand; a fresh vector is
/// returned. The type is not internally synchronized: shared reads are fine,
/// writes need exclusive access.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, f64>",
    into = "BTreeMap<String, f64>"
)]
pub struct SparseVector {
    weights: HashMap<String, f64>,
}

impl SparseVector {
    /// Create an empty vector.
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Build a vector from explicit key/number pairs.
    ///
    /// Accepts anything iterable over `(key, number)`, e.g. a `HashMap<String, i64>`
    /// or a slice of `(&str, f64)` tuples. Every value is validated exactly like
    /// [`SparseVector::insert`].
    ///
    /// ```rust
    /// use wordvec_core::SparseVector;
    ///
    /// let v = SparseVector::from_mapping([("hello", 1), ("world", 1)]).unwrap();
    /// assert_eq!(v.get("hello"), Some(1.0));
    /// ```
    ///
    pub fn from_mapping<I, K, V>(mapping: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Numeric,
    {
        let mut vector = Self::new();
        for (key, value) in mapping {
            vector.insert(key, value.to_weight())?;
        }
        Ok(vector)
    }

    ///
    /// Build a vector from a dynamically typed JSON value.
    ///
    /// The value must be an object whose members are all numbers.
    ///
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(WordVectorError::NotAMapping(
                    json_type_name(other).to_string(),
                ));
            }
        };

        let mut vector = Self::new();
        for (key, member) in object {
            let weight = member.as_f64().ok_or_else(|| WordVectorError::NonNumeric {
                key: key.clone(),
                value: member.to_string(),
            })?;
            vector.insert(key.as_str(), weight)?;
        }
        Ok(vector)
    }

    ///
    /// Build a term-frequency vector from raw text.
    ///
    /// Returns `None` when `text` is empty. Tokens found in `exclude` are not
    /// counted; pass [`crate::DEFAULT_STOP_WORDS`] for the stock English list
    /// or an empty slice to keep everything.
    ///
    /// ```rust
    /// use wordvec_core::SparseVector;
    ///
    /// let v = SparseVector::from_text("Hello World", &[] as &[&str]).unwrap();
    /// assert_eq!(v.get("hello"), Some(1.0));
    /// assert_eq!(v.get("world"), Some(1.0));
    /// ```
    ///
    pub fn from_text<S: AsRef<str>>(text: &str, exclude: &[S]) -> Option<Self> {
        Self::from_text_excluding(text, &stop_word_set(exclude))
    }

    ///
    /// Same as [`SparseVector::from_text`], with a prebuilt exclusion set.
    ///
    pub fn from_text_excluding(text: &str, exclude: &HashSet<String>) -> Option<Self> {
        if text.is_empty() {
            return None;
        }

        let tokens = tokenize(text);
        let num_tokens = tokens.len();
        let weights: HashMap<String, f64> = count_tokens(tokens, exclude)
            .into_iter()
            .map(|(token, count)| (token, count as f64))
            .collect();

        log::debug!(
            "Counted {} distinct keys from {} tokens",
            weights.len(),
            num_tokens
        );

        Some(Self { weights })
    }

    ///
    /// Store `value` under `key`, returning the weight it replaced.
    ///
    /// # Errors
    /// `NonNumeric` if `value` is NaN or infinite; the vector is left unchanged.
    ///
    pub fn insert<K: Into<String>>(&mut self, key: K, value: f64) -> Result<Option<f64>> {
        let key = key.into();
        if !value.is_finite() {
            return Err(WordVectorError::NonNumeric {
                key,
                value: value.to_string(),
            });
        }
        Ok(self.weights.insert(key, value))
    }

    /// The stored weight for `key`, if any.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.weights.get(key).copied()
    }

    /// The weight for `key`, zero when absent.
    pub fn weight(&self, key: &str) -> f64 {
        self.get(key).unwrap_or(0.0)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.weights.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.weights.values().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of stored dimensions.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    // filtering only ever drops validated entries
    fn retain_clone<P: Fn(&str, f64) -> bool>(&self, pred: P) -> Self {
        Self {
            weights: self
                .weights
                .iter()
                .filter(|(k, v)| pred(k.as_str(), **v))
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
        }
    }

    ///
    /// Apply `f` to every weight. Keys are unchanged.
    ///
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Result<Self> {
        let mut mapped = Self::new();
        for (key, value) in &self.weights {
            mapped.insert(key.as_str(), f(*value))?;
        }
        Ok(mapped)
    }

    /// Multiply every weight by `n`.
    pub fn scale(&self, n: f64) -> Result<Self> {
        self.map(|v| v * n)
    }

    ///
    /// Rebuild the vector with every key passed through `f`. Weights of keys
    /// that end up identical are summed.
    ///
    pub fn map_keys<F: Fn(&str) -> String>(&self, f: F) -> Result<Self> {
        let mut merged: HashMap<String, f64> = HashMap::default();
        for (key, value) in &self.weights {
            *merged.entry(f(key)).or_insert(0.0) += *value;
        }
        Self::from_mapping(merged)
    }

    /// Keep entries whose weight satisfies `pred`.
    pub fn filter_values<P: Fn(f64) -> bool>(&self, pred: P) -> Self {
        self.retain_clone(|_, v| pred(v))
    }

    /// Keep entries whose key satisfies `pred`.
    pub fn filter_keys<P: Fn(&str) -> bool>(&self, pred: P) -> Self {
        self.retain_clone(|k, _| pred(k))
    }

    /// Keep entries for which `pred((key, weight))` holds.
    pub fn filter_entries<P: Fn((&str, f64)) -> bool>(&self, pred: P) -> Self {
        self.retain_clone(|k, v| pred((k, v)))
    }

    /// Keep entries with a weight of at least `threshold`.
    pub fn filter_above(&self, threshold: f64) -> Self {
        self.filter_values(|v| v >= threshold)
    }

    /// Keep only the keys that `other` also has. Weights come from `self`.
    pub fn intersect(&self, other: &SparseVector) -> Self {
        self.filter_keys(|k| other.contains_key(k))
    }

    ///
    /// Extend `self` to the union of both key sets. Weights come from `self`;
    /// keys only `other` has get zero.
    ///
    pub fn union(&self, other: &SparseVector) -> Self {
        let mut weights = self.weights.clone();
        for key in other.weights.keys() {
            weights.entry(key.clone()).or_insert(0.0);
        }
        Self { weights }
    }

    ///
    /// Check that both vectors have exactly the same key set.
    ///
    /// # Errors
    /// `NotComparable` when the key sets differ. Use
    /// [`SparseVector::has_same_keys`] for a plain boolean.
    ///
    pub fn is_comparable(&self, other: &SparseVector) -> Result<bool> {
        if self.has_same_keys(other) {
            Ok(true)
        } else {
            Err(WordVectorError::NotComparable)
        }
    }

    pub fn has_same_keys(&self, other: &SparseVector) -> bool {
        self.len() == other.len() && self.keys().all(|k| other.contains_key(k))
    }

    ///
    /// Align two vectors over the union of their keys.
    ///
    /// Each result keeps its own weights and gets zero for the keys only the
    /// other one had, so the returned pair is always comparable.
    ///
    pub fn comparable_pair(v1: &SparseVector, v2: &SparseVector) -> (SparseVector, SparseVector) {
        (v1.union(v2), v2.union(v1))
    }

    ///
    /// Combine two comparable vectors key by key with `op`.
    ///
    /// # Errors
    /// `NotComparable` if the key sets differ, `NonNumeric` if `op` yields a
    /// non-finite weight.
    ///
    pub fn combine<F: Fn(f64, f64) -> f64>(&self, op: F, other: &SparseVector) -> Result<Self> {
        self.is_comparable(other)?;

        let mut combined = Self::new();
        for (key, value) in &self.weights {
            combined.insert(key.as_str(), op(*value, other.weight(key)))?;
        }
        Ok(combined)
    }

    fn union_keys<'a>(&'a self, other: &'a SparseVector) -> HashSet<&'a str> {
        self.keys().chain(other.keys()).collect()
    }

    // the shared elementwise primitive: walk the key union, filling gaps with defaults
    fn zip_union<F: Fn(f64, f64) -> f64>(
        &self,
        other: &SparseVector,
        lhs_default: f64,
        rhs_default: f64,
        op: F,
    ) -> Result<Self> {
        let mut zipped = Self::new();
        for key in self.union_keys(other) {
            let lhs = self.get(key).unwrap_or(lhs_default);
            let rhs = other.get(key).unwrap_or(rhs_default);
            zipped.insert(key, op(lhs, rhs))?;
        }
        Ok(zipped)
    }

    /// Elementwise sum over the union of keys.
    pub fn add(&self, other: &SparseVector) -> Result<Self> {
        self.zip_union(other, 0.0, 0.0, |a, b| a + b)
    }

    /// Elementwise difference over the union of keys.
    pub fn sub(&self, other: &SparseVector) -> Result<Self> {
        self.zip_union(other, 0.0, 0.0, |a, b| a - b)
    }

    /// Elementwise product over the union of keys.
    pub fn mul(&self, other: &SparseVector) -> Result<Self> {
        self.zip_union(other, 0.0, 0.0, |a, b| a * b)
    }

    ///
    /// Elementwise quotient over the union of keys.
    ///
    /// A key missing from `self` divides 0; a key missing from `other` is
    /// divided by 1 and passes through unchanged.
    ///
    /// # Errors
    /// `DivisionByZero` if `other` stores an explicit zero.
    ///
    pub fn div(&self, other: &SparseVector) -> Result<Self> {
        if let Some((key, _)) = other.iter().find(|(_, v)| *v == 0.0) {
            return Err(WordVectorError::DivisionByZero {
                key: key.to_string(),
            });
        }
        self.zip_union(other, 0.0, 1.0, |a, b| a / b)
    }

    ///
    /// Euclidean length: the square root of the sum of squared weights.
    ///
    /// Weights are scaled by the largest magnitude before squaring, so very
    /// large weights do not overflow and very small ones do not vanish.
    ///
    pub fn length(&self) -> f64 {
        let max = self.values().map(f64::abs).fold(0.0, f64::max);
        if max == 0.0 {
            return 0.0;
        }
        max * fsum(self.values().map(|v| (v / max) * (v / max))).sqrt()
    }

    ///
    /// Scale the vector to unit length.
    ///
    /// # Errors
    /// `ZeroLength` for an empty or all-zero vector.
    ///
    pub fn normalized(&self) -> Result<Self> {
        let length = self.length();
        if length == 0.0 {
            log::debug!("Refusing to normalize a zero-length vector ({} keys)", self.len());
            return Err(WordVectorError::ZeroLength);
        }
        self.map(|v| v / length)
    }

    ///
    /// Dot product over the union of keys. Keys missing on either side
    /// contribute nothing.
    ///
    /// The result overflows to an infinity when the products exceed the `f64`
    /// range; it is never NaN. Use [`SparseVector::cosine_similarity`] for a
    /// bounded measure on large weights.
    ///
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (smaller, larger) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };

        let mut products: Vec<f64> = smaller
            .iter()
            .filter_map(|(key, v)| larger.get(key).map(|w| v * w))
            .collect();
        // fixed summation order, so a.dot(b) and b.dot(a) agree to the bit
        products.sort_by(|a, b| a.total_cmp(b));

        fsum(products)
    }

    ///
    /// Cosine of the angle between the two vectors, clamped to `[-1, 1]`.
    ///
    /// # Errors
    /// `ZeroLength` if either vector has zero length.
    ///
    pub fn cosine_similarity(&self, other: &SparseVector) -> Result<f64> {
        let lhs = self.normalized()?;
        let rhs = other.normalized()?;
        Ok(lhs.dot(&rhs).clamp(-1.0, 1.0))
    }

    ///
    /// Angle between the two vectors in radians, in `[0, pi]`.
    ///
    /// # Errors
    /// `ZeroLength` if either vector has zero length.
    ///
    pub fn angle(&self, other: &SparseVector) -> Result<f64> {
        Ok(self.cosine_similarity(other)?.acos())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl TryFrom<Value> for SparseVector {
    type Error = WordVectorError;

    fn try_from(value: Value) -> Result<Self> {
        SparseVector::from_json(&value)
    }
}

impl TryFrom<BTreeMap<String, f64>> for SparseVector {
    type Error = WordVectorError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self> {
        SparseVector::from_mapping(map)
    }
}

impl From<SparseVector> for BTreeMap<String, f64> {
    fn from(vector: SparseVector) -> Self {
        vector.weights.into_iter().collect()
    }
}
