//! # wordvec-core
//!
//! Sparse, named-dimension word vectors and the algebra over them.
//!
//! ## Purpose
//!
//! A [`SparseVector`] maps string keys ("words") to numeric weights, with
//! missing keys reading as zero. Vectors are built from explicit key/value data
//! or from raw text, then filtered, aligned and compared. The typical use is
//! measuring how similar two text corpora (or any two sparse frequency
//! distributions) are.
//!
//! ## Main Components
//!
//! - **`SparseVector`**: the vector type with construction, filtering,
//!   alignment, elementwise arithmetic and geometry
//! - **`Vectorizer`**: configurable text -> vector pipeline (stop words,
//!   frequency threshold, key normalization)
//! - **`text`**: tokenization and key normalization helpers
//!
//! ## Example
//!
//! ```rust
//! use wordvec_core::{SparseVector, DEFAULT_STOP_WORDS};
//!
//! let a = SparseVector::from_text("The quick brown fox", DEFAULT_STOP_WORDS).unwrap();
//! let b = SparseVector::from_text("A quick brown dog", DEFAULT_STOP_WORDS).unwrap();
//!
//! let (a, b) = SparseVector::comparable_pair(&a, &b);
//! let angle = a.angle(&b).unwrap();
//! assert!(angle > 0.0 && angle < std::f64::consts::FRAC_PI_2);
//! ```
//!
pub mod config;
pub mod error;
pub mod sparse_vector;
pub mod text;
pub mod utils;
pub mod vectorizer;

// re-export things
pub use config::*;
pub use error::*;
pub use sparse_vector::*;
pub use text::*;
pub use utils::stop_words::DEFAULT_STOP_WORDS;
pub use vectorizer::*;
