use thiserror::Error;

use super::config::ConfigError;

/// The three ways a vector operation can violate its contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A non-mapping input, or a non-numeric value headed for a vector slot.
    TypeMismatch,
    /// An operation that needs identical key sets got two different ones.
    NotComparable,
    /// A geometric operation outside its mathematical domain.
    Domain,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WordVectorError {
    #[error("vector must be built from a mapping of keys to numbers, got {0}")]
    NotAMapping(String),
    #[error("cannot store non-numerical value for `{key}`: {value}")]
    NonNumeric { key: String, value: String },
    #[error("Vectors are not comparable.")]
    NotComparable,
    #[error("Vector has zero length and cannot be normalized")]
    ZeroLength,
    #[error("Division by zero at key `{key}`")]
    DivisionByZero { key: String },
}

impl WordVectorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WordVectorError::NotAMapping(_) | WordVectorError::NonNumeric { .. } => {
                ErrorKind::TypeMismatch
            }
            WordVectorError::NotComparable => ErrorKind::NotComparable,
            WordVectorError::ZeroLength | WordVectorError::DivisionByZero { .. } => {
                ErrorKind::Domain
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, WordVectorError>;

#[derive(Error, Debug)]
pub enum VectorizerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Vector(#[from] WordVectorError),
    #[error("Document is empty, nothing to vectorize: {0}")]
    EmptyDocument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(WordVectorError::NotAMapping("array".to_string()), ErrorKind::TypeMismatch)]
    #[case(
        WordVectorError::NonNumeric { key: "hello".to_string(), value: "NaN".to_string() },
        ErrorKind::TypeMismatch
    )]
    #[case(WordVectorError::NotComparable, ErrorKind::NotComparable)]
    #[case(WordVectorError::ZeroLength, ErrorKind::Domain)]
    #[case(WordVectorError::DivisionByZero { key: "dave".to_string() }, ErrorKind::Domain)]
    fn test_error_kinds(#[case] err: WordVectorError, #[case] kind: ErrorKind) {
        assert_eq!(err.kind(), kind);
    }

    #[rstest]
    fn test_non_numeric_message_names_the_key() {
        let err = WordVectorError::NonNumeric {
            key: "world".to_string(),
            value: "inf".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot store non-numerical value for `world`: inf"
        );
    }
}
