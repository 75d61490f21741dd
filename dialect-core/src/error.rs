//! Error types for Dialect operations
//!
//! The store itself never errors: a mutation aimed at an id that does not
//! resolve is absorbed as a silent no-op, because the editor may dispatch a
//! stale edit after a concurrent delete. The taxonomy below covers the only
//! fallible surface, the corpus export boundary.

use thiserror::Error;

/// Corpus export errors.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Master error type for all Dialect errors.
#[derive(Debug, Error)]
pub enum DialectError {
    #[error("corpus error: {0}")]
    Corpus(#[from] CorpusError),
}

/// Result type alias for Dialect operations.
pub type DialectResult<T> = Result<T, DialectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_error_display() {
        let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CorpusError::Serialization(bad);
        assert!(format!("{}", err).contains("corpus serialization failed"));
    }

    #[test]
    fn test_dialect_error_from_corpus() {
        let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = DialectError::from(CorpusError::Serialization(bad));
        assert!(matches!(err, DialectError::Corpus(_)));
    }
}
