//! Error types for index construction, persistence, and queries

use thiserror::Error;

/// Errors surfaced by the indexing core
#[derive(Debug, Error)]
pub enum KwicError {
    #[error("Invalid window width {0}: width must be odd and at least 1")]
    InvalidWidth(usize),

    #[error("Query width {requested} does not match index width {indexed}")]
    WidthMismatch { requested: usize, indexed: usize },

    #[error("Failed to deserialize index: {0}")]
    Deserialization(String),

    #[error("Invalid vocabulary entry on line {line}: {reason}")]
    InvalidVocabulary { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<bincode::Error> for KwicError {
    fn from(err: bincode::Error) -> Self {
        KwicError::Deserialization(err.to_string())
    }
}

pub type KwicResult<T> = std::result::Result<T, KwicError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_mismatch_message() {
        let err = KwicError::WidthMismatch {
            requested: 5,
            indexed: 7,
        };
        assert_eq!(
            err.to_string(),
            "Query width 5 does not match index width 7"
        );
    }

    #[test]
    fn test_bincode_error_maps_to_deserialization() {
        let err: bincode::Error = Box::new(bincode::ErrorKind::SizeLimit);
        let kwic: KwicError = err.into();
        assert!(matches!(kwic, KwicError::Deserialization(_)));
    }
}
