//! Error types for findkmer.
//!
//! This module provides exhaustive, strongly-typed errors for all operations
//! in the library. Every variant of [`FindKmerError`] is fatal for the run that
//! raised it; a Z-score that fails the normal-approximation check is not an
//! error and is represented by [`ZScore::NotApplicable`](crate::stats::ZScore).

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in findkmer operations.
#[derive(Debug, Error)]
pub enum FindKmerError {
    /// K-mer length is outside the valid range (1-20).
    #[error("invalid k-mer length {k}: must be between {min} and {max}")]
    InvalidKmerLength { k: i64, min: u8, max: u8 },

    /// The input stream was at end-of-file on the first read.
    #[error("sequence input '{source_name}' is empty")]
    EmptyInput { source_name: String },

    /// A trie node frequency counter would wrap.
    #[error("frequency counter overflow at depth {depth} for prefix '{prefix}'")]
    CounterOverflow { prefix: String, depth: usize },

    /// A k-mer references a base that never occurred in the base composition.
    #[error("base composition is degenerate: '{base}' has probability 0 but occurs in an observed k-mer")]
    DegenerateComposition { base: char },

    /// The trie would grow past its node budget.
    #[error("k-mer trie exceeded its node limit of {limit}")]
    NodeLimit { limit: usize },

    /// A base code outside 0..=3 was decoded.
    #[error("invalid base code {code}: must be between 0 and 3")]
    InvalidBaseCode { code: u8 },

    /// Failed to read the sequence input.
    #[error("failed to read sequence input '{path}': {source}")]
    SequenceRead {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Failed to create the output file.
    #[error("failed to open output file '{path}': {source}")]
    OutputOpen {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Failed to write output.
    #[error("failed to write output: {source}")]
    WriteError {
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize JSON output.
    #[error("failed to serialize JSON: {source}")]
    JsonError {
        #[source]
        source: serde_json::Error,
    },

    /// Invalid run configuration.
    #[error("invalid configuration: {details}")]
    Config { details: String },

    /// Failed to memory-map file.
    #[cfg(feature = "mmap")]
    #[error("failed to memory-map file '{path}': {source}")]
    MmapError {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
}

/// Error for invalid k-mer length.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("k-mer length {k} is out of range: must be between {min} and {max}")]
pub struct KmerLengthError {
    /// The invalid k value that was provided.
    pub k: i64,
    /// Minimum valid k-mer length.
    pub min: u8,
    /// Maximum valid k-mer length.
    pub max: u8,
}

/// Error for decoding a base code outside the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidBaseCodeError {
    /// The invalid code value.
    pub code: u8,
}

impl std::fmt::Display for InvalidBaseCodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid base code {} (expected 0..=3)", self.code)
    }
}

impl std::error::Error for InvalidBaseCodeError {}

impl From<std::io::Error> for FindKmerError {
    fn from(source: std::io::Error) -> Self {
        Self::WriteError { source }
    }
}

impl From<serde_json::Error> for FindKmerError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonError { source }
    }
}

impl From<KmerLengthError> for FindKmerError {
    fn from(err: KmerLengthError) -> Self {
        Self::InvalidKmerLength {
            k: err.k,
            min: err.min,
            max: err.max,
        }
    }
}

impl From<InvalidBaseCodeError> for FindKmerError {
    fn from(err: InvalidBaseCodeError) -> Self {
        Self::InvalidBaseCode { code: err.code }
    }
}

/// Errors that can occur when using the builder API.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// K-mer length was not set before calling an analysis method.
    #[error("k-mer length not set; call .k() first")]
    KmerLengthNotSet,

    /// Invalid k-mer length provided.
    #[error(transparent)]
    KmerLength(#[from] KmerLengthError),

    /// Error reading, analyzing or writing.
    #[error(transparent)]
    FindKmer(#[from] FindKmerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kmer_length_error_display() {
        let err = KmerLengthError {
            k: 50,
            min: 1,
            max: 20,
        };
        assert_eq!(
            err.to_string(),
            "k-mer length 50 is out of range: must be between 1 and 20"
        );
    }

    #[test]
    fn invalid_base_code_error_display() {
        let err = InvalidBaseCodeError { code: 7 };
        assert_eq!(err.to_string(), "invalid base code 7 (expected 0..=3)");
    }

    #[test]
    fn findkmer_error_from_kmer_length_error() {
        let err: FindKmerError = KmerLengthError {
            k: -2,
            min: 1,
            max: 20,
        }
        .into();
        assert!(matches!(err, FindKmerError::InvalidKmerLength { k: -2, .. }));
    }

    #[test]
    fn findkmer_error_from_invalid_base_code() {
        let err: FindKmerError = InvalidBaseCodeError { code: 4 }.into();
        assert!(matches!(err, FindKmerError::InvalidBaseCode { code: 4 }));
    }

    #[test]
    fn empty_input_display_names_source() {
        let err = FindKmerError::EmptyInput {
            source_name: "<stdin>".to_string(),
        };
        assert_eq!(err.to_string(), "sequence input '<stdin>' is empty");
    }
}
