//! Error types for linkbio core operations.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by identifier allocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Every candidate drawn within the attempt bound was already taken.
    #[error("could not allocate identifier after {attempts} attempts")]
    IdentifierSpaceExhausted {
        /// Number of candidates that were tried.
        attempts: usize,
    },

    /// An identifier alphabet was rejected at construction.
    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),
}
