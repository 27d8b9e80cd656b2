//! # AppError
//!
//! Centralized error handling for the rusty-feed crates.
//! Validation failures are user-correctable; everything else comes from storage.

use thiserror::Error;

use crate::validation::Field;

/// Why a single field was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Nothing left after trimming whitespace.
    #[error("field is empty")]
    Empty,

    /// Raw (untrimmed) length exceeds the field cap.
    #[error("field is {len} characters long, the limit is {max}")]
    TooLong { max: usize, len: usize },
}

/// The primary error type for all rf-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// A publish attempt was rejected by the validator.
    #[error("invalid {field}: {source}")]
    Validation {
        field: Field,
        #[source]
        source: ValidationError,
    },

    /// The persisted collection could not be parsed back into posts.
    #[error("stored posts are unreadable: {0}")]
    CorruptData(#[source] serde_json::Error),

    /// The key-value backend failed (e.g., disk full, permission denied).
    #[error("storage failure: {0}")]
    Storage(#[from] std::io::Error),
}

/// A specialized Result type for rusty-feed logic.
pub type Result<T> = std::result::Result<T, AppError>;
