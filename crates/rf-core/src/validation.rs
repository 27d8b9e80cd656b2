//! # Validator
//!
//! Stateless checks gating the publish action.
//! Emptiness is judged on the trimmed value, the length cap on the raw value,
//! so leading and trailing whitespace counts toward the cap.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const TITLE_MAX_LEN: usize = 100;
pub const CONTENT_MAX_LEN: usize = 200;

/// The two inputs of the publish form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Content,
}

impl Field {
    pub fn max_len(self) -> usize {
        match self {
            Field::Title => TITLE_MAX_LEN,
            Field::Content => CONTENT_MAX_LEN,
        }
    }

    /// Publish-time check for this field.
    pub fn validate(self, value: &str) -> Result<(), ValidationError> {
        validate_field(value, self.max_len())
    }

    /// Keystroke check for this field. See [`check_live`].
    pub fn check_live(self, value: &str) -> Option<ValidationError> {
        check_live(value, self.max_len())
    }

    /// Text shown under the input when `err` applies to it.
    pub fn warning(self, err: ValidationError) -> String {
        match (self, err) {
            (Field::Title, ValidationError::Empty) => "Title cannot be empty".to_string(),
            (Field::Content, ValidationError::Empty) => "Post cannot be empty".to_string(),
            (Field::Title, ValidationError::TooLong { max, .. }) => {
                format!("Title is longer than {max} characters")
            }
            (Field::Content, ValidationError::TooLong { max, .. }) => {
                format!("Post is longer than {max} characters")
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Title => "title",
            Field::Content => "content",
        })
    }
}

/// Length in characters, not bytes.
fn char_len(value: &str) -> usize {
    value.chars().count()
}

pub fn validate_field(value: &str, max_len: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    let len = char_len(value);
    if len > max_len {
        return Err(ValidationError::TooLong { max: max_len, len });
    }
    Ok(())
}

/// Only length is reported while typing; an empty field is not an error until publish.
pub fn check_live(value: &str, max_len: usize) -> Option<ValidationError> {
    let len = char_len(value);
    (len > max_len).then_some(ValidationError::TooLong { max: max_len, len })
}
