//! Fix construction and application errors.
//!
//! These indicate a broken source range from the syntax layer, never a
//! legitimate source shape, so they abort the current file.

use super::error_code::{self, ThrowspecErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum FixError {
    #[error("Edit range {start}..{end} is out of bounds for text of length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("Edit range {start}..{end} does not fall on character boundaries")]
    NotCharBoundary { start: usize, end: usize },

    #[error("Edit range {start}..{end} overlaps a previous edit ending at {previous_end}")]
    Overlapping {
        start: usize,
        end: usize,
        previous_end: usize,
    },

    #[error("Malformed call range at byte {offset}: {message}")]
    MalformedRange { offset: usize, message: String },
}

impl ThrowspecErrorCode for FixError {
    fn error_code(&self) -> &'static str {
        error_code::FIX_ERROR
    }
}
