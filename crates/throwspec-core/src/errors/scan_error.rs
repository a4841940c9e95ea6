//! Project loading errors.

use std::path::PathBuf;

use super::error_code::{self, ThrowspecErrorCode};

/// Errors that can occur while loading project files from disk.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("IO error scanning {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Walk error under {root}: {message}")]
    WalkError { root: PathBuf, message: String },
}

impl ThrowspecErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        error_code::SCAN_ERROR
    }
}
