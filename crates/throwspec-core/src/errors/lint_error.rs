//! Top-level lint errors.

use std::path::PathBuf;

use super::error_code::{self, ThrowspecErrorCode};
use super::{ConfigError, FixError, ParseError, ScanError};

/// Errors that can abort a lint run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Fix error: {0}")]
    Fix(#[from] FixError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("File is not part of the project: {path}")]
    UnknownFile { path: PathBuf },
}

impl ThrowspecErrorCode for LintError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(e) => e.error_code(),
            Self::Scan(e) => e.error_code(),
            Self::Fix(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::UnknownFile { .. } => error_code::UNKNOWN_FILE,
        }
    }
}
