//! ThrowspecErrorCode trait for structured error reporting.

/// Every error enum implements this to provide a stable, machine-readable
/// code string alongside its display message.
pub trait ThrowspecErrorCode {
    /// Returns the error code string (e.g., "PARSE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted report string: `[ERROR_CODE] message`.
    fn report_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const UNSUPPORTED_LANGUAGE: &str = "UNSUPPORTED_LANGUAGE";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const FIX_ERROR: &str = "FIX_ERROR";
pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const UNKNOWN_FILE: &str = "UNKNOWN_FILE";
