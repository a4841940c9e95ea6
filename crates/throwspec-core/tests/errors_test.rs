//! Tests for the throwspec error handling system.

use std::path::PathBuf;

use throwspec_core::errors::error_code::ThrowspecErrorCode;
use throwspec_core::errors::*;

#[test]
fn test_all_errors_have_error_code() {
    let parse = ParseError::UnsupportedLanguage {
        extension: "py".into(),
    };
    assert_eq!(parse.error_code(), "UNSUPPORTED_LANGUAGE");

    let config = ConfigError::FileNotFound {
        path: "/tmp/throwspec.toml".into(),
    };
    assert_eq!(config.error_code(), "CONFIG_ERROR");

    let fix = FixError::OutOfBounds {
        start: 4,
        end: 9,
        len: 5,
    };
    assert_eq!(fix.error_code(), "FIX_ERROR");

    let scan = ScanError::WalkError {
        root: PathBuf::from("/src"),
        message: "loop".into(),
    };
    assert_eq!(scan.error_code(), "SCAN_ERROR");
}

#[test]
fn test_from_conversions_keep_subsystem_code() {
    let lint: LintError = FixError::MalformedRange {
        offset: 3,
        message: "missing `(`".into(),
    }
    .into();
    assert!(matches!(lint, LintError::Fix(FixError::MalformedRange { .. })));
    assert_eq!(lint.error_code(), "FIX_ERROR");

    let lint: LintError = ParseError::TreeSitterError {
        path: PathBuf::from("a.ts"),
        message: "no tree".into(),
    }
    .into();
    assert_eq!(lint.error_code(), "PARSE_ERROR");

    let lint = LintError::UnknownFile {
        path: PathBuf::from("missing.ts"),
    };
    assert_eq!(lint.error_code(), "UNKNOWN_FILE");
}

#[test]
fn test_report_string_format() {
    let err = FixError::Overlapping {
        start: 2,
        end: 5,
        previous_end: 4,
    };
    let s = err.report_string();
    assert!(s.starts_with("[FIX_ERROR] "));
    assert!(s.contains("2..5"));
}
