//! throwspec-core: shared foundations for the throwspec lint engine
//!
//! - Errors: one `thiserror` enum per subsystem, each with a stable code
//! - Config: TOML-based, layered resolution (overrides > env > project > defaults)
//! - Tracing: `THROWSPEC_LOG`-driven subscriber setup
//! - Constants: rule names, sentinel identifiers, documentation URLs

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;

pub use config::{ConfigOverrides, RulesConfig, ScanConfig, ThrowsAnnotationConfig, ThrowspecConfig};
pub use errors::{ConfigError, FixError, LintError, ParseError, ScanError, ThrowspecErrorCode};
