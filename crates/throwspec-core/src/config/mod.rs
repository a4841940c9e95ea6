//! Configuration system for throwspec.
//! TOML-based, layered resolution: overrides > env > project > defaults.

pub mod rule_config;
pub mod scan_config;
pub mod throwspec_config;

pub use rule_config::{RulesConfig, ThrowsAnnotationConfig};
pub use scan_config::ScanConfig;
pub use throwspec_config::{ConfigOverrides, ThrowspecConfig};
