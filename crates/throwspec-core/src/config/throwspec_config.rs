//! Top-level throwspec configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{RulesConfig, ScanConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

const KNOWN_SEVERITIES: &[&str] = &["error", "warning", "info", "hint"];

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`THROWSPEC_*`)
/// 3. Project config (`throwspec.toml` in the project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ThrowspecConfig {
    pub scan: ScanConfig,
    pub rules: RulesConfig,
}

/// Override arguments that can be applied on top of a loaded config.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub severity: Option<String>,
    pub wrapper_name: Option<String>,
    pub marker_name: Option<String>,
    pub extensions: Vec<String>,
}

impl ThrowspecConfig {
    /// Load configuration for the project rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
            tracing::debug!(path = %project_config_path.display(), "loaded project config");
        }

        Self::apply_env_overrides(&mut config);

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &ThrowspecConfig) -> Result<(), ConfigError> {
        let rule = &config.rules.throws_annotation;
        if !KNOWN_SEVERITIES.contains(&rule.effective_severity()) {
            return Err(ConfigError::ValidationFailed {
                field: "rules.throws-annotation.severity".to_string(),
                message: format!("must be one of {}", KNOWN_SEVERITIES.join(", ")),
            });
        }
        if !is_identifier(rule.effective_wrapper_name()) {
            return Err(ConfigError::ValidationFailed {
                field: "rules.throws-annotation.wrapper_name".to_string(),
                message: "must be a valid identifier".to_string(),
            });
        }
        if !is_identifier(rule.effective_marker_name()) {
            return Err(ConfigError::ValidationFailed {
                field: "rules.throws-annotation.marker_name".to_string(),
                message: "must be a valid identifier".to_string(),
            });
        }
        if config.scan.effective_extensions().iter().any(|e| e.is_empty()) {
            return Err(ConfigError::ValidationFailed {
                field: "scan.extensions".to_string(),
                message: "extensions must be non-empty".to_string(),
            });
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are ignored.
    fn merge_toml_file(config: &mut ThrowspecConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: ThrowspecConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut ThrowspecConfig, other: &ThrowspecConfig) {
        if !other.scan.extensions.is_empty() {
            base.scan.extensions = other.scan.extensions.clone();
        }
        if !other.scan.extra_ignore.is_empty() {
            base.scan.extra_ignore = other.scan.extra_ignore.clone();
        }
        if other.scan.follow_symlinks.is_some() {
            base.scan.follow_symlinks = other.scan.follow_symlinks;
        }

        let (base_rule, other_rule) = (
            &mut base.rules.throws_annotation,
            &other.rules.throws_annotation,
        );
        if other_rule.enabled.is_some() {
            base_rule.enabled = other_rule.enabled;
        }
        if other_rule.severity.is_some() {
            base_rule.severity = other_rule.severity.clone();
        }
        if other_rule.wrapper_name.is_some() {
            base_rule.wrapper_name = other_rule.wrapper_name.clone();
        }
        if other_rule.marker_name.is_some() {
            base_rule.marker_name = other_rule.marker_name.clone();
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(config: &mut ThrowspecConfig) {
        let rule = &mut config.rules.throws_annotation;
        if let Ok(val) = std::env::var("THROWSPEC_RULE_SEVERITY") {
            rule.severity = Some(val);
        }
        if let Ok(val) = std::env::var("THROWSPEC_WRAPPER_NAME") {
            rule.wrapper_name = Some(val);
        }
        if let Ok(val) = std::env::var("THROWSPEC_MARKER_NAME") {
            rule.marker_name = Some(val);
        }
    }

    /// Apply explicit overrides (highest priority).
    fn apply_overrides(config: &mut ThrowspecConfig, overrides: &ConfigOverrides) {
        let rule = &mut config.rules.throws_annotation;
        if let Some(ref v) = overrides.severity {
            rule.severity = Some(v.clone());
        }
        if let Some(ref v) = overrides.wrapper_name {
            rule.wrapper_name = Some(v.clone());
        }
        if let Some(ref v) = overrides.marker_name {
            rule.marker_name = Some(v.clone());
        }
        if !overrides.extensions.is_empty() {
            config.scan.extensions = overrides.extensions.clone();
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
