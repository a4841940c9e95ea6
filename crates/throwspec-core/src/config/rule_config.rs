//! Per-rule configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MARKER_NAME, DEFAULT_SEVERITY, DEFAULT_WRAPPER_NAME};

/// Configuration for all rules, keyed by rule.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RulesConfig {
    #[serde(rename = "throws-annotation")]
    pub throws_annotation: ThrowsAnnotationConfig,
}

/// Configuration for the `throws-annotation` rule.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ThrowsAnnotationConfig {
    /// Whether the rule runs. Default: true.
    pub enabled: Option<bool>,
    /// "error" | "warning" | "info" | "hint". Default: "warning".
    pub severity: Option<String>,
    /// Sentinel wrapper identifier. Default: `throws`.
    pub wrapper_name: Option<String>,
    /// Return-type marker identifier. Default: `Throws`.
    pub marker_name: Option<String>,
}

impl ThrowsAnnotationConfig {
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn effective_severity(&self) -> &str {
        self.severity.as_deref().unwrap_or(DEFAULT_SEVERITY)
    }

    pub fn effective_wrapper_name(&self) -> &str {
        self.wrapper_name.as_deref().unwrap_or(DEFAULT_WRAPPER_NAME)
    }

    pub fn effective_marker_name(&self) -> &str {
        self.marker_name.as_deref().unwrap_or(DEFAULT_MARKER_NAME)
    }
}
