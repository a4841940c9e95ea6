//! Shared constants for the throwspec lint engine.

/// throwspec version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Plugin namespace used in qualified rule ids (`throwspec/<rule>`).
pub const PLUGIN_NAME: &str = "throwspec";

/// Name of the annotation rule.
pub const THROWS_ANNOTATION_RULE: &str = "throws-annotation";

/// Default sentinel wrapper call: `throws<E>(f())`.
pub const DEFAULT_WRAPPER_NAME: &str = "throws";

/// Default throw-type marker in return types: `Throws<E>`.
pub const DEFAULT_MARKER_NAME: &str = "Throws";

/// Default severity for reported diagnostics.
pub const DEFAULT_SEVERITY: &str = "warning";

/// Default file extensions loaded into a project.
pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts"];

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "throwspec.toml";

/// Environment variable carrying the tracing filter.
pub const LOG_ENV_VAR: &str = "THROWSPEC_LOG";

/// Upper bound on declaration/alias hops during symbol resolution.
pub const MAX_RESOLUTION_DEPTH: usize = 16;

/// Documentation URL for a rule.
pub fn rule_docs_url(rule_name: &str) -> String {
    format!("https://github.com/oosawy/throwspec/blob/main/eslint/docs/rules/{rule_name}.md")
}

/// Plugin-qualified rule id, e.g. `throwspec/throws-annotation`.
pub fn qualified_rule_id(rule_name: &str) -> String {
    format!("{PLUGIN_NAME}/{rule_name}")
}
