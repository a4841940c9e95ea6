//! Core types for the rules engine.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::fixer::{apply_edits, TextEdit};
use crate::parsers::{Range, Span};
use throwspec_core::errors::FixError;

/// Severity levels for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    /// Parse a configured severity name. Unknown names are `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "info" => Some(Self::Info),
            "hint" => Some(Self::Hint),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
            Self::Hint => write!(f, "hint"),
        }
    }
}

/// Stable message identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageId {
    #[serde(rename = "issue:missing-throws-annotation")]
    MissingThrowsAnnotation,
    #[serde(rename = "fix:infer-throws-annotation")]
    InferThrowsAnnotation,
}

impl MessageId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingThrowsAnnotation => "issue:missing-throws-annotation",
            Self::InferThrowsAnnotation => "fix:infer-throws-annotation",
        }
    }

    /// Human-readable message text.
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingThrowsAnnotation => {
                "Missing error annotation. For example: `throws<YourError>(fn)`."
            }
            Self::InferThrowsAnnotation => "Add error annotation. For example: `throws<YourError>(fn)`.",
        }
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of a rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleMeta {
    pub name: String,
    pub description: String,
    pub docs_url: String,
    /// Diagnostics carry suggestions; these are never auto-applied.
    pub has_suggestions: bool,
}

/// A user-confirmed fix: all edits apply together or not at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub message_id: MessageId,
    pub description: String,
    /// Ordered edits against the unmodified file text.
    pub edits: Vec<TextEdit>,
}

impl Suggestion {
    /// Apply this suggestion to `source`.
    pub fn apply(&self, source: &str) -> Result<String, FixError> {
        apply_edits(source, &self.edits)
    }
}

/// A single diagnostic produced by a rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub rule_id: String,
    pub message_id: MessageId,
    pub message: String,
    pub file: PathBuf,
    pub range: Range,
    pub span: Span,
    pub severity: Severity,
    pub suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    /// One-based line number, as shown to users.
    pub fn line(&self) -> u32 {
        self.range.start.line + 1
    }

    /// One-based column number, as shown to users.
    pub fn column(&self) -> u32 {
        self.range.start.column + 1
    }
}
