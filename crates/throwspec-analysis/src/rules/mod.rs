//! Rules engine: the rule trait, diagnostics, fix primitives, and suppression.

pub mod fixer;
pub mod suppression;
pub mod throws_annotation;
pub mod types;

pub use fixer::{apply_edits, RuleFixer, TextEdit};
pub use suppression::SuppressionChecker;
pub use types::*;

use throwspec_core::errors::LintError;

use crate::parsers::SourceFile;
use crate::program::TypeModel;

/// Everything a rule sees while checking one file.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    pub file: &'a SourceFile,
    pub model: &'a dyn TypeModel,
}

impl<'a> RuleContext<'a> {
    pub fn new(file: &'a SourceFile, model: &'a dyn TypeModel) -> Self {
        Self { file, model }
    }
}

/// A lint rule. Rules are read-only over the file and model.
pub trait Rule: Send + Sync {
    fn meta(&self) -> &RuleMeta;

    /// Check one file. Missing information is never an error; only broken
    /// fix ranges are.
    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Diagnostic>, LintError>;
}
