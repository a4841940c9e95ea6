//! Linter: runs the configured rules over project files.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use throwspec_core::config::ThrowspecConfig;
use throwspec_core::errors::LintError;

use crate::parsers::SourceFile;
use crate::program::Project;
use crate::rules::throws_annotation::ThrowsAnnotationRule;
use crate::rules::{Diagnostic, Rule, RuleContext, SuppressionChecker};

/// Result of linting a project.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintReport {
    pub diagnostics: Vec<Diagnostic>,
    pub files_checked: usize,
    /// Diagnostics dropped by inline suppression comments.
    pub suppressed: usize,
    pub duration_ms: u64,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Owns the enabled rules.
pub struct Linter {
    rules: Vec<Box<dyn Rule>>,
}

impl Linter {
    /// Create a linter with every rule enabled in `config`.
    pub fn new(config: &ThrowspecConfig) -> Self {
        let mut rules: Vec<Box<dyn Rule>> = Vec::new();
        let throws_annotation = &config.rules.throws_annotation;
        if throws_annotation.effective_enabled() {
            rules.push(Box::new(ThrowsAnnotationRule::from_config(throws_annotation)));
        }
        Self { rules }
    }

    /// Create a linter with custom rules.
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.meta().name.as_str()).collect()
    }

    /// Lint one file of `project`, dropping suppressed diagnostics.
    pub fn lint_file(&self, project: &Project, path: &Path) -> Result<Vec<Diagnostic>, LintError> {
        let file = project.file(path).ok_or_else(|| LintError::UnknownFile {
            path: PathBuf::from(path),
        })?;
        let (diagnostics, _) = self.check_file(project, file)?;
        Ok(diagnostics)
    }

    /// Lint every file of `project`, in load order.
    pub fn lint_project(&self, project: &Project) -> Result<LintReport, LintError> {
        let start = Instant::now();
        let mut report = LintReport::default();

        for file in project.files() {
            let (diagnostics, suppressed) = self.check_file(project, file)?;
            report.diagnostics.extend(diagnostics);
            report.suppressed += suppressed;
            report.files_checked += 1;
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            files = report.files_checked,
            diagnostics = report.diagnostics.len(),
            suppressed = report.suppressed,
            duration_ms = report.duration_ms,
            "lint complete"
        );
        Ok(report)
    }

    fn check_file(&self, project: &Project, file: &SourceFile) -> Result<(Vec<Diagnostic>, usize), LintError> {
        let ctx = RuleContext::new(file, project);
        let suppression = SuppressionChecker::new(&file.text);
        let mut kept = Vec::new();
        let mut suppressed = 0;

        for rule in &self.rules {
            let name = rule.meta().name.as_str();
            for diagnostic in rule.check(&ctx)? {
                if suppression.is_suppressed(diagnostic.line(), name) {
                    suppressed += 1;
                } else {
                    kept.push(diagnostic);
                }
            }
        }

        Ok((kept, suppressed))
    }
}
