//! throwspec-analysis: lint engine for the `Throws<E>` / `throws<E>(f())` convention
//!
//! - Parsers: tree-sitter TypeScript parsing into immutable source snapshots
//! - Program: the type-model seam (`TypeModel`) and its tree-sitter backed `Project`
//! - Rules: the `throws-annotation` rule, fix primitives, inline suppression
//! - Linter: runs configured rules over project files
//! - Reporters: console and JSON output

pub mod linter;
pub mod parsers;
pub mod program;
pub mod reporters;
pub mod rules;

pub use linter::{LintReport, Linter};
pub use parsers::{SourceFile, TypeScriptParser};
pub use program::{Declaration, Project, Symbol, TypeModel};
pub use rules::throws_annotation::ThrowsAnnotationRule;
pub use rules::{Diagnostic, Rule, RuleContext, Severity, Suggestion, TextEdit};
