//! `throws-annotation`: every `throws(f())` must carry the error type that
//! `f` declares through its `Throws<E>` return-type marker.

pub mod extractor;
pub mod fixes;
pub mod imports;
pub mod matcher;

use throwspec_core::config::ThrowsAnnotationConfig;
use throwspec_core::constants::{
    qualified_rule_id, rule_docs_url, DEFAULT_MARKER_NAME, DEFAULT_WRAPPER_NAME, THROWS_ANNOTATION_RULE,
};
use throwspec_core::errors::LintError;
use tree_sitter::Node;

use self::fixes::build_fix;
use self::imports::plan_imports;
use self::matcher::{CallMatch, CallSiteMatcher, MissingAnnotation};
use super::types::{Diagnostic, MessageId, RuleMeta, Severity, Suggestion};
use super::{Rule, RuleContext};
use crate::parsers::error_tolerant::is_in_error;
use crate::parsers::{Range, Span};

pub struct ThrowsAnnotationRule {
    meta: RuleMeta,
    wrapper_name: String,
    marker_name: String,
    severity: Severity,
}

impl Default for ThrowsAnnotationRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ThrowsAnnotationRule {
    pub fn new() -> Self {
        Self::with_names(DEFAULT_WRAPPER_NAME, DEFAULT_MARKER_NAME)
    }

    pub fn with_names(wrapper_name: &str, marker_name: &str) -> Self {
        Self {
            meta: RuleMeta {
                name: THROWS_ANNOTATION_RULE.to_string(),
                description: format!(
                    "Checks for missing error annotation for `{wrapper_name}<YourError>(fn)`."
                ),
                docs_url: rule_docs_url(THROWS_ANNOTATION_RULE),
                has_suggestions: true,
            },
            wrapper_name: wrapper_name.to_string(),
            marker_name: marker_name.to_string(),
            severity: Severity::Warning,
        }
    }

    /// Build from validated rule configuration.
    pub fn from_config(config: &ThrowsAnnotationConfig) -> Self {
        let mut rule = Self::with_names(config.effective_wrapper_name(), config.effective_marker_name());
        rule.severity = Severity::parse(config.effective_severity()).unwrap_or(Severity::Warning);
        rule
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    fn report(&self, ctx: &RuleContext<'_>, missing: &MissingAnnotation<'_>) -> Result<Diagnostic, LintError> {
        let origin = missing.declaration.source_file();
        let plan = plan_imports(origin, ctx.file, &missing.type_text);

        let edits = build_fix(
            ctx.file,
            missing.call,
            &self.wrapper_name,
            &plan.inline_text,
            plan.import_text().as_deref(),
        )?;

        Ok(Diagnostic {
            rule_id: qualified_rule_id(THROWS_ANNOTATION_RULE),
            message_id: MessageId::MissingThrowsAnnotation,
            message: MessageId::MissingThrowsAnnotation.message().to_string(),
            file: ctx.file.path().to_path_buf(),
            range: Range::from_ts_node(&missing.call),
            span: Span::from_ts_node(&missing.call),
            severity: self.severity,
            suggestions: vec![Suggestion {
                message_id: MessageId::InferThrowsAnnotation,
                description: MessageId::InferThrowsAnnotation.message().to_string(),
                edits,
            }],
        })
    }
}

impl Rule for ThrowsAnnotationRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Diagnostic>, LintError> {
        let matcher = CallSiteMatcher::new(&self.wrapper_name, &self.marker_name);
        let mut diagnostics = Vec::new();

        for call in call_expressions(ctx.file.root()) {
            if is_in_error(&call) {
                continue;
            }
            match matcher.match_call(ctx, call) {
                CallMatch::Missing(missing) => {
                    tracing::debug!(
                        path = %ctx.file.path().display(),
                        line = call.start_position().row + 1,
                        callee = ctx.file.node_text(missing.wrapped_callee),
                        error_type = %missing.type_text,
                        "missing throws annotation"
                    );
                    diagnostics.push(self.report(ctx, &missing)?);
                }
                CallMatch::Valid => {}
                CallMatch::NotApplicable(reason) => {
                    tracing::trace!(
                        line = call.start_position().row + 1,
                        ?reason,
                        "call skipped"
                    );
                }
            }
        }

        Ok(diagnostics)
    }
}

/// All `call_expression` nodes in document order.
fn call_expressions(root: Node<'_>) -> Vec<Node<'_>> {
    let mut calls = Vec::new();
    let mut stack = vec![root];
    let mut cursor = root.walk();
    while let Some(node) = stack.pop() {
        if node.kind() == "call_expression" {
            calls.push(node);
        }
        let mut children: Vec<_> = node.named_children(&mut cursor).collect();
        children.reverse();
        stack.extend(children);
    }
    calls
}
