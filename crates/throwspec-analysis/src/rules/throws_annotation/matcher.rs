//! Call-site eligibility: is this a `throws(f())` call lacking an annotation?

use tree_sitter::Node;

use super::extractor::extract_throw_type;
use crate::parsers::syntax::{first_named_child, is_type_reference, union_members};
use crate::program::Declaration;
use crate::rules::RuleContext;

/// Why a call expression was not reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Callee is not the wrapper identifier.
    NotWrapperCall,
    /// First argument is not a call with a plain identifier callee.
    NotWrappedCall,
    /// Explicit union annotation with non-reference members.
    DeferredUnion,
    /// The wrapped callee resolves to no declaration.
    UnresolvedCallee,
    /// The wrapped function declares no throw marker.
    NoThrowMarker,
}

/// A wrapper call that needs an inferred annotation.
#[derive(Debug)]
pub struct MissingAnnotation<'a> {
    pub call: Node<'a>,
    pub wrapped_callee: Node<'a>,
    pub declaration: Declaration<'a>,
    /// Marker payload in the declaration's file.
    pub throw_type: Node<'a>,
    /// Canonical text of `throw_type`.
    pub type_text: String,
}

#[derive(Debug)]
pub enum CallMatch<'a> {
    NotApplicable(SkipReason),
    Valid,
    Missing(MissingAnnotation<'a>),
}

pub struct CallSiteMatcher<'r> {
    pub wrapper_name: &'r str,
    pub marker_name: &'r str,
}

impl<'r> CallSiteMatcher<'r> {
    pub fn new(wrapper_name: &'r str, marker_name: &'r str) -> Self {
        Self {
            wrapper_name,
            marker_name,
        }
    }

    pub fn match_call<'a>(&self, ctx: &RuleContext<'a>, call: Node<'a>) -> CallMatch<'a> {
        let file = ctx.file;

        let is_wrapper = call
            .child_by_field_name("function")
            .is_some_and(|callee| callee.kind() == "identifier" && file.node_text(callee) == self.wrapper_name);
        if !is_wrapper {
            return CallMatch::NotApplicable(SkipReason::NotWrapperCall);
        }

        let Some(wrapped_callee) = wrapped_callee(call) else {
            return CallMatch::NotApplicable(SkipReason::NotWrappedCall);
        };

        let explicit = call.child_by_field_name("type_arguments").and_then(first_named_child);
        if let Some(first) = explicit {
            if is_type_reference(&first) {
                return CallMatch::Valid;
            }
            if first.kind() == "union_type" {
                return if union_members(first).iter().all(is_type_reference) {
                    CallMatch::Valid
                } else {
                    CallMatch::NotApplicable(SkipReason::DeferredUnion)
                };
            }
        }

        let Some(declaration) = ctx
            .model
            .resolve_symbol(file, wrapped_callee)
            .and_then(|symbol| symbol.first_declaration())
        else {
            return CallMatch::NotApplicable(SkipReason::UnresolvedCallee);
        };

        let Some(throw_type) = extract_throw_type(&declaration, self.marker_name) else {
            return CallMatch::NotApplicable(SkipReason::NoThrowMarker);
        };

        let type_text = ctx.model.type_to_string(declaration.source_file(), throw_type);

        // A non-reference annotation that already prints as the inferred type
        // is what the fix would produce.
        if let Some(first) = explicit {
            if ctx.model.type_to_string(file, first) == type_text {
                return CallMatch::Valid;
            }
        }

        CallMatch::Missing(MissingAnnotation {
            call,
            wrapped_callee,
            declaration,
            throw_type,
            type_text,
        })
    }
}

/// Callee identifier of the call passed as the wrapper's first argument.
fn wrapped_callee(call: Node<'_>) -> Option<Node<'_>> {
    let arguments = call.child_by_field_name("arguments")?;
    if arguments.kind() != "arguments" {
        return None;
    }
    let inner = first_named_child(arguments)?;
    if inner.kind() != "call_expression" {
        return None;
    }
    inner
        .child_by_field_name("function")
        .filter(|callee| callee.kind() == "identifier")
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::program::Project;

    /// Match the last statement's expression in a one-file project.
    fn outcome(source: &str) -> Result<String, SkipReason> {
        let project = Project::from_sources([("/p/a.ts", source)]).unwrap();
        let file = project.file(Path::new("/p/a.ts")).unwrap();
        let call = first_named_child(*file.statements().last().unwrap()).unwrap();
        let ctx = RuleContext::new(file, &project);
        match CallSiteMatcher::new("throws", "Throws").match_call(&ctx, call) {
            CallMatch::NotApplicable(reason) => Err(reason),
            CallMatch::Valid => Ok("valid".to_string()),
            CallMatch::Missing(missing) => Ok(missing.type_text),
        }
    }

    const DECL: &str = "function fn(): Throws<Error> {}\n";

    #[test]
    fn test_filters_in_order() {
        assert_eq!(outcome(&format!("{DECL}other(fn())")), Err(SkipReason::NotWrapperCall));
        assert_eq!(outcome(&format!("{DECL}throws(fn)")), Err(SkipReason::NotWrappedCall));
        assert_eq!(outcome(&format!("{DECL}throws()")), Err(SkipReason::NotWrappedCall));
        assert_eq!(outcome(&format!("{DECL}throws<A | string>(fn())")), Err(SkipReason::DeferredUnion));
        assert_eq!(outcome(&format!("{DECL}throws(nope())")), Err(SkipReason::UnresolvedCallee));
        assert_eq!(
            outcome("function fn(): number {}\nthrows(fn())"),
            Err(SkipReason::NoThrowMarker)
        );
    }

    #[test]
    fn test_valid_and_missing() {
        assert_eq!(outcome(&format!("{DECL}throws<Error>(fn())")).unwrap(), "valid");
        assert_eq!(outcome(&format!("{DECL}throws<A | B>(fn())")).unwrap(), "valid");
        assert_eq!(outcome(&format!("{DECL}throws(fn())")).unwrap(), "Error");
    }

    #[test]
    fn test_shadowing_parameter_is_unresolved() {
        let source = format!("{DECL}const run = (fn: () => number) => throws(fn());");
        let project = Project::from_sources([("/p/a.ts", source.as_str())]).unwrap();
        let file = project.file(Path::new("/p/a.ts")).unwrap();
        let at = file.text.rfind("throws(").unwrap();
        let call = file
            .root()
            .descendant_for_byte_range(at, at + "throws".len())
            .and_then(|ident| ident.parent())
            .unwrap();
        let ctx = RuleContext::new(file, &project);
        assert!(matches!(
            CallSiteMatcher::new("throws", "Throws").match_call(&ctx, call),
            CallMatch::NotApplicable(SkipReason::UnresolvedCallee)
        ));
    }

    #[test]
    fn test_unresolved_callee_comes_before_marker_check() {
        assert_eq!(outcome("throws<unknown>(fn())"), Err(SkipReason::UnresolvedCallee));
    }
}
