//! Fix synthesis: the inline `throws<E>(` rewrite plus an optional import.

use throwspec_core::errors::FixError;
use tree_sitter::Node;

use super::imports::import_insertion;
use crate::parsers::{SourceFile, Span};
use crate::rules::fixer::{RuleFixer, TextEdit};

/// Edits for one suggestion. The import insertion, when present, comes first.
pub fn build_fix(
    file: &SourceFile,
    call: Node<'_>,
    wrapper_name: &str,
    type_text: &str,
    import_text: Option<&str>,
) -> Result<Vec<TextEdit>, FixError> {
    let region = annotation_region(file, call)?;
    let fixer = RuleFixer::new();

    let mut edits = Vec::with_capacity(2);
    if let Some(import_text) = import_text {
        edits.push(import_insertion(file, import_text));
    }
    let chain = if is_optional_call(call) { "?." } else { "" };
    edits.push(fixer.replace_text_range(region, format!("{wrapper_name}{chain}<{type_text}>(")));
    Ok(edits)
}

/// `throws?.(f())`: the `?.` sits inside the replaced region.
fn is_optional_call(call: Node<'_>) -> bool {
    let mut cursor = call.walk();
    let found = call.children(&mut cursor).any(|c| c.kind() == "optional_chain");
    found
}

/// From the start of the call through the `(` opening its argument list.
fn annotation_region(file: &SourceFile, call: Node<'_>) -> Result<Span, FixError> {
    let arguments = call
        .child_by_field_name("arguments")
        .ok_or_else(|| FixError::MalformedRange {
            offset: call.start_byte(),
            message: "call has no argument list".to_string(),
        })?;

    let open = arguments.start_byte();
    if !file.node_text(arguments).starts_with('(') || open < call.start_byte() {
        return Err(FixError::MalformedRange {
            offset: open,
            message: "argument list does not open with `(`".to_string(),
        });
    }
    Ok(Span::new(call.start_byte(), open + 1))
}
