//! Text edit primitives and atomic application.

use serde::{Deserialize, Serialize};
use throwspec_core::errors::FixError;
use tree_sitter::Node;

use crate::parsers::Span;

/// Replace `range` of the base text with `text`. An empty range is an insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    pub range: Span,
    pub text: String,
}

impl TextEdit {
    pub fn new(range: Span, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }
}

/// Builds edits against node and byte ranges.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleFixer;

impl RuleFixer {
    pub fn new() -> Self {
        Self
    }

    pub fn replace_text_range(&self, range: Span, text: impl Into<String>) -> TextEdit {
        TextEdit::new(range, text)
    }

    pub fn insert_text_after(&self, node: &Node<'_>, text: impl Into<String>) -> TextEdit {
        TextEdit::new(Span::empty(node.end_byte()), text)
    }

    pub fn insert_text_before(&self, node: &Node<'_>, text: impl Into<String>) -> TextEdit {
        TextEdit::new(Span::empty(node.start_byte()), text)
    }

    pub fn insert_text_before_range(&self, range: Span, text: impl Into<String>) -> TextEdit {
        TextEdit::new(Span::empty(range.start), text)
    }
}

/// Apply `edits` to `base` in one step.
///
/// Edits are stably ordered by start offset, so insertions at the same point
/// keep their given order. Any invalid or overlapping range fails the whole
/// application.
pub fn apply_edits(base: &str, edits: &[TextEdit]) -> Result<String, FixError> {
    let mut ordered: Vec<&TextEdit> = edits.iter().collect();
    ordered.sort_by_key(|e| e.range.start);

    let mut output = String::with_capacity(base.len() + edits.iter().map(|e| e.text.len()).sum::<usize>());
    let mut cursor = 0;

    for edit in ordered {
        let Span { start, end } = edit.range;
        if start > end || end > base.len() {
            return Err(FixError::OutOfBounds {
                start,
                end,
                len: base.len(),
            });
        }
        if !base.is_char_boundary(start) || !base.is_char_boundary(end) {
            return Err(FixError::NotCharBoundary { start, end });
        }
        if start < cursor {
            return Err(FixError::Overlapping {
                start,
                end,
                previous_end: cursor,
            });
        }
        output.push_str(&base[cursor..start]);
        output.push_str(&edit.text);
        cursor = end;
    }

    output.push_str(&base[cursor..]);
    Ok(output)
}
