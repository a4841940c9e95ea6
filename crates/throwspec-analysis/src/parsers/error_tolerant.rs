//! Error-tolerant parsing: locate ERROR and MISSING nodes in a tree.

use tree_sitter::Node;

use super::types::Range;

/// Count ERROR/MISSING nodes in a tree-sitter tree.
pub fn count_errors(root: Node) -> (u32, Vec<Range>) {
    let mut count = 0u32;
    let mut ranges = Vec::new();
    if !root.has_error() {
        return (count, ranges);
    }

    let mut stack = vec![root];
    let mut cursor = root.walk();
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            count += 1;
            ranges.push(Range::from_ts_node(&node));
        }
        if node.has_error() {
            stack.extend(node.children(&mut cursor));
        }
    }
    ranges.sort_by_key(|r| (r.start.line, r.start.column));
    (count, ranges)
}

/// Check if a node is inside an ERROR subtree.
pub fn is_in_error(node: &Node) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.is_error() {
            return true;
        }
        current = parent.parent();
    }
    false
}
