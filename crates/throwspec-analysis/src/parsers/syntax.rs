//! Small helpers over tree-sitter TypeScript nodes.

use smallvec::SmallVec;
use tree_sitter::Node;

/// Kinds that count as a direct type reference (`Foo`, `ns.Foo`, `Foo<T>`).
const TYPE_REFERENCE_KINDS: &[&str] = &["type_identifier", "nested_type_identifier", "generic_type"];

pub fn is_comment(node: &Node) -> bool {
    matches!(node.kind(), "comment" | "hash_bang_line")
}

/// Named children with comments filtered out.
pub fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !is_comment(child))
        .collect()
}

/// First named, non-comment child.
pub fn first_named_child<'t>(node: Node<'t>) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let first = node
        .named_children(&mut cursor)
        .find(|child| !is_comment(child));
    first
}

/// Whether `node` has an unnamed token child with exactly this kind
/// (e.g. the `default` in `export default`).
pub fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}

pub fn is_type_reference(node: &Node) -> bool {
    TYPE_REFERENCE_KINDS.contains(&node.kind())
}

/// Flatten a (left-nested) `union_type` into its members in written order.
pub fn union_members<'t>(node: Node<'t>) -> SmallVec<[Node<'t>; 4]> {
    flatten(node, "union_type")
}

/// Flatten a (left-nested) `intersection_type` into its members in written order.
pub fn intersection_members<'t>(node: Node<'t>) -> SmallVec<[Node<'t>; 4]> {
    flatten(node, "intersection_type")
}

fn flatten<'t>(node: Node<'t>, kind: &str) -> SmallVec<[Node<'t>; 4]> {
    let mut members = SmallVec::new();
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        if current.kind() == kind {
            let mut children = named_children(current);
            children.reverse();
            stack.extend(children);
        } else {
            members.push(current);
        }
    }
    members
}

/// The type inside a `type_annotation` (`: T`), if `annotation` is one.
pub fn annotated_type<'t>(annotation: Node<'t>) -> Option<Node<'t>> {
    if annotation.kind() != "type_annotation" {
        return None;
    }
    first_named_child(annotation)
}

/// Split a string literal's source text into its quote character and contents.
pub fn unquote(literal: &str) -> Option<(char, &str)> {
    let quote = literal.chars().next()?;
    if !matches!(quote, '"' | '\'' | '`') || literal.len() < 2 || !literal.ends_with(quote) {
        return None;
    }
    Some((quote, &literal[1..literal.len() - 1]))
}
