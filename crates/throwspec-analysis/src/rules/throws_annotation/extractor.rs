//! Declared throw type: the payload of the `Throws<E>` return-type marker.
//!
//! Purely syntactic. The resolved type is printed later by the model.

use smallvec::SmallVec;
use tree_sitter::Node;

use crate::parsers::syntax::{annotated_type, first_named_child, is_type_reference, union_members};
use crate::parsers::SourceFile;
use crate::program::Declaration;

/// Shape of a declared return type.
#[derive(Debug)]
pub enum ReturnTypeShape<'t> {
    /// `Foo`, `ns.Foo`, `Foo<T>`.
    Reference(Node<'t>),
    /// `A | B | ...`, flattened.
    Union(SmallVec<[Node<'t>; 4]>),
    Other,
}

impl<'t> ReturnTypeShape<'t> {
    pub fn of(type_node: Node<'t>) -> Self {
        if type_node.kind() == "union_type" {
            Self::Union(union_members(type_node))
        } else if is_type_reference(&type_node) {
            Self::Reference(type_node)
        } else {
            Self::Other
        }
    }
}

/// The callable a declaration stands for, if it is function-like.
fn function_node<'t>(decl: Node<'t>) -> Option<Node<'t>> {
    match decl.kind() {
        "function_declaration"
        | "generator_function_declaration"
        | "function_signature"
        | "function_expression"
        | "function"
        | "generator_function"
        | "arrow_function" => Some(decl),
        "variable_declarator" => decl.child_by_field_name("value").filter(|value| {
            matches!(
                value.kind(),
                "function_expression" | "function" | "generator_function" | "arrow_function"
            )
        }),
        _ => None,
    }
}

/// Declared return type syntax of a function-like declaration.
pub fn declared_return_type<'t>(decl: Node<'t>) -> Option<Node<'t>> {
    let func = function_node(decl)?;
    annotated_type(func.child_by_field_name("return_type")?)
}

/// Type argument of the throw marker in `decl`'s declared return type.
pub fn extract_throw_type<'t>(decl: &Declaration<'t>, marker_name: &str) -> Option<Node<'t>> {
    let file = decl.source_file();
    let return_type = declared_return_type(decl.node)?;

    match ReturnTypeShape::of(return_type) {
        ReturnTypeShape::Reference(reference) => {
            if names_marker(file, reference, marker_name) {
                marker_payload(reference)
            } else {
                None
            }
        }
        ReturnTypeShape::Union(members) => {
            let mut markers = members
                .iter()
                .copied()
                .filter(|m| names_marker(file, *m, marker_name));
            let first = markers.next()?;
            let extra = markers.count();
            if extra > 0 {
                tracing::debug!(
                    path = %file.path().display(),
                    line = return_type.start_position().row + 1,
                    markers = extra + 1,
                    "return type has more than one throw marker, using the first"
                );
            }
            marker_payload(first)
        }
        ReturnTypeShape::Other => None,
    }
}

/// `Throws` or `Throws<...>`, named by a plain identifier.
fn names_marker(file: &SourceFile, node: Node<'_>, marker_name: &str) -> bool {
    let name = match node.kind() {
        "type_identifier" => Some(node),
        "generic_type" => node.child_by_field_name("name"),
        _ => None,
    };
    name.is_some_and(|n| n.kind() == "type_identifier" && file.node_text(n) == marker_name)
}

fn marker_payload(marker: Node<'_>) -> Option<Node<'_>> {
    if marker.kind() != "generic_type" {
        return None;
    }
    first_named_child(marker.child_by_field_name("type_arguments")?)
}
