//! Canonical type text.
//!
//! Unions and intersections are flattened, generic arguments are
//! re-joined with `, `, and whitespace inside other shapes is collapsed.
//! Local non-generic aliases print as their target; names bound by an
//! aliased import print under their exported name.

use throwspec_core::constants::MAX_RESOLUTION_DEPTH;
use tree_sitter::Node;

use super::resolver::{lookup_in_scope, Binding, Namespace};
use crate::parsers::syntax::{first_named_child, intersection_members, named_children, union_members};
use crate::parsers::SourceFile;

#[derive(Debug, Default, Clone, Copy)]
pub struct TypePrinter;

impl TypePrinter {
    pub fn new() -> Self {
        Self
    }

    pub fn print(&self, file: &SourceFile, node: Node<'_>) -> String {
        self.print_at(file, node, 0)
    }

    fn print_at(&self, file: &SourceFile, node: Node<'_>, depth: usize) -> String {
        match node.kind() {
            "type_identifier" => self.print_type_name(file, node, depth),
            "union_type" => self.join(file, &union_members(node), " | ", depth),
            "intersection_type" => self.join(file, &intersection_members(node), " & ", depth),
            "generic_type" => {
                let name = node
                    .child_by_field_name("name")
                    .map(|n| self.print_reference_name(file, n))
                    .unwrap_or_default();
                let args = node
                    .child_by_field_name("type_arguments")
                    .map(|a| self.join(file, &named_children(a), ", ", depth))
                    .unwrap_or_default();
                format!("{name}<{args}>")
            }
            "array_type" => match first_named_child(node) {
                Some(element) => format!("{}[]", self.print_at(file, element, depth)),
                None => collapse_whitespace(file.node_text(node)),
            },
            "parenthesized_type" => match first_named_child(node) {
                Some(inner) => format!("({})", self.print_at(file, inner, depth)),
                None => collapse_whitespace(file.node_text(node)),
            },
            "nested_type_identifier" => file.node_text(node).split_whitespace().collect(),
            _ => collapse_whitespace(file.node_text(node)),
        }
    }

    fn join(&self, file: &SourceFile, nodes: &[Node<'_>], separator: &str, depth: usize) -> String {
        nodes
            .iter()
            .map(|n| self.print_at(file, *n, depth))
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn print_type_name(&self, file: &SourceFile, node: Node<'_>, depth: usize) -> String {
        let name = file.node_text(node);
        if depth >= MAX_RESOLUTION_DEPTH {
            return name.to_string();
        }
        match lookup_in_scope(file, node, name, Namespace::Type) {
            Some(Binding::Local(decl))
                if decl.kind() == "type_alias_declaration"
                    && decl.child_by_field_name("type_parameters").is_none() =>
            {
                match decl.child_by_field_name("value") {
                    Some(value) => self.print_at(file, value, depth + 1),
                    None => name.to_string(),
                }
            }
            Some(Binding::Import(import)) if import.imported_name != "default" => import.imported_name,
            _ => name.to_string(),
        }
    }

    /// Generic heads are never de-aliased, only import-renamed.
    fn print_reference_name(&self, file: &SourceFile, node: Node<'_>) -> String {
        if node.kind() != "type_identifier" {
            return file.node_text(node).split_whitespace().collect();
        }
        let name = file.node_text(node);
        match lookup_in_scope(file, node, name, Namespace::Type) {
            Some(Binding::Import(import)) if import.imported_name != "default" => import.imported_name,
            _ => name.to_string(),
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
