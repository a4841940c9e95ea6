//! Import lookup, retargeting, and placement for the error type.

use std::path::Path;

use tree_sitter::Node;

use crate::parsers::syntax::{named_children, unquote};
use crate::parsers::{SourceFile, Span};
use crate::program::module_paths::{retarget_specifier, specifier_for_file};
use crate::program::resolver::{scan_statements, Binding, Namespace};
use crate::rules::fixer::{RuleFixer, TextEdit};

/// First top-level import in `file` with a named binding whose exported
/// name (not its local alias) is `name`.
pub fn find_import_for<'t>(file: &'t SourceFile, name: &str) -> Option<Node<'t>> {
    named_import(file, name).map(|(stmt, _)| stmt)
}

/// Local name under which `file` imports the export `name`, if it does.
pub fn imported_local_name<'t>(file: &'t SourceFile, name: &str) -> Option<&'t str> {
    let (_, spec) = named_import(file, name)?;
    let local = spec.child_by_field_name("alias").or_else(|| spec.child_by_field_name("name"))?;
    Some(file.node_text(local))
}

/// First top-level import statement and its `import_specifier` importing `name`.
fn named_import<'t>(file: &'t SourceFile, name: &str) -> Option<(Node<'t>, Node<'t>)> {
    file.statements()
        .into_iter()
        .filter(|stmt| stmt.kind() == "import_statement")
        .find_map(|stmt| {
            named_children(stmt)
                .into_iter()
                .filter(|c| c.kind() == "import_clause")
                .flat_map(named_children)
                .filter(|c| c.kind() == "named_imports")
                .flat_map(named_children)
                .filter(|spec| spec.kind() == "import_specifier")
                .find(|spec| {
                    spec.child_by_field_name("name")
                        .is_some_and(|imported| file.node_text(imported) == name)
                })
                .map(|spec| (stmt, spec))
        })
}

/// Render import `stmt` of `from` so that it is valid when written in
/// `to_file`. Only the module specifier changes.
pub fn retarget_import(from: &SourceFile, stmt: Node<'_>, to_file: &Path) -> Option<String> {
    let source = stmt.child_by_field_name("source")?;
    let (quote, specifier) = unquote(from.node_text(source))?;
    let retargeted = retarget_specifier(specifier, from.path(), to_file);

    let text = from.node_text(stmt);
    let head = text.get(..source.start_byte() - stmt.start_byte())?;
    let tail = text.get(source.end_byte() - stmt.start_byte()..)?;
    Some(format!("{head}{quote}{retargeted}{quote}{tail}"))
}

/// Whether `name` is already bound at the top level of `file`.
pub fn is_visible(file: &SourceFile, name: &str) -> bool {
    scan_statements(file, file.root(), name, Namespace::Type).is_some()
        || scan_statements(file, file.root(), name, Namespace::Value).is_some()
}

/// Whether `file` declares `name` as a type at its top level and exports it.
pub fn exports_type(file: &SourceFile, name: &str) -> bool {
    let Some(Binding::Local(decl)) = scan_statements(file, file.root(), name, Namespace::Type) else {
        return false;
    };
    let mut current = decl.parent();
    while let Some(node) = current {
        if node.kind() == "export_statement" {
            return true;
        }
        current = node.parent();
    }
    file.statements()
        .into_iter()
        .filter(|stmt| stmt.kind() == "export_statement" && stmt.child_by_field_name("source").is_none())
        .flat_map(named_children)
        .filter(|c| c.kind() == "export_clause")
        .flat_map(named_children)
        .filter(|spec| spec.kind() == "export_specifier")
        .any(|spec| {
            let local = spec.child_by_field_name("name");
            let public = spec.child_by_field_name("alias").or(local);
            local.is_some_and(|l| file.node_text(l) == name)
                && public.is_some_and(|p| file.node_text(p) == name)
        })
}

/// Imports to add to a call-site file, and the error type text as written there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportPlan {
    /// Import statements to insert, deduplicated, in first-use order.
    pub imports: Vec<String>,
    /// The type text with each name replaced by its local binding in the target.
    pub inline_text: String,
}

impl ImportPlan {
    /// All imports as one insertion, one statement per line.
    pub fn import_text(&self) -> Option<String> {
        (!self.imports.is_empty()).then(|| self.imports.join("\n"))
    }
}

/// Plan the imports `target` needs so that `type_text`, printed from
/// `origin` (the file declaring the wrapped function), is in scope.
/// Every top-level name in the type text is planned on its own.
pub fn plan_imports(origin: &SourceFile, target: &SourceFile, type_text: &str) -> ImportPlan {
    let mut imports: Vec<String> = Vec::new();
    let inline_text = map_type_names(type_text, |name| {
        let (import, local) = plan_name(origin, target, name);
        if let Some(import) = import {
            if !imports.contains(&import) {
                imports.push(import);
            }
        }
        local
    });
    ImportPlan { imports, inline_text }
}

/// Import needed for one exported name, and the name to write at the call site.
fn plan_name(origin: &SourceFile, target: &SourceFile, name: &str) -> (Option<String>, String) {
    if is_visible(target, name) {
        return (None, name.to_string());
    }
    if let Some(local) = imported_local_name(target, name) {
        return (None, local.to_string());
    }
    if let Some((stmt, spec)) = named_import(origin, name) {
        let local = spec
            .child_by_field_name("alias")
            .map_or(name, |alias| origin.node_text(alias));
        return (retarget_import(origin, stmt, target.path()), local.to_string());
    }
    if origin.path() != target.path() && exports_type(origin, name) {
        let specifier = specifier_for_file(origin.path(), target.path());
        return (Some(format!("import {{ {name} }} from \"{specifier}\";")), name.to_string());
    }
    (None, name.to_string())
}

/// Rewrite every leading identifier of a printed type through `rename`.
/// Members after a `.` and string literal contents are copied as is.
fn map_type_names(type_text: &str, mut rename: impl FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(type_text.len());
    let mut rest = type_text;
    let mut after_dot = false;

    while let Some(c) = rest.chars().next() {
        if c == '\'' || c == '"' || c == '`' {
            let end = rest[1..].find(c).map_or(rest.len(), |i| i + 2);
            out.push_str(&rest[..end]);
            rest = &rest[end..];
            after_dot = false;
        } else if is_ident_start(c) {
            let end = rest.find(|ch: char| !is_ident_part(ch)).unwrap_or(rest.len());
            let ident = &rest[..end];
            if after_dot {
                out.push_str(ident);
            } else {
                out.push_str(&rename(ident));
            }
            rest = &rest[end..];
            after_dot = false;
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
            after_dot = c == '.';
        }
    }
    out
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Edit inserting `import_text` into `target`: after the last top-level
/// import, else before the first statement, else at the start of the file.
pub fn import_insertion(target: &SourceFile, import_text: &str) -> TextEdit {
    let fixer = RuleFixer::new();
    let statements = target.statements();

    if let Some(last_import) = statements.iter().rev().find(|s| s.kind() == "import_statement") {
        return fixer.insert_text_after(last_import, format!("\n{import_text}"));
    }
    match statements.first() {
        Some(first) => fixer.insert_text_before(first, format!("{import_text}\n")),
        None => {
            let start = target.root().start_byte();
            fixer.insert_text_before_range(Span::empty(start), format!("{import_text}\n"))
        }
    }
}
