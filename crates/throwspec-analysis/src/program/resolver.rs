//! Static symbol resolution over parsed TypeScript snapshots.
//!
//! Lexical scopes are walked outward from the reference; imports are
//! followed through relative specifiers into the target module's exports.
//! Script files (no import/export) contribute globals.

use throwspec_core::constants::MAX_RESOLUTION_DEPTH;
use tree_sitter::Node;

use super::model::Declaration;
use super::module_paths::is_relative_specifier;
use super::project::Project;
use crate::parsers::syntax::{has_token, named_children, unquote};
use crate::parsers::SourceFile;

/// Declaration space a name is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Value,
    Type,
}

/// What a name is bound to inside one file.
#[derive(Debug, Clone)]
pub enum Binding<'t> {
    /// A declaration node in the same file.
    Local(Node<'t>),
    /// A named or default import.
    Import(ImportBinding<'t>),
    /// A parameter, `for (const x of ...)` or `catch (x)` binding. Its value
    /// is only known at run time.
    Parameter(Node<'t>),
}

#[derive(Debug, Clone)]
pub struct ImportBinding<'t> {
    pub statement: Node<'t>,
    pub local_name: String,
    /// Exported name in the source module; `default` for default imports.
    pub imported_name: String,
    pub specifier: String,
}

/// Find the binding for `name` visible at `at`, innermost scope first.
pub fn lookup_in_scope<'t>(
    file: &'t SourceFile,
    at: Node<'t>,
    name: &str,
    ns: Namespace,
) -> Option<Binding<'t>> {
    let mut current = Some(at);
    while let Some(node) = current {
        let found = match node.kind() {
            "program" | "statement_block" => scan_statements(file, node, name, ns),
            _ if ns == Namespace::Value => header_binding(file, node, name),
            _ => None,
        };
        if found.is_some() {
            return found;
        }
        current = node.parent();
    }
    None
}

/// Value bindings introduced by the head of a function, loop, or catch clause.
fn header_binding<'t>(file: &'t SourceFile, node: Node<'t>, name: &str) -> Option<Binding<'t>> {
    match node.kind() {
        "function_declaration"
        | "function_expression"
        | "function"
        | "generator_function_declaration"
        | "generator_function"
        | "arrow_function"
        | "method_definition" => {
            if let Some(param) = node.child_by_field_name("parameter") {
                return pattern_binds(file, param, name).then_some(Binding::Parameter(param));
            }
            let params = node.child_by_field_name("parameters")?;
            named_children(params)
                .into_iter()
                .find(|param| pattern_binds(file, *param, name))
                .map(Binding::Parameter)
        }
        "for_in_statement" => node
            .child_by_field_name("left")
            .filter(|left| pattern_binds(file, *left, name))
            .map(Binding::Parameter),
        "for_statement" => node
            .child_by_field_name("initializer")
            .and_then(|init| declared_binding(file, init, name, Namespace::Value))
            .map(Binding::Local),
        "catch_clause" => node
            .child_by_field_name("parameter")
            .filter(|param| pattern_binds(file, *param, name))
            .map(Binding::Parameter),
        _ => None,
    }
}

/// Whether binding pattern `pattern` introduces `name`.
fn pattern_binds(file: &SourceFile, pattern: Node<'_>, name: &str) -> bool {
    match pattern.kind() {
        "identifier" | "shorthand_property_identifier_pattern" => file.node_text(pattern) == name,
        "required_parameter" | "optional_parameter" => pattern
            .child_by_field_name("pattern")
            .is_some_and(|inner| pattern_binds(file, inner, name)),
        "assignment_pattern" | "object_assignment_pattern" => pattern
            .child_by_field_name("left")
            .is_some_and(|inner| pattern_binds(file, inner, name)),
        "pair_pattern" => pattern
            .child_by_field_name("value")
            .is_some_and(|inner| pattern_binds(file, inner, name)),
        "object_pattern" | "array_pattern" | "rest_pattern" => named_children(pattern)
            .into_iter()
            .any(|inner| pattern_binds(file, inner, name)),
        _ => false,
    }
}

/// Find a binding for `name` among the direct statements of `scope`.
pub fn scan_statements<'t>(
    file: &'t SourceFile,
    scope: Node<'t>,
    name: &str,
    ns: Namespace,
) -> Option<Binding<'t>> {
    for stmt in named_children(scope) {
        let found = match stmt.kind() {
            "import_statement" => import_binding(file, stmt, name).map(Binding::Import),
            "export_statement" => stmt
                .child_by_field_name("declaration")
                .and_then(|decl| declared_binding(file, decl, name, ns))
                .map(Binding::Local),
            _ => declared_binding(file, stmt, name, ns).map(Binding::Local),
        };
        if found.is_some() {
            return found;
        }
    }
    None
}

/// The node inside `decl` that declares `name`, if any.
fn declared_binding<'t>(
    file: &'t SourceFile,
    decl: Node<'t>,
    name: &str,
    ns: Namespace,
) -> Option<Node<'t>> {
    let named = |node: Node<'t>| {
        node.child_by_field_name("name")
            .is_some_and(|n| file.node_text(n) == name)
    };

    match decl.kind() {
        "function_declaration" | "generator_function_declaration" | "function_signature" => {
            (ns == Namespace::Value && named(decl)).then_some(decl)
        }
        "lexical_declaration" | "variable_declaration" => {
            if ns != Namespace::Value {
                return None;
            }
            named_children(decl).into_iter().find(|declarator| {
                declarator.kind() == "variable_declarator"
                    && declarator
                        .child_by_field_name("name")
                        .is_some_and(|n| n.kind() == "identifier" && file.node_text(n) == name)
            })
        }
        "class_declaration" | "abstract_class_declaration" | "enum_declaration" => {
            named(decl).then_some(decl)
        }
        "interface_declaration" | "type_alias_declaration" => {
            (ns == Namespace::Type && named(decl)).then_some(decl)
        }
        "ambient_declaration" => named_children(decl)
            .into_iter()
            .find_map(|inner| declared_binding(file, inner, name, ns)),
        _ => None,
    }
}

/// The import binding introducing local `name` in `stmt`, if any.
fn import_binding<'t>(file: &'t SourceFile, stmt: Node<'t>, name: &str) -> Option<ImportBinding<'t>> {
    let specifier = stmt
        .child_by_field_name("source")
        .and_then(|s| unquote(file.node_text(s)))
        .map(|(_, inner)| inner.to_string())?;
    let clause = named_children(stmt)
        .into_iter()
        .find(|c| c.kind() == "import_clause")?;

    for part in named_children(clause) {
        match part.kind() {
            "identifier" if file.node_text(part) == name => {
                return Some(ImportBinding {
                    statement: stmt,
                    local_name: name.to_string(),
                    imported_name: "default".to_string(),
                    specifier,
                });
            }
            "named_imports" => {
                for spec in named_children(part) {
                    if spec.kind() != "import_specifier" {
                        continue;
                    }
                    let Some(imported) = spec.child_by_field_name("name") else {
                        continue;
                    };
                    let local = spec.child_by_field_name("alias").unwrap_or(imported);
                    if file.node_text(local) == name {
                        return Some(ImportBinding {
                            statement: stmt,
                            local_name: name.to_string(),
                            imported_name: file.node_text(imported).to_string(),
                            specifier,
                        });
                    }
                }
            }
            _ => {}
        }
    }
    None
}

/// Cross-file resolver backed by a `Project`.
pub struct Resolver<'a> {
    project: &'a Project,
}

impl<'a> Resolver<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    /// Resolve a value identifier to the declaration it ultimately names.
    pub fn resolve_identifier(&self, file: &'a SourceFile, identifier: Node<'a>) -> Option<Declaration<'a>> {
        let name = file.node_text(identifier);
        self.resolve_name(file, identifier, name, Namespace::Value, 0)
    }

    fn resolve_name(
        &self,
        file: &'a SourceFile,
        at: Node<'a>,
        name: &str,
        ns: Namespace,
        depth: usize,
    ) -> Option<Declaration<'a>> {
        if depth > MAX_RESOLUTION_DEPTH {
            tracing::trace!(name, "resolution depth exceeded");
            return None;
        }
        match lookup_in_scope(file, at, name, ns) {
            Some(binding) => self.resolve_binding(file, binding, ns, depth),
            None => self.lookup_global(file, name, ns, depth),
        }
    }

    fn resolve_binding(
        &self,
        file: &'a SourceFile,
        binding: Binding<'a>,
        ns: Namespace,
        depth: usize,
    ) -> Option<Declaration<'a>> {
        match binding {
            Binding::Local(node) => self.follow_local(file, node, ns, depth),
            Binding::Import(import) => {
                self.resolve_import(file, &import.specifier, &import.imported_name, ns, depth + 1)
            }
            Binding::Parameter(node) => {
                tracing::trace!(line = node.start_position().row + 1, "name bound at run time");
                None
            }
        }
    }

    /// `const g = f` resolves to `f`'s declaration.
    fn follow_local(
        &self,
        file: &'a SourceFile,
        node: Node<'a>,
        ns: Namespace,
        depth: usize,
    ) -> Option<Declaration<'a>> {
        if ns == Namespace::Value && node.kind() == "variable_declarator" {
            if let Some(value) = node.child_by_field_name("value") {
                if value.kind() == "identifier" {
                    return self.resolve_name(file, value, file.node_text(value), ns, depth + 1);
                }
            }
        }
        Some(Declaration::new(file, node))
    }

    fn resolve_import(
        &self,
        from: &'a SourceFile,
        specifier: &str,
        imported_name: &str,
        ns: Namespace,
        depth: usize,
    ) -> Option<Declaration<'a>> {
        if !is_relative_specifier(specifier) {
            tracing::trace!(specifier, "package import is outside the project");
            return None;
        }
        let target = self.project.resolve_module(from.path(), specifier)?;
        self.find_export(target, imported_name, ns, depth)
    }

    fn find_export(
        &self,
        file: &'a SourceFile,
        exported: &str,
        ns: Namespace,
        depth: usize,
    ) -> Option<Declaration<'a>> {
        if depth > MAX_RESOLUTION_DEPTH {
            return None;
        }
        let mut star_sources = Vec::new();

        for stmt in file.statements() {
            if stmt.kind() != "export_statement" {
                continue;
            }
            let is_default = has_token(stmt, "default");

            if let Some(decl) = stmt.child_by_field_name("declaration") {
                if is_default {
                    if exported == "default" {
                        return Some(Declaration::new(file, decl));
                    }
                } else if let Some(node) = declared_binding(file, decl, exported, ns) {
                    return self.follow_local(file, node, ns, depth);
                }
                continue;
            }

            if is_default {
                if exported == "default" {
                    let value = stmt.child_by_field_name("value")?;
                    if value.kind() == "identifier" {
                        return self.resolve_name(file, value, file.node_text(value), ns, depth + 1);
                    }
                    return Some(Declaration::new(file, value));
                }
                continue;
            }

            let source = stmt
                .child_by_field_name("source")
                .and_then(|s| unquote(file.node_text(s)))
                .map(|(_, inner)| inner);
            let clause = named_children(stmt)
                .into_iter()
                .find(|c| c.kind() == "export_clause");

            match (clause, source) {
                (Some(clause), source) => {
                    for spec in named_children(clause) {
                        if spec.kind() != "export_specifier" {
                            continue;
                        }
                        let Some(local) = spec.child_by_field_name("name") else {
                            continue;
                        };
                        let public = spec.child_by_field_name("alias").unwrap_or(local);
                        if file.node_text(public) != exported {
                            continue;
                        }
                        let local_name = file.node_text(local);
                        return match source {
                            Some(source) => self.resolve_import(file, source, local_name, ns, depth + 1),
                            None => self.resolve_name(file, file.root(), local_name, ns, depth + 1),
                        };
                    }
                }
                (None, Some(source)) if has_token(stmt, "*") => {
                    let is_namespace_export = named_children(stmt)
                        .iter()
                        .any(|c| c.kind() == "namespace_export");
                    if !is_namespace_export {
                        star_sources.push(source);
                    }
                }
                _ => {}
            }
        }

        if exported == "default" {
            return None;
        }
        star_sources
            .into_iter()
            .find_map(|source| self.resolve_import(file, source, exported, ns, depth + 1))
    }

    /// Declarations in script files are global.
    fn lookup_global(
        &self,
        file: &'a SourceFile,
        name: &str,
        ns: Namespace,
        depth: usize,
    ) -> Option<Declaration<'a>> {
        self.project
            .files()
            .filter(|other| other.path() != file.path() && !other.is_module())
            .find_map(|other| match scan_statements(other, other.root(), name, ns) {
                Some(Binding::Local(node)) => self.follow_local(other, node, ns, depth + 1),
                _ => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::parsers::syntax::first_named_child;

    /// Resolve the callee of the call in the last top-level statement of `path`.
    fn resolve_last_call<'p>(project: &'p Project, path: &str) -> Option<Declaration<'p>> {
        let file = project.file(Path::new(path))?;
        let stmt = *file.statements().last()?;
        let call = first_named_child(stmt)?;
        let callee = call.child_by_field_name("function")?;
        Resolver::new(project).resolve_identifier(file, callee)
    }

    #[test]
    fn test_inner_scope_shadows_outer() {
        let source = "function fn() {}\nfunction outer() {\n  const fn = () => 1;\n  fn();\n}\nfn();";
        let project = Project::from_sources([("/p/a.ts", source)]).unwrap();
        let decl = resolve_last_call(&project, "/p/a.ts").unwrap();
        assert_eq!(decl.kind(), "function_declaration");

        let file = project.file(Path::new("/p/a.ts")).unwrap();
        let body = file.statements()[1].child_by_field_name("body").unwrap();
        let inner_stmt = *named_children(body).last().unwrap();
        let callee = first_named_child(inner_stmt)
            .and_then(|call| call.child_by_field_name("function"))
            .unwrap();
        let inner = Resolver::new(&project).resolve_identifier(file, callee).unwrap();
        assert_eq!(inner.kind(), "variable_declarator");
    }

    /// Resolve the callee of the first `throws(...)` argument call in `source`.
    fn resolve_wrapped(source: &str) -> Option<String> {
        let project = Project::from_sources([("/p/a.ts", source)]).unwrap();
        let file = project.file(Path::new("/p/a.ts")).unwrap();
        let start = file.text.find("throws(")? + "throws(".len();
        let callee = file
            .root()
            .descendant_for_byte_range(start, start + 1)
            .filter(|n| n.kind() == "identifier")?;
        Resolver::new(&project)
            .resolve_identifier(file, callee)
            .map(|decl| decl.kind().to_string())
    }

    #[test]
    fn test_header_bindings_shadow_outer_declarations() {
        let decl = "function fn(): Throws<E> {}\n";
        let shadowed = [
            "function run(fn: () => number) { return throws(fn()); }",
            "const run = (fn) => throws(fn());",
            "const run = fn => { throws(fn()); };",
            "function run({ fn }: Deps) { throws(fn()); }",
            "function run(fn = other) { throws(fn()); }",
            "for (const fn of list) { throws(fn()); }",
            "for (const [fn] of pairs) throws(fn());",
            "try {} catch (fn) { throws(fn()); }",
        ];
        for shape in shadowed {
            assert_eq!(resolve_wrapped(&format!("{decl}{shape}")), None, "{shape}");
        }
    }

    #[test]
    fn test_unrelated_header_bindings_do_not_shadow() {
        let decl = "function fn(): Throws<E> {}\n";
        let visible = [
            "function run(other: number) { return throws(fn()); }",
            "function run({ key: other }: Deps) { throws(fn()); }",
            "function run(other = fn) { throws(fn()); }",
            "for (const item of list) { throws(fn()); }",
            "try {} catch (err) { throws(fn()); }",
        ];
        for shape in visible {
            assert_eq!(
                resolve_wrapped(&format!("{decl}{shape}")).as_deref(),
                Some("function_declaration"),
                "{shape}"
            );
        }
    }

    #[test]
    fn test_for_loop_initializer_is_a_declaration() {
        let source = "function fn(): Throws<E> {}\nfor (let fn = make(); ; ) { throws(fn()); }";
        assert_eq!(resolve_wrapped(source).as_deref(), Some("variable_declarator"));
    }

    #[test]
    fn test_type_and_value_namespaces_are_separate() {
        let source = "interface Fn {}\nfn();";
        let project = Project::from_sources([("/p/a.ts", source)]).unwrap();
        let file = project.file(Path::new("/p/a.ts")).unwrap();
        assert!(lookup_in_scope(file, file.root(), "Fn", Namespace::Type).is_some());
        assert!(lookup_in_scope(file, file.root(), "Fn", Namespace::Value).is_none());
    }

    #[test]
    fn test_import_cycle_terminates() {
        let project = Project::from_sources([
            ("/p/a.ts", "export { x } from './b';"),
            ("/p/b.ts", "export { x } from './a';"),
            ("/p/main.ts", "import { x } from './a';\nx();"),
        ])
        .unwrap();
        assert!(resolve_last_call(&project, "/p/main.ts").is_none());
    }

    #[test]
    fn test_js_extension_specifier_resolves_to_ts() {
        let project = Project::from_sources([
            ("/p/lib.ts", "export function run() {}"),
            ("/p/main.ts", "import { run } from './lib.js';\nrun();"),
        ])
        .unwrap();
        let decl = resolve_last_call(&project, "/p/main.ts").unwrap();
        assert_eq!(decl.source_file().path(), Path::new("/p/lib.ts"));
    }

    #[test]
    fn test_package_import_is_unresolved() {
        let project = Project::from_sources([("/p/main.ts", "import { run } from 'pkg';\nrun();")]).unwrap();
        assert!(resolve_last_call(&project, "/p/main.ts").is_none());
    }
}
