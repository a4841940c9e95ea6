//! End-to-end behaviour of the `throws-annotation` rule over in-memory projects.

use std::path::Path;

use throwspec_analysis::rules::MessageId;
use throwspec_analysis::{Diagnostic, Project, Rule, RuleContext, ThrowsAnnotationRule};

fn lint(project: &Project, path: &str) -> Vec<Diagnostic> {
    let file = project.file(Path::new(path)).expect("file is loaded");
    ThrowsAnnotationRule::new()
        .check(&RuleContext::new(file, project))
        .expect("rule runs")
}

fn lint_source(source: &str) -> Vec<Diagnostic> {
    let project = Project::from_sources([("/proj/a.ts", source)]).unwrap();
    lint(&project, "/proj/a.ts")
}

fn apply_only_fix(source: &str, diagnostics: &[Diagnostic]) -> String {
    assert_eq!(diagnostics.len(), 1, "expected exactly one diagnostic");
    assert_eq!(diagnostics[0].suggestions.len(), 1, "expected exactly one suggestion");
    diagnostics[0].suggestions[0].apply(source).unwrap()
}

// ─── Literal scenarios ──────────────────────────────────────────────────

#[test]
fn global_error_type_needs_no_import() {
    let source = "function fn(): Throws<Error> {}; throws(fn())";
    let diagnostics = lint_source(source);
    assert_eq!(diagnostics[0].message_id, MessageId::MissingThrowsAnnotation);
    assert_eq!(
        diagnostics[0].suggestions[0].message_id,
        MessageId::InferThrowsAnnotation
    );
    assert_eq!(diagnostics[0].suggestions[0].edits.len(), 1);
    assert_eq!(
        apply_only_fix(source, &diagnostics),
        "function fn(): Throws<Error> {}; throws<Error>(fn())"
    );
}

#[test]
fn already_annotated_call_is_valid() {
    assert!(lint_source("function fn(): Throws<Error> {}; throws<Error>(fn())").is_empty());
}

#[test]
fn imported_error_type_is_imported_at_call_site() {
    let main = "throws(fn());\n";
    let project = Project::from_sources([
        ("/proj/errors.ts", "export class FooError extends Error {}"),
        (
            "/proj/lib/index.ts",
            "import {FooError} from \"../errors\"; export function fn(): Throws<FooError> {}",
        ),
        ("/proj/src/app/main.ts", "import { fn } from '../../lib';\nthrows(fn());\n"),
        ("/proj/src/app/bare.ts", main),
    ])
    .unwrap();

    let diagnostics = lint(&project, "/proj/src/app/main.ts");
    let edits = &diagnostics[0].suggestions[0].edits;
    assert_eq!(edits.len(), 2);
    assert!(edits[0].range.start < edits[1].range.start);
    assert_eq!(edits[0].text, "\nimport {FooError} from \"../../errors\";");
    assert_eq!(edits[1].text, "throws<FooError>(");

    // `fn` is not in scope in bare.ts, so nothing can be proven there.
    assert!(lint(&project, "/proj/src/app/bare.ts").is_empty());
}

// ─── Properties ─────────────────────────────────────────────────────────

#[test]
fn fix_leaves_inner_call_and_surroundings_untouched() {
    let source = "const before = 1;\nconst x = throws(  fn(a, \"b\", () => c) ) + 2; // trailing\n";
    let decl = "function fn(a: unknown, b: string, c: () => void): void | Throws<RangeError> {}\n";
    let full = format!("{decl}{source}");
    let fixed = apply_only_fix(&full, &lint_source(&full));
    assert_eq!(
        fixed,
        format!(
            "{decl}const before = 1;\nconst x = throws<RangeError>(  fn(a, \"b\", () => c) ) + 2; // trailing\n"
        )
    );
}

#[test]
fn applying_the_fix_is_idempotent() {
    let sources = [
        "function fn(): Throws<Error> {}\nthrows(fn());",
        "type E = A | B;\nfunction fn(): Throws<E> {}\nthrows(fn());",
        "function fn(): Throws<string> {}\nthrows<unknown>(fn());",
        "const fn = (): Throws<E[]> => { throw 1; };\nlet r = throws(fn());",
    ];
    for source in sources {
        let fixed = apply_only_fix(source, &lint_source(source));
        assert!(lint_source(&fixed).is_empty(), "fix not idempotent for {source:?}: {fixed:?}");
    }
}

#[test]
fn union_annotations_are_never_reported() {
    let source = concat!(
        "function fn(): Throws<Error> {}\n",
        "throws<A | B>(fn());\n",
        "throws<A | string>(fn());\n",
    );
    assert!(lint_source(source).is_empty());
}

#[test]
fn inapplicable_call_shapes_are_silent() {
    let source = concat!(
        "function fn(): Throws<Error> {}\n",
        "function quiet(): string { return ''; }\n",
        "throws(fn);\n",
        "throws(() => fn());\n",
        "throws(this.fn());\n",
        "throws(quiet());\n",
        "throws(missing());\n",
        "throws(new Thing());\n",
    );
    assert!(lint_source(source).is_empty());
}

#[test]
fn package_import_specifier_is_copied_unchanged() {
    let project = Project::from_sources([
        (
            "/proj/lib/http.ts",
            "import { HttpError } from '@acme/errors';\nexport function get(): Throws<HttpError> {}",
        ),
        (
            "/proj/deep/nested/dir/call.ts",
            "import { get } from '../../../lib/http';\n\nthrows(get());",
        ),
    ])
    .unwrap();
    let diagnostics = lint(&project, "/proj/deep/nested/dir/call.ts");
    assert_eq!(
        diagnostics[0].suggestions[0].edits[0].text,
        "\nimport { HttpError } from '@acme/errors';"
    );
}

#[test]
fn aliased_error_import_keeps_its_alias() {
    let project = Project::from_sources([
        (
            "/proj/lib.ts",
            "import { FooError as FE } from './errors';\nexport function fn(): Throws<FE> {}",
        ),
        ("/proj/main.ts", "import { fn } from './lib';\nthrows(fn());"),
    ])
    .unwrap();
    let diagnostics = lint(&project, "/proj/main.ts");
    let edits = &diagnostics[0].suggestions[0].edits;
    assert_eq!(edits[0].text, "\nimport { FooError as FE } from './errors';");
    assert_eq!(edits[1].text, "throws<FE>(");
}

#[test]
fn call_site_alias_for_error_type_is_reused() {
    let project = Project::from_sources([
        (
            "/proj/lib.ts",
            "import { FooError } from './errors';\nexport function fn(): Throws<FooError> {}",
        ),
        (
            "/proj/main.ts",
            "import { FooError as Failure } from './errors';\nimport { fn } from './lib';\nthrows(fn());",
        ),
    ])
    .unwrap();
    let diagnostics = lint(&project, "/proj/main.ts");
    let edits = &diagnostics[0].suggestions[0].edits;
    assert_eq!(edits.len(), 1);
    assert_eq!(edits[0].text, "throws<Failure>(");
}

#[test]
fn locally_exported_error_type_is_imported() {
    let project = Project::from_sources([
        (
            "/proj/lib/errors.ts",
            "export class ParseError extends Error {}\nexport function parse(): Throws<ParseError> {}",
        ),
        ("/proj/src/main.ts", "// entry\nimport { parse } from '../lib/errors';\nthrows(parse());"),
    ])
    .unwrap();
    let diagnostics = lint(&project, "/proj/src/main.ts");
    assert_eq!(
        diagnostics[0].suggestions[0].edits[0].text,
        "\nimport { ParseError } from \"../lib/errors\";"
    );
}

#[test]
fn error_type_already_in_scope_adds_no_import() {
    let project = Project::from_sources([
        ("/proj/errors.ts", "export class FooError extends Error {}"),
        (
            "/proj/lib.ts",
            "import { FooError } from './errors';\nexport function fn(): Throws<FooError> {}",
        ),
        (
            "/proj/main.ts",
            "import { FooError } from './errors';\nimport { fn } from './lib';\nthrows(fn());",
        ),
    ])
    .unwrap();
    let diagnostics = lint(&project, "/proj/main.ts");
    assert_eq!(diagnostics[0].suggestions[0].edits.len(), 1);
}

#[test]
fn re_exports_and_default_exports_resolve() {
    let project = Project::from_sources([
        ("/proj/impl.ts", "export default function load(): Throws<LoadError> {}"),
        ("/proj/index.ts", "import load from './impl';\nexport { load };\nexport * from './more';"),
        ("/proj/more.ts", "export const save = function (): Throws<SaveError> {};"),
        (
            "/proj/main.ts",
            "import { load, save } from './index';\nimport def from './impl';\nthrows(load());\nthrows(save());\nthrows(def());",
        ),
    ])
    .unwrap();
    let texts: Vec<String> = lint(&project, "/proj/main.ts")
        .iter()
        .map(|d| d.suggestions[0].edits.last().unwrap().text.clone())
        .collect();
    assert_eq!(texts, vec!["throws<LoadError>(", "throws<SaveError>(", "throws<LoadError>("]);
}

#[test]
fn script_declarations_are_global() {
    let project = Project::from_sources([
        ("/proj/globals.d.ts", "declare function legacy(): void | Throws<LegacyError>;"),
        ("/proj/main.ts", "export {};\nthrows(legacy());"),
    ])
    .unwrap();
    let diagnostics = lint(&project, "/proj/main.ts");
    assert_eq!(diagnostics[0].suggestions[0].edits[0].text, "throws<LegacyError>(");
}
