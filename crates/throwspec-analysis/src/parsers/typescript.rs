//! TypeScript parser using native tree-sitter.

use std::path::Path;

use throwspec_core::errors::ParseError;
use tree_sitter::Parser;

use super::error_tolerant::count_errors;
use super::types::{Language, SourceFile};

/// TypeScript/TSX parser. Grammar is chosen by file extension.
pub struct TypeScriptParser;

impl Default for TypeScriptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeScriptParser {
    pub fn new() -> Self {
        Self
    }

    /// File extensions this parser handles.
    pub fn extensions(&self) -> &[&str] {
        &["ts", "tsx", "mts", "cts"]
    }

    /// Parse `source` into an immutable snapshot for `path`.
    ///
    /// Trees containing ERROR nodes are kept; only a missing tree is an error.
    pub fn parse(&self, source: &str, path: &Path) -> Result<SourceFile, ParseError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("ts");
        let language = Language::from_extension(ext).ok_or_else(|| ParseError::UnsupportedLanguage {
            extension: ext.to_string(),
        })?;

        let grammar: tree_sitter::Language = match language {
            Language::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        };
        let mut parser = Parser::new();
        parser
            .set_language(&grammar)
            .map_err(|e| ParseError::GrammarLoad {
                message: e.to_string(),
            })?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::TreeSitterError {
                path: path.to_path_buf(),
                message: "parser returned no tree".to_string(),
            })?;

        let (error_count, error_ranges) = count_errors(tree.root_node());
        if error_count > 0 {
            tracing::warn!(
                path = %path.display(),
                error_count,
                "parsed with syntax errors"
            );
        }

        Ok(SourceFile {
            path: path.to_path_buf(),
            text: source.to_string(),
            tree,
            language,
            error_count,
            error_ranges,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_function_with_marker() {
        let parser = TypeScriptParser::new();
        let file = parser
            .parse("function fn(): Throws<Error> {}", Path::new("a.ts"))
            .unwrap();
        assert_eq!(file.error_count, 0);
        let statements = file.statements();
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].kind(), "function_declaration");
    }

    #[test]
    fn test_parse_call_with_type_arguments() {
        let parser = TypeScriptParser::new();
        let file = parser.parse("throws<Error>(fn())", Path::new("a.ts")).unwrap();
        let stmt = file.statements()[0];
        let call = stmt.named_child(0).unwrap();
        assert_eq!(call.kind(), "call_expression");
        assert!(call.child_by_field_name("type_arguments").is_some());
    }

    #[test]
    fn test_tsx_extension_uses_tsx_grammar() {
        let parser = TypeScriptParser::new();
        let file = parser.parse("const a = <div />;", Path::new("a.tsx")).unwrap();
        assert_eq!(file.language, Language::Tsx);
        assert_eq!(file.error_count, 0);
    }

    #[test]
    fn test_unsupported_extension() {
        let parser = TypeScriptParser::new();
        let err = parser.parse("x = 1", Path::new("a.py")).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedLanguage { .. }));
    }

    #[test]
    fn test_errors_are_counted_not_fatal() {
        let parser = TypeScriptParser::new();
        let file = parser.parse("function (", Path::new("broken.ts")).unwrap();
        assert!(file.error_count > 0);
        assert_eq!(file.error_ranges.len() as u32, file.error_count);
    }

    #[test]
    fn test_is_module() {
        let parser = TypeScriptParser::new();
        let script = parser.parse("declare function f(): void;", Path::new("g.ts")).unwrap();
        assert!(!script.is_module());
        let module = parser.parse("export const x = 1;", Path::new("m.ts")).unwrap();
        assert!(module.is_module());
    }
}
