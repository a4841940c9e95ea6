//! Source snapshot and location types.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tree_sitter::{Node, Tree};

use super::syntax;

/// Grammar flavour a file was parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    TypeScript,
    Tsx,
}

impl Language {
    /// Pick the grammar from a file extension. Unknown extensions are `None`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }
}

/// Zero-based line/column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// Zero-based line/column range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn from_ts_node(node: &Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self {
            start: Position {
                line: start.row as u32,
                column: start.column as u32,
            },
            end: Position {
                line: end.row as u32,
                column: end.column as u32,
            },
        }
    }
}

/// Half-open byte range into a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `offset`.
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn from_ts_node(node: &Node) -> Self {
        Self::new(node.start_byte(), node.end_byte())
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Immutable snapshot of one parsed file.
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
    pub tree: Tree,
    pub language: Language,
    pub error_count: u32,
    pub error_ranges: Vec<Range>,
}

impl SourceFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by `node`.
    pub fn node_text(&self, node: Node<'_>) -> &str {
        self.text.get(node.byte_range()).unwrap_or("")
    }

    /// Top-level statements, comments excluded.
    pub fn statements(&self) -> Vec<Node<'_>> {
        syntax::named_children(self.root())
    }

    /// A file with any top-level import or export is an ES module; anything
    /// else is a script whose declarations are global.
    pub fn is_module(&self) -> bool {
        self.statements()
            .iter()
            .any(|s| matches!(s.kind(), "import_statement" | "export_statement"))
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("language", &self.language)
            .field("len", &self.text.len())
            .field("error_count", &self.error_count)
            .finish()
    }
}
