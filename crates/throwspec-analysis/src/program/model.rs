//! The capability seam between rules and whatever backend answers
//! symbol and type questions.

use std::path::Path;

use smallvec::SmallVec;
use tree_sitter::Node;

use crate::parsers::SourceFile;

/// A declaration site: a syntax node together with the file that holds it.
#[derive(Debug, Clone, Copy)]
pub struct Declaration<'a> {
    pub file: &'a SourceFile,
    pub node: Node<'a>,
}

impl<'a> Declaration<'a> {
    pub fn new(file: &'a SourceFile, node: Node<'a>) -> Self {
        Self { file, node }
    }

    pub fn source_file(&self) -> &'a SourceFile {
        self.file
    }

    pub fn kind(&self) -> &'static str {
        self.node.kind()
    }
}

/// A resolved symbol and its declarations, in declaration order.
#[derive(Debug, Clone)]
pub struct Symbol<'a> {
    pub name: String,
    pub declarations: SmallVec<[Declaration<'a>; 1]>,
}

impl<'a> Symbol<'a> {
    pub fn first_declaration(&self) -> Option<Declaration<'a>> {
        self.declarations.first().copied()
    }
}

/// Read-only symbol and type queries over an immutable program snapshot.
pub trait TypeModel {
    /// Look up a loaded file by path.
    fn source_file(&self, path: &Path) -> Option<&SourceFile>;

    /// Resolve the symbol an identifier in `file` refers to, following
    /// aliases and imports to the underlying declaration.
    fn resolve_symbol<'a>(&'a self, file: &'a SourceFile, identifier: Node<'a>) -> Option<Symbol<'a>>;

    /// Canonical text of the type written at `type_node` in `file`.
    fn type_to_string(&self, file: &SourceFile, type_node: Node<'_>) -> String;
}
