//! In-memory project: the set of parsed files the type model answers over.

use std::path::{Path, PathBuf};

use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use rustc_hash::FxHashMap;
use throwspec_core::config::ScanConfig;
use throwspec_core::errors::{LintError, ParseError, ScanError};
use tree_sitter::Node;

use super::model::{Declaration, Symbol, TypeModel};
use super::module_paths::{module_file_candidates, normalize_path};
use super::printer::TypePrinter;
use super::resolver::Resolver;
use crate::parsers::{SourceFile, TypeScriptParser};

/// Parsed files keyed by normalized path, in insertion order.
#[derive(Debug, Default)]
pub struct Project {
    files: Vec<SourceFile>,
    index: FxHashMap<PathBuf, usize>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a project from `(path, source)` pairs.
    pub fn from_sources<P, S, I>(sources: I) -> Result<Self, ParseError>
    where
        P: Into<PathBuf>,
        S: Into<String>,
        I: IntoIterator<Item = (P, S)>,
    {
        let mut project = Self::new();
        for (path, text) in sources {
            project.add_source(path, text)?;
        }
        Ok(project)
    }

    /// Parse and store one file, replacing any previous snapshot at that path.
    pub fn add_source(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Result<(), ParseError> {
        let path = normalize_path(&path.into());
        let text = text.into();
        let file = TypeScriptParser::new().parse(&text, &path)?;

        match self.index.get(&path) {
            Some(&i) => self.files[i] = file,
            None => {
                self.index.insert(path, self.files.len());
                self.files.push(file);
            }
        }
        Ok(())
    }

    /// Walk `root` (honouring `.gitignore` and `extra_ignore`) and load every
    /// file with a configured extension.
    pub fn load(root: &Path, config: &ScanConfig) -> Result<Self, LintError> {
        let extensions = config.effective_extensions();

        let mut overrides = OverrideBuilder::new(root);
        for pattern in &config.extra_ignore {
            overrides
                .add(&format!("!{pattern}"))
                .map_err(|e| walk_error(root, e))?;
        }
        let overrides = overrides.build().map_err(|e| walk_error(root, e))?;

        let walker = WalkBuilder::new(root)
            .follow_links(config.effective_follow_symlinks())
            .require_git(false)
            .overrides(overrides)
            .build();

        let mut paths = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| walk_error(root, e))?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let matches_ext = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| extensions.iter().any(|x| x == ext));
            if matches_ext {
                paths.push(entry.into_path());
            }
        }
        paths.sort();

        let mut project = Self::new();
        for path in paths {
            let text = std::fs::read_to_string(&path).map_err(|source| ScanError::IoError {
                path: path.clone(),
                source,
            })?;
            match project.add_source(path.clone(), text) {
                Ok(()) => {}
                Err(ParseError::UnsupportedLanguage { extension }) => {
                    tracing::debug!(path = %path.display(), extension, "skipping non-TypeScript file");
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::info!(root = %root.display(), files = project.len(), "project loaded");
        Ok(project)
    }

    pub fn file(&self, path: &Path) -> Option<&SourceFile> {
        self.index
            .get(&normalize_path(path))
            .map(|&i| &self.files[i])
    }

    pub fn files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Resolve a relative `specifier` written in `from_file` to a loaded file.
    pub fn resolve_module(&self, from_file: &Path, specifier: &str) -> Option<&SourceFile> {
        module_file_candidates(from_file, specifier)
            .iter()
            .find_map(|candidate| self.file(candidate))
    }
}

fn walk_error(root: &Path, error: ignore::Error) -> ScanError {
    ScanError::WalkError {
        root: root.to_path_buf(),
        message: error.to_string(),
    }
}

impl TypeModel for Project {
    fn source_file(&self, path: &Path) -> Option<&SourceFile> {
        self.file(path)
    }

    fn resolve_symbol<'a>(&'a self, file: &'a SourceFile, identifier: Node<'a>) -> Option<Symbol<'a>> {
        let declaration: Declaration<'a> = Resolver::new(self).resolve_identifier(file, identifier)?;
        Some(Symbol {
            name: file.node_text(identifier).to_string(),
            declarations: smallvec::smallvec![declaration],
        })
    }

    fn type_to_string(&self, file: &SourceFile, type_node: Node<'_>) -> String {
        TypePrinter::new().print(file, type_node)
    }
}
