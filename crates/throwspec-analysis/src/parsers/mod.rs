//! Tree-sitter parser subsystem for TypeScript sources.

pub mod error_tolerant;
pub mod syntax;
pub mod types;
pub mod typescript;

pub use types::{Language, Position, Range, SourceFile, Span};
pub use typescript::TypeScriptParser;
