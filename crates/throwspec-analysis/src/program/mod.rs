//! Program model: the symbol/type capabilities the rules consume, and the
//! tree-sitter backed `Project` that provides them.

pub mod model;
pub mod module_paths;
pub mod printer;
pub mod project;
pub mod resolver;

pub use model::{Declaration, Symbol, TypeModel};
pub use project::Project;
