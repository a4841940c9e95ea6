//! Project loading configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_EXTENSIONS;

/// Configuration for which files are loaded into a project.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions to load. Default: ts, tsx, mts, cts.
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Additional glob-style ignore patterns, on top of `.gitignore`.
    #[serde(default)]
    pub extra_ignore: Vec<String>,
    /// Follow symbolic links while walking. Default: false.
    pub follow_symlinks: Option<bool>,
}

impl ScanConfig {
    /// Returns the effective extension list, defaulting to the TypeScript set.
    pub fn effective_extensions(&self) -> Vec<String> {
        if self.extensions.is_empty() {
            DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
        } else {
            self.extensions.clone()
        }
    }

    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }
}
