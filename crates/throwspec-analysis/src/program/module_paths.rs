//! Module specifier and path arithmetic.
//!
//! All operations are lexical: nothing here touches the file system.

use std::path::{Component, Path, PathBuf};

/// Extensions tried, in order, when a relative specifier names no file directly.
pub const TS_EXTENSION_CANDIDATES: [&str; 7] = ["ts", "tsx", "d.ts", "mts", "cts", "d.mts", "d.cts"];
const TS_EXTENSION_SUFFIXES: [&str; 7] = [".d.ts", ".d.mts", ".d.cts", ".ts", ".tsx", ".mts", ".cts"];

/// A specifier is relative when it starts with `.` (`./x`, `../x`, `.`).
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier.starts_with('.')
}

/// Collapse `.` and `..` components without consulting the file system.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let ends_in_normal = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if ends_in_normal {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push("..");
                }
            }
            Component::RootDir | Component::Normal(_) | Component::Prefix(_) => {
                normalized.push(component.as_os_str());
            }
        }
    }

    normalized
}

/// Path from directory `from` to `to`, both already normalized.
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from_components: Vec<_> = from
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();
    let to_components: Vec<_> = to
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();

    let mut common = 0;
    while common < from_components.len()
        && common < to_components.len()
        && from_components[common] == to_components[common]
    {
        common += 1;
    }

    let mut result = PathBuf::new();
    for _ in common..from_components.len() {
        result.push("..");
    }
    for component in &to_components[common..] {
        result.push(component.as_os_str());
    }

    if result.as_os_str().is_empty() {
        result.push(".");
    }

    result
}

/// Directory containing `file`, or the empty path for a bare file name.
pub fn parent_dir(file: &Path) -> &Path {
    file.parent().unwrap_or_else(|| Path::new(""))
}

/// Re-express `specifier`, written in `from_file`, so it points at the same
/// module when written in `to_file`. Non-relative specifiers are unchanged.
pub fn retarget_specifier(specifier: &str, from_file: &Path, to_file: &Path) -> String {
    if !is_relative_specifier(specifier) {
        return specifier.to_string();
    }

    let absolute = normalize_path(&parent_dir(from_file).join(specifier));
    let target_dir = normalize_path(parent_dir(to_file));
    to_module_specifier(&relative_path(&target_dir, &absolute))
}

/// Specifier importing module file `target_file` from `from_file`,
/// with the TypeScript extension dropped.
pub fn specifier_for_file(target_file: &Path, from_file: &Path) -> String {
    let target = strip_ts_extension(&normalize_path(target_file));
    let from_dir = normalize_path(parent_dir(from_file));
    to_module_specifier(&relative_path(&from_dir, &target))
}

/// Forward slashes, and never ambiguous with a bare package name.
fn to_module_specifier(relative: &Path) -> String {
    let mut spec = relative.to_string_lossy().replace('\\', "/");
    if !spec.starts_with('.') {
        spec = format!("./{spec}");
    }
    spec
}

/// Candidate file paths for a relative `specifier` written in `from_file`.
pub fn module_file_candidates(from_file: &Path, specifier: &str) -> Vec<PathBuf> {
    let joined = normalize_path(&parent_dir(from_file).join(specifier));
    let mut candidates = Vec::with_capacity(1 + TS_EXTENSION_CANDIDATES.len() * 2);

    if has_ts_suffix(&joined) {
        candidates.push(joined.clone());
    }
    if let Some(js_base) = strip_js_extension(&joined) {
        for ext in TS_EXTENSION_CANDIDATES {
            candidates.push(append_extension(&js_base, ext));
        }
    }
    for ext in TS_EXTENSION_CANDIDATES {
        candidates.push(append_extension(&joined, ext));
    }
    for ext in TS_EXTENSION_CANDIDATES {
        candidates.push(append_extension(&joined.join("index"), ext));
    }

    candidates
}

fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".");
    os.push(ext);
    PathBuf::from(os)
}

fn has_ts_suffix(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| TS_EXTENSION_SUFFIXES.iter().any(|s| name.ends_with(s)))
}

/// `./x.js` in TypeScript sources refers to `./x.ts`.
fn strip_js_extension(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    let base = [".js", ".jsx", ".mjs", ".cjs"]
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix))?;
    Some(path.with_file_name(base))
}

fn strip_ts_extension(path: &Path) -> PathBuf {
    let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
        return path.to_path_buf();
    };

    for suffix in TS_EXTENSION_SUFFIXES {
        if let Some(base_name) = file_name.strip_suffix(suffix) {
            if base_name.is_empty() {
                return path.to_path_buf();
            }
            return path.with_file_name(base_name);
        }
    }

    path.to_path_buf()
}
