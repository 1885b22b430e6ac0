//! Extension Path Utilities
//!
//! Resolution and normalization of the directory the extension is unpacked
//! into. All functions are lexical: nothing here touches the filesystem.

use std::path::{Component, Path, PathBuf};

use crate::EXTENSION_DIR_NAME;

fn is_extension_dir(component: &Component<'_>) -> bool {
    matches!(component, Component::Normal(name) if name.to_str() == Some(EXTENSION_DIR_NAME))
}

/// Whether the last path segment is the extension directory name
pub fn ends_with_extension_dir(path: &Path) -> bool {
    path.components()
        .next_back()
        .map(|last| is_extension_dir(&last))
        .unwrap_or(false)
}

/// Normalize an extension path
///
/// Removes `.` segments, folds `..` into its parent, and collapses any run of
/// trailing `arx-crx` segments into one, so `.../arx-crx/arx-crx` becomes
/// `.../arx-crx`. Idempotent.
///
/// # Example
/// ```
/// use std::path::{Path, PathBuf};
/// use arx_launcher::logic::path::normalize_extension_path;
///
/// assert_eq!(
///     normalize_extension_path(Path::new("/data/arx-crx/arx-crx")),
///     PathBuf::from("/data/arx-crx")
/// );
/// ```
pub fn normalize_extension_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    while parts.len() >= 2
        && is_extension_dir(&parts[parts.len() - 1])
        && is_extension_dir(&parts[parts.len() - 2])
    {
        parts.pop();
    }

    parts.iter().collect()
}

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Decide where a download goes
///
/// - An explicit `save_path` gets `arx-crx` appended unless it already ends
///   with it.
/// - Otherwise the stored path is reused.
/// - With nothing stored, `default_path` is used.
///
/// The result is always normalized. An empty result means no valid path
/// could be determined.
pub fn resolve_target_path(
    save_path: Option<&Path>,
    stored_path: &str,
    default_path: &Path,
) -> PathBuf {
    let chosen = match save_path {
        Some(path) if !path.as_os_str().is_empty() => {
            let path = expand_home(path);
            if ends_with_extension_dir(&path) {
                path
            } else {
                path.join(EXTENSION_DIR_NAME)
            }
        }
        _ if !stored_path.is_empty() => PathBuf::from(stored_path),
        _ => default_path.to_path_buf(),
    };

    normalize_extension_path(&chosen)
}
