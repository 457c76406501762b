use std::path::{Path, PathBuf};

use crate::error::Result;

/// A discovered content file.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Path relative to the collection root directory.
    pub relative_path: PathBuf,
    /// Fully resolved absolute path.
    pub absolute_path: PathBuf,
}

/// Supported file extensions for content discovery.
const SUPPORTED_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Recursively walk a directory and discover content files.
///
/// Skips hidden files and directories (names starting with `.`) and only
/// returns files with a Markdown extension. Results are sorted by relative
/// path so collection order is deterministic.
pub fn discover_files(root: &Path) -> Result<Vec<DiscoveredFile>> {
    let canonical_root = root.canonicalize()?;
    let mut results = Vec::new();
    walk_dir(&canonical_root, &canonical_root, &mut results)?;
    results.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(results)
}

fn walk_dir(
    root: &Path,
    current: &Path,
    results: &mut Vec<DiscoveredFile>,
) -> Result<()> {
    let entries = std::fs::read_dir(current)?;

    for entry in entries {
        let entry = entry?;
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();

        // Skip hidden files and directories.
        if name.starts_with('.') {
            continue;
        }

        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            walk_dir(root, &entry.path(), results)?;
        } else if file_type.is_symlink() {
            // Resolve and skip anything that loops back into the tree.
            let Ok(resolved) = entry.path().canonicalize() else {
                continue;
            };
            if resolved.starts_with(root) && resolved.is_dir() {
                continue;
            }
            if resolved.is_file() && is_supported(&resolved) {
                results.push(DiscoveredFile {
                    relative_path: relative_to(root, &entry.path()),
                    absolute_path: resolved,
                });
            }
        } else if file_type.is_file() && is_supported(&entry.path()) {
            let absolute_path = entry.path().canonicalize()?;
            results.push(DiscoveredFile {
                relative_path: relative_to(root, &entry.path()),
                absolute_path,
            });
        }
    }

    Ok(())
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}
