//! Python file discovery

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

const SKIPPED_DIRS: &[&str] = &[".git", "__pycache__", "venv", ".venv"];
const PYTHON_EXTENSIONS: &[&str] = &["py", "pyw"];

/// Expand `paths` into the Python files to convert
///
/// Explicit file paths are kept as given, whatever their extension.
/// Directories are walked recursively. The result is sorted and free of
/// duplicates.
pub fn discover_files<P: AsRef<Path>>(paths: &[P]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            walk_directory(path, &mut files);
        } else {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    debug!(count = files.len(), "Discovered files");
    files
}

fn walk_directory(root: &Path, files: &mut Vec<PathBuf>) {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            // The root itself is never skipped, even if named like `venv`
            e.depth() == 0
                || !e.file_type().is_dir()
                || !SKIPPED_DIRS.contains(&e.file_name().to_string_lossy().as_ref())
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        if entry.file_type().is_file() && is_python_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
}

fn is_python_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| PYTHON_EXTENSIONS.contains(&ext.to_string_lossy().as_ref()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "x = 1\n").unwrap();
        path
    }

    #[test]
    fn test_walks_python_files_only() {
        let tmp = TempDir::new().unwrap();
        let a = touch(tmp.path(), "pkg/a.py");
        let b = touch(tmp.path(), "pkg/sub/b.pyw");
        touch(tmp.path(), "pkg/readme.txt");
        touch(tmp.path(), "pkg/c.pyc");

        let files = discover_files(&[tmp.path()]);
        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn test_skips_vcs_cache_and_virtualenv_dirs() {
        let tmp = TempDir::new().unwrap();
        let kept = touch(tmp.path(), "src/kept.py");
        touch(tmp.path(), ".git/hooks/x.py");
        touch(tmp.path(), "src/__pycache__/kept.py");
        touch(tmp.path(), "venv/lib/site.py");
        touch(tmp.path(), ".venv/lib/site.py");

        assert_eq!(discover_files(&[tmp.path()]), vec![kept]);
    }

    #[test]
    fn test_explicit_files_taken_as_given() {
        let tmp = TempDir::new().unwrap();
        let script = touch(tmp.path(), "bin/tool");
        let missing = tmp.path().join("missing.py");

        let files = discover_files(&[script.clone(), missing.clone()]);
        assert_eq!(files, vec![script, missing]);
    }

    #[test]
    fn test_sorted_and_deduplicated() {
        let tmp = TempDir::new().unwrap();
        let b = touch(tmp.path(), "b.py");
        let a = touch(tmp.path(), "a.py");

        let files = discover_files(&[b.clone(), tmp.path().to_path_buf(), a.clone()]);
        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn test_root_named_like_skipped_dir_is_walked() {
        let tmp = TempDir::new().unwrap();
        let inside = touch(tmp.path(), "venv/tool.py");

        assert_eq!(discover_files(&[tmp.path().join("venv")]), vec![inside]);
    }
}
