//! Project file enumeration
//!
//! Walks the project root and yields the normalized set of analyzable
//! files. Enumeration is the only step whose failure aborts an analysis;
//! everything downstream degrades per-file.

mod loc;

pub use loc::count_lines;

use crate::models::ProjectFile;
use ignore::WalkBuilder;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// File extensions considered part of the analyzed project.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs", "json"];

/// Directories never descended into, regardless of gitignore state.
pub const EXCLUDED_DIRS: &[&str] = &["node_modules", ".git", "dist", "build", "coverage", ".archscan"];

/// Fatal enumeration failure: the project root cannot be walked at all.
#[derive(Debug, Error)]
pub enum EnumerateError {
    #[error("project root {0} does not exist")]
    MissingRoot(String),
    #[error("project root {0} is not a directory")]
    NotADirectory(String),
}

/// Convert a path to the project's canonical relative form: forward
/// slashes, no leading `./`.
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    unified
        .strip_prefix("./")
        .unwrap_or(&unified)
        .trim_start_matches('/')
        .to_string()
}

fn is_excluded(rel: &str) -> bool {
    rel.split('/').any(|seg| EXCLUDED_DIRS.contains(&seg))
}

/// Enumerate the analyzable files under `root` in walk order.
///
/// Paths are relative to `root` in normalized POSIX form. Unreadable
/// entries are skipped; only a missing/invalid root is fatal.
pub fn enumerate(root: &Path) -> Result<Vec<ProjectFile>, EnumerateError> {
    if !root.exists() {
        return Err(EnumerateError::MissingRoot(root.display().to_string()));
    }
    if !root.is_dir() {
        return Err(EnumerateError::NotADirectory(root.display().to_string()));
    }

    let mut files = Vec::new();

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .require_git(false)
        .sort_by_file_path(|a, b| a.cmp(b))
        .build();

    for entry in walker.filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let ext = match path.extension().and_then(|e| e.to_str()) {
            Some(e) if SOURCE_EXTENSIONS.contains(&e) => e.to_string(),
            _ => continue,
        };

        let rel = match path.strip_prefix(root) {
            Ok(p) => normalize_path(&p.to_string_lossy()),
            Err(_) => continue,
        };
        if is_excluded(&rel) {
            continue;
        }

        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        files.push(ProjectFile {
            path: rel,
            size,
            extension: ext,
            loc: Default::default(),
        });
    }

    debug!("Enumerated {} project files under {:?}", files.len(), root);
    Ok(files)
}
