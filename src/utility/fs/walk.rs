// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Result of a walk: files and directories in sorted traversal order.
#[derive(Debug, Default)]
pub struct WalkResult {
    files: Vec<PathBuf>,
    directories: Vec<PathBuf>,
    errors: Vec<String>,
}

impl WalkResult {
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    #[must_use]
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Entries that could not be read, one message each (path included).
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

/// Walks `root` depth-first, collecting files and directories (root excluded).
///
/// Every entry is visited, hidden and ignored ones included. Siblings are visited sorted by name. Symlinks are not
/// followed. Unreadable entries end up in [`WalkResult::errors`].
///
/// # Errors
///
/// Returns an error if the root directory does not exist.
///
/// # Example
/// ```no_run
/// use sggmm::utility::fs::walk::walk;
///
/// let result = walk("Backup")?;
/// println!("Found {} files", result.files().len());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn walk<P: AsRef<Path>>(root: P) -> Result<WalkResult> {
    let root = root.as_ref();

    if !root.exists() {
        anyhow::bail!("root directory does not exist: {}", root.display());
    }

    let mut result = WalkResult::default();
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    for entry in walker {
        match entry {
            Ok(entry) if entry.depth() == 0 => {}
            Ok(entry) => {
                let path = entry.path().to_path_buf();
                if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    result.directories.push(path);
                } else if entry.file_type().is_some_and(|ft| ft.is_file()) {
                    result.files.push(path);
                }
            }
            Err(e) => {
                warn!(root = %root.display(), error = %e, "unreadable entry");
                result.errors.push(e.to_string());
            }
        }
    }

    Ok(result)
}

/// Finds files under `root` whose root-relative path matches a glob pattern.
///
/// Results are sorted, so discovery order is stable across runs.
///
/// # Errors
///
/// Returns an error if:
/// - The root directory does not exist.
/// - The glob pattern is invalid.
///
/// # Example
/// ```no_run
/// use sggmm::utility::fs::walk::find_files;
///
/// let modfiles = find_files("Mods", "**/modfile.txt")?;
/// for file in modfiles {
///     println!("{}", file.display());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn find_files<P: AsRef<Path>>(root: P, pattern: &str) -> Result<Vec<PathBuf>> {
    use wax::{Glob, Program};

    let root = root.as_ref();
    let glob =
        Glob::new(pattern).map_err(|e| anyhow::anyhow!("invalid glob pattern '{pattern}': {e}"))?;

    let mut matches: Vec<PathBuf> = walk(root)?
        .files()
        .iter()
        .filter(|path| {
            path.strip_prefix(root)
                .is_ok_and(|rel| glob.is_match(rel))
        })
        .cloned()
        .collect();
    matches.sort();
    Ok(matches)
}
