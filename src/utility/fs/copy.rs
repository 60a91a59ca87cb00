// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Copies `src` to `dst`, creating the parent directories of `dst`.
///
/// # Errors
///
/// Returns the I/O error of the failing directory creation or copy.
pub fn copy_file_with_parents(src: &Path, dst: &Path) -> io::Result<()> {
    if let Some(parent) = dst.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dst).map(|_| ())
}

/// Returns `true` when both files exist and have the same bytes.
///
/// # Errors
///
/// Returns an error if either file cannot be read (a missing `b` is not an
/// error, it simply differs).
pub fn files_identical(a: &Path, b: &Path) -> io::Result<bool> {
    let meta_b = match fs::metadata(b) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    if !meta_b.is_file() || fs::metadata(a)?.len() != meta_b.len() {
        return Ok(false);
    }
    Ok(fs::read(a)? == fs::read(b)?)
}

/// Writes `bytes` to `path` through a temp file in the same directory, so a
/// reader never observes a half-written file.
///
/// # Errors
///
/// Returns an error if the temp file cannot be created, written or renamed.
///
/// # Example
/// ```no_run
/// use sggmm::utility::fs::copy::write_atomic;
/// use std::path::Path;
///
/// write_atomic(Path::new("Scripts/RoomManager.lua"), b"-- merged\n")?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Removes a directory tree, treating an absent directory as success.
///
/// Returns whether something was removed.
///
/// # Errors
///
/// Returns the I/O error if removal fails for any other reason.
pub fn remove_dir_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
