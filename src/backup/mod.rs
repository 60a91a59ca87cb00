// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Backup store.
//!
//! ```text
//! <game root>/                      <game root>/Backup/
//!   Scripts/RoomManager.lua  --backup()-->  Scripts/RoomManager.lua
//!   Scripts/New.lua (created) -record_created()-> .sggmm-created.json
//!                                                 (files + folders made)
//!
//!                            <--restore()--   copy back (skip identical)
//!                                             delete created files, then
//!                                             their now-empty folders
//!                             --clear()-->    remove Backup/
//! ```
//!
//! The backup folder's existence means "mods are installed". Entries are
//! written once and never overwritten, so the first snapshot survives any
//! number of reinstalls.

mod manifest;

pub use manifest::CREATED_MANIFEST;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::BackupError;
use crate::utility::fs::copy::{copy_file_with_parents, files_identical, remove_dir_if_exists};
use crate::utility::fs::walk::walk;

/// What [`backup`] did with each requested path (game-relative).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BackupReport {
    /// Newly copied into the backup.
    pub copied: Vec<PathBuf>,
    /// Already present in the backup, left untouched.
    pub skipped: Vec<PathBuf>,
    /// Not present in the game folder.
    pub missing: Vec<PathBuf>,
}

/// Result of a [`restore`] pass.
#[derive(Debug, Default)]
pub struct RestoreReport {
    pub restored: Vec<PathBuf>,
    /// Byte-identical to the backup, not copied.
    pub unchanged: Vec<PathBuf>,
    /// Files the install created, now deleted.
    pub removed: Vec<PathBuf>,
    /// Folders the install created, now deleted.
    pub removed_dirs: Vec<PathBuf>,
    /// Per-file failures; the rest of the restore went ahead.
    pub failed: Vec<BackupError>,
}

impl RestoreReport {
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    fn fail(&mut self, path: PathBuf, source: io::Error) {
        let err = BackupError::RestoreCopy { path, source };
        error!("{err}");
        self.failed.push(err);
    }
}

/// Outcome of [`restore`].
#[derive(Debug)]
pub enum RestoreOutcome {
    /// No backup folder: nothing was restored.
    Missing,
    /// The backup folder holds no entries; game files may need validating.
    Empty,
    Restored(RestoreReport),
}

/// The game root a backup folder belongs to (its parent).
///
/// # Errors
///
/// Returns [`BackupError::NoGameRoot`] if `backup_root` has no parent.
pub fn game_root_of(backup_root: &Path) -> Result<&Path, BackupError> {
    backup_root
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| BackupError::NoGameRoot(backup_root.to_path_buf()))
}

/// Copies `files` (absolute, or relative to the game root) into
/// `backup_root`, mirroring their path under the game root.
///
/// Directories become empty mirrors. Existing backup entries are never
/// overwritten.
///
/// # Errors
///
/// Fails on the first path outside the game root or the first copy error;
/// entries copied before that stay in place.
pub fn backup<I, P>(files: I, backup_root: &Path) -> Result<BackupReport, BackupError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let game_root = game_root_of(backup_root)?;
    let mut report = BackupReport::default();

    for file in files {
        let file = game_root.join(file.as_ref());
        let relative = file
            .strip_prefix(game_root)
            .map_err(|_| BackupError::OutsideGameRoot {
                path: file.clone(),
                game_root: game_root.to_path_buf(),
            })?
            .to_path_buf();
        if file.starts_with(backup_root) {
            debug!(path = %file.display(), "inside backup folder, skipping");
            continue;
        }

        let target = backup_root.join(&relative);
        if target.symlink_metadata().is_ok() {
            debug!(path = %relative.display(), "already backed up");
            report.skipped.push(relative);
            continue;
        }

        let copy_error = |source: io::Error| BackupError::Copy {
            from: file.clone(),
            to: target.clone(),
            source,
        };
        match fs::metadata(&file) {
            Ok(meta) if meta.is_dir() => fs::create_dir_all(&target).map_err(copy_error)?,
            Ok(_) => copy_file_with_parents(&file, &target).map_err(copy_error)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %relative.display(), "not in game folder, nothing to back up");
                report.missing.push(relative);
                continue;
            }
            Err(e) => return Err(copy_error(e)),
        }
        info!(path = %relative.display(), "backed up");
        report.copied.push(relative);
    }

    Ok(report)
}

/// Records that `relative` did not exist before install, so restore deletes
/// it, along with any of its parent folders that do not exist yet. Creates
/// the backup folder if needed.
///
/// Call this before writing the file.
///
/// # Errors
///
/// Returns [`BackupError::NoGameRoot`] if `backup_root` has no parent, or
/// [`BackupError::Manifest`] if the manifest cannot be read or written.
pub fn record_created(backup_root: &Path, relative: &Path) -> Result<(), BackupError> {
    let game_root = game_root_of(backup_root)?;
    let mut manifest = manifest::load(backup_root)?;

    let mut changed = manifest.created.insert(relative.to_path_buf());
    for dir in relative.ancestors().skip(1) {
        if dir.as_os_str().is_empty() || game_root.join(dir).exists() {
            break;
        }
        changed |= manifest.created_dirs.insert(dir.to_path_buf());
    }

    if changed {
        manifest::save(backup_root, &manifest)?;
        debug!(path = %relative.display(), "recorded created file");
    }
    Ok(())
}

/// Copies every backed-up file back to `game_root` and deletes files and
/// folders the install created.
///
/// Best effort: a failing file is logged and collected in
/// [`RestoreReport::failed`] and the pass continues. Backup entries that
/// could not be listed count as failures too. A created folder that is not
/// empty any more is left in place.
///
/// # Errors
///
/// Returns an error only if the backup folder exists but cannot be listed or
/// its manifest is unreadable.
pub fn restore(game_root: &Path, backup_root: &Path) -> Result<RestoreOutcome, BackupError> {
    if !backup_root.is_dir() {
        warn!(path = %backup_root.display(), "backup folder not found, nothing restored");
        return Ok(RestoreOutcome::Missing);
    }

    let entries = walk(backup_root).map_err(|e| BackupError::Walk {
        path: backup_root.to_path_buf(),
        message: e.to_string(),
    })?;
    let manifest_path = backup_root.join(CREATED_MANIFEST);
    let manifest = manifest::load(backup_root)?;

    let files: Vec<&PathBuf> = entries.files().iter().filter(|f| **f != manifest_path).collect();
    if files.is_empty()
        && entries.directories().is_empty()
        && entries.errors().is_empty()
        && manifest.is_empty()
    {
        warn!(
            path = %backup_root.display(),
            "backup folder is empty; validate the game files if the game misbehaves"
        );
        return Ok(RestoreOutcome::Empty);
    }

    let mut report = RestoreReport::default();

    for message in entries.errors() {
        let err = BackupError::Walk {
            path: backup_root.to_path_buf(),
            message: message.clone(),
        };
        error!("{err}");
        report.failed.push(err);
    }

    for dir in entries.directories() {
        let Ok(relative) = dir.strip_prefix(backup_root) else {
            continue;
        };
        if let Err(e) = fs::create_dir_all(game_root.join(relative)) {
            report.fail(relative.to_path_buf(), e);
        }
    }

    for file in files {
        let Ok(relative) = file.strip_prefix(backup_root) else {
            continue;
        };
        let target = game_root.join(relative);
        match files_identical(file, &target) {
            Ok(true) => {
                debug!(path = %relative.display(), "unchanged, skipping");
                report.unchanged.push(relative.to_path_buf());
            }
            Ok(false) => match copy_file_with_parents(file, &target) {
                Ok(()) => {
                    info!(path = %relative.display(), "restored");
                    report.restored.push(relative.to_path_buf());
                }
                Err(e) => report.fail(relative.to_path_buf(), e),
            },
            Err(e) => report.fail(relative.to_path_buf(), e),
        }
    }

    for relative in manifest.created {
        match fs::remove_file(game_root.join(&relative)) {
            Ok(()) => {
                info!(path = %relative.display(), "removed created file");
                report.removed.push(relative);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => report.removed.push(relative),
            Err(e) => report.fail(relative, e),
        }
    }

    // Children sort after their parents, so reverse order empties leaves first.
    for relative in manifest.created_dirs.into_iter().rev() {
        match fs::remove_dir(game_root.join(&relative)) {
            Ok(()) => {
                info!(path = %relative.display(), "removed created folder");
                report.removed_dirs.push(relative);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => report.removed_dirs.push(relative),
            Err(e) if e.kind() == io::ErrorKind::DirectoryNotEmpty => {
                warn!(path = %relative.display(), "created folder holds other files, keeping it");
            }
            Err(e) => report.fail(relative, e),
        }
    }

    Ok(RestoreOutcome::Restored(report))
}

/// Removes the backup folder. Returns whether it existed.
///
/// # Errors
///
/// Returns [`BackupError::Clear`] if removal fails.
pub fn clear(backup_root: &Path) -> Result<bool, BackupError> {
    let removed = remove_dir_if_exists(backup_root).map_err(|source| BackupError::Clear {
        path: backup_root.to_path_buf(),
        source,
    })?;
    if removed {
        info!(path = %backup_root.display(), "backup cleared");
    }
    Ok(removed)
}

#[cfg(test)]
mod tests;
