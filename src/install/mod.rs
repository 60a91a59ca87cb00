// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Install and uninstall orchestration.
//!
//! ```text
//! install_mods()
//!   Mods/ missing --> create it ----------------> ModsFolderCreated
//!   Backup/ present --> backup::restore()         (start from originals)
//!   plan_mods()   Mods/**/modfile.txt, sorted
//!     per mod:  ModFile::load --> interpret       (ModfileError skips the mod)
//!     MergePlan::add_mod
//!   per destination:
//!     merge_destination --> backup / record_created --> write_atomic
//!     (any error skips the destination)
//!
//! uninstall_mods()
//!   backup::restore (best effort) --> backup::clear --> remove Mods/
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, error, info, warn};

use crate::backup::{self, RestoreOutcome, RestoreReport};
use crate::config::types::LayoutConfig;
use crate::error::{MergeError, ModfileError, Result, SggmmError, SggmmResult};
use crate::game::Game;
use crate::merge::merge_destination;
use crate::modfile::ModFile;
use crate::plan::{MergeAction, MergePlan, interpret};
use crate::utility::fs::copy::{remove_dir_if_exists, write_atomic};
use crate::utility::fs::walk::find_files;

/// Every discovered mod folded into one plan.
#[derive(Debug, Default)]
pub struct LoadedMods {
    pub plan: MergePlan,
    /// Mods whose modfile was interpreted, in discovery order.
    pub loaded: Vec<String>,
    /// Mods skipped because their modfile failed.
    pub failed: Vec<ModfileError>,
}

/// Result of an install pass that found a mods folder.
#[derive(Debug, Default)]
pub struct InstallReport {
    pub loaded: Vec<String>,
    pub failed_mods: Vec<ModfileError>,
    /// Destinations written, game-relative.
    pub written: Vec<PathBuf>,
    /// Subset of `written` that did not exist before.
    pub created: Vec<PathBuf>,
    /// Destinations left untouched because merging, backing up or writing
    /// them failed.
    pub failed_destinations: Vec<(PathBuf, SggmmError)>,
    /// A previous install was rolled back first.
    pub reinstalled: bool,
}

impl InstallReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed_mods.is_empty() && self.failed_destinations.is_empty()
    }
}

#[derive(Debug)]
pub enum InstallOutcome {
    /// The mods folder did not exist and was created empty; nothing else
    /// was done.
    ModsFolderCreated(PathBuf),
    Installed(InstallReport),
}

/// Result of [`uninstall_mods`].
#[derive(Debug)]
pub struct UninstallReport {
    pub restore: RestoreOutcome,
    /// The backup folder existed and was removed, even after failed
    /// restores.
    pub backup_cleared: bool,
    /// The mods folder existed and was removed.
    pub mods_removed: bool,
}

impl UninstallReport {
    /// Every backed-up file made it back.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match &self.restore {
            RestoreOutcome::Restored(report) => report.is_complete(),
            RestoreOutcome::Missing | RestoreOutcome::Empty => true,
        }
    }
}

/// Discovers modfiles under the mods folder, sorted, paired with their mod
/// name (the folder holding the modfile).
///
/// # Errors
///
/// Returns an error if the folder cannot be walked or the modfile name is
/// not a valid glob.
pub fn discover_mods(mods_root: &Path, modfile_name: &str) -> Result<Vec<(String, PathBuf)>> {
    let modfiles = find_files(mods_root, &format!("**/{modfile_name}"))
        .with_context(|| format!("failed to search '{}' for mods", mods_root.display()))?;

    Ok(modfiles
        .into_iter()
        .map(|path| {
            let name = path
                .parent()
                .and_then(Path::file_name)
                .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
            (name, path)
        })
        .collect())
}

/// Reads and interprets every mod into one [`MergePlan`] without touching
/// the game folder.
///
/// A missing mods folder yields an empty plan.
///
/// # Errors
///
/// Returns an error only if discovery fails; broken mods are collected in
/// [`LoadedMods::failed`].
pub fn plan_mods(game_root: &Path, game: Game, layout: &LayoutConfig) -> Result<LoadedMods> {
    let mods_root = layout.mods_root(game_root);
    if !mods_root.is_dir() {
        warn!(path = %mods_root.display(), "mods folder not found");
        return Ok(LoadedMods::default());
    }

    let mut mods = LoadedMods::default();
    for (mod_name, path) in discover_mods(&mods_root, &layout.modfile_name)? {
        match load_mod(&mod_name, &path, game, game_root, layout) {
            Ok(actions) => {
                info!(mod_name, imports = actions.len(), "loaded mod");
                mods.plan.add_mod(actions);
                mods.loaded.push(mod_name);
            }
            Err(e) => {
                error!("{e}");
                mods.failed.push(e);
            }
        }
    }
    Ok(mods)
}

fn load_mod(
    mod_name: &str,
    path: &Path,
    game: Game,
    game_root: &Path,
    layout: &LayoutConfig,
) -> std::result::Result<Vec<MergeAction>, ModfileError> {
    debug!(mod_name, modfile = %path.display(), "reading modfile");
    let modfile = ModFile::load(mod_name, path)?;
    interpret(&modfile, game, game_root, layout)
}

/// Installs every mod found under the mods folder into `game_root`.
///
/// A missing mods folder is created so the user has somewhere to put mods.
/// An existing backup is restored first so a reinstall starts from the
/// original files; the backup itself is kept.
///
/// # Errors
///
/// Returns an error if the mods folder cannot be created, a previous install
/// cannot be fully rolled back or mod discovery fails. Per-mod and
/// per-destination failures are collected in the report instead.
pub fn install_mods(game_root: &Path, game: Game, layout: &LayoutConfig) -> Result<InstallOutcome> {
    let mods_root = layout.mods_root(game_root);
    if !mods_root.is_dir() {
        std::fs::create_dir_all(&mods_root)
            .with_context(|| format!("failed to create mods folder '{}'", mods_root.display()))?;
        warn!(path = %mods_root.display(), "mods folder not found, created it; place mods there");
        return Ok(InstallOutcome::ModsFolderCreated(mods_root));
    }

    let backup_root = layout.backup_root(game_root);
    let reinstalled = backup_root.is_dir();
    if reinstalled {
        info!("previous install found, restoring original files first");
        if let RestoreOutcome::Restored(report) = backup::restore(game_root, &backup_root)? {
            ensure_restored(&report)?;
        }
    }

    let mods = plan_mods(game_root, game, layout)?;
    let mut report = InstallReport {
        loaded: mods.loaded,
        failed_mods: mods.failed,
        reinstalled,
        ..InstallReport::default()
    };

    for (destination, actions) in mods.plan.groups() {
        match apply_destination(game_root, &backup_root, destination, actions) {
            Ok(created) => {
                info!(destination = %destination.display(), created, "merged");
                if created {
                    report.created.push(destination.to_path_buf());
                }
                report.written.push(destination.to_path_buf());
            }
            Err(e) => {
                error!(destination = %destination.display(), "{e}");
                report.failed_destinations.push((destination.to_path_buf(), e));
            }
        }
    }

    info!(
        mods = report.loaded.len(),
        written = report.written.len(),
        failed = report.failed_mods.len() + report.failed_destinations.len(),
        "install finished"
    );
    Ok(InstallOutcome::Installed(report))
}

fn ensure_restored(report: &RestoreReport) -> Result<()> {
    if let Some(first) = report.failed.first() {
        anyhow::bail!(
            "{} file(s) of the previous install could not be restored ({first}); \
             fix the problem or run uninstall before installing again",
            report.failed.len()
        );
    }
    Ok(())
}

/// Merges one destination, secures its original, then writes it. Returns
/// whether the file was created.
fn apply_destination(
    game_root: &Path,
    backup_root: &Path,
    destination: &Path,
    actions: &[MergeAction],
) -> SggmmResult<bool> {
    let merged = merge_destination(game_root, destination, actions)?;

    if merged.created {
        backup::record_created(backup_root, destination)?;
    } else {
        backup::backup([destination], backup_root)?;
    }

    write_atomic(&game_root.join(destination), &merged.to_bytes()).map_err(|source| {
        MergeError::Destination {
            destination: destination.to_path_buf(),
            source,
        }
    })?;
    Ok(merged.created)
}

/// Restores the original files, removes the backup and deletes the mods
/// folder.
///
/// A missing or empty backup is only a warning. Files that fail to restore
/// are reported in [`UninstallReport::restore`]; the backup and the mods
/// folder are removed after the restore pass either way.
///
/// # Errors
///
/// Returns an error if the backup cannot be read or removed, or the mods
/// folder cannot be deleted.
pub fn uninstall_mods(
    game_root: &Path,
    backup_root: &Path,
    mods_root: &Path,
) -> Result<UninstallReport> {
    let restore = backup::restore(game_root, backup_root)?;

    let mut report = UninstallReport {
        restore,
        backup_cleared: false,
        mods_removed: false,
    };
    if !report.is_complete() {
        warn!(
            path = %backup_root.display(),
            "some files could not be restored; validate the game files after uninstalling"
        );
    }

    report.backup_cleared = backup::clear(backup_root)?;
    report.mods_removed = remove_dir_if_exists(mods_root)
        .with_context(|| format!("failed to delete mods folder '{}'", mods_root.display()))?;
    if report.mods_removed {
        info!(path = %mods_root.display(), "mods folder deleted");
    }
    Ok(report)
}
