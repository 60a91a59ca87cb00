// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `uninstall` command.

use tracing::info;

use crate::backup::RestoreOutcome;
use crate::cli::target::GameArgs;
use crate::config::Config;
use crate::error::Result;
use crate::install::uninstall_mods;

/// Restores the original game files and deletes the mods folder.
///
/// # Errors
///
/// Returns an error if the game folder is missing, the backup cannot be
/// read or removed, or some files could not be restored (the backup and
/// mods folder are still removed in that case).
pub fn run_uninstall_command(args: &GameArgs, config: &Config) -> Result<()> {
    let game_root = super::game_root(args)?;
    let backup_root = config.layout.backup_root(&game_root);
    let mods_root = config.layout.mods_root(&game_root);
    info!(path = %game_root.display(), "uninstalling mods");

    let report = uninstall_mods(&game_root, &backup_root, &mods_root)?;
    match &report.restore {
        RestoreOutcome::Missing => println!("No backup found, nothing to restore"),
        RestoreOutcome::Empty => {
            println!("Backup is empty; verify the game files if the game misbehaves");
        }
        RestoreOutcome::Restored(restore) => {
            println!(
                "{} file(s) restored, {} unchanged, {} removed",
                restore.restored.len(),
                restore.unchanged.len(),
                restore.removed.len() + restore.removed_dirs.len()
            );
            for err in &restore.failed {
                println!("failed    {err}");
            }
        }
    }

    if report.mods_removed {
        println!("Deleted {}", mods_root.display());
    }
    if let RestoreOutcome::Restored(restore) = &report.restore
        && !restore.is_complete()
    {
        anyhow::bail!(
            "{} file(s) could not be restored; validate the game files",
            restore.failed.len()
        );
    }
    Ok(())
}
