// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `install` command.

use tracing::info;

use crate::cli::target::GameArgs;
use crate::config::Config;
use crate::error::Result;
use crate::game::Game;
use crate::install::{InstallOutcome, InstallReport, install_mods};

/// Installs every mod of the selected game folder.
///
/// # Errors
///
/// Returns an error if the game folder is missing, the install cannot start,
/// or any mod or destination failed.
pub fn run_install_command(args: &GameArgs, config: &Config) -> Result<()> {
    let game_root = super::game_root(args)?;
    let game = Game::select(config.game.name, &game_root);
    info!(%game, path = %game_root.display(), "installing mods");

    match install_mods(&game_root, game, &config.layout)? {
        InstallOutcome::ModsFolderCreated(path) => {
            println!("Created {}, place your mods there and run install again", path.display());
            Ok(())
        }
        InstallOutcome::Installed(report) => {
            print_report(&report);
            if report.is_clean() {
                Ok(())
            } else {
                anyhow::bail!(
                    "{} mod(s) and {} file(s) failed, see the log above",
                    report.failed_mods.len(),
                    report.failed_destinations.len()
                )
            }
        }
    }
}

fn print_report(report: &InstallReport) {
    for name in &report.loaded {
        println!("loaded    {name}");
    }
    for err in &report.failed_mods {
        println!("skipped   {}", err.mod_name());
    }
    for path in &report.written {
        let tag = if report.created.contains(path) { "created" } else { "merged" };
        println!("{tag:<9} {}", path.display());
    }
    for (path, _) in &report.failed_destinations {
        println!("failed    {}", path.display());
    }
    println!(
        "{} mod(s) installed into {} file(s)",
        report.loaded.len(),
        report.written.len()
    );
}
