// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `plan` command.
//!
//! ```text
//! Scripts/RoomManager.lua (text)
//!   top       prio 0  TopMod    Mods/TopMod/header.lua
//!   append    prio 1  Demo      Mods/Demo/foo.lua
//! ```

use anyhow::Context;

use crate::cli::target::PlanArgs;
use crate::config::Config;
use crate::error::Result;
use crate::game::Game;
use crate::install::plan_mods;
use crate::merge::group_format;
use crate::plan::{MergePlan, Placement};

/// Prints the merge plan install would apply.
///
/// # Errors
///
/// Returns an error if the game folder is missing, discovery fails or a mod
/// could not be interpreted.
pub fn run_plan_command(args: &PlanArgs, config: &Config) -> Result<()> {
    let game_root = super::game_root(&args.target)?;
    let game = Game::select(config.game.name, &game_root);
    let mods = plan_mods(&game_root, game, &config.layout)?;

    if args.json {
        let json = serde_json::to_string_pretty(&mods.plan).context("failed to serialize plan")?;
        println!("{json}");
    } else {
        for line in format_plan(&mods.plan, &game_root) {
            println!("{line}");
        }
    }

    if let Some(first) = mods.failed.first() {
        anyhow::bail!("{} mod(s) failed to load: {first}", mods.failed.len());
    }
    Ok(())
}

/// Human-readable plan, one header per destination and one line per import.
/// Sources are shown relative to `game_root` when they lie under it.
#[must_use]
pub fn format_plan(plan: &MergePlan, game_root: &std::path::Path) -> Vec<String> {
    let mut lines = Vec::with_capacity(plan.len() + plan.destinations().count());
    for (destination, actions) in plan.groups() {
        let format = group_format(destination, actions)
            .map_or_else(|_| "mixed".to_string(), |f| f.to_string());
        lines.push(format!("{} ({format})", destination.display()));
        for action in actions {
            let placement = match action.placement {
                Placement::Top => "top",
                Placement::Append => "append",
            };
            let source = action
                .source
                .strip_prefix(game_root)
                .unwrap_or(&action.source);
            lines.push(format!(
                "  {placement:<9} prio {:<2} {:<9} {}",
                action.priority,
                action.mod_name,
                source.display()
            ));
        }
    }
    lines
}
