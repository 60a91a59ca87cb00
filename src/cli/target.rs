// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Game folder arguments.

use clap::Args;
use std::path::{Path, PathBuf};

/// The game installation a command works on.
#[derive(Debug, Clone, Default, Args)]
pub struct GameArgs {
    /// Game content folder, e.g. `.../steamapps/common/Hades/Content`.
    /// Defaults to the current directory.
    #[arg(value_name = "GAME_PATH")]
    pub game_path: Option<PathBuf>,
}

impl GameArgs {
    /// The game root, falling back to `cwd`.
    #[must_use]
    pub fn game_root(&self, cwd: &Path) -> PathBuf {
        self.game_path
            .as_ref()
            .map_or_else(|| cwd.to_path_buf(), |path| cwd.join(path))
    }
}

/// Arguments for the `plan` command.
#[derive(Debug, Clone, Default, Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub target: GameArgs,

    /// Prints the plan as JSON.
    #[arg(long)]
    pub json: bool,
}
