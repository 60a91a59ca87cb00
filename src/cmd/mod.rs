// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   install, uninstall, plan, config (options)
//! ```

pub mod config;
pub mod install;
pub mod plan;
pub mod uninstall;

use std::path::PathBuf;

use anyhow::Context;

use crate::cli::target::GameArgs;
use crate::error::{FsError, Result};

/// Resolves the game folder a command works on to an existing, canonical
/// path, so game detection sees the real parent folder name.
fn game_root(args: &GameArgs) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("failed to read the current directory")?;
    let root = args.game_root(&cwd);
    if !root.is_dir() {
        return Err(FsError::NotFound(root.display().to_string()).into());
    }
    root.canonicalize()
        .with_context(|| format!("failed to resolve game folder '{}'", root.display()))
}
