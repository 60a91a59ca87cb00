// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for sggmm using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! sggmm [global options] <command>
//! install   [GAME_PATH]
//! uninstall [GAME_PATH]          (alias: clean)
//! plan      [GAME_PATH] [--json]
//! options
//! version
//! ```

pub mod global;
pub mod target;


use crate::cli::global::GlobalOptions;
use crate::cli::target::{GameArgs, PlanArgs};
use clap::{Parser, Subcommand};

/// Supergiant Games Mod Manager
///
/// Installs and uninstalls mods for Hades, Pyre, Transistor and Bastion.
#[derive(Debug, Parser)]
#[command(
    name = "sggmm",
    author,
    version,
    about = "Supergiant Games Mod Manager",
    long_about = "sggmm Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Installs mods for Supergiant Games titles. Drop mod folders into\n\
                  <game>/Mods/, each with a modfile.txt, then run `sggmm install`\n\
                  from the game's content folder (or pass its path). `sggmm\n\
                  uninstall` restores the original files.",
    after_help = "CONFIG FILES:\n\n\
                  sggmm reads `sggmm.toml` from the current directory if present.\n\
                  Additional files can be given with --config; later files override\n\
                  earlier ones. SGGMM_<SECTION>__<KEY> environment variables\n\
                  override both, and command-line flags override everything."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their effective values.
    Options,

    /// Backs up the original files and installs every mod.
    Install(GameArgs),

    /// Restores the original files and deletes the mods folder.
    #[command(visible_alias = "clean")]
    Uninstall(GameArgs),

    /// Shows what install would merge, without writing anything.
    Plan(PlanArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
