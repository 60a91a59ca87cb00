// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     ← Additional config files (can repeat)
//! --game NAME       ← game.name override (skips detection)
//! --log-level N     ← Console verbosity (0-6)
//! --verbose         ← Same as --log-level 4
//! --log-file FILE   ← global.log_file override
//!
//! Precedence: CLI flags > SGGMM_* env > --config > sggmm.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::loader::ConfigLoader;
use crate::error::Result;
use crate::game::Game;
use crate::logging::LogLevel;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(long = "config", value_name = "FILE", global = true, action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Game to mod instead of detecting it from the game path.
    #[arg(short = 'g', long = "game", value_name = "GAME", global = true, value_enum, ignore_case = true)]
    pub game: Option<Game>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", global = true, value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// Shows debug output, same as --log-level 4.
    #[arg(short = 'v', long = "verbose", global = true, conflicts_with = "log_level")]
    pub verbose: bool,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,
}

impl GlobalOptions {
    /// Console level requested on the command line, if any.
    #[must_use]
    pub fn console_level(&self) -> Option<LogLevel> {
        if self.verbose {
            return Some(LogLevel::DEBUG);
        }
        self.log_level.and_then(LogLevel::from_u8)
    }

    /// Layers the command-line flags over `loader` as the highest-priority
    /// source.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be stored.
    pub fn apply_overrides(&self, mut loader: ConfigLoader) -> Result<ConfigLoader> {
        if let Some(level) = self.console_level() {
            loader = loader.set("global.output_log_level", i64::from(level.as_u8()))?;
        }
        if let Some(path) = &self.log_file {
            loader = loader.set("global.log_file", path.display().to_string())?;
        }
        if let Some(game) = self.game {
            loader = loader.set("game.name", game.name())?;
        }
        Ok(loader)
    }
}
