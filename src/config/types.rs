// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for sggmm.
//!
//! ```text
//! Config: GlobalConfig, LayoutConfig, GameConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use crate::error::ConfigError;
use crate::game::Game;
use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Folder and file names inside a game installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Folder holding one sub-folder per mod.
    pub mods_dir: String,
    /// Folder holding the original-file snapshot.
    pub backup_dir: String,
    /// Declaration file name inside each mod folder.
    pub modfile_name: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mods_dir: "Mods".to_string(),
            backup_dir: "Backup".to_string(),
            modfile_name: "modfile.txt".to_string(),
        }
    }
}

impl LayoutConfig {
    #[must_use]
    pub fn mods_root(&self, game_root: &Path) -> PathBuf {
        game_root.join(&self.mods_dir)
    }

    #[must_use]
    pub fn backup_root(&self, game_root: &Path) -> PathBuf {
        game_root.join(&self.backup_dir)
    }

    /// Checks that every name is a single plain path component and that the
    /// mods and backup folders differ.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("mods_dir", &self.mods_dir),
            ("backup_dir", &self.backup_dir),
            ("modfile_name", &self.modfile_name),
        ] {
            let mut components = Path::new(value).components();
            if !matches!(
                (components.next(), components.next()),
                (Some(Component::Normal(_)), None)
            ) {
                return Err(invalid_layout(
                    key,
                    format!("expected a single file or folder name, got '{value}'"),
                ));
            }
        }
        if self.mods_dir.eq_ignore_ascii_case(&self.backup_dir) {
            return Err(invalid_layout(
                "backup_dir",
                format!("must differ from mods_dir '{}'", self.mods_dir),
            ));
        }
        Ok(())
    }
}

fn invalid_layout(key: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        section: "layout".to_string(),
        key: key.to_string(),
        message,
    }
}

/// Game selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Game to use instead of detecting it from the install path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Game>,
}
