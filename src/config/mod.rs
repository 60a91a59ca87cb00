// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for sggmm.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. sggmm.toml (cwd, optional)
//! 3. --config (repeatable)
//! 4. SGGMM_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! SGGMM_GLOBAL__OUTPUT_LOG_LEVEL=4  → global.output_log_level = 4
//! SGGMM_LAYOUT__MODS_DIR=MyMods     → layout.mods_dir = "MyMods"
//! SGGMM_GAME__NAME=pyre             → game.name = "pyre"
//! ```

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

use loader::{ConfigLoader, ConfigSource};
use types::{GameConfig, GlobalConfig, LayoutConfig};

/// Name of the optional configuration file read from the working directory.
pub const LOCAL_CONFIG_FILE: &str = "sggmm.toml";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Game folder layout.
    pub layout: LayoutConfig,
    /// Game selection.
    pub game: GameConfig,
    /// Layers this configuration was built from, lowest priority first.
    #[serde(skip)]
    pub sources: Vec<ConfigSource>,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sggmm::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_local_file("sggmm.toml")
    ///     .with_env_prefix("SGGMM")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_config_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate values serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout names are not plain folder/file names.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        Ok(())
    }

    /// Format configuration options for display, one `key = value` per line,
    /// sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_layout_options(&mut options);
        self.format_game_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    /// One numbered line per source layer, or a note that only the built-in
    /// defaults apply.
    #[must_use]
    pub fn format_sources(&self) -> Vec<String> {
        if self.sources.is_empty() {
            return vec!["(defaults only)".to_string()];
        }
        self.sources
            .iter()
            .enumerate()
            .map(|(i, source)| format!("{}. {source}", i + 1))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }

    fn format_layout_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("layout.mods_dir".into(), self.layout.mods_dir.clone());
        options.insert("layout.backup_dir".into(), self.layout.backup_dir.clone());
        options.insert(
            "layout.modfile_name".into(),
            self.layout.modfile_name.clone(),
        );
    }

    fn format_game_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "game.name".into(),
            self.game
                .name
                .map_or_else(|| "(detect)".to_string(), |game| game.to_string()),
        );
    }
}
