// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration loading.
//!
//! ```text
//! ConfigLoader::new()
//!   .add_local_file("sggmm.toml")     skipped when absent
//!   .add_config_file(--config)..      must exist
//!   .with_env_prefix("SGGMM")         SGGMM_<SECTION>__<KEY>
//!   .set("game.name", ..)             command-line flags
//!        |
//!        v
//!    build() --> Config { sources, .. } (validated)
//! ```
//!
//! Later layers win key by key.

use std::fmt;
use std::path::{Path, PathBuf};

use config::{Environment, File, FileFormat};

use super::Config;
use crate::error::Result;

/// One layer that contributed to a [`Config`], lowest priority first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `sggmm.toml` found in the working directory.
    Local(PathBuf),
    /// A file passed with `--config`.
    File(PathBuf),
    /// TOML text given directly.
    Inline,
    /// Environment variables under a prefix.
    Env(String),
    /// A command-line flag, by config key.
    Flag(String),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "local file {}", path.display()),
            Self::File(path) => write!(f, "config file {}", path.display()),
            Self::Inline => f.write_str("inline toml"),
            Self::Env(prefix) => write!(f, "environment {prefix}_*"),
            Self::Flag(key) => write!(f, "command line {key}"),
        }
    }
}

/// Stacks configuration layers over the built-in defaults.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    /// Adds the working-directory config file. It is only listed as a source
    /// when it exists; a missing file is not an error.
    #[must_use]
    pub fn add_local_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(false));
        if path.is_file() {
            self.sources.push(ConfigSource::Local(path.to_path_buf()));
        }
        self
    }

    /// Adds an explicitly requested config file; [`build`](Self::build)
    /// fails if it is missing or not valid TOML.
    #[must_use]
    pub fn add_config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(true));
        self.sources.push(ConfigSource::File(path.to_path_buf()));
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources.push(ConfigSource::Inline);
        self
    }

    /// Reads `<PREFIX>_<SECTION>__<KEY>` environment variables, e.g.
    /// `SGGMM_LAYOUT__MODS_DIR`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Overrides one key (`section.key`) above every other layer.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid config path.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| anyhow::anyhow!("invalid override '{key}': {e}"))?;
        self.sources.push(ConfigSource::Flag(key.to_string()));
        Ok(self)
    }

    /// Layers added so far, lowest priority first.
    #[must_use]
    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// Merges every layer into a validated [`Config`].
    ///
    /// # Errors
    ///
    /// Returns an error if a `--config` file is missing, a file is not valid
    /// TOML, a value has the wrong type or an unknown key, or the layout
    /// names fail validation.
    pub fn build(mut self) -> Result<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => {
                let marker = format!("{prefix}_");
                if std::env::vars_os().any(|(key, _)| key.to_string_lossy().starts_with(&marker)) {
                    // Flags stay last in the listing, matching their priority.
                    let flags = self.sources.iter().position(|s| matches!(s, ConfigSource::Flag(_)));
                    let at = flags.unwrap_or(self.sources.len());
                    self.sources.insert(at, ConfigSource::Env(prefix.clone()));
                }
                self.builder.add_source(
                    Environment::with_prefix(prefix)
                        .prefix_separator("_")
                        .separator("__")
                        .try_parsing(true),
                )
            }
            None => self.builder,
        };

        let mut config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        config.sources = self.sources;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
