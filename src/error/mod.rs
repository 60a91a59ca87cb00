// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            SggmmError (one pointer + tag)
//!                      |
//!   +---------+--------+--------+---------+
//!   |         |        |        |         |
//!   v         v        v        v         v
//! Modfile   Merge   Backup   Config      Fs
//!   Box      Box      Box      Box       Box
//!
//! Sub-errors (unboxed internally):
//!   Modfile  MalformedDirective, CyclicInclude, Read
//!   Merge    Format, ConflictingFormats, Encoding, Source, Destination
//!   Backup   NoGameRoot, OutsideGameRoot, Copy, RestoreCopy, Manifest,
//!            Walk, Clear
//!   Config   InvalidValue
//!   Fs       NotFound
//! ```
//!
//! Isolation scopes: a `ModfileError` aborts one mod, a `MergeError` aborts
//! one destination, a `BackupError::RestoreCopy` skips one file.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`SggmmError`].
pub type SggmmResult<T> = std::result::Result<T, SggmmError>;

/// Top-level error for failures the installer collects per destination.
///
/// All sub-errors are boxed to keep this enum pointer-sized on the stack.
#[derive(Debug, Error)]
pub enum SggmmError {
    /// Modfile parsing or interpretation failed.
    #[error("modfile error: {0}")]
    Modfile(#[from] Box<ModfileError>),

    /// Merging into a destination failed.
    #[error("merge error: {0}")]
    Merge(#[from] Box<MergeError>),

    /// Backup or restore failed.
    #[error("backup error: {0}")]
    Backup(#[from] Box<BackupError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for SggmmError {
                fn from(err: $error) -> Self {
                    SggmmError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ModfileError => Modfile,
    MergeError => Merge,
    BackupError => Backup,
    ConfigError => Config,
    FsError => Fs,
}

// --- Modfile Errors ---

/// Errors raised while reading, tokenizing or interpreting a modfile.
///
/// Any of these aborts the offending mod only.
#[derive(Debug, Error)]
pub enum ModfileError {
    /// A directive line could not be understood.
    #[error("malformed directive in mod '{mod_name}' at {}:{line}: {message}", .file.display())]
    MalformedDirective {
        mod_name: String,
        file: PathBuf,
        line: usize,
        message: String,
    },

    /// An `include` chain loops back onto a modfile already being expanded.
    #[error("cyclic include in mod '{mod_name}': {}", format_chain(.chain))]
    CyclicInclude { mod_name: String, chain: Vec<PathBuf> },

    /// The modfile (or an included one) could not be read.
    #[error("failed to read modfile '{}' of mod '{mod_name}': {source}", .path.display())]
    Read {
        mod_name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ModfileError {
    /// Name of the mod this error belongs to.
    #[must_use]
    pub fn mod_name(&self) -> &str {
        match self {
            Self::MalformedDirective { mod_name, .. }
            | Self::CyclicInclude { mod_name, .. }
            | Self::Read { mod_name, .. } => mod_name,
        }
    }
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

// --- Merge Errors ---

/// Errors raised while merging imports into one destination file.
///
/// Any of these aborts that destination only; nothing is written for it.
#[derive(Debug, Error)]
pub enum MergeError {
    /// A structured file (destination or import) could not be parsed.
    #[error("cannot merge into '{}': failed to parse '{}' as {format}: {message}", .destination.display(), .file.display())]
    Format {
        destination: PathBuf,
        file: PathBuf,
        format: &'static str,
        message: String,
    },

    /// Imports of different formats target the same destination.
    #[error("conflicting merge formats for '{}': {first} and {second}", .destination.display())]
    ConflictingFormats {
        destination: PathBuf,
        first: &'static str,
        second: &'static str,
    },

    /// An import source could not be read.
    #[error("failed to read import '{}' for '{}': {source}", .source_path.display(), .destination.display())]
    Source {
        destination: PathBuf,
        source_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A destination or import is not valid text in its encoding.
    #[error("cannot merge into '{}': '{}' is not valid {encoding} text", .destination.display(), .file.display())]
    Encoding {
        destination: PathBuf,
        file: PathBuf,
        encoding: &'static str,
    },

    /// The destination could not be read or written.
    #[error("failed to access destination '{}': {source}", .destination.display())]
    Destination {
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MergeError {
    pub(crate) fn format(
        destination: &Path,
        file: &Path,
        format: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::Format {
            destination: destination.to_path_buf(),
            file: file.to_path_buf(),
            format,
            message: message.into(),
        }
    }
}

// --- Backup Errors ---

/// Backup store errors.
#[derive(Debug, Error)]
pub enum BackupError {
    /// The backup root has no parent that could act as game root.
    #[error("backup folder '{}' has no parent game folder", .0.display())]
    NoGameRoot(PathBuf),

    /// A file to back up lies outside the game root.
    #[error("'{}' is not inside game folder '{}'", .path.display(), .game_root.display())]
    OutsideGameRoot { path: PathBuf, game_root: PathBuf },

    /// Copying a file into the backup failed.
    #[error("failed to back up '{}' to '{}': {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Copying a backed-up file back into the game folder failed.
    #[error("unable to restore file '{}': {source}", .path.display())]
    RestoreCopy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The created-files manifest could not be read or written.
    #[error("invalid backup manifest '{}': {message}", .path.display())]
    Manifest { path: PathBuf, message: String },

    /// The backup folder could not be listed.
    #[error("failed to read backup folder '{}': {message}", .path.display())]
    Walk { path: PathBuf, message: String },

    /// The backup folder could not be removed.
    #[error("failed to remove backup folder '{}': {source}", .path.display())]
    Clear {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),
}
