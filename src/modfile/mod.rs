// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Modfile reading, cleaning and tokenizing.
//!
//! ```text
//! modfile.txt --read_text()--> ModFile --clean/tokenize--> Vec<Directive>
//!   (BOM stripped)                                     command operand [args..]
//! ```
//!
//! Commands: `load`, `import`, `to`, `top`, `xml`, `map`, `sjson`, `include`.
//! Anything else is kept as [`Command::Unknown`] and skipped by the
//! interpreter with a warning.

mod clean;

pub use clean::{clean, strip_comments};

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::ModfileError;
use crate::utility::encoding::read_text;

/// A mod's declaration source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModFile {
    /// Mod name, used in every diagnostic about this mod.
    pub mod_name: String,
    /// Path of the declaration file.
    pub path: PathBuf,
    /// Raw text, BOM already removed.
    pub text: String,
}

impl ModFile {
    /// Reads a modfile from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ModfileError::Read`] if the file cannot be read.
    pub fn load(mod_name: impl Into<String>, path: &Path) -> Result<Self, ModfileError> {
        let mod_name = mod_name.into();
        let decoded = read_text(path).map_err(|source| ModfileError::Read {
            mod_name: mod_name.clone(),
            path: path.to_path_buf(),
            source,
        })?;
        if decoded.had_errors {
            warn!(
                mod_name = %mod_name,
                path = %path.display(),
                "modfile is not valid {}, unreadable bytes were replaced",
                decoded.bom.encoding_name()
            );
        }
        Ok(Self {
            mod_name,
            path: path.to_path_buf(),
            text: decoded.text,
        })
    }

    /// Folder that relative `import` and `include` operands resolve against.
    #[must_use]
    pub fn folder(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Tokenizes this modfile.
    ///
    /// # Errors
    ///
    /// See [`tokenize`].
    pub fn directives(&self) -> Result<Vec<Directive>, ModfileError> {
        tokenize(&self.mod_name, &self.path, &self.text)
    }
}

/// Directive command tag, matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load,
    Import,
    To,
    Top,
    Xml,
    Map,
    Sjson,
    Include,
    Unknown(String),
}

impl Command {
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "load" => Self::Load,
            "import" => Self::Import,
            "to" => Self::To,
            "top" => Self::Top,
            "xml" => Self::Xml,
            "map" => Self::Map,
            "sjson" => Self::Sjson,
            "include" => Self::Include,
            _ => Self::Unknown(token.to_string()),
        }
    }
}

/// One parsed instruction line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub command: Command,
    pub operand: String,
    /// Tokens after the operand.
    pub args: Vec<String>,
    /// 1-based line number in the original modfile.
    pub line: usize,
}

impl Directive {
    /// The last token of the line (the operand when there are no args).
    #[must_use]
    pub fn last_token(&self) -> &str {
        self.args.last().map_or(self.operand.as_str(), String::as_str)
    }
}

/// Splits modfile text into directives.
///
/// Comments are stripped first; line numbers refer to `text` as given.
///
/// # Errors
///
/// Returns [`ModfileError::MalformedDirective`] for the first line that has
/// fewer than two whitespace-separated tokens.
pub fn tokenize(mod_name: &str, file: &Path, text: &str) -> Result<Vec<Directive>, ModfileError> {
    strip_comments(text)
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            let mut tokens = line.split_whitespace();
            match (tokens.next(), tokens.next()) {
                (Some(command), Some(operand)) => Ok(Directive {
                    command: Command::parse(command),
                    operand: operand.to_string(),
                    args: tokens.map(str::to_string).collect(),
                    line: index + 1,
                }),
                _ => Err(ModfileError::MalformedDirective {
                    mod_name: mod_name.to_string(),
                    file: file.to_path_buf(),
                    line: index + 1,
                    message: format!(
                        "expected '<command> <operand>', got '{}'",
                        line.trim()
                    ),
                }),
            }
        })
        .collect()
}
