// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Merge engine.
//!
//! ```text
//! (destination, [MergeAction..]) --merge_destination()--> MergedFile (in memory)
//!        |                                                    |
//!   read current content (missing = created)            bom + content
//!   expand folder sources (sorted)                      write by the installer
//!   dispatch on the group's single format:
//!     text  -> text::merge   (append / top cursor)
//!     xml   -> xml::merge    (splice under root element)
//!     sjson -> sjson::merge  (ordered deep merge)
//! ```
//!
//! Nothing here writes to disk. A [`MergeError`] aborts one destination.

mod text;
mod xml;

pub mod sjson;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::MergeError;
use crate::plan::{MergeAction, MergeFormat, Placement};
use crate::utility::encoding::{Bom, DecodedText, decode_text, read_text};
use crate::utility::fs::walk::walk;

/// One import's decoded content.
#[derive(Debug)]
struct SourceText {
    path: PathBuf,
    placement: Placement,
    text: String,
}

/// New content for one destination, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedFile {
    /// Destination, relative to the game root.
    pub destination: PathBuf,
    /// BOM the destination carried, re-emitted on write.
    pub bom: Bom,
    pub content: String,
    /// The destination did not exist before the merge.
    pub created: bool,
}

impl MergedFile {
    /// Encoded file content, BOM included.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bom.encode(&self.content)
    }
}

/// The single format shared by every action of a group.
///
/// # Errors
///
/// Returns [`MergeError::ConflictingFormats`] when two actions disagree.
pub fn group_format(destination: &Path, actions: &[MergeAction]) -> Result<MergeFormat, MergeError> {
    let Some(first) = actions.first() else {
        return Ok(MergeFormat::Text);
    };
    match actions.iter().find(|a| a.format != first.format) {
        Some(other) => Err(MergeError::ConflictingFormats {
            destination: destination.to_path_buf(),
            first: first.format.as_str(),
            second: other.format.as_str(),
        }),
        None => Ok(first.format),
    }
}

/// Applies a resolved group of actions to one destination.
///
/// `actions` must already be in resolved order (see
/// [`MergePlan`](crate::plan::MergePlan)).
///
/// # Errors
///
/// Returns a [`MergeError`] if the group mixes formats, a source or the
/// destination cannot be read, or a structured file fails to parse.
pub fn merge_destination(
    game_root: &Path,
    destination: &Path,
    actions: &[MergeAction],
) -> Result<MergedFile, MergeError> {
    let format = group_format(destination, actions)?;
    let target = game_root.join(destination);

    let (current, created) = match fs::read(&target) {
        Ok(bytes) => (decode_text(&bytes), false),
        Err(e) if e.kind() == io::ErrorKind::NotFound => (DecodedText::default(), true),
        Err(source) => {
            return Err(MergeError::Destination {
                destination: destination.to_path_buf(),
                source,
            });
        }
    };

    if current.had_errors {
        return Err(MergeError::Encoding {
            destination: destination.to_path_buf(),
            file: target,
            encoding: current.bom.encoding_name(),
        });
    }

    let sources = read_sources(destination, actions)?;
    debug!(
        destination = %destination.display(),
        %format,
        created,
        sources = sources.len(),
        "merging"
    );

    let content = match format {
        MergeFormat::Text => text::merge(current.text, &sources),
        MergeFormat::Xml => {
            let base = (!created && !current.text.trim().is_empty()).then_some(current.text.as_str());
            xml::merge(base, &sources).map_err(|(index, message)| {
                let file = index.map_or(target.as_path(), |i| sources[i].path.as_path());
                MergeError::format(destination, file, "xml", message)
            })?
        }
        MergeFormat::Sjson => {
            let mut root = sjson::parse(&current.text)
                .map_err(|message| MergeError::format(destination, &target, "sjson", message))?;
            for source in &sources {
                let import = sjson::parse(&source.text).map_err(|message| {
                    MergeError::format(destination, &source.path, "sjson", message)
                })?;
                sjson::merge(&mut root, import);
            }
            sjson::to_string(&root)
        }
    };

    Ok(MergedFile {
        destination: destination.to_path_buf(),
        bom: current.bom,
        content,
        created,
    })
}

/// Reads every action's source; folders expand to their files in sorted
/// order.
fn read_sources(destination: &Path, actions: &[MergeAction]) -> Result<Vec<SourceText>, MergeError> {
    let source_error = |path: &Path, source: io::Error| MergeError::Source {
        destination: destination.to_path_buf(),
        source_path: path.to_path_buf(),
        source,
    };

    let mut sources = Vec::with_capacity(actions.len());
    for action in actions {
        let files = if action.source.is_dir() {
            let entries = walk(&action.source)
                .map_err(|e| source_error(&action.source, io::Error::other(e.to_string())))?;
            if let Some(message) = entries.errors().first() {
                return Err(source_error(&action.source, io::Error::other(message.clone())));
            }
            entries.files().to_vec()
        } else {
            vec![action.source.clone()]
        };

        for path in files {
            trace!(mod_name = %action.mod_name, source = %path.display(), "reading import");
            let decoded = read_text(&path).map_err(|e| source_error(&path, e))?;
            if decoded.had_errors {
                return Err(MergeError::Encoding {
                    destination: destination.to_path_buf(),
                    file: path,
                    encoding: decoded.bom.encoding_name(),
                });
            }
            sources.push(SourceText {
                path,
                placement: action.placement,
                text: decoded.text,
            });
        }
    }
    Ok(sources)
}
