// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::BackupError;
use crate::utility::fs::copy::write_atomic;

/// File inside the backup folder listing game-relative paths the install
/// created.
pub const CREATED_MANIFEST: &str = ".sggmm-created.json";

/// Paths, relative to the game root, that did not exist before install.
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct Manifest {
    pub(super) created: BTreeSet<PathBuf>,
    /// Folders made to hold created files.
    #[serde(default)]
    pub(super) created_dirs: BTreeSet<PathBuf>,
}

impl Manifest {
    pub(super) fn is_empty(&self) -> bool {
        self.created.is_empty() && self.created_dirs.is_empty()
    }
}

fn manifest_error(path: &Path, message: impl ToString) -> BackupError {
    BackupError::Manifest {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Reads the manifest; a missing file is an empty manifest.
pub(super) fn load(backup_root: &Path) -> Result<Manifest, BackupError> {
    let path = backup_root.join(CREATED_MANIFEST);
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Manifest::default()),
        Err(e) => return Err(manifest_error(&path, e)),
    };
    serde_json::from_slice(&bytes).map_err(|e| manifest_error(&path, e))
}

pub(super) fn save(backup_root: &Path, manifest: &Manifest) -> Result<(), BackupError> {
    let path = backup_root.join(CREATED_MANIFEST);
    let json = serde_json::to_vec_pretty(manifest).map_err(|e| manifest_error(&path, e))?;
    write_atomic(&path, &json).map_err(|e| manifest_error(&path, e))
}
