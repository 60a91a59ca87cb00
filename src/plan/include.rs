// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use crate::error::ModfileError;

/// Modfiles currently being expanded, outermost first.
#[derive(Debug, Default)]
pub(super) struct IncludeGuard {
    /// (identity used for comparison, path as written for diagnostics)
    stack: Vec<(PathBuf, PathBuf)>,
}

impl IncludeGuard {
    /// Pushes `path`, failing if it is already on the stack.
    pub(super) fn enter(&mut self, mod_name: &str, path: &Path) -> Result<(), ModfileError> {
        let identity = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if let Some(pos) = self.stack.iter().position(|(seen, _)| *seen == identity) {
            let chain = self.stack[pos..]
                .iter()
                .map(|(_, shown)| shown.clone())
                .chain(std::iter::once(path.to_path_buf()))
                .collect();
            return Err(ModfileError::CyclicInclude {
                mod_name: mod_name.to_string(),
                chain,
            });
        }

        self.stack.push((identity, path.to_path_buf()));
        Ok(())
    }

    pub(super) fn leave(&mut self) {
        self.stack.pop();
    }

    pub(super) fn depth(&self) -> usize {
        self.stack.len()
    }
}
