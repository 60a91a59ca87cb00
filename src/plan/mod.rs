// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Merge plans.
//!
//! ```text
//! ModFile --interpret()--> Vec<MergeAction> --MergePlan::add_mod()--> MergePlan
//!                                                                       |
//!   destination A: [top.., prio 0.., prio 1.., ...]   <-- finalize() ---+
//!   destination B: [...]
//! ```
//!
//! Ordering inside a destination: `Top` placements first, then ascending
//! priority, then sequence (mod discovery order, then declaration order).
//! A higher priority is applied later and therefore wins.

mod include;
mod interpreter;

pub use interpreter::{interpret, resolve_destination};

use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// How an import is merged into its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeFormat {
    /// Plain text concatenation.
    Text,
    /// Splice under the destination's root element.
    Xml,
    /// Ordered-map deep merge.
    Sjson,
}

impl MergeFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Xml => "xml",
            Self::Sjson => "sjson",
        }
    }
}

impl std::fmt::Display for MergeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where imported content lands. `Top` sorts before `Append`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Top,
    Append,
}

/// One resolved import into one destination file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeAction {
    pub mod_name: String,
    /// Import source, absolute or relative to the working directory.
    pub source: PathBuf,
    /// Destination, relative to the game root.
    pub destination: PathBuf,
    pub format: MergeFormat,
    pub placement: Placement,
    pub priority: i64,
    /// Position in discovery/declaration order, assigned by [`MergePlan`].
    pub sequence: usize,
}

impl MergeAction {
    fn order_key(&self) -> (Placement, i64, usize) {
        (self.placement, self.priority, self.sequence)
    }
}

/// All pending imports, grouped by destination.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct MergePlan {
    groups: IndexMap<PathBuf, Vec<MergeAction>>,
    #[serde(skip)]
    next_sequence: usize,
}

impl MergePlan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one mod's actions, in declaration order, after everything added
    /// so far. Groups are re-sorted.
    pub fn add_mod(&mut self, actions: impl IntoIterator<Item = MergeAction>) {
        for mut action in actions {
            action.sequence = self.next_sequence;
            self.next_sequence += 1;
            self.groups
                .entry(action.destination.clone())
                .or_default()
                .push(action);
        }
        for group in self.groups.values_mut() {
            group.sort_by_key(MergeAction::order_key);
        }
    }

    /// Destination groups in first-seen order, each in resolved order.
    pub fn groups(&self) -> impl Iterator<Item = (&Path, &[MergeAction])> {
        self.groups
            .iter()
            .map(|(dest, actions)| (dest.as_path(), actions.as_slice()))
    }

    /// Resolved actions for one destination.
    #[must_use]
    pub fn group(&self, destination: &Path) -> Option<&[MergeAction]> {
        self.groups.get(destination).map(Vec::as_slice)
    }

    pub fn destinations(&self) -> impl Iterator<Item = &Path> {
        self.groups.keys().map(PathBuf::as_path)
    }

    /// Number of actions across all destinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
