// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Game profiles.
//!
//! ```text
//! Game        folder name   default script targets
//! Hades       Hades         Scripts/RoomManager.lua
//! Pyre        Pyre          Scripts/Campaign.lua, Scripts/MPScripts.lua
//! Transistor  Transistor    Scripts/AllCampaignScripts.txt
//! Bastion     Bastion       (none)
//! ```
//!
//! Detection looks at the folder that contains the content folder handed to
//! the tool, e.g. `.../common/Hades/Content` is Hades. Unknown layouts fall
//! back to Hades.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::ConfigError;

/// A supported Supergiant Games title.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Game {
    #[default]
    Hades,
    Pyre,
    Transistor,
    Bastion,
}

/// (game, canonical name, default script paths)
const PROFILES: [(Game, &str, &[&str]); 4] = [
    (Game::Hades, "Hades", &["Scripts/RoomManager.lua"]),
    (
        Game::Pyre,
        "Pyre",
        &["Scripts/Campaign.lua", "Scripts/MPScripts.lua"],
    ),
    (
        Game::Transistor,
        "Transistor",
        &["Scripts/AllCampaignScripts.txt"],
    ),
    (Game::Bastion, "Bastion", &[]),
];

impl Game {
    pub const ALL: [Self; 4] = [Self::Hades, Self::Pyre, Self::Transistor, Self::Bastion];

    const fn profile(self) -> (Self, &'static str, &'static [&'static str]) {
        PROFILES[self as usize]
    }

    /// Canonical name, which is also the game's install folder name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.profile().1
    }

    /// Game-relative script files that imports target before any `to`.
    #[must_use]
    pub const fn default_script_paths(self) -> &'static [&'static str] {
        self.profile().2
    }

    /// Guesses the game from an installation path.
    ///
    /// The parent folder name of `install_path` is compared (ASCII
    /// case-insensitive) with the known game folder names.
    ///
    /// ```
    /// use sggmm::game::Game;
    /// use std::path::Path;
    ///
    /// assert_eq!(Game::guess(Path::new("/steam/common/Pyre/Content")), Game::Pyre);
    /// assert_eq!(Game::guess(Path::new("/somewhere/else")), Game::Hades);
    /// ```
    #[must_use]
    pub fn guess(install_path: &Path) -> Self {
        install_path
            .parent()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
            .and_then(|name| {
                Self::ALL
                    .into_iter()
                    .find(|game| game.name().eq_ignore_ascii_case(name))
            })
            .unwrap_or_default()
    }

    /// The game to mod at `install_path`: `requested` if given, otherwise
    /// the guessed one. A request that disagrees with the guess is logged.
    #[must_use]
    pub fn select(requested: Option<Self>, install_path: &Path) -> Self {
        let guessed = Self::guess(install_path);
        match requested {
            Some(game) if game != guessed => {
                warn!(
                    requested = %game,
                    detected = %guessed,
                    path = %install_path.display(),
                    "game differs from the one detected from the path"
                );
                game
            }
            Some(game) => game,
            None => {
                debug!(game = %guessed, "detected game from path");
                guessed
            }
        }
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Game {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|game| game.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::InvalidValue {
                section: "game".to_string(),
                key: "name".to_string(),
                message: format!("expected one of Hades, Pyre, Transistor, Bastion, got '{s}'"),
            })
    }
}

impl TryFrom<String> for Game {
    type Error = ConfigError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}
