// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use std::io::Write;

use sggmm::config::Config;
use sggmm::config::loader::ConfigLoader;
use sggmm::game::Game;
use tempfile::NamedTempFile;

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_full() {
    let toml = r#"
[global]
output_log_level = 2
file_log_level = 4
log_file = "logs/sggmm.log"

[layout]
mods_dir = "Mods"
backup_dir = "Originals"
modfile_name = "modfile.txt"

[game]
name = "Hades"
"#;
    let config = Config::parse(toml).unwrap();
    insta::assert_yaml_snapshot!(config, @r"
    global:
      output_log_level: 2
      file_log_level: 4
      log_file: logs/sggmm.log
    layout:
      mods_dir: Mods
      backup_dir: Originals
      modfile_name: modfile.txt
    game:
      name: hades
    ");
}

#[test]
fn config_parse_empty_uses_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config.layout.mods_dir, "Mods");
    assert_eq!(config.layout.backup_dir, "Backup");
    assert_eq!(config.layout.modfile_name, "modfile.txt");
    assert_eq!(config.game.name, None);
}

#[test]
fn config_rejects_unknown_section() {
    let err = Config::parse("[paths]\nprefix = \"/build\"").unwrap_err();
    assert!(err.to_string().contains("paths"), "{err}");
}

#[test]
fn config_rejects_nested_layout_names() {
    let err = Config::parse("[layout]\nbackup_dir = \"Saves/Backup\"").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'backup_dir' in section '[layout]': expected a single file or folder name, got 'Saves/Backup'"
    );
}

// =============================================================================
// Layered loading
// =============================================================================

#[test]
fn config_later_files_override_earlier() {
    let mut base = NamedTempFile::new().unwrap();
    writeln!(base, "[game]\nname = \"pyre\"\n[layout]\nmods_dir = \"BaseMods\"").unwrap();
    let mut local = NamedTempFile::new().unwrap();
    writeln!(local, "[game]\nname = \"transistor\"").unwrap();

    let loader = ConfigLoader::new()
        .add_config_file(base.path())
        .add_config_file(local.path());
    assert_eq!(loader.sources().len(), 2);

    let config = loader.build().unwrap();
    assert_eq!(config.game.name, Some(Game::Transistor));
    assert_eq!(config.layout.mods_dir, "BaseMods");
}

#[test]
fn config_missing_optional_file_is_ignored() {
    let config = ConfigLoader::new()
        .add_local_file("/definitely/not/here/sggmm.toml")
        .build()
        .unwrap();
    assert_eq!(config.layout.mods_dir, "Mods");
}
