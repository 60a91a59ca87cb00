// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::loader::ConfigSource;
use super::{Config, ConfigLoader};
use crate::config::types::LayoutConfig;
use crate::game::Game;
use crate::logging::LogLevel;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert_eq!(config.global.file_log_level, LogLevel::TRACE);
    assert_eq!(config.global.log_file, None);
    assert_eq!(config.layout, LayoutConfig::default());
    assert_eq!(config.game.name, None);
}

#[test]
fn test_layout_roots() {
    let layout = LayoutConfig::default();
    let root = Path::new("/games/Hades/Content");
    assert_eq!(layout.mods_root(root), PathBuf::from("/games/Hades/Content/Mods"));
    assert_eq!(layout.backup_root(root), PathBuf::from("/games/Hades/Content/Backup"));
}

#[test]
fn test_config_parse() {
    let config = Config::parse(
        r#"
[global]
output_log_level = 4
log_file = "sggmm.log"

[layout]
mods_dir = "MyMods"

[game]
name = "Pyre"
"#,
    )
    .expect("parse should succeed");

    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.global.log_file, Some(PathBuf::from("sggmm.log")));
    assert_eq!(config.layout.mods_dir, "MyMods");
    assert_eq!(config.layout.backup_dir, "Backup");
    assert_eq!(config.game.name, Some(Game::Pyre));
}

#[test]
fn test_game_name_is_case_insensitive() {
    for name in ["transistor", "TRANSISTOR", "Transistor"] {
        let config = Config::parse(&format!("[game]\nname = \"{name}\"")).unwrap();
        assert_eq!(config.game.name, Some(Game::Transistor));
    }
    assert!(Config::parse("[game]\nname = \"Celeste\"").is_err());
}

#[test]
fn test_layout_validation() {
    for toml in [
        "[layout]\nmods_dir = \"\"",
        "[layout]\nmods_dir = \"a/b\"",
        "[layout]\nbackup_dir = \"..\"",
        "[layout]\nmodfile_name = \"/etc/modfile.txt\"",
        "[layout]\nmods_dir = \"Backup\"",
    ] {
        assert!(Config::parse(toml).is_err(), "{toml:?} should be rejected");
    }
}

#[test]
fn test_layout_validation_message() {
    let err = Config::parse("[layout]\nbackup_dir = \"mods\"\nmods_dir = \"Mods\"").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'backup_dir' in section '[layout]': must differ from mods_dir 'Mods'"
    );
}

#[test]
fn test_log_level_out_of_range_is_rejected() {
    assert!(Config::parse("[global]\noutput_log_level = 7").is_err());
}

#[test]
fn test_deny_unknown_fields() {
    assert!(Config::parse("[paths]\nprefix = \"/x\"").is_err());
    assert!(Config::parse("[layout]\nscripts_dir = \"x\"").is_err());
}

#[test]
fn test_format_options() {
    let config = Config::parse("[global]\nlog_file = \"sggmm.log\"\n[game]\nname = \"bastion\"").unwrap();
    insta::assert_snapshot!(config.format_options().join("\n"), @r"
    game.name               = Bastion
    global.file_log_level   = 5
    global.log_file         = sggmm.log
    global.output_log_level = 3
    layout.backup_dir       = Backup
    layout.modfile_name     = modfile.txt
    layout.mods_dir         = Mods
    ");
}

#[test]
fn test_format_options_undetected_game() {
    let options = Config::default().format_options();
    assert!(options.iter().any(|line| line.ends_with("= (detect)")));
}

#[test]
fn test_config_loader_tracks_sources() {
    let local = NamedTempFile::new().expect("failed to create temp file");
    let loader = ConfigLoader::new()
        .add_local_file(local.path())
        .add_local_file("/nonexistent/sggmm.toml")
        .add_toml_str("[global]\noutput_log_level = 2")
        .set("game.name", "pyre")
        .unwrap();
    assert_eq!(
        loader.sources(),
        [
            ConfigSource::Local(local.path().to_path_buf()),
            ConfigSource::Inline,
            ConfigSource::Flag("game.name".to_string()),
        ]
    );

    let config = loader.build().unwrap();
    assert_eq!(config.sources.len(), 3);
    insta::assert_snapshot!(config.format_sources()[1..].join("\n"), @r"
    2. inline toml
    3. command line game.name
    ");
}

#[test]
fn test_format_sources_without_layers() {
    assert_eq!(Config::default().format_sources(), vec!["(defaults only)"]);
}

#[test]
fn test_env_source_is_listed_before_flags() {
    // SAFETY: the variable name is unique to this test.
    unsafe {
        std::env::set_var("SGGMMSRC_GAME__NAME", "bastion");
    }
    let config = ConfigLoader::new()
        .with_env_prefix("SGGMMSRC")
        .set("layout.mods_dir", "Flagged")
        .unwrap()
        .build();
    // SAFETY: same as above.
    unsafe {
        std::env::remove_var("SGGMMSRC_GAME__NAME");
    }

    let config = config.expect("build should succeed");
    assert_eq!(config.game.name, Some(Game::Bastion));
    assert_eq!(
        config.sources,
        vec![
            ConfigSource::Env("SGGMMSRC".to_string()),
            ConfigSource::Flag("layout.mods_dir".to_string()),
        ]
    );
}

#[test]
fn test_config_loader_add_config_file_success() {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    writeln!(file, "[layout]\nbackup_dir = \"Originals\"").expect("failed to write temp file");

    let config = Config::from_file(file.path()).expect("build should succeed");
    assert_eq!(config.layout.backup_dir, "Originals");
}

#[test]
fn test_config_loader_add_config_file_not_found() {
    let result = ConfigLoader::new()
        .add_config_file("/nonexistent/path/to/sggmm.toml")
        .build();
    assert!(result.is_err());
}

#[test]
fn test_config_loader_add_config_file_invalid_toml() {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    writeln!(file, "this is not valid toml {{{{{{").expect("failed to write");

    assert!(ConfigLoader::new().add_config_file(file.path()).build().is_err());
}

#[test]
fn test_config_loader_with_env_prefix() {
    // SAFETY: the variable name is unique to this test.
    unsafe {
        std::env::set_var("SGGMMTEST_LAYOUT__MODS_DIR", "EnvMods");
        std::env::set_var("SGGMMTEST_GLOBAL__OUTPUT_LOG_LEVEL", "1");
    }

    let config = ConfigLoader::new()
        .add_toml_str("[layout]\nmods_dir = \"TomlMods\"")
        .with_env_prefix("SGGMMTEST")
        .build()
        .expect("build should succeed");

    // SAFETY: same as above.
    unsafe {
        std::env::remove_var("SGGMMTEST_LAYOUT__MODS_DIR");
        std::env::remove_var("SGGMMTEST_GLOBAL__OUTPUT_LOG_LEVEL");
    }

    assert_eq!(config.layout.mods_dir, "EnvMods", "env var should override TOML value");
    assert_eq!(config.global.output_log_level, LogLevel::ERROR);
}

#[test]
fn test_config_loader_set_override() {
    let config = ConfigLoader::new()
        .add_toml_str("[global]\noutput_log_level = 3")
        .set("global.output_log_level", 5)
        .expect("set should succeed")
        .build()
        .expect("build should succeed");

    assert_eq!(config.global.output_log_level, LogLevel::TRACE);
}

#[test]
fn test_config_loader_layered_sources() {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    writeln!(
        file,
        r#"
[layout]
mods_dir = "FileMods"
modfile_name = "mod.txt"
"#
    )
    .expect("failed to write");

    let config = ConfigLoader::new()
        .add_config_file(file.path())
        .add_toml_str("[layout]\nmods_dir = \"StringMods\"")
        .build()
        .expect("build should succeed");

    assert_eq!(config.layout.mods_dir, "StringMods", "string should override file");
    assert_eq!(config.layout.modfile_name, "mod.txt", "file value should persist");
}
