// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::*;
use crate::error::BackupError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Game {
    temp: TempDir,
}

impl Game {
    fn new() -> Self {
        let game = Self {
            temp: TempDir::new().unwrap(),
        };
        game.write("Scripts/RoomManager.lua", "-- original\n");
        game.write("Scripts/Combat.lua", "-- combat\n");
        game.write("Game/Text/en/HelpText.sjson", "Texts = []\n");
        game
    }

    fn root(&self) -> &Path {
        self.temp.path()
    }

    fn backup_root(&self) -> PathBuf {
        self.root().join("Backup")
    }

    fn write(&self, rel: &str, content: &str) {
        let path = self.root().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.root().join(rel)).unwrap()
    }
}

fn restored(outcome: RestoreOutcome) -> RestoreReport {
    match outcome {
        RestoreOutcome::Restored(report) => report,
        other => panic!("expected a restore, got {other:?}"),
    }
}

#[test]
fn test_backup_copies_then_skips() {
    let game = Game::new();
    let files = ["Scripts/RoomManager.lua", "Scripts/Combat.lua"];

    let first = backup(files, &game.backup_root()).unwrap();
    assert_eq!(first.copied.len(), 2);
    assert!(first.skipped.is_empty());
    assert_eq!(
        fs::read_to_string(game.backup_root().join("Scripts/Combat.lua")).unwrap(),
        "-- combat\n"
    );

    game.write("Scripts/RoomManager.lua", "-- modded\n");
    let second = backup(files, &game.backup_root()).unwrap();
    assert!(second.copied.is_empty());
    assert_eq!(second.skipped.len(), 2);
    assert_eq!(
        fs::read_to_string(game.backup_root().join("Scripts/RoomManager.lua")).unwrap(),
        "-- original\n"
    );
}

#[test]
fn test_backup_accepts_absolute_paths_and_dirs() {
    let game = Game::new();
    let abs = game.root().join("Game/Text/en/HelpText.sjson");
    let dir = game.root().join("Scripts");

    let report = backup([abs.as_path(), dir.as_path()], &game.backup_root()).unwrap();
    assert_eq!(
        report.copied,
        vec![PathBuf::from("Game/Text/en/HelpText.sjson"), PathBuf::from("Scripts")]
    );
    assert!(game.backup_root().join("Scripts").is_dir());
    assert!(!game.backup_root().join("Scripts/Combat.lua").exists());
}

#[test]
fn test_backup_reports_missing_files() {
    let game = Game::new();
    let report = backup(["Scripts/New.lua"], &game.backup_root()).unwrap();
    assert_eq!(report.missing, vec![PathBuf::from("Scripts/New.lua")]);
    assert!(report.copied.is_empty());
}

#[test]
fn test_backup_rejects_outside_paths() {
    let game = Game::new();
    let other = TempDir::new().unwrap();
    let err = backup([other.path().join("x.lua")], &game.backup_root()).unwrap_err();
    assert!(matches!(err, BackupError::OutsideGameRoot { .. }));
}

#[test]
fn test_restore_then_clear_round_trip() {
    let game = Game::new();
    backup(
        ["Scripts/RoomManager.lua", "Scripts/Combat.lua"],
        &game.backup_root(),
    )
    .unwrap();
    record_created(&game.backup_root(), Path::new("Scripts/New.lua")).unwrap();

    game.write("Scripts/RoomManager.lua", "-- original\n-- mod\n");
    game.write("Scripts/New.lua", "-- created by a mod\n");

    let report = restored(restore(game.root(), &game.backup_root()).unwrap());
    assert!(report.is_complete());
    assert_eq!(report.restored, vec![PathBuf::from("Scripts/RoomManager.lua")]);
    assert_eq!(report.unchanged, vec![PathBuf::from("Scripts/Combat.lua")]);
    assert_eq!(report.removed, vec![PathBuf::from("Scripts/New.lua")]);

    assert_eq!(game.read("Scripts/RoomManager.lua"), "-- original\n");
    assert!(!game.root().join("Scripts/New.lua").exists());
    assert!(!game.root().join(CREATED_MANIFEST).exists());

    assert!(clear(&game.backup_root()).unwrap());
    assert!(!game.backup_root().exists());
    assert!(!clear(&game.backup_root()).unwrap());
}

#[test]
fn test_restore_recreates_deleted_files() {
    let game = Game::new();
    backup(["Scripts/Combat.lua"], &game.backup_root()).unwrap();
    fs::remove_dir_all(game.root().join("Scripts")).unwrap();

    let report = restored(restore(game.root(), &game.backup_root()).unwrap());
    assert_eq!(report.restored, vec![PathBuf::from("Scripts/Combat.lua")]);
    assert_eq!(game.read("Scripts/Combat.lua"), "-- combat\n");
}

#[test]
fn test_restore_missing_backup() {
    let game = Game::new();
    let outcome = restore(game.root(), &game.backup_root()).unwrap();
    assert!(matches!(outcome, RestoreOutcome::Missing));
}

#[test]
fn test_restore_empty_backup() {
    let game = Game::new();
    fs::create_dir_all(game.backup_root()).unwrap();
    let outcome = restore(game.root(), &game.backup_root()).unwrap();
    assert!(matches!(outcome, RestoreOutcome::Empty));
}

#[cfg(unix)]
#[test]
fn test_restore_continues_past_failures() {
    use std::os::unix::fs::PermissionsExt;

    let game = Game::new();
    backup(
        ["Scripts/Combat.lua", "Game/Text/en/HelpText.sjson"],
        &game.backup_root(),
    )
    .unwrap();
    game.write("Scripts/Combat.lua", "-- modded\n");
    game.write("Game/Text/en/HelpText.sjson", "Texts = [ 1 ]\n");

    let locked = game.root().join("Game/Text/en");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();
    fs::set_permissions(locked.join("HelpText.sjson"), fs::Permissions::from_mode(0o444)).unwrap();

    let report = restored(restore(game.root(), &game.backup_root()).unwrap());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    // Root ignores permission bits, so only assert the failure when one happened.
    if !report.failed.is_empty() {
        assert!(matches!(report.failed[0], BackupError::RestoreCopy { .. }));
    }
    assert_eq!(report.restored.last(), Some(&PathBuf::from("Scripts/Combat.lua")));
    assert_eq!(game.read("Scripts/Combat.lua"), "-- combat\n");
}

#[test]
fn test_record_created_is_idempotent() {
    let game = Game::new();
    record_created(&game.backup_root(), Path::new("a.lua")).unwrap();
    record_created(&game.backup_root(), Path::new("a.lua")).unwrap();
    record_created(&game.backup_root(), Path::new("b.lua")).unwrap();

    let manifest = manifest::load(&game.backup_root()).unwrap();
    assert_eq!(manifest.created.len(), 2);
    assert!(manifest.created_dirs.is_empty());
}

#[test]
fn test_restore_removes_created_folders() {
    let game = Game::new();
    record_created(&game.backup_root(), Path::new("Content/New/Deep/a.lua")).unwrap();
    record_created(&game.backup_root(), Path::new("Scripts/b.lua")).unwrap();
    game.write("Content/New/Deep/a.lua", "-- a\n");
    game.write("Scripts/b.lua", "-- b\n");

    let manifest = manifest::load(&game.backup_root()).unwrap();
    assert_eq!(
        manifest.created_dirs.iter().collect::<Vec<_>>(),
        vec![Path::new("Content"), Path::new("Content/New"), Path::new("Content/New/Deep")]
    );

    let report = restored(restore(game.root(), &game.backup_root()).unwrap());
    assert!(report.is_complete());
    assert_eq!(report.removed_dirs.len(), 3);
    assert!(!game.root().join("Content").exists());
    assert!(game.root().join("Scripts/Combat.lua").exists());
}

#[test]
fn test_restore_keeps_created_folder_with_other_files() {
    let game = Game::new();
    record_created(&game.backup_root(), Path::new("Saves/a.lua")).unwrap();
    game.write("Saves/a.lua", "-- a\n");
    game.write("Saves/Profile1.sav", "progress");

    let report = restored(restore(game.root(), &game.backup_root()).unwrap());
    assert!(report.is_complete());
    assert!(report.removed_dirs.is_empty());
    assert_eq!(game.read("Saves/Profile1.sav"), "progress");
}

#[test]
fn test_manifest_without_folders_still_loads() {
    let game = Game::new();
    fs::create_dir_all(game.backup_root()).unwrap();
    fs::write(
        game.backup_root().join(CREATED_MANIFEST),
        r#"{ "created": ["Scripts/New.lua"] }"#,
    )
    .unwrap();

    let manifest = manifest::load(&game.backup_root()).unwrap();
    assert_eq!(manifest.created.len(), 1);
    assert!(manifest.created_dirs.is_empty());
}

#[cfg(unix)]
#[test]
fn test_unreadable_backup_entries_fail_the_restore() {
    use std::os::unix::fs::PermissionsExt;

    let game = Game::new();
    backup(["Scripts/Combat.lua", "Game/Text/en/HelpText.sjson"], &game.backup_root()).unwrap();
    let locked = game.backup_root().join("Game");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    let unreadable = fs::read_dir(&locked).is_err();

    let report = restored(restore(game.root(), &game.backup_root()).unwrap());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    // Root reads through permission bits; the failure only exists otherwise.
    if unreadable {
        assert!(!report.is_complete());
        assert!(matches!(report.failed[0], BackupError::Walk { .. }));
    }
    assert_eq!(report.unchanged, vec![PathBuf::from("Scripts/Combat.lua")]);
}

#[test]
fn test_corrupt_manifest_is_reported() {
    let game = Game::new();
    fs::create_dir_all(game.backup_root()).unwrap();
    fs::write(game.backup_root().join(CREATED_MANIFEST), "not json").unwrap();

    let err = restore(game.root(), &game.backup_root()).unwrap_err();
    assert!(matches!(err, BackupError::Manifest { .. }));
}

#[test]
fn test_game_root_of() {
    assert_eq!(
        game_root_of(Path::new("/games/Hades/Backup")).unwrap(),
        Path::new("/games/Hades")
    );
    assert!(matches!(
        game_root_of(Path::new("Backup")),
        Err(BackupError::NoGameRoot(_))
    ));
}
