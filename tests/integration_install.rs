// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for installing and uninstalling mods.
//!
//! Builds small game folders on disk and runs the full pipeline against them.

use std::fs;
use std::path::{Path, PathBuf};

use sggmm::backup::RestoreOutcome;
use sggmm::config::types::LayoutConfig;
use sggmm::game::Game;
use sggmm::install::{InstallOutcome, InstallReport, install_mods, plan_mods, uninstall_mods};
use tempfile::TempDir;

struct Install {
    _temp: TempDir,
    root: PathBuf,
    layout: LayoutConfig,
}

impl Install {
    /// `<temp>/<game folder>/Content`, so path detection sees the game.
    fn new(game: Game) -> Self {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join(game.name()).join("Content");
        fs::create_dir_all(&root).unwrap();
        Self {
            _temp: temp,
            root,
            layout: LayoutConfig::default(),
        }
    }

    fn write(&self, rel: &str, content: impl AsRef<[u8]>) -> &Self {
        let path = self.root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        self
    }

    fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.root.join(rel)).unwrap()
    }

    fn install(&self) -> InstallReport {
        let game = Game::select(None, &self.root);
        match install_mods(&self.root, game, &self.layout).unwrap() {
            InstallOutcome::Installed(report) => report,
            InstallOutcome::ModsFolderCreated(_) => panic!("no mods folder"),
        }
    }

    fn uninstall(&self) {
        let report = uninstall_mods(
            &self.root,
            &self.layout.backup_root(&self.root),
            &self.layout.mods_root(&self.root),
        )
        .unwrap();
        assert!(report.is_complete());
    }
}

// =============================================================================
// Text merges
// =============================================================================

#[test]
fn install_hades_text_mods() {
    let game = Install::new(Game::Hades);
    game.write("Scripts/RoomManager.lua", "-- room manager\n")
        .write("Scripts/UIScripts.lua", "-- ui\n")
        .write(
            "Mods/ModUtil/modfile.txt",
            ":: loads first\nLoad Priority 0\nImport ModUtil.lua\n",
        )
        .write("Mods/ModUtil/ModUtil.lua", "ModUtil = {}")
        .write(
            "Mods/Better UI/modfile.txt",
            "-: a\nblock comment :-\nload priority 5\nto Scripts/UIScripts.lua\nimport ui.lua\ntop header.lua\n",
        )
        .write("Mods/Better UI/ui.lua", "-- better ui\n")
        .write("Mods/Better UI/header.lua", "-- header\n");

    let report = game.install();
    assert!(report.is_clean(), "{report:?}");
    assert_eq!(report.loaded, vec!["Better UI", "ModUtil"]);

    insta::assert_snapshot!(game.read("Scripts/RoomManager.lua"), @r"
    -- room manager
    ModUtil = {}
    ");
    insta::assert_snapshot!(game.read("Scripts/UIScripts.lua"), @r"
    -- header
    -- ui
    -- better ui
    ");
}

#[test]
fn install_pyre_fans_out_to_default_scripts() {
    let game = Install::new(Game::Pyre);
    game.write("Scripts/Campaign.lua", "-- campaign\n")
        .write("Scripts/MPScripts.lua", "-- mp\n")
        .write("Mods/Both/modfile.txt", "import both.lua\n")
        .write("Mods/Both/both.lua", "-- both\n");

    let report = game.install();
    assert_eq!(report.written.len(), 2);
    assert_eq!(game.read("Scripts/Campaign.lua"), "-- campaign\n-- both\n");
    assert_eq!(game.read("Scripts/MPScripts.lua"), "-- mp\n-- both\n");
}

#[test]
fn install_follows_includes() {
    let game = Install::new(Game::Hades);
    game.write("Scripts/RoomManager.lua", "-- rooms\n")
        .write("Mods/Pack/modfile.txt", "include parts/more.txt\nimport main.lua\n")
        .write("Mods/Pack/main.lua", "-- main\n")
        .write("Mods/Pack/parts/more.txt", "load 3\nimport extra.lua\n")
        .write("Mods/Pack/parts/extra.lua", "-- extra\n");

    let report = game.install();
    assert!(report.is_clean());
    assert_eq!(report.loaded, vec!["Pack"]);
    assert_eq!(game.read("Scripts/RoomManager.lua"), "-- rooms\n-- extra\n-- main\n");
}

#[test]
fn install_skips_cyclic_mod_only() {
    let game = Install::new(Game::Hades);
    game.write("Scripts/RoomManager.lua", "-- rooms\n")
        .write("Mods/Loop/modfile.txt", "include other.txt\n")
        .write("Mods/Loop/other.txt", "include modfile.txt\n")
        .write("Mods/Fine/modfile.txt", "import fine.lua\n")
        .write("Mods/Fine/fine.lua", "-- fine\n");

    let report = game.install();
    assert_eq!(report.loaded, vec!["Fine"]);
    assert_eq!(report.failed_mods.len(), 1);
    assert!(report.failed_mods[0].to_string().starts_with("cyclic include in mod 'Loop'"));
    assert_eq!(game.read("Scripts/RoomManager.lua"), "-- rooms\n-- fine\n");
}

#[test]
fn install_bastion_without_destination() {
    let game = Install::new(Game::Bastion);
    game.write("Mods/Lost/modfile.txt", "import lost.lua\n")
        .write("Mods/Lost/lost.lua", "-- lost\n");

    let report = game.install();
    assert!(report.is_clean());
    assert_eq!(report.loaded, vec!["Lost"]);
    assert!(report.written.is_empty());
}

// =============================================================================
// Structured merges
// =============================================================================

#[test]
fn install_sjson_mods_in_priority_order() {
    let game = Install::new(Game::Hades);
    let dest = "Game/Text/en/HelpText.en.sjson";
    game.write(dest, "{\n  Texts = [\n    { Id = \"A\" }\n  ]\n  Version = 1\n}\n")
        .write(
            "Mods/High/modfile.txt",
            format!("load 10\nto {dest}\nsjson help.sjson\n"),
        )
        .write("Mods/High/help.sjson", "Version = 3\n")
        .write("Mods/Low/modfile.txt", format!("to {dest}\nmap help.map\n"))
        .write("Mods/Low/help.map", "Version = 2\nExtra = \"low\"\n");

    let report = game.install();
    assert!(report.is_clean(), "{report:?}");
    insta::assert_snapshot!(game.read(dest), @r#"
    {
      Texts = [
        {
          Id = "A"
        }
      ]
      Version = 3
      Extra = "low"
    }
    "#);
}

#[test]
fn install_xml_mod() {
    let game = Install::new(Game::Transistor);
    let dest = "Content/Game/Weapons.xml";
    game.write(dest, "<Weapons>\n  <Sword/>\n</Weapons>\n")
        .write("Mods/Spear/modfile.txt", format!("to {dest}\nxml spear.xml\n"))
        .write("Mods/Spear/spear.xml", "<Spear Damage=\"10\"/>\n");

    let report = game.install();
    assert!(report.is_clean(), "{report:?}");
    let merged = game.read(dest);
    assert!(merged.starts_with("<Weapons>"));
    assert!(merged.contains("<Sword/>"));
    assert!(merged.contains("<Spear Damage=\"10\"/>"));
    assert!(merged.trim_end().ends_with("</Weapons>"));
}

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn uninstall_restores_everything() {
    let game = Install::new(Game::Hades);
    game.write("Scripts/RoomManager.lua", b"\xEF\xBB\xBF-- rooms\r\n")
        .write("Mods/Demo/modfile.txt", "import a.lua\nto Scripts/New.lua\nimport a.lua\n")
        .write("Mods/Demo/a.lua", "-- a\n");

    game.install();
    assert!(fs::read(game.root.join("Scripts/RoomManager.lua")).unwrap().starts_with(b"\xEF\xBB\xBF"));

    game.uninstall();
    assert_eq!(
        fs::read(game.root.join("Scripts/RoomManager.lua")).unwrap(),
        b"\xEF\xBB\xBF-- rooms\r\n"
    );
    assert!(!game.root.join("Scripts/New.lua").exists());
    assert!(!game.root.join("Backup").exists());
    assert!(!game.root.join("Mods").exists());
}

#[test]
fn uninstall_twice_is_harmless() {
    let game = Install::new(Game::Hades);
    game.write("Scripts/RoomManager.lua", "-- rooms\n");
    game.uninstall();

    let report = uninstall_mods(
        &game.root,
        &game.layout.backup_root(&game.root),
        &game.layout.mods_root(&game.root),
    )
    .unwrap();
    assert!(matches!(report.restore, RestoreOutcome::Missing));
    assert_eq!(game.read("Scripts/RoomManager.lua"), "-- rooms\n");
}

#[test]
fn plan_matches_install_order() {
    let game = Install::new(Game::Hades);
    game.write("Scripts/RoomManager.lua", "")
        .write("Mods/A/modfile.txt", "load 2\nimport a.lua\n")
        .write("Mods/A/a.lua", "a")
        .write("Mods/B/modfile.txt", "top b.lua\n")
        .write("Mods/B/b.lua", "b")
        .write("Mods/C/modfile.txt", "import c.lua\n")
        .write("Mods/C/c.lua", "c");

    let mods = plan_mods(&game.root, Game::Hades, &game.layout).unwrap();
    let order: Vec<&str> = mods
        .plan
        .group(Path::new("Scripts/RoomManager.lua"))
        .unwrap()
        .iter()
        .map(|a| a.mod_name.as_str())
        .collect();
    assert_eq!(order, vec!["B", "C", "A"]);

    game.install();
    assert_eq!(game.read("Scripts/RoomManager.lua"), "b\nc\na\n");
}
