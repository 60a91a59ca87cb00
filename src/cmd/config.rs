// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for sggmm.

use crate::config::Config;

/// Display the effective configuration and the layers it came from.
pub fn run_options_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
    println!();
    println!("sources (low to high):");
    for line in config.format_sources() {
        println!("  {line}");
    }
}
