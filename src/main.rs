// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Install | Uninstall | Plan | Options | Version
//! ```

use std::process::ExitCode;

use sggmm::cli::global::GlobalOptions;
use sggmm::cli::{self, Command};
use sggmm::cmd::config::run_options_command;
use sggmm::cmd::install::run_install_command;
use sggmm::cmd::plan::run_plan_command;
use sggmm::cmd::uninstall::run_uninstall_command;
use sggmm::config::loader::ConfigLoader;
use sggmm::config::{Config, LOCAL_CONFIG_FILE};
use sggmm::logging::{LogConfig, LogGuard, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Prefix of the environment variables read as configuration.
const ENV_PREFIX: &str = "SGGMM";

fn main() -> ExitCode {
    let cli = cli::parse();

    let Some(command) = &cli.command else {
        eprintln!("No command specified. Use --help for usage information.");
        return ExitCode::FAILURE;
    };

    if matches!(command, Command::Version) {
        handle_version_command();
        return ExitCode::SUCCESS;
    }

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match start_logging(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(command, &config)
}

fn start_logging(config: &Config) -> sggmm::error::Result<LogGuard> {
    let log_config = LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .build();
    init_logging(&log_config)
}

fn dispatch_command(command: &Command, config: &Config) -> ExitCode {
    let result = match command {
        Command::Version => {
            handle_version_command();
            Ok(())
        }
        Command::Options => {
            run_options_command(config);
            Ok(())
        }
        Command::Install(args) => run_install_command(args, config),
        Command::Uninstall(args) => run_uninstall_command(args, config),
        Command::Plan(args) => run_plan_command(args, config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> sggmm::error::Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_local_file(LOCAL_CONFIG_FILE);
    for path in &global.configs {
        loader = loader.add_config_file(path);
    }
    global.apply_overrides(loader.with_env_prefix(ENV_PREFIX))
}

fn load_config(global: &GlobalOptions) -> sggmm::error::Result<Config> {
    build_config_loader(global)?.build()
}
