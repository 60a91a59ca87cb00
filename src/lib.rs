// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |        install / uninstall / plan
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |   config    TOML, env     |
//!              '-------------+-------------'
//!                            v
//!                         install
//!                  discover, orchestrate
//!                            |
//!        +----------+--------+--------+----------+
//!        v          v                 v          v
//!     modfile  -->  plan   -->      merge      backup
//!    clean/tok   interpret     text/xml/sjson  snapshot,
//!                include         in memory     restore
//!
//!   +-----------------------------------------+
//!   |  game     profiles, path detection      |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod backup;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod game;
pub mod install;
pub mod logging;
pub mod merge;
pub mod modfile;
pub mod plan;
pub mod utility;
