// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! encoding
//!   decode_text()   BOM sniffing, UTF-8/UTF-16 --> UTF-8
//!   Bom::encode()   re-emit the original BOM on write
//! fs
//!   walk:  walk(), find_files()
//!   copy:  copy_file_with_parents(), files_identical(), write_atomic()
//! ```

pub mod encoding;
pub mod fs;
