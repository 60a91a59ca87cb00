// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities.
//!
//! ```text
//! walk:  walk()            ignore::Walk, sorted, hidden files included
//!        find_files()      wax glob on root-relative paths
//! copy:  copy_file_with_parents()
//!        files_identical()  byte comparison for restore skips
//!        write_atomic()     temp file + rename
//!        remove_dir_if_exists()
//! ```

pub mod copy;
pub mod walk;
