// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::SourceText;
use crate::plan::Placement;

/// Concatenates imports into `base`.
///
/// Appends land at the end. Top imports are inserted at a cursor that starts
/// at offset 0 and moves past each insertion, so they keep their order.
/// Every inserted block ends with a newline.
pub(super) fn merge(base: String, imports: &[SourceText]) -> String {
    let mut out = base;
    let mut top_cursor = 0;

    for import in imports {
        let mut block = import.text.clone();
        if !block.ends_with('\n') {
            block.push('\n');
        }
        match import.placement {
            Placement::Top => {
                out.insert_str(top_cursor, &block);
                top_cursor += block.len();
            }
            Placement::Append => {
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str(&block);
            }
        }
    }

    out
}
