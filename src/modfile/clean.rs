// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Comment and whitespace stripping.
//!
//! ```text
//! ::  to end of line            single-line comment
//! -:  ... :-  (may span lines)  multiline comment, unterminated = to end of text
//! ```
//!
//! A multiline comment is replaced by the line breaks it spanned, or by a
//! single space when it spanned none. Two tokens around a comment therefore
//! never fuse, `-` + `:` never meet to form a new opener, and the line
//! numbers of the surviving text are unchanged.

const LINE_COMMENT: &str = "::";
const BLOCK_OPEN: &str = "-:";
const BLOCK_CLOSE: &str = ":-";

/// Removes comments but keeps every line break, so line `n` of the result is
/// line `n` of the input.
#[must_use]
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    loop {
        let line_at = rest.find(LINE_COMMENT);
        let block_at = rest.find(BLOCK_OPEN);

        let (at, is_block) = match (line_at, block_at) {
            (None, None) => {
                out.push_str(rest);
                return out;
            }
            (Some(line), Some(block)) if block < line => (block, true),
            (Some(line), _) => (line, false),
            (None, Some(block)) => (block, true),
        };

        out.push_str(&rest[..at]);
        if is_block {
            let body_start = at + BLOCK_OPEN.len();
            let (body, after) = match rest[body_start..].find(BLOCK_CLOSE) {
                Some(close) => (
                    &rest[body_start..body_start + close],
                    &rest[body_start + close + BLOCK_CLOSE.len()..],
                ),
                None => (&rest[body_start..], ""),
            };
            let breaks = body.matches('\n').count();
            if breaks == 0 {
                out.push(' ');
            } else {
                out.extend(std::iter::repeat_n('\n', breaks));
            }
            rest = after;
        } else {
            rest = rest[at..].find('\n').map_or("", |eol| &rest[at + eol..]);
        }
    }
}

/// Cleans modfile text: comments, surrounding whitespace and blank lines are
/// removed, remaining lines keep their order and content.
///
/// Cleaning is idempotent.
///
/// ```
/// use sggmm::modfile::clean;
///
/// let text = "  Load Priority 1 :: first\n\n-: disabled\nImport Old.lua :-\nImport New.lua\n";
/// assert_eq!(clean(text), "Load Priority 1\nImport New.lua");
/// ```
#[must_use]
pub fn clean(text: &str) -> String {
    strip_comments(text)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
