// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Byte-order-mark aware text decoding.
//!
//! ```text
//! file bytes --(sniff BOM)--> Bom + UTF-8 text --(merge)--> Bom + UTF-8 text --> bytes
//!              UTF-8 / UTF-16LE / UTF-16BE / none
//! ```
//!
//! Uses `encoding_rs`. Invalid sequences become U+FFFD and set
//! [`DecodedText::had_errors`]; callers that write text back must check it.

use encoding_rs::{UTF_8, UTF_16BE, UTF_16LE};
use std::borrow::Cow;
use std::io;
use std::path::Path;

/// Byte-order mark found at the start of a text file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bom {
    /// No BOM, content treated as UTF-8
    #[default]
    None,
    /// EF BB BF
    Utf8,
    /// FF FE
    Utf16Le,
    /// FE FF
    Utf16Be,
}

impl Bom {
    /// Name of the encoding this BOM selects.
    #[must_use]
    pub const fn encoding_name(self) -> &'static str {
        match self {
            Self::None | Self::Utf8 => "UTF-8",
            Self::Utf16Le => "UTF-16LE",
            Self::Utf16Be => "UTF-16BE",
        }
    }

    /// Sniffs the BOM at the start of `bytes`.
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Self {
        match encoding_rs::Encoding::for_bom(bytes) {
            Some((enc, _)) if enc == UTF_8 => Self::Utf8,
            Some((enc, _)) if enc == UTF_16LE => Self::Utf16Le,
            Some((enc, _)) if enc == UTF_16BE => Self::Utf16Be,
            _ => Self::None,
        }
    }

    /// Encodes UTF-8 text back into this BOM's encoding, BOM included.
    #[must_use]
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::None => text.as_bytes().to_vec(),
            Self::Utf8 => {
                let mut out = Vec::with_capacity(text.len() + 3);
                out.extend_from_slice(b"\xEF\xBB\xBF");
                out.extend_from_slice(text.as_bytes());
                out
            }
            // encoding_rs only encodes to UTF-8 for the UTF-16 family, so the
            // code units are written by hand.
            Self::Utf16Le => [0xFF, 0xFE]
                .into_iter()
                .chain(text.encode_utf16().flat_map(u16::to_le_bytes))
                .collect(),
            Self::Utf16Be => [0xFE, 0xFF]
                .into_iter()
                .chain(text.encode_utf16().flat_map(u16::to_be_bytes))
                .collect(),
        }
    }
}

/// UTF-8 text decoded from a file, with the BOM it carried.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedText {
    pub bom: Bom,
    pub text: String,
    /// Some bytes were not valid in the sniffed encoding and were replaced.
    pub had_errors: bool,
}

/// Converts file bytes to UTF-8, stripping any byte-order mark.
///
/// # Example
/// ```
/// use sggmm::utility::encoding::{decode_text, Bom};
///
/// let decoded = decode_text(b"\xEF\xBB\xBFimport a.lua");
/// assert_eq!(decoded.bom, Bom::Utf8);
/// assert_eq!(decoded.text, "import a.lua");
/// assert!(!decoded.had_errors);
/// ```
#[must_use]
pub fn decode_text(bytes: &[u8]) -> DecodedText {
    let bom = Bom::sniff(bytes);
    let (text, had_errors): (Cow<'_, str>, bool) = match bom {
        Bom::None | Bom::Utf8 => UTF_8.decode_with_bom_removal(bytes),
        Bom::Utf16Le => UTF_16LE.decode_with_bom_removal(bytes),
        Bom::Utf16Be => UTF_16BE.decode_with_bom_removal(bytes),
    };
    DecodedText {
        bom,
        text: text.into_owned(),
        had_errors,
    }
}

/// Reads a file and decodes it with [`decode_text`].
///
/// # Errors
///
/// Returns the underlying I/O error if the file cannot be read.
pub fn read_text(path: &Path) -> io::Result<DecodedText> {
    std::fs::read(path).map(|bytes| decode_text(&bytes))
}
