// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Simplified JSON as used by the game data files.
//!
//! ```text
//! Texts = [            keys: bare or "quoted"
//!   {                  separators: '=' or ':'
//!     Id = "Foo"       commas: optional
//!   }                  comments: // and /* */
//! ]                    root braces: optional
//! ```
//!
//! Unquoted scalars are kept as written ([`Value::Literal`]) so numbers and
//! keywords re-serialize byte for byte.

use indexmap::IndexMap;

/// Imported value that removes the key from the base document.
pub const DELETE_MARKER: &str = "_delete";

pub type Map = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Unquoted scalar: number, `true`, `false`, `null` or a bare word.
    Literal(String),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

/// Parses a document into its root map.
///
/// # Errors
///
/// Returns a message with the line and column of the first syntax error.
pub fn parse(text: &str) -> Result<Map, String> {
    let mut parser = Parser {
        chars: text.chars().collect(),
        pos: 0,
    };
    parser.skip_trivia()?;
    let root = if parser.peek() == Some('{') {
        parser.pos += 1;
        let map = parser.members(Some('}'))?;
        parser.skip_trivia()?;
        map
    } else {
        parser.members(None)?
    };
    match parser.peek() {
        None => Ok(root),
        Some(c) => Err(parser.error(&format!("unexpected '{c}' after document"))),
    }
}

/// Serializes a root map with explicit braces and two-space indentation.
#[must_use]
pub fn to_string(root: &Map) -> String {
    let mut out = String::new();
    write_object(&mut out, root, 0);
    out.push('\n');
    out
}

/// Deep-merges `import` into `base`.
///
/// Nested objects merge recursively, every other value replaces. New keys
/// land after existing ones. A value equal to [`DELETE_MARKER`] removes the
/// key.
pub fn merge(base: &mut Map, import: Map) {
    for (key, value) in import {
        match value {
            Value::String(s) if s == DELETE_MARKER => {
                base.shift_remove(&key);
            }
            Value::Object(incoming) => match base.get_mut(&key) {
                Some(Value::Object(existing)) => merge(existing, incoming),
                _ => {
                    base.insert(key, Value::Object(incoming));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        s.chars()
            .enumerate()
            .all(|(i, c)| self.chars.get(self.pos + i) == Some(&c))
    }

    fn error(&self, message: &str) -> String {
        let consumed = &self.chars[..self.pos.min(self.chars.len())];
        let line = consumed.iter().filter(|&&c| c == '\n').count() + 1;
        let column = consumed.iter().rev().take_while(|&&c| c != '\n').count() + 1;
        format!("{message} at line {line}, column {column}")
    }

    /// Skips whitespace, commas and comments.
    fn skip_trivia(&mut self) -> Result<(), String> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() || c == ',' => self.pos += 1,
                Some('/') if self.starts_with("//") => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.pos += 1;
                    }
                }
                Some('/') if self.starts_with("/*") => {
                    let start = self.pos;
                    self.pos += 2;
                    while !self.starts_with("*/") {
                        if self.peek().is_none() {
                            self.pos = start;
                            return Err(self.error("unterminated block comment"));
                        }
                        self.pos += 1;
                    }
                    self.pos += 2;
                }
                _ => return Ok(()),
            }
        }
    }

    /// Reads `key = value` pairs until `close` (or end of input for the
    /// implicit root).
    fn members(&mut self, close: Option<char>) -> Result<Map, String> {
        let mut map = Map::new();
        loop {
            self.skip_trivia()?;
            match (self.peek(), close) {
                (None, None) => return Ok(map),
                (None, Some(c)) => return Err(self.error(&format!("expected '{c}'"))),
                (Some(c), Some(close)) if c == close => {
                    self.pos += 1;
                    return Ok(map);
                }
                _ => {}
            }

            let key = self.key()?;
            self.skip_trivia()?;
            match self.peek() {
                Some('=' | ':') => self.pos += 1,
                _ => return Err(self.error(&format!("expected '=' after key '{key}'"))),
            }
            self.skip_trivia()?;
            let value = self.value()?;
            map.insert(key, value);
        }
    }

    fn key(&mut self) -> Result<String, String> {
        if self.peek() == Some('"') {
            return self.string();
        }
        let word = self.bare_word();
        if word.is_empty() {
            return Err(self.error("expected a key"));
        }
        Ok(word)
    }

    fn value(&mut self) -> Result<Value, String> {
        match self.peek() {
            Some('{') => {
                self.pos += 1;
                self.members(Some('}')).map(Value::Object)
            }
            Some('[') => {
                self.pos += 1;
                self.elements().map(Value::Array)
            }
            Some('"') => self.string().map(Value::String),
            _ => {
                let word = self.bare_word();
                if word.is_empty() {
                    Err(self.error("expected a value"))
                } else {
                    Ok(Value::Literal(word))
                }
            }
        }
    }

    fn elements(&mut self) -> Result<Vec<Value>, String> {
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                None => return Err(self.error("expected ']'")),
                Some(']') => {
                    self.pos += 1;
                    return Ok(items);
                }
                Some(_) => items.push(self.value()?),
            }
        }
    }

    fn bare_word(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '+' | '.'))
        {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    /// Reads a `"..."` string with JSON escapes, or a `"""..."""` raw block.
    fn string(&mut self) -> Result<String, String> {
        let start = self.pos;
        if self.starts_with("\"\"\"") {
            self.pos += 3;
            let from = self.pos;
            while !self.starts_with("\"\"\"") {
                if self.peek().is_none() {
                    self.pos = start;
                    return Err(self.error("unterminated raw string"));
                }
                self.pos += 1;
            }
            let raw = self.chars[from..self.pos].iter().collect();
            self.pos += 3;
            return Ok(raw);
        }

        self.pos += 1;
        let mut out = String::new();
        loop {
            let Some(c) = self.peek() else {
                self.pos = start;
                return Err(self.error("unterminated string"));
            };
            self.pos += 1;
            match c {
                '"' => return Ok(out),
                '\\' => {
                    let escaped = self.peek().ok_or_else(|| self.error("unterminated escape"))?;
                    self.pos += 1;
                    match escaped {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        'u' => out.push(self.unicode_escape()?),
                        other => out.push(other),
                    }
                }
                c => out.push(c),
            }
        }
    }

    fn unicode_escape(&mut self) -> Result<char, String> {
        let digits: String = self.chars.iter().skip(self.pos).take(4).collect();
        let code = u32::from_str_radix(&digits, 16)
            .ok()
            .filter(|_| digits.len() == 4)
            .ok_or_else(|| self.error("invalid \\u escape"))?;
        self.pos += 4;
        Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER))
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn write_object(out: &mut String, map: &Map, depth: usize) {
    if map.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{\n");
    for (key, value) in map {
        indent(out, depth + 1);
        write_key(out, key);
        out.push_str(" = ");
        write_value(out, value, depth + 1);
        out.push('\n');
    }
    indent(out, depth);
    out.push('}');
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Literal(raw) => out.push_str(raw),
        Value::String(s) => write_string(out, s),
        Value::Object(map) => write_object(out, map, depth),
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Array(items) => {
            out.push_str("[\n");
            for item in items {
                indent(out, depth + 1);
                write_value(out, item, depth + 1);
                out.push('\n');
            }
            indent(out, depth);
            out.push(']');
        }
    }
}

fn write_key(out: &mut String, key: &str) {
    let bare = !key.is_empty() && key.chars().all(|c| c.is_alphanumeric() || c == '_');
    if bare {
        out.push_str(key);
    } else {
        write_string(out, key);
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
}
