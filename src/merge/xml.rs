// sggmm: Supergiant Games Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! XML splicing under the destination's root element.
//!
//! ```text
//! <Root>                 <- anchor
//!   [top imports..]      <- top cursor advances past each top splice
//!   original children
//!   [appended imports..]
//! </Root>
//! ```

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::SourceText;
use crate::plan::Placement;

/// One balanced top-level node: an element subtree, comment, text or PI.
type Node = Vec<Event<'static>>;

/// A parsed document split around its single root element.
#[derive(Debug)]
struct Document {
    before: Vec<Node>,
    root: BytesStart<'static>,
    children: Vec<Event<'static>>,
    after: Vec<Node>,
    top_cursor: usize,
}

/// Splices every import into `base` in order.
///
/// A `None` base takes the first import as the document.
///
/// # Errors
///
/// Returns the offending file's index in `imports` (`None` for the base)
/// and a parser message.
pub(super) fn merge(
    base: Option<&str>,
    imports: &[SourceText],
) -> Result<String, (Option<usize>, String)> {
    let (mut doc, rest) = match base {
        Some(text) => (Document::parse(text).map_err(|e| (None, e))?, 0),
        None => {
            let Some(first) = imports.first() else {
                return Ok(String::new());
            };
            (Document::parse(&first.text).map_err(|e| (Some(0), e))?, 1)
        }
    };

    for (index, import) in imports.iter().enumerate().skip(rest) {
        let nodes = parse_nodes(&import.text, false).map_err(|e| (Some(index), e))?;
        doc.splice(nodes, import.placement);
    }

    doc.write().map_err(|e| (None, e))
}

impl Document {
    fn parse(text: &str) -> Result<Self, String> {
        let nodes = parse_nodes(text, true)?;
        let mut elements = nodes.iter().enumerate().filter(|(_, n)| is_element(n));
        let root_index = match (elements.next(), elements.next()) {
            (Some((index, _)), None) => index,
            (None, _) => return Err("document has no root element".to_string()),
            (Some(_), Some(_)) => return Err("document has more than one root element".to_string()),
        };

        let mut nodes = nodes;
        let after = nodes.split_off(root_index + 1);
        let mut root_node = nodes.pop().unwrap_or_default();
        let before = nodes;

        let root = match root_node.first() {
            Some(Event::Start(start) | Event::Empty(start)) => start.clone(),
            _ => return Err("document has no root element".to_string()),
        };
        let children = if root_node.len() >= 2 {
            root_node.pop();
            root_node.drain(1..).collect()
        } else {
            Vec::new()
        };

        Ok(Self {
            before,
            root,
            children,
            after,
            top_cursor: 0,
        })
    }

    fn splice(&mut self, nodes: Vec<Node>, placement: Placement) {
        let mut elements = nodes.iter().filter(|n| is_element(n));
        let same_root = match (elements.next(), elements.next()) {
            (Some(only), None) => element_name(only) == Some(self.root.name().0),
            _ => false,
        };

        let events: Vec<Event<'static>> = if same_root {
            nodes
                .into_iter()
                .filter(|n| is_element(n))
                .flat_map(|mut n| {
                    if n.len() >= 2 {
                        n.pop();
                        n.drain(1..).collect()
                    } else {
                        Vec::new()
                    }
                })
                .collect()
        } else {
            nodes
                .into_iter()
                .flat_map(|n| std::iter::once(newline()).chain(n))
                .collect()
        };

        match placement {
            Placement::Append => self.children.extend(events),
            Placement::Top => {
                let count = events.len();
                self.children.splice(self.top_cursor..self.top_cursor, events);
                self.top_cursor += count;
            }
        }
    }

    fn write(self) -> Result<String, String> {
        let mut writer = Writer::new(Vec::new());
        let mut emit = |event: Event<'_>| writer.write_event(event).map_err(|e| e.to_string());

        for event in self.before.into_iter().flatten() {
            emit(event)?;
        }
        if self.children.is_empty() {
            emit(Event::Empty(self.root))?;
        } else {
            let end = BytesEnd::new(String::from_utf8_lossy(self.root.name().0).into_owned());
            emit(Event::Start(self.root))?;
            for event in self.children {
                emit(event)?;
            }
            emit(Event::End(end))?;
        }
        for event in self.after.into_iter().flatten() {
            emit(event)?;
        }

        String::from_utf8(writer.into_inner()).map_err(|e| e.to_string())
    }
}

/// Reads `text` into balanced top-level nodes.
///
/// For an import fragment (`document` false) the XML declaration, doctype
/// and whitespace-only top-level text are dropped.
fn parse_nodes(text: &str, document: bool) -> Result<Vec<Node>, String> {
    let mut reader = Reader::from_str(text);
    let mut nodes = Vec::new();
    let mut current: Node = Vec::new();
    let mut depth = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("{e} at byte {}", reader.error_position()))?
            .into_owned();

        match event {
            Event::Eof if depth > 0 => {
                return Err(format!("unclosed element at byte {}", reader.buffer_position()));
            }
            Event::Eof => return Ok(nodes),
            Event::Start(_) => {
                depth += 1;
                current.push(event);
            }
            Event::End(_) => {
                if depth == 0 {
                    return Err(format!("unmatched end tag at byte {}", reader.buffer_position()));
                }
                depth -= 1;
                current.push(event);
                if depth == 0 {
                    nodes.push(std::mem::take(&mut current));
                }
            }
            Event::Decl(_) | Event::DocType(_) if depth == 0 && !document => {}
            Event::Text(ref t)
                if depth == 0 && !document && t.iter().all(u8::is_ascii_whitespace) => {}
            event if depth == 0 => nodes.push(vec![event]),
            event => current.push(event),
        }
    }
}

fn newline() -> Event<'static> {
    Event::Text(BytesText::from_escaped("\n"))
}

fn is_element(node: &Node) -> bool {
    matches!(node.first(), Some(Event::Start(_) | Event::Empty(_)))
}

fn element_name(node: &Node) -> Option<&[u8]> {
    match node.first() {
        Some(Event::Start(start) | Event::Empty(start)) => Some(start.name().0),
        _ => None,
    }
}
