#![forbid(unsafe_code)]

//! Indented-outline parsing.
//!
//! The input format is one node label per line, with two leading whitespace
//! characters per depth level:
//!
//! ```text
//! Air Force
//!   Headquarters
//!     Chief of Staff
//!   Technical Services
//! ```
//!
//! A single leading list marker per line is stripped: a bullet (`-`, `•`,
//! `*`), decimal numbering (`3.`), or a letter enumeration (`b)`). Lines
//! that are blank, or become empty after stripping, produce no node.
//!
//! Parsing is total. Empty or whitespace-only input yields an empty node
//! list, which callers must treat as "nothing to render" rather than retry.

use crate::node::{MAX_OUTLINE_DEPTH, NodeId, SchemaNode};

/// Whitespace characters per depth level.
const INDENT_WIDTH: usize = 2;

/// Parse an outline into a flat, document-ordered node list.
///
/// Output nodes carry the declared (clamped) indentation level and no
/// parent/child links; feed the result through [`crate::build_tree`] to
/// reconstruct the hierarchy. Ids are dense arena indices in document order.
#[must_use]
pub fn parse_outline(text: &str) -> Vec<SchemaNode> {
    let mut nodes = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let indent = line.chars().take_while(|c| c.is_whitespace()).count();
        let level = (indent / INDENT_WIDTH).min(MAX_OUTLINE_DEPTH);

        let label = strip_marker(line.trim());
        if label.is_empty() {
            continue;
        }

        nodes.push(SchemaNode::new(NodeId(nodes.len()), label, level));
    }

    nodes
}

/// Strip at most one leading list marker, then trim.
///
/// Markers are applied once, not recursively: `"- 1. x"` keeps `"1. x"`.
fn strip_marker(line: &str) -> &str {
    if let Some(rest) = strip_bullet(line)
        .or_else(|| strip_numbering(line))
        .or_else(|| strip_letter_enum(line))
    {
        rest.trim_start()
    } else {
        line
    }
}

fn strip_bullet(line: &str) -> Option<&str> {
    line.strip_prefix(['-', '•', '*'])
}

fn strip_numbering(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix('.')
}

fn strip_letter_enum(line: &str) -> Option<&str> {
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(')')) if first.is_ascii_alphabetic() => Some(chars.as_str()),
        _ => None,
    }
}
