//! Multi-line content extraction for tags whose value spans lines
//! (@description, @markup/@example).
//!
//! A tag's content runs from its `@` marker to the start of the next line
//! that opens another tag (see [`line_marker`]), or to the end of the block.
//! An `@` anywhere else (mid-sentence, indented inside markup) never ends
//! the content.

use super::{line_marker, strip_gutter};

/// Content of one tag occurrence, split at the tag line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Content {
    /// Text on the tag line after the marker, if any
    pub head: Option<String>,
    /// Following lines, gutters stripped
    pub body: Vec<String>,
}

impl Content {
    /// Head and body joined with newlines.
    pub fn joined(&self) -> String {
        self.head
            .iter()
            .chain(self.body.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Extract the content of the tag whose marker sits at byte `position` of
/// `block`. `tag` is the tag name as written; `None` extracts a block that
/// has no tag at all. An offset inside a character moves to the next one.
pub fn extract(block: &str, position: usize, tag: Option<&str>) -> Content {
    let mut start = position.min(block.len());
    while !block.is_char_boundary(start) {
        start += 1;
    }
    let end = next_marker(block, start).unwrap_or(block.len());
    let span = block[start..end].trim();

    let marker = tag.map(|t| format!("@{}", t));
    let lines: Vec<&str> = span.split('\n').collect();
    let short = lines.len() <= 2;

    let mut content = Content::default();
    for (idx, raw) in lines.iter().enumerate() {
        let mut line = strip_gutter(raw).to_string();
        if short || idx == 0 {
            line = line.trim().to_string();
        }

        let mut is_head = false;
        if let (Some(marker), 0) = (&marker, idx) {
            if line.contains(marker.as_str()) {
                line = line.replacen(marker.as_str(), "", 1).trim().to_string();
                is_head = true;
            }
        }

        if line.trim().is_empty() {
            continue;
        }
        if is_head {
            content.head = Some(line);
        } else {
            content.body.push(line);
        }
    }
    content
}

/// Byte offset of the first line after the one containing `from` that
/// opens a tag.
fn next_marker(block: &str, from: usize) -> Option<usize> {
    let mut offset = from + block[from..].find('\n')? + 1;
    for line in block[offset..].split('\n') {
        if line_marker(line).is_some() {
            return Some(offset);
        }
        offset += line.len() + 1;
    }
    None
}
