//! Stylesheet comment parsing: scan, normalize, dispatch.

pub mod builtin;
pub mod content;
pub mod dispatch;
pub mod jsdoc;
pub mod normalize;
pub mod scanner;
pub mod subject;

use crate::config::{ParseOptions, ParserConfiguration};
use crate::model::ParseResult;
use regex::Regex;
use std::sync::LazyLock;

static RE_TAG_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Za-z][^\s]*)").unwrap());

/// Split a normalized line that starts with a tag marker into the tag name
/// and the trimmed text after it.
pub fn tag_marker(line: &str) -> Option<(&str, &str)> {
    let caps = RE_TAG_MARKER.captures(line)?;
    let name = caps.get(1)?.as_str();
    let rest = &line[caps.get(0)?.end()..];
    Some((name, rest.trim()))
}

/// A `*` further right than this is content, not a gutter.
const GUTTER_WIDTH: usize = 10;

/// Drop a leading `*` gutter (and the indentation before it).
pub(crate) fn strip_gutter(line: &str) -> &str {
    let rest = line.trim_start();
    let indent = line.len() - rest.len();
    match rest.strip_prefix('*') {
        Some(after) if indent < GUTTER_WIDTH => after,
        _ => line,
    }
}

/// The tag a block line opens, if any. The `@` must follow the gutter with
/// at most one space between; deeper `@` lines (`@include` inside an
/// example) are content.
pub fn line_marker(line: &str) -> Option<(&str, &str)> {
    let body = strip_gutter(line);
    let text = body.trim_start();
    if body.len() - text.len() > 1 {
        return None;
    }
    tag_marker(text)
}

/// Run the full pipeline over `source`.
pub fn parse_source(
    source: &str,
    config: &ParserConfiguration,
    _options: &ParseOptions,
) -> ParseResult {
    let blocks = scanner::scan(source);
    let total = blocks.len();

    let records: Vec<_> = blocks
        .iter()
        .filter_map(|block| dispatch::dispatch(block, source, config))
        .collect();

    tracing::debug!(
        comment_blocks = total,
        records = records.len(),
        "parsed stylesheet source"
    );

    ParseResult { blocks: records }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_splits_name_and_text() {
        assert_eq!(tag_marker("@name Button"), Some(("name", "Button")));
        assert_eq!(tag_marker("@markup"), Some(("markup", "")));
        assert_eq!(
            tag_marker("@state   :hover - Highlights  "),
            Some(("state", ":hover - Highlights"))
        );
    }

    #[test]
    fn marker_must_start_the_line() {
        assert_eq!(tag_marker("text @name X"), None);
        assert_eq!(tag_marker("@ in it"), None);
        assert_eq!(tag_marker("@1x"), None);
        assert_eq!(tag_marker(""), None);
    }

    #[test]
    fn line_marker_allows_one_space_after_gutter() {
        assert_eq!(line_marker(" * @name Button"), Some(("name", "Button")));
        assert_eq!(line_marker(" @state :hover"), Some(("state", ":hover")));
        assert_eq!(line_marker("@key $x"), Some(("key", "$x")));
        assert_eq!(line_marker(" *   @include button;"), None);
        assert_eq!(line_marker("     @media print {"), None);
        assert_eq!(line_marker(" * text @name X"), None);
    }

    #[test]
    fn far_star_is_content() {
        assert_eq!(strip_gutter(" * a"), " a");
        assert_eq!(strip_gutter("            * not a gutter"), "            * not a gutter");
        assert_eq!(strip_gutter("a * b"), "a * b");
        assert_eq!(line_marker("            * @name X"), None);
    }

    #[test]
    fn empty_source() {
        let result = parse_source("", &ParserConfiguration::default(), &ParseOptions::default());
        assert!(result.blocks.is_empty());
    }
}
