//! GitHub-flavored markdown anchor/slug generation for the record index.

use std::collections::HashMap;

/// Hands out heading anchors, suffixing repeats the way GitHub does
/// (`button`, `button-1`, `button-2`, ...).
#[derive(Debug, Default)]
pub struct Anchors {
    seen: HashMap<String, usize>,
}

impl Anchors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor for the next heading titled `text`.
    pub fn anchor_for(&mut self, text: &str) -> String {
        let slug = github_slug(text);
        let count = self.seen.entry(slug.clone()).or_insert(0);
        let anchor = if *count == 0 {
            slug
        } else {
            format!("{}-{}", slug, count)
        };
        *count += 1;
        anchor
    }
}

/// Generate a TOC list item linking `title` to `anchor`.
pub fn render_toc_item(title: &str, anchor: &str) -> String {
    format!("* [{}](#{})", title, anchor)
}

/// Anchor GitHub derives from a heading: lowercased, punctuation other than
/// `-` dropped, spaces turned into hyphens.
pub fn github_slug(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' | '-' => Some('-'),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect()
}
