//! Markdown style guide pages, GitHub flavored.
//!
//! One `##` section per record, preceded by an index of all sections.

use crate::model::*;
use crate::render::Renderer;
use crate::toc::{self, Anchors};
use anyhow::Result;

pub struct MarkdownRenderer;

const DEFAULT_EXAMPLE_LANG: &str = "html";

impl Renderer for MarkdownRenderer {
    fn render(&self, result: &ParseResult) -> Result<String> {
        let mut output = String::new();
        if result.blocks.is_empty() {
            return Ok(output);
        }

        let titles: Vec<String> = result
            .blocks
            .iter()
            .enumerate()
            .map(|(i, record)| record_title(record, i))
            .collect();

        let mut anchors = Anchors::new();
        output.push_str("## Index\n\n");
        for title in &titles {
            output.push_str(&toc::render_toc_item(title, &anchors.anchor_for(title)));
            output.push('\n');
        }
        output.push('\n');

        for (record, title) in result.blocks.iter().zip(&titles) {
            output.push_str(&render_record(record, title));
            output.push('\n');
        }

        Ok(output)
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

/// Heading for a record: its first @name, else its key, else its position.
fn record_title(record: &Record, index: usize) -> String {
    first_text(record, "name")
        .or_else(|| first_text(record, "key"))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Block {}", index + 1))
}

fn first_text<'a>(record: &'a Record, tag: &str) -> Option<&'a str> {
    record
        .values(tag)?
        .iter()
        .find_map(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn texts<'a>(record: &'a Record, tag: &str) -> Vec<&'a str> {
    record
        .values(tag)
        .unwrap_or_default()
        .iter()
        .filter_map(Value::as_str)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Render a single record's documentation block.
fn render_record(record: &Record, title: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("## {}\n", title));

    // Deprecation notice
    let since = texts(record, "deprecated");
    let why = texts(record, "deprecatedDescription");
    if record.contains("deprecated") || !why.is_empty() {
        let mut notice = "> **Deprecated**".to_string();
        if let Some(version) = since.first() {
            notice.push_str(&format!(" since {}", version));
        }
        if !why.is_empty() {
            notice.push_str(&format!(": {}", why.join(" ")));
        }
        lines.push(notice);
        lines.push(String::new());
    }

    for desc in texts(record, "description") {
        lines.push(desc.to_string());
        lines.push(String::new());
    }

    // States
    let states: Vec<&State> = values_of(record, "state", Value::as_state);
    if !states.is_empty() {
        lines.push("### States\n".to_string());
        lines.push("| State | Class | Description |".to_string());
        lines.push("|---|---|---|".to_string());
        for state in states {
            lines.push(format!(
                "| `{}` | `{}` | {} |",
                state.name,
                state.escaped.trim(),
                state.description.replace('|', "\\|")
            ));
        }
        lines.push(String::new());
    }

    // Examples, whichever tag they were written with
    let mut examples: Vec<&Markup> = values_of(record, "markup", Value::as_markup);
    examples.extend(values_of(record, "example", Value::as_markup));
    if !examples.is_empty() {
        lines.push("### Example\n".to_string());
        for markup in examples {
            let lang = markup.lang.as_deref().unwrap_or(DEFAULT_EXAMPLE_LANG);
            lines.push(format!("```{}", lang));
            lines.push(unindent(&markup.example));
            lines.push("```".to_string());
            lines.push(String::new());
        }
    }

    // Parameters
    let params: Vec<&JsDocTag> = values_of(record, "param", Value::as_tag);
    if !params.is_empty() {
        lines.push("### Parameters\n".to_string());
        for param in params {
            lines.push(format!("* {}", render_jsdoc(param)));
        }
        lines.push(String::new());
    }

    // Returns
    let returns: Vec<&JsDocTag> = values_of(record, "returns", Value::as_tag);
    if !returns.is_empty() {
        lines.push("### Returns\n".to_string());
        for ret in returns {
            lines.push(format!("* {}", render_jsdoc(ret)));
        }
        lines.push(String::new());
    }

    // Metadata line
    let mut meta: Vec<String> = Vec::new();
    for (tag, label) in [
        ("group", "Group"),
        ("type", "Type"),
        ("subtype", "Subtype"),
        ("key", "Key"),
    ] {
        let values = texts(record, tag);
        if !values.is_empty() {
            meta.push(format!("**{}:** `{}`", label, values.join("`, `")));
        }
    }
    if !meta.is_empty() {
        lines.push(meta.join(" · "));
        lines.push(String::new());
    }

    lines.join("\n")
}

fn values_of<'a, T>(
    record: &'a Record,
    tag: &str,
    pick: fn(&'a Value) -> Option<&'a T>,
) -> Vec<&'a T> {
    record
        .values(tag)
        .unwrap_or_default()
        .iter()
        .filter_map(pick)
        .collect()
}

/// `**name** `{type}`: description`, skipping absent parts.
fn render_jsdoc(tag: &JsDocTag) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(ref name) = tag.name {
        parts.push(format!("**{}**", name));
    }
    if let Some(ref ty) = tag.ty {
        parts.push(format!("`{}`", ty));
    }
    let head = parts.join(" ");
    match (&tag.description, head.is_empty()) {
        (Some(desc), false) => format!("{}: {}", head, desc),
        (Some(desc), true) => desc.clone(),
        (None, _) => head,
    }
}

/// Shift example markup left by its smallest indentation, dropping blank
/// lines before the first tag.
fn unindent(markup: &str) -> String {
    let body: Vec<&str> = markup
        .split('\n')
        .skip_while(|l| l.trim().is_empty())
        .collect();
    let indent = body
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches(' ').len())
        .min()
        .unwrap_or(0);

    body.iter()
        .map(|l| l.get(indent..).unwrap_or_else(|| l.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_source, ParseOptions, ParserConfiguration};

    fn render(source: &str) -> String {
        let result = parse_source(source, &ParserConfiguration::default(), &ParseOptions::default());
        MarkdownRenderer.render(&result).unwrap()
    }

    #[test]
    fn empty_result_renders_nothing() {
        assert_eq!(render(".a {}\n"), "");
    }

    #[test]
    fn index_and_heading() {
        let out = render("// @name Button\n// @description Your standard form button.\n.btn {}\n");
        assert!(out.starts_with("## Index\n\n* [Button](#button)\n\n## Button\n"));
        assert!(out.contains("Your standard form button.\n"));
        assert!(out.contains("**Type:** `selector` · **Key:** `.btn`"));
    }

    #[test]
    fn states_table() {
        let out = render("// @name B\n// @state :hover - Highlights when hovering.\n");
        assert!(out.contains("| `:hover` | `pseudo-class-hover` | Highlights when hovering. |"));
    }

    #[test]
    fn example_fence_uses_language() {
        let source = "/**\n * @name B\n * @example md\n *   <span>\n *     <b>x</b>\n *   </span>\n */\n";
        let out = render(source);
        assert!(out.contains("```md\n<span>\n  <b>x</b>\n</span>\n```"));
    }

    #[test]
    fn example_fence_defaults_to_html() {
        let out = render("// @name B\n// @markup <b>x</b>\n");
        assert!(out.contains("```html\n<b>x</b>\n```"));
    }

    #[test]
    fn deprecation_notice() {
        let out = render("// @name Old\n// @deprecated 1.2\n// @deprecatedDescription Use New.\n");
        assert!(out.contains("> **Deprecated** since 1.2: Use New."));
    }

    #[test]
    fn untitled_record_falls_back_to_position() {
        let out = render("// @group forms\n");
        assert!(out.contains("## Block 1\n"));
    }

    #[test]
    fn jsdoc_lines() {
        let tag = JsDocTag {
            ty: Some("{string}".to_string()),
            name: Some("par1".to_string()),
            description: Some("first".to_string()),
        };
        assert_eq!(render_jsdoc(&tag), "**par1** `{string}`: first");

        let bare = JsDocTag {
            description: Some("no type".to_string()),
            ..Default::default()
        };
        assert_eq!(render_jsdoc(&bare), "no type");
    }

    #[test]
    fn unindent_markup() {
        assert_eq!(
            unindent("\n   <span>\n     <b>x</b>\n   </span>"),
            "<span>\n  <b>x</b>\n</span>"
        );
        assert_eq!(unindent(" <p>\n\n <p>"), "<p>\n\n<p>");
    }
}
