//! JSON output for style guide generators and other tooling.
//!
//! Serializes `{ "blocks": [...] }` with fields in encounter order and each
//! tag presented per its cardinality.

use crate::model::ParseResult;
use crate::render::Renderer;
use anyhow::{Context, Result};

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, result: &ParseResult) -> Result<String> {
        let mut out =
            serde_json::to_string_pretty(result).context("failed to serialize parse result")?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
