//! Output formats for parse results.

pub mod json;
pub mod markdown;

use crate::model::ParseResult;
use anyhow::{anyhow, Result};

/// Trait for rendering a ParseResult into a specific output format.
pub trait Renderer {
    fn render(&self, result: &ParseResult) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "json" => Ok(Box::new(json::JsonRenderer)),
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use json or markdown", format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_formats() {
        assert_eq!(create_renderer("json").unwrap().file_extension(), "json");
        assert_eq!(create_renderer("md").unwrap().file_extension(), "md");
        assert_eq!(create_renderer("markdown").unwrap().file_extension(), "md");
    }

    #[test]
    fn unknown_format() {
        let err = create_renderer("xml").err().unwrap();
        assert!(err.to_string().starts_with("unknown format: xml"));
    }
}
