//! Extract documentation records from annotated stylesheet comments.
//!
//! Comment blocks in CSS/SCSS/LESS sources carry `@tag` annotations:
//!
//! ```text
//! /**
//!  * @name Button
//!  * @description Your standard form button.
//!  * @state :hover - Highlights when hovering.
//!  * @markup
//!  *   <button>This is a button</button>
//!  */
//! .button { ... }
//! ```
//!
//! [`parse`] turns each block into a [`Record`] mapping tag names to parsed
//! values. Which tags are understood, and how, is set by a
//! [`ParserConfiguration`] passed to every call. Parsing never fails:
//! malformed annotations degrade to empty or null values.

pub mod config;
pub mod model;
pub mod parser;
pub mod render;
pub mod toc;

pub use config::{ConfigError, ParseOptions, ParserConfiguration, TagContext, TagParser};
pub use model::{
    Cardinality, JsDocTag, Markup, ParseResult, Record, State, SubjectKind, SubjectMetadata, Value,
};
pub use parser::parse_source;

/// Parse `source` and hand the result to `on_complete` before returning.
pub fn parse<F>(source: &str, config: &ParserConfiguration, options: &ParseOptions, on_complete: F)
where
    F: FnOnce(ParseResult),
{
    on_complete(parse_source(source, config, options));
}
