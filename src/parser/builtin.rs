//! Built-in tag parsers.
//!
//! | Tag | Value |
//! |---|---|
//! | `name`, `deprecated`, `deprecatedDescription`, `key` | text as written |
//! | `group`, `type`, `subtype` | lower-cased text |
//! | `description` | multi-line content |
//! | `state` | list of `{name, escaped, description}` |
//! | `markup`, `example` | `{example, escaped, type}` |
//! | `param` | list of `{type, name, description}` |
//! | `returns` | `{type, name, description}` |

use super::{content, jsdoc};
use crate::config::{ParserConfiguration, TagContext, TagParser};
use crate::model::{Cardinality, Markup, State, Value};
use regex::Regex;
use std::sync::LazyLock;

const STATE_SEPARATOR: &str = " - ";

// `html`, `scss`, `c++`: a bare word on an example's tag line
static RE_LANGUAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_+-]+$").unwrap());

/// Install every built-in parser into `config`.
pub fn register_all(config: &mut ParserConfiguration) {
    config
        .register("name", Verbatim::repeatable())
        .register("deprecated", Verbatim::repeatable())
        .register("deprecatedDescription", Verbatim::repeatable())
        .register("key", Verbatim::single())
        .register("group", Lowercase::repeatable())
        .register("subtype", Lowercase::repeatable())
        .register("type", Lowercase::single())
        .register("description", Description)
        .register("state", StateParser)
        .register("markup", MarkupParser)
        .register("example", MarkupParser)
        .register("param", Param)
        .register("returns", Returns);
}

/// Text after the tag, trimmed.
pub struct Verbatim(Cardinality);

impl Verbatim {
    pub fn single() -> Self {
        Self(Cardinality::Single)
    }

    pub fn repeatable() -> Self {
        Self(Cardinality::Repeatable)
    }
}

impl TagParser for Verbatim {
    fn parse(&self, ctx: &TagContext<'_>) -> Value {
        Value::text(ctx.text)
    }

    fn cardinality(&self) -> Cardinality {
        self.0
    }
}

/// Text after the tag, trimmed and lower-cased.
pub struct Lowercase(Cardinality);

impl Lowercase {
    pub fn single() -> Self {
        Self(Cardinality::Single)
    }

    pub fn repeatable() -> Self {
        Self(Cardinality::Repeatable)
    }
}

impl TagParser for Lowercase {
    fn parse(&self, ctx: &TagContext<'_>) -> Value {
        Value::text(ctx.text.to_lowercase())
    }

    fn cardinality(&self) -> Cardinality {
        self.0
    }
}

pub struct Description;

impl TagParser for Description {
    fn parse(&self, ctx: &TagContext<'_>) -> Value {
        Value::Text(content::extract(ctx.block, ctx.position, Some(ctx.tag)).joined())
    }
}

/// `@state :hover - Highlights when hovering.`
pub struct StateParser;

impl TagParser for StateParser {
    fn parse(&self, ctx: &TagContext<'_>) -> Value {
        Value::List(vec![Value::State(parse_state(ctx.text))])
    }

    fn cardinality(&self) -> Cardinality {
        Cardinality::Multiple
    }
}

pub fn parse_state(text: &str) -> State {
    let (name, description) = text.split_once(STATE_SEPARATOR).unwrap_or((text, ""));
    let name = name.trim();
    State {
        name: name.to_string(),
        escaped: escape_state_name(name),
        description: description.trim().to_string(),
    }
}

/// `.primary` → ` primary`, `:hover` → ` pseudo-class-hover`. Only the first
/// `.` and the first `:` are rewritten.
fn escape_state_name(name: &str) -> String {
    name.replacen('.', " ", 1).replacen(':', " pseudo-class-", 1)
}

/// `@markup`/`@example`: markup on the tag line, on the lines below it, or
/// both. A lone word on the tag line above markup names its language.
pub struct MarkupParser;

impl TagParser for MarkupParser {
    fn parse(&self, ctx: &TagContext<'_>) -> Value {
        let content = content::extract(ctx.block, ctx.position, Some(ctx.tag));
        let lang = content
            .head
            .as_deref()
            .filter(|head| !content.body.is_empty() && RE_LANGUAGE.is_match(head))
            .map(str::to_string);
        let example = if lang.is_some() {
            content.body.join("\n")
        } else {
            content.joined()
        };
        Value::Markup(Markup {
            escaped: escape_html(&example),
            example,
            lang,
        })
    }
}

fn escape_html(markup: &str) -> String {
    markup.replace('<', "&lt;").replace('>', "&gt;")
}

pub struct Param;

impl TagParser for Param {
    fn parse(&self, ctx: &TagContext<'_>) -> Value {
        Value::List(vec![Value::Tag(jsdoc::parse_tag(ctx.text))])
    }

    fn cardinality(&self) -> Cardinality {
        Cardinality::Multiple
    }
}

pub struct Returns;

impl TagParser for Returns {
    fn parse(&self, ctx: &TagContext<'_>) -> Value {
        Value::Tag(jsdoc::parse_returns(ctx.text))
    }
}
