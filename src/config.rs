//! Parser configuration: which tags are understood and how.
//!
//! A [`ParserConfiguration`] is built once by the caller and passed to every
//! parse call. It is immutable during parsing, so one configuration can be
//! shared across threads parsing independent documents.

use crate::model::{Cardinality, Value};
use crate::parser::{builtin, dispatch};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Everything a tag parser gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct TagContext<'a> {
    /// Byte offset of the tag's `@` marker inside `block`
    pub position: usize,
    /// Trimmed text following the tag name on its line
    pub text: &'a str,
    /// The whole normalized block
    pub block: &'a str,
    /// The whole source text
    pub source: &'a str,
    /// Tag name the parser was invoked for (differs from the registered
    /// name when reached through an alias)
    pub tag: &'a str,
}

/// Turns one tag occurrence into a value.
pub trait TagParser: Send + Sync {
    fn parse(&self, ctx: &TagContext<'_>) -> Value;

    fn cardinality(&self) -> Cardinality {
        Cardinality::Repeatable
    }
}

type ParseFn = dyn Fn(&TagContext<'_>) -> Value + Send + Sync;

struct FnParser {
    cardinality: Cardinality,
    f: Box<ParseFn>,
}

impl TagParser for FnParser {
    fn parse(&self, ctx: &TagContext<'_>) -> Value {
        (self.f)(ctx)
    }

    fn cardinality(&self) -> Cardinality {
        self.cardinality
    }
}

/// Decides whether a normalized block line is scanned for a tag at all.
pub type DetectPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cannot alias @{alias}: no parser registered for @{target}")]
    UnknownParser { alias: String, target: String },
}

/// Tag parsers plus the detect predicate.
#[derive(Clone)]
pub struct ParserConfiguration {
    parsers: HashMap<String, Arc<dyn TagParser>>,
    detect: DetectPredicate,
    untagged_description: bool,
}

impl ParserConfiguration {
    /// A configuration with no tag parsers and the default detect predicate.
    /// Every tag then parses to an empty string.
    pub fn empty() -> Self {
        Self {
            parsers: HashMap::new(),
            detect: Arc::new(dispatch::default_detect),
            untagged_description: false,
        }
    }

    /// Register (or replace) the parser for `tag`.
    pub fn register(&mut self, tag: &str, parser: impl TagParser + 'static) -> &mut Self {
        self.parsers.insert(tag.to_string(), Arc::new(parser));
        self
    }

    /// Register a closure as the parser for `tag`.
    pub fn register_fn<F>(&mut self, tag: &str, cardinality: Cardinality, f: F) -> &mut Self
    where
        F: Fn(&TagContext<'_>) -> Value + Send + Sync + 'static,
    {
        self.register(
            tag,
            FnParser {
                cardinality,
                f: Box::new(f),
            },
        )
    }

    /// Make `alias` parse exactly like `existing`.
    pub fn alias(&mut self, alias: &str, existing: &str) -> Result<&mut Self, ConfigError> {
        let parser = self
            .parsers
            .get(existing)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownParser {
                alias: alias.to_string(),
                target: existing.to_string(),
            })?;
        self.parsers.insert(alias.to_string(), parser);
        Ok(self)
    }

    pub fn set_detect_predicate<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.detect = Arc::new(predicate);
        self
    }

    /// When enabled, a block without any annotation yields its whole text
    /// as `description`.
    pub fn set_untagged_description(&mut self, enabled: bool) -> &mut Self {
        self.untagged_description = enabled;
        self
    }

    pub fn parser(&self, tag: &str) -> Option<&dyn TagParser> {
        self.parsers.get(tag).map(|p| p.as_ref())
    }

    pub fn is_registered(&self, tag: &str) -> bool {
        self.parsers.contains_key(tag)
    }

    pub fn detects(&self, line: &str) -> bool {
        (self.detect)(line)
    }

    pub fn untagged_description(&self) -> bool {
        self.untagged_description
    }
}

impl Default for ParserConfiguration {
    /// The built-in tag vocabulary and default detect predicate.
    fn default() -> Self {
        let mut config = Self::empty();
        builtin::register_all(&mut config);
        config
    }
}

impl fmt::Debug for ParserConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.parsers.keys().map(String::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("ParserConfiguration")
            .field("tags", &tags)
            .field("untagged_description", &self.untagged_description)
            .finish_non_exhaustive()
    }
}

/// Per-call options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accepted for compatibility; output is the same either way.
    pub preserve_whitespace: bool,
}
