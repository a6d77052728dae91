//! Data model for parsed stylesheet documentation, shared by all renderers.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A parsed annotation value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Text(String),
    State(State),
    Markup(Markup),
    Tag(JsDocTag),
    List(Vec<Value>),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_state(&self) -> Option<&State> {
        match self {
            Value::State(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_markup(&self) -> Option<&Markup> {
        match self {
            Value::Markup(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> Option<&JsDocTag> {
        match self {
            Value::Tag(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Parsed @state entry, e.g. `:hover - Highlights when hovering.`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct State {
    pub name: String,
    /// Name made usable as a class list (`.` → space, `:` → ` pseudo-class-`)
    pub escaped: String,
    pub description: String,
}

/// Parsed @markup / @example entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Markup {
    pub example: String,
    /// `example` with `<` and `>` entity-escaped
    pub escaped: String,
    /// Language named on the tag line (`@example html`)
    #[serde(rename = "type")]
    pub lang: Option<String>,
}

/// `{type} name - description` shorthand used by @param and @returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JsDocTag {
    #[serde(rename = "type")]
    pub ty: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// How repeated occurrences of a tag are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cardinality {
    /// Later occurrence replaces the earlier one.
    Single,
    /// Always presented as a sequence.
    Multiple,
    /// Scalar when seen once, sequence once repeated.
    #[default]
    Repeatable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Field {
    tag: String,
    cardinality: Cardinality,
    values: Vec<Value>,
    /// Seeded from the subject line rather than written in the block
    inferred: bool,
}

impl Field {
    fn present(&self) -> Value {
        match self.cardinality {
            Cardinality::Multiple => Value::List(self.values.clone()),
            Cardinality::Single => self.values.last().cloned().unwrap_or(Value::Null),
            Cardinality::Repeatable => match self.values.as_slice() {
                [] => Value::Null,
                [single] => single.clone(),
                many => Value::List(many.to_vec()),
            },
        }
    }
}

/// Documentation extracted from one comment block: tag name → value.
///
/// Fields keep the order in which their tags were first encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.field(tag).is_some()
    }

    /// Tag names in encounter order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.tag.as_str())
    }

    /// Value of `tag`, presented per its cardinality.
    pub fn get(&self, tag: &str) -> Option<Value> {
        self.field(tag).map(Field::present)
    }

    /// Every stored occurrence of `tag`, in encounter order.
    pub fn values(&self, tag: &str) -> Option<&[Value]> {
        self.field(tag).map(|f| f.values.as_slice())
    }

    /// Last text value of `tag`, if it is text.
    pub fn text(&self, tag: &str) -> Option<&str> {
        self.values(tag)?.last()?.as_str()
    }

    /// `(tag, presented value)` pairs in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        self.fields.iter().map(|f| (f.tag.as_str(), f.present()))
    }

    /// Insert a value inferred from the subject line. Any explicit occurrence
    /// of the same tag replaces it.
    pub(crate) fn seed(&mut self, tag: &str, value: Value) {
        match self.field_mut(tag) {
            Some(field) => {
                field.values = vec![value];
                field.inferred = true;
            }
            None => self.fields.push(Field {
                tag: tag.to_string(),
                cardinality: Cardinality::Single,
                values: vec![value],
                inferred: true,
            }),
        }
    }

    /// Merge one parsed occurrence of `tag`. A `Value::List` contributes its
    /// items, flattened one level.
    pub(crate) fn merge(&mut self, tag: &str, cardinality: Cardinality, value: Value) {
        let incoming = match value {
            Value::List(items) => items,
            other => vec![other],
        };

        let field = match self.fields.iter().position(|f| f.tag == tag) {
            Some(idx) => &mut self.fields[idx],
            None => {
                self.fields.push(Field {
                    tag: tag.to_string(),
                    cardinality,
                    values: Vec::new(),
                    inferred: false,
                });
                let last = self.fields.len() - 1;
                &mut self.fields[last]
            }
        };

        if field.inferred || cardinality == Cardinality::Single {
            field.values.clear();
        }
        field.inferred = false;
        field.cardinality = cardinality;
        field.values.extend(incoming);
    }

    /// True when nothing in the record came from the block itself.
    pub(crate) fn is_inferred_only(&self) -> bool {
        self.fields.iter().all(|f| f.inferred)
    }

    fn field(&self, tag: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    fn field_mut(&mut self, tag: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.tag == tag)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(&field.tag, &field.present())?;
        }
        map.end()
    }
}

/// Everything extracted from one source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    pub blocks: Vec<Record>,
}

/// Kind of entity documented by a comment block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubjectKind {
    Variable,
    Selector,
    Function,
    #[default]
    None,
}

impl SubjectKind {
    /// Name seeded into a record's `type` field.
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            SubjectKind::Variable => Some("variable"),
            SubjectKind::Selector => Some("selector"),
            SubjectKind::Function => Some("function"),
            SubjectKind::None => None,
        }
    }
}

/// What the first code line after a comment block declares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectMetadata {
    pub kind: SubjectKind,
    pub identifier: Option<String>,
}

/// Comment syntax a block was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `// ...` runs
    Line,
    /// `/* ... */` regions
    Delimited,
}

/// One contiguous comment region, normalized, with its subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommentBlock {
    pub style: CommentStyle,
    pub text: String,
    pub subject: SubjectMetadata,
    /// 1-based line where the region starts
    pub line: usize,
}

/// A detected tag occurrence inside a normalized block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub tag: String,
    pub text: String,
    /// Byte offset of the `@` marker within the block
    pub position: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeatable_becomes_list_on_repeat() {
        let mut rec = Record::new();
        rec.merge("name", Cardinality::Repeatable, Value::text("a"));
        assert_eq!(rec.get("name"), Some(Value::text("a")));
        rec.merge("name", Cardinality::Repeatable, Value::text("b"));
        assert_eq!(
            rec.get("name"),
            Some(Value::List(vec![Value::text("a"), Value::text("b")]))
        );
    }

    #[test]
    fn single_keeps_last() {
        let mut rec = Record::new();
        rec.merge("type", Cardinality::Single, Value::text("a"));
        rec.merge("type", Cardinality::Single, Value::text("b"));
        assert_eq!(rec.get("type"), Some(Value::text("b")));
        assert_eq!(rec.values("type").map(|v| v.len()), Some(1));
    }

    #[test]
    fn list_values_flatten_one_level() {
        let mut rec = Record::new();
        rec.merge(
            "state",
            Cardinality::Multiple,
            Value::List(vec![Value::text("a")]),
        );
        rec.merge(
            "state",
            Cardinality::Multiple,
            Value::List(vec![Value::text("b")]),
        );
        assert_eq!(rec.values("state").map(|v| v.len()), Some(2));
    }

    #[test]
    fn explicit_value_replaces_inferred() {
        let mut rec = Record::new();
        rec.seed("type", Value::text("variable"));
        assert!(rec.is_inferred_only());
        rec.merge("type", Cardinality::Repeatable, Value::text("color"));
        assert_eq!(rec.get("type"), Some(Value::text("color")));
        assert!(!rec.is_inferred_only());
    }

    #[test]
    fn serializes_in_encounter_order() {
        let mut rec = Record::new();
        rec.merge("name", Cardinality::Repeatable, Value::text("Button"));
        rec.seed("key", Value::Null);
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(json, r#"{"name":"Button","key":null}"#);
    }

    #[test]
    fn markup_serializes_lang_as_type() {
        let v = Value::Markup(Markup {
            example: "<b>".to_string(),
            escaped: "&lt;b&gt;".to_string(),
            lang: None,
        });
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"example":"<b>","escaped":"&lt;b&gt;","type":null}"#);
    }
}
