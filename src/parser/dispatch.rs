//! Annotation dispatcher: turns one normalized block into a record.

use super::{content, line_marker, normalize::normalize, tag_marker};
use crate::config::{ParserConfiguration, TagContext};
use crate::model::{Annotation, Cardinality, RawCommentBlock, Record, SubjectKind, Value};

const DESCRIPTION_TAG: &str = "description";

/// Default detect predicate: the last blank-line separated segment of `line`
/// starts with a tag marker.
pub fn default_detect(line: &str) -> bool {
    let segment = line.rsplit("\n\n").next().unwrap_or(line);
    tag_marker(&normalize(segment)).is_some()
}

/// Parse every annotation in `block` into a record.
///
/// The subject's kind and identifier are seeded as `type` and `key` first, so
/// explicit `@type`/`@key` annotations replace them. Returns `None` when the
/// block yields nothing beyond a null subject.
pub fn dispatch(
    block: &RawCommentBlock,
    source: &str,
    config: &ParserConfiguration,
) -> Option<Record> {
    let text = block
        .text
        .lines()
        .filter(|line| !normalize(line).is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let mut record = Record::new();
    let subject = &block.subject;
    record.seed(
        "type",
        subject.kind.as_str().map(Value::text).unwrap_or(Value::Null),
    );
    record.seed(
        "key",
        subject.identifier.clone().map(Value::Text).unwrap_or(Value::Null),
    );

    let annotations = annotations(&text, config);
    for annotation in &annotations {
        apply(&mut record, annotation, &text, source, config);
    }

    if annotations.is_empty() && config.untagged_description() {
        let description = content::extract(&text, 0, None).joined();
        if !description.is_empty() {
            let cardinality = config
                .parser(DESCRIPTION_TAG)
                .map(|p| p.cardinality())
                .unwrap_or_default();
            record.merge(DESCRIPTION_TAG, cardinality, Value::Text(description));
        }
    }

    if record.is_inferred_only() && subject.kind == SubjectKind::None {
        tracing::trace!(line = block.line, "comment block has no annotations");
        return None;
    }
    Some(record)
}

/// Detect the annotation lines of a block.
pub fn annotations(block: &str, config: &ParserConfiguration) -> Vec<Annotation> {
    let mut found = Vec::new();
    let mut line_start = 0;

    for line in block.split('\n') {
        let start = line_start;
        line_start += line.len() + 1;

        let Some((tag, text)) = line_marker(line) else {
            continue;
        };
        if !config.detects(&normalize(line)) {
            continue;
        }
        // Gutters and indentation hold no '@', so the first one is the marker
        let Some(at) = line.find('@') else {
            continue;
        };

        found.push(Annotation {
            tag: tag.to_string(),
            text: text.to_string(),
            position: start + at,
        });
    }

    found
}

fn apply(
    record: &mut Record,
    annotation: &Annotation,
    block: &str,
    source: &str,
    config: &ParserConfiguration,
) {
    let Some(parser) = config.parser(&annotation.tag) else {
        tracing::debug!(tag = %annotation.tag, "no parser registered, recording empty value");
        record.merge(&annotation.tag, Cardinality::default(), Value::text(""));
        return;
    };

    let ctx = TagContext {
        position: annotation.position,
        text: &annotation.text,
        block,
        source,
        tag: &annotation.tag,
    };
    tracing::trace!(tag = %annotation.tag, position = annotation.position, "parsing annotation");
    record.merge(&annotation.tag, parser.cardinality(), parser.parse(&ctx));
}
