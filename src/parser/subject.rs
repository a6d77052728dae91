//! Subject classifier: what does the code line after a block declare?

use crate::model::{SubjectKind, SubjectMetadata};
use regex::Regex;
use std::sync::LazyLock;

// $name: value;
static RE_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\$[^:]+):").unwrap());

// .name { ... } / .name, .other
static RE_SELECTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\.[^\s,{]+)").unwrap());

// @function name($args)
static RE_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@function\s+([^\s(]+)").unwrap());

const FUNCTION_KEYWORD: &str = "@function";

/// Classify the first code line following a comment block.
///
/// The prefix decides the kind; the identifier is `None` when the prefix
/// matched but the rest of the line has no recognisable name.
pub fn classify(line: &str) -> SubjectMetadata {
    let line = line.trim_start();

    let (kind, re) = if line.starts_with('$') {
        (SubjectKind::Variable, &*RE_VARIABLE)
    } else if line.starts_with('.') {
        (SubjectKind::Selector, &*RE_SELECTOR)
    } else if is_function_declaration(line) {
        (SubjectKind::Function, &*RE_FUNCTION)
    } else {
        return SubjectMetadata::default();
    };

    let identifier = re
        .captures(line)
        .map(|caps| caps[1].trim().to_string())
        .filter(|id| !id.is_empty());

    SubjectMetadata { kind, identifier }
}

fn is_function_declaration(line: &str) -> bool {
    line.strip_prefix(FUNCTION_KEYWORD)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(kind: SubjectKind, id: Option<&str>) -> SubjectMetadata {
        SubjectMetadata {
            kind,
            identifier: id.map(str::to_string),
        }
    }

    #[test]
    fn variable() {
        assert_eq!(
            classify("$button-bg: #fff;"),
            subject(SubjectKind::Variable, Some("$button-bg"))
        );
        assert_eq!(
            classify("  $spacing : 4px;"),
            subject(SubjectKind::Variable, Some("$spacing"))
        );
    }

    #[test]
    fn variable_without_colon_has_no_identifier() {
        assert_eq!(classify("$oops"), subject(SubjectKind::Variable, None));
    }

    #[test]
    fn selector() {
        assert_eq!(
            classify(".k-d-flex {"),
            subject(SubjectKind::Selector, Some(".k-d-flex"))
        );
        assert_eq!(
            classify(".btn, .button {"),
            subject(SubjectKind::Selector, Some(".btn"))
        );
        assert_eq!(
            classify(".k-resize-both{resize: both;}"),
            subject(SubjectKind::Selector, Some(".k-resize-both"))
        );
    }

    #[test]
    fn function() {
        assert_eq!(
            classify("@function decimal-round($number, $digits: 0) {"),
            subject(SubjectKind::Function, Some("decimal-round"))
        );
        assert_eq!(
            classify("@function   rem ($px)"),
            subject(SubjectKind::Function, Some("rem"))
        );
        assert_eq!(classify("@function"), subject(SubjectKind::Function, None));
    }

    #[test]
    fn anything_else_is_none() {
        assert_eq!(classify("button {"), SubjectMetadata::default());
        assert_eq!(classify("@mixin foo {"), SubjectMetadata::default());
        assert_eq!(classify("@functional"), SubjectMetadata::default());
        assert_eq!(classify(""), SubjectMetadata::default());
        assert_eq!(classify("%placeholder {"), SubjectMetadata::default());
    }
}
