//! JSDoc-style tag extraction: `{type} name - description`.

use crate::model::JsDocTag;

const SEPARATOR: &str = " - ";

/// Parse `{type} name - description`; every part is optional.
pub fn parse_tag(line: &str) -> JsDocTag {
    let (ty, rest) = take_type(line);
    let rest = rest.trim();

    if let Some(description) = leading_dash(rest) {
        return JsDocTag {
            ty,
            name: None,
            description: non_empty(description),
        };
    }

    match rest.split_once(SEPARATOR) {
        Some((name, description)) => JsDocTag {
            ty,
            name: non_empty(name),
            description: non_empty(description),
        },
        None => JsDocTag {
            ty,
            name: non_empty(rest),
            description: None,
        },
    }
}

/// Parse `{type} description`, as written for @returns. There is no name;
/// a leading `- ` before the description is dropped.
pub fn parse_returns(line: &str) -> JsDocTag {
    let (ty, rest) = take_type(line);
    let rest = rest.trim();
    let description = leading_dash(rest).unwrap_or(rest);

    JsDocTag {
        ty,
        name: None,
        description: non_empty(description),
    }
}

/// Split off the first `{...}` span, braces included.
fn take_type(line: &str) -> (Option<String>, String) {
    let Some(open) = line.find('{') else {
        return (None, line.to_string());
    };
    let Some(len) = line[open..].find('}') else {
        return (None, line.to_string());
    };
    let close = open + len + 1;
    let ty = line[open..close].to_string();
    let rest = format!("{}{}", &line[..open], &line[close..]);
    (Some(ty), rest)
}

fn leading_dash(text: &str) -> Option<&str> {
    if text == "-" {
        return Some("");
    }
    text.strip_prefix("- ").map(str::trim)
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(ty: Option<&str>, name: Option<&str>, description: Option<&str>) -> JsDocTag {
        JsDocTag {
            ty: ty.map(str::to_string),
            name: name.map(str::to_string),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn full_form() {
        assert_eq!(
            parse_tag("{string} par1 - parmOne description"),
            tag(Some("{string}"), Some("par1"), Some("parmOne description"))
        );
    }

    #[test]
    fn without_type() {
        assert_eq!(
            parse_tag("par3 - paramThree description"),
            tag(None, Some("par3"), Some("paramThree description"))
        );
    }

    #[test]
    fn name_only() {
        assert_eq!(parse_tag("par4"), tag(None, Some("par4"), None));
    }

    #[test]
    fn type_only() {
        assert_eq!(parse_tag("{number}"), tag(Some("{number}"), None, None));
    }

    #[test]
    fn empty_line() {
        assert_eq!(parse_tag(""), JsDocTag::default());
    }

    #[test]
    fn description_keeps_later_separators() {
        assert_eq!(
            parse_tag("{Map} opts - a - b"),
            tag(Some("{Map}"), Some("opts"), Some("a - b"))
        );
    }

    #[test]
    fn dash_without_name() {
        assert_eq!(
            parse_tag("{number} - return description"),
            tag(Some("{number}"), None, Some("return description"))
        );
    }

    #[test]
    fn unclosed_brace_is_not_a_type() {
        assert_eq!(parse_tag("{oops name"), tag(None, Some("{oops name"), None));
    }

    #[test]
    fn returns_with_type() {
        assert_eq!(
            parse_returns("{number} - return description"),
            tag(Some("{number}"), None, Some("return description"))
        );
    }

    #[test]
    fn returns_without_type_keeps_whole_text() {
        assert_eq!(
            parse_returns("no type - return description"),
            tag(None, None, Some("no type - return description"))
        );
    }
}
