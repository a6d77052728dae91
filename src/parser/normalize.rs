//! Block normalizer: strips comment gutters and outer whitespace.

use regex::Regex;
use std::sync::LazyLock;

static RE_LEADING_GUTTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\*+").unwrap());

/// Strip a leading run of `*` gutter characters (left behind by `/**`) and
/// trim the whole block. Indentation of inner lines is preserved so that
/// example markup keeps its formatting.
pub fn normalize(block: &str) -> String {
    RE_LEADING_GUTTER.replace(block, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_leading_gutter() {
        assert_eq!(normalize("* @name Button\n * @state :hover"), "@name Button\n * @state :hover");
        assert_eq!(normalize("   ** text"), "text");
    }

    #[test]
    fn only_first_gutter_is_stripped() {
        assert_eq!(normalize("\n *   <span>\n *   </span>\n "), "<span>\n *   </span>");
    }

    #[test]
    fn trims_outer_whitespace() {
        assert_eq!(normalize("  \n @name X \n\n"), "@name X");
    }

    #[test]
    fn blank_and_gutter_only_lines_become_empty() {
        assert_eq!(normalize(" "), "");
        assert_eq!(normalize(" *"), "");
        assert_eq!(normalize(" **  "), "");
    }
}
