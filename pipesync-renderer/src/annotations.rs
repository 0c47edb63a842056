//! Annotation extraction from pipeline definition content.
//!
//! Pipeline files cannot carry a description or an auth token natively, so
//! both are read from specially formatted lines anywhere in the content:
//!
//! ```text
//! // description: Nightly build of the payments service
//! // authToken: s3cret
//! ```
//!
//! Keywords are case-sensitive, anchored at line start, and the leading `//`
//! comment marker is optional. Only the first match counts; an absent
//! annotation yields the empty string.

use std::sync::LazyLock;

use regex::Regex;

static DESCRIPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?://\s*)?description:\s*(.+)$").unwrap());

static AUTH_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?://\s*)?authToken:\s*(.+)$").unwrap());

/// First `description:` annotation, trimmed, or empty.
pub fn description(content: &str) -> String {
    first_capture(&DESCRIPTION_RE, content)
}

/// First `authToken:` annotation, trimmed, or empty.
pub fn auth_token(content: &str) -> String {
    first_capture(&AUTH_TOKEN_RE, content)
}

fn first_capture(re: &Regex, content: &str) -> String {
    re.captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_description_from_comment_line() {
        let content = "// description: Nightly payments build\nnode { }\n";
        assert_eq!(description(content), "Nightly payments build");
    }

    #[test]
    fn comment_marker_is_optional() {
        let content = "description: bare annotation\n";
        assert_eq!(description(content), "bare annotation");
    }

    #[test]
    fn first_match_wins() {
        let content = "// description: first\n// description: second\n";
        assert_eq!(description(content), "first");
    }

    #[test]
    fn indented_lines_do_not_match() {
        let content = "  // description: indented\n";
        assert_eq!(description(content), "");
    }

    #[test]
    fn keyword_is_case_sensitive() {
        let content = "// authtoken: nope\n// authToken: yes\n";
        assert_eq!(auth_token(content), "yes");
    }

    #[test]
    fn absent_annotations_yield_empty() {
        let content = "pipeline { agent any }\n";
        assert_eq!(description(content), "");
        assert_eq!(auth_token(content), "");
    }

    #[test]
    fn trailing_whitespace_is_trimmed() {
        let content = "// description: padded   \r\n";
        assert_eq!(description(content), "padded");
    }
}
