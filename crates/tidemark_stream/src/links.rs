//! Reference-link definitions.
//!
//! Definitions are collected as they stream past and resolved at the
//! moment a reference is encountered. There is no back-patching: a
//! definition can only satisfy references that appear later.

use std::collections::HashMap;

/// A stored `[label]: url "title"` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDefinition {
    pub url: String,
    pub title: Option<String>,
}

/// Label-keyed definition store. Labels are matched case-insensitively
/// with internal whitespace collapsed.
#[derive(Debug, Default)]
pub struct LinkDefinitions {
    map: HashMap<String, LinkDefinition>,
}

impl LinkDefinitions {
    pub fn insert(&mut self, label: &str, definition: LinkDefinition) {
        self.map.insert(normalize_label(label), definition);
    }

    pub fn resolve(&self, label: &str) -> Option<&LinkDefinition> {
        self.map.get(&normalize_label(label))
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Case-fold and collapse runs of whitespace to single spaces.
fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Parse a link-definition line: `[label]: url` with an optional title
/// in double quotes, single quotes, or parentheses. Returns `None` when
/// the line is anything else.
pub fn parse_definition(line: &str) -> Option<(String, LinkDefinition)> {
    let rest = line.strip_prefix('[')?;
    let close = rest.find(']')?;
    let label = &rest[..close];
    if label.trim().is_empty() {
        return None;
    }
    let rest = rest[close + 1..].strip_prefix(':')?;
    let rest = rest.trim();
    if rest.is_empty() {
        return None;
    }
    let (url, remainder) = match rest.find(char::is_whitespace) {
        Some(pos) => (&rest[..pos], rest[pos..].trim_start()),
        None => (rest, ""),
    };
    let title = if remainder.is_empty() {
        None
    } else {
        Some(parse_title(remainder)?)
    };
    Some((
        label.to_string(),
        LinkDefinition { url: url.to_string(), title },
    ))
}

fn parse_title(text: &str) -> Option<String> {
    let (open, close) = match text.chars().next()? {
        '"' => ('"', '"'),
        '\'' => ('\'', '\''),
        '(' => ('(', ')'),
        _ => return None,
    };
    let inner = text.strip_prefix(open)?.strip_suffix(close)?;
    Some(inner.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(line: &str) -> Option<(String, LinkDefinition)> {
        parse_definition(line)
    }

    #[test]
    fn test_bare_definition() {
        let (label, definition) = parse("[ref]: http://example.com").unwrap();
        assert_eq!(label, "ref");
        assert_eq!(definition.url, "http://example.com");
        assert_eq!(definition.title, None);
    }

    #[test]
    fn test_double_quoted_title() {
        let (_, definition) = parse("[ref]: http://example.com \"A title\"").unwrap();
        assert_eq!(definition.title.as_deref(), Some("A title"));
    }

    #[test]
    fn test_single_quoted_title() {
        let (_, definition) = parse("[ref]: http://example.com 'A title'").unwrap();
        assert_eq!(definition.title.as_deref(), Some("A title"));
    }

    #[test]
    fn test_parenthesized_title() {
        let (_, definition) = parse("[ref]: http://example.com (A title)").unwrap();
        assert_eq!(definition.title.as_deref(), Some("A title"));
    }

    #[test]
    fn test_rejects_non_definitions() {
        assert_eq!(parse("plain text"), None);
        assert_eq!(parse("[no colon] http://x"), None);
        assert_eq!(parse("[]: http://x"), None);
        assert_eq!(parse("[label]:"), None);
        assert_eq!(parse("[label]: url trailing junk"), None);
    }

    #[test]
    fn test_resolution_is_case_insensitive() {
        let mut definitions = LinkDefinitions::default();
        definitions.insert(
            "My  Label",
            LinkDefinition { url: "http://x".to_string(), title: None },
        );
        assert_eq!(definitions.resolve("my label").unwrap().url, "http://x");
        assert_eq!(definitions.resolve("MY LABEL").unwrap().url, "http://x");
        assert!(definitions.resolve("other").is_none());
    }
}
