//! Line classification.
//!
//! Each complete input line is classified into the block it belongs to,
//! given the currently open block. Rules are evaluated in order; the
//! first match wins. Recognition is line-oriented — there is no
//! lookahead beyond the line itself.

use crate::links::{self, LinkDefinition};

/// The block kinds the state machine moves between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockKind {
    #[default]
    None,
    Paragraph,
    Heading(u8),
    UnorderedList,
    OrderedList,
    CodeBlock,
    FencedCode,
    Blockquote,
    LinkDefinition,
    Table,
    HorizontalRule,
}

/// A classified line: the block kind plus exactly the fields that block
/// needs from the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Blank,
    LinkDefinition {
        label: String,
        definition: LinkDefinition,
    },
    Heading {
        level: u8,
        content: String,
    },
    UnorderedItem {
        indent: usize,
        content: String,
    },
    OrderedItem {
        indent: usize,
        content: String,
    },
    Blockquote {
        indent: usize,
        content: String,
    },
    HorizontalRule,
    FenceOpen {
        marker: char,
        len: usize,
    },
    CodeLine {
        line: String,
    },
    TableSeparator {
        line: String,
    },
    TableRow {
        line: String,
    },
    Paragraph {
        content: String,
    },
}

impl Line {
    pub fn kind(&self) -> BlockKind {
        match self {
            Line::Blank => BlockKind::None,
            Line::LinkDefinition { .. } => BlockKind::LinkDefinition,
            Line::Heading { level, .. } => BlockKind::Heading(*level),
            Line::UnorderedItem { .. } => BlockKind::UnorderedList,
            Line::OrderedItem { .. } => BlockKind::OrderedList,
            Line::Blockquote { .. } => BlockKind::Blockquote,
            Line::HorizontalRule => BlockKind::HorizontalRule,
            Line::FenceOpen { .. } => BlockKind::FencedCode,
            Line::CodeLine { .. } => BlockKind::CodeBlock,
            Line::TableSeparator { .. } | Line::TableRow { .. } => BlockKind::Table,
            Line::Paragraph { .. } => BlockKind::Paragraph,
        }
    }
}

/// Classify one logical line against the currently open block.
pub fn classify(line: &str, current: BlockKind) -> Line {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }
    let indent = line.chars().take_while(|&c| c == ' ').count();

    if indent == 0 {
        if let Some((label, definition)) = links::parse_definition(line) {
            return Line::LinkDefinition { label, definition };
        }
        if let Some((level, content)) = parse_heading(line) {
            return Line::Heading { level, content };
        }
    }
    if let Some(content) = parse_unordered_item(trimmed) {
        return Line::UnorderedItem { indent, content };
    }
    if let Some(content) = parse_ordered_item(trimmed) {
        return Line::OrderedItem { indent, content };
    }
    if let Some(rest) = trimmed.strip_prefix('>') {
        let content = rest.strip_prefix(' ').unwrap_or(rest);
        return Line::Blockquote { indent, content: content.to_string() };
    }
    if is_horizontal_rule(trimmed) {
        return Line::HorizontalRule;
    }
    if indent < 4 && !line.starts_with('\t') {
        if let Some((marker, len)) = parse_fence(trimmed) {
            return Line::FenceOpen { marker, len };
        }
    }
    if indent >= 4 || line.starts_with('\t') {
        return Line::CodeLine { line: line.to_string() };
    }
    if matches!(current, BlockKind::Paragraph | BlockKind::None) && is_table_separator(trimmed) {
        return Line::TableSeparator { line: line.to_string() };
    }
    if current == BlockKind::Table && trimmed.contains('|') {
        return Line::TableRow { line: line.to_string() };
    }
    Line::Paragraph { content: trimmed.to_string() }
}

/// ATX heading: one to three `#` at indentation zero, followed by a
/// space. Deeper hashes fall through to paragraph.
fn parse_heading(line: &str) -> Option<(u8, String)> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if !(1..=3).contains(&hashes) {
        return None;
    }
    let rest = line[hashes..].strip_prefix(' ')?;
    Some((hashes as u8, rest.trim().to_string()))
}

fn parse_unordered_item(trimmed: &str) -> Option<String> {
    for marker in ["* ", "- ", "+ "] {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            return Some(rest.to_string());
        }
    }
    None
}

fn parse_ordered_item(trimmed: &str) -> Option<String> {
    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = trimmed[digits..].strip_prefix('.')?.strip_prefix(' ')?;
    Some(rest.to_string())
}

/// Three or more of the same `-`, `*`, or `_` and nothing else.
fn is_horizontal_rule(trimmed: &str) -> bool {
    let mut chars = trimmed.chars();
    let first = match chars.next() {
        Some(c @ ('-' | '*' | '_')) => c,
        _ => return false,
    };
    trimmed.len() >= 3 && chars.all(|c| c == first)
}

/// A fence opener: a run of three or more backticks or tildes. The
/// info string after the run is tolerated and ignored.
fn parse_fence(trimmed: &str) -> Option<(char, usize)> {
    let marker = match trimmed.chars().next() {
        Some(c @ ('`' | '~')) => c,
        _ => return None,
    };
    let len = trimmed.chars().take_while(|&c| c == marker).count();
    if len >= 3 { Some((marker, len)) } else { None }
}

/// A closing fence: at least as many of the opening marker and nothing
/// else on the line.
pub fn is_fence_close(line: &str, marker: char, len: usize) -> bool {
    let trimmed = line.trim();
    let run = trimmed.chars().take_while(|&c| c == marker).count();
    run >= len && run == trimmed.chars().count()
}

/// A table separator contains `|` and `-` and consists solely of `-`,
/// `:`, `|`, and whitespace.
fn is_table_separator(trimmed: &str) -> bool {
    trimmed.contains('|')
        && trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| matches!(c, '-' | ':' | '|') || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn kind_of(line: &str) -> BlockKind {
        classify(line, BlockKind::None).kind()
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(kind_of(""), BlockKind::None);
        assert_eq!(kind_of("   "), BlockKind::None);
        assert_eq!(kind_of("\t"), BlockKind::None);
    }

    #[test]
    fn test_headings() {
        assert_eq!(
            classify("# Title", BlockKind::None),
            Line::Heading { level: 1, content: "Title".to_string() }
        );
        assert_eq!(
            classify("### Deep", BlockKind::None),
            Line::Heading { level: 3, content: "Deep".to_string() }
        );
    }

    #[test]
    fn test_four_hashes_fall_through_to_paragraph() {
        assert_eq!(kind_of("#### Too deep"), BlockKind::Paragraph);
    }

    #[test]
    fn test_hash_without_space_is_paragraph() {
        assert_eq!(kind_of("#hashtag"), BlockKind::Paragraph);
    }

    #[test]
    fn test_indented_heading_is_not_a_heading() {
        assert_eq!(kind_of("  # Title"), BlockKind::Paragraph);
    }

    #[test]
    fn test_unordered_markers() {
        for line in ["* one", "- one", "+ one"] {
            assert_eq!(
                classify(line, BlockKind::None),
                Line::UnorderedItem { indent: 0, content: "one".to_string() }
            );
        }
    }

    #[test]
    fn test_list_indent_is_preserved() {
        assert_eq!(
            classify("  - nested", BlockKind::None),
            Line::UnorderedItem { indent: 2, content: "nested".to_string() }
        );
    }

    #[test]
    fn test_ordered_items() {
        assert_eq!(
            classify("12. twelfth", BlockKind::None),
            Line::OrderedItem { indent: 0, content: "twelfth".to_string() }
        );
        assert_eq!(kind_of("1.no space"), BlockKind::Paragraph);
    }

    #[test]
    fn test_blockquote_optional_space() {
        assert_eq!(
            classify("> quoted", BlockKind::None),
            Line::Blockquote { indent: 0, content: "quoted".to_string() }
        );
        assert_eq!(
            classify(">tight", BlockKind::None),
            Line::Blockquote { indent: 0, content: "tight".to_string() }
        );
    }

    #[test]
    fn test_indented_code() {
        assert_eq!(
            classify("    let x = 1;", BlockKind::None),
            Line::CodeLine { line: "    let x = 1;".to_string() }
        );
        assert_eq!(
            classify("\tlet x = 1;", BlockKind::None),
            Line::CodeLine { line: "\tlet x = 1;".to_string() }
        );
        assert_eq!(kind_of("   three spaces"), BlockKind::Paragraph);
    }

    #[test]
    fn test_deeply_indented_list_item_stays_a_list_item() {
        // List recognition runs before the indented-code rule.
        assert_eq!(
            classify("    - item", BlockKind::None),
            Line::UnorderedItem { indent: 4, content: "item".to_string() }
        );
    }

    #[test]
    fn test_horizontal_rules() {
        assert_eq!(kind_of("---"), BlockKind::HorizontalRule);
        assert_eq!(kind_of("*****"), BlockKind::HorizontalRule);
        assert_eq!(kind_of("___"), BlockKind::HorizontalRule);
        assert_eq!(kind_of("--"), BlockKind::Paragraph);
        assert_eq!(kind_of("--*"), BlockKind::Paragraph);
    }

    #[test]
    fn test_fences() {
        assert_eq!(
            classify("```", BlockKind::None),
            Line::FenceOpen { marker: '`', len: 3 }
        );
        assert_eq!(
            classify("````rust", BlockKind::None),
            Line::FenceOpen { marker: '`', len: 4 }
        );
        assert_eq!(
            classify("~~~", BlockKind::None),
            Line::FenceOpen { marker: '~', len: 3 }
        );
        assert_eq!(kind_of("``"), BlockKind::Paragraph);
    }

    #[test]
    fn test_fence_close() {
        assert!(is_fence_close("```", '`', 3));
        assert!(is_fence_close("`````", '`', 3));
        assert!(!is_fence_close("``` rust", '`', 3));
        assert!(!is_fence_close("``", '`', 3));
        assert!(!is_fence_close("~~~", '`', 3));
    }

    #[test]
    fn test_table_separator_requires_paragraph_or_none() {
        assert_eq!(
            classify("--- | ---", BlockKind::Paragraph).kind(),
            BlockKind::Table
        );
        assert_eq!(
            classify("--- | ---", BlockKind::None).kind(),
            BlockKind::Table
        );
        assert_eq!(
            classify("--- | ---", BlockKind::Blockquote).kind(),
            BlockKind::Paragraph
        );
    }

    #[test]
    fn test_table_rows_only_inside_tables() {
        assert_eq!(
            classify("a | b", BlockKind::Table),
            Line::TableRow { line: "a | b".to_string() }
        );
        assert_eq!(classify("a | b", BlockKind::None).kind(), BlockKind::Paragraph);
        assert_eq!(
            classify("no pipes here", BlockKind::Table).kind(),
            BlockKind::Paragraph
        );
    }

    #[test]
    fn test_link_definitions_only_at_zero_indent() {
        assert_eq!(
            classify("[ref]: http://example.com", BlockKind::None).kind(),
            BlockKind::LinkDefinition
        );
        assert_eq!(
            classify("  [ref]: http://example.com", BlockKind::None).kind(),
            BlockKind::Paragraph
        );
    }

    #[test]
    fn test_paragraph_content_is_trimmed() {
        assert_eq!(
            classify("  some text  ", BlockKind::None),
            Line::Paragraph { content: "some text".to_string() }
        );
    }
}
