//! Inline formatting.
//!
//! A single forward pass over a text fragment. Emphasis spans are
//! tracked on a stack of tags; closing a span emits the specific off
//! code for that tag, never a blanket reset, so enclosing spans stay
//! live. Nested markup inside link text and image alt text is not
//! parsed.

use crate::ansi;
use crate::links::LinkDefinitions;
use crate::options::RenderOptions;
use crate::theme::Theme;

const ESCAPABLE: &[char] = &['*', '_', '~', '[', ']', '(', ')', '\\', '!'];

/// An open emphasis span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Span {
    Bold,
    Italic,
    BoldItalic,
    Strikethrough,
}

pub(crate) struct InlineFormatter<'a> {
    theme: &'a Theme,
    colors: bool,
    strip_html: bool,
    hyperlinks: bool,
    links: &'a LinkDefinitions,
}

impl<'a> InlineFormatter<'a> {
    pub fn new(options: &'a RenderOptions, links: &'a LinkDefinitions) -> Self {
        Self {
            theme: &options.theme,
            colors: options.enable_colors,
            strip_html: options.strip_html,
            hyperlinks: options.use_hyperlinks,
            links,
        }
    }

    /// Format one fragment. Any spans still open at the end are closed
    /// in reverse order.
    pub fn format(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut out = String::new();
        let mut stack: Vec<Span> = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            match chars[i] {
                '\\' if matches!(chars.get(i + 1), Some(c) if ESCAPABLE.contains(c)) => {
                    out.push(chars[i + 1]);
                    i += 2;
                }
                '!' if chars.get(i + 1) == Some(&'[') => {
                    i = self.take_image(&chars, i, &mut out);
                }
                '<' if self.strip_html => match find_char(&chars, i + 1, '>') {
                    Some(end) => i = end + 1,
                    None => {
                        out.push('<');
                        i += 1;
                    }
                },
                '[' => {
                    i = self.take_link(&chars, i, &mut out);
                }
                '`' => {
                    i = self.take_code_span(&chars, i, &mut out);
                }
                '*' | '_' | '~' => {
                    i = self.take_marker_run(&chars, i, &mut stack, &mut out);
                }
                c => {
                    out.push(c);
                    i += 1;
                }
            }
        }
        for span in stack.iter().rev() {
            out.push_str(self.sgr(&self.off(*span)));
        }
        out
    }

    fn sgr<'s>(&self, code: &'s str) -> &'s str {
        if self.colors { code } else { "" }
    }

    fn on(&self, span: Span) -> String {
        match span {
            Span::Bold => self.theme.bold_on.clone(),
            Span::Italic => self.theme.italic_on.clone(),
            Span::BoldItalic => format!("{}{}", self.theme.bold_on, self.theme.italic_on),
            Span::Strikethrough => self.theme.strikethrough_on.clone(),
        }
    }

    fn off(&self, span: Span) -> String {
        match span {
            Span::Bold => self.theme.bold_off.clone(),
            Span::Italic => self.theme.italic_off.clone(),
            Span::BoldItalic => format!("{}{}", self.theme.bold_off, self.theme.italic_off),
            Span::Strikethrough => self.theme.strikethrough_off.clone(),
        }
    }

    /// `![alt](url ...)` — the alt text renders between the theme's
    /// image prefix and suffix; the URL and title are discarded.
    fn take_image(&self, chars: &[char], start: usize, out: &mut String) -> usize {
        match parse_bracket_paren(chars, start + 1) {
            Some(Parsed { text: alt, end, .. }) => {
                out.push_str(&self.theme.image_prefix);
                out.push_str(&ansi::styled(self.colors, &self.theme.image_alt, &alt));
                out.push_str(&self.theme.image_suffix);
                end
            }
            None => {
                out.push('!');
                start + 1
            }
        }
    }

    /// `[text](url)`, `[text][label]`, `[label][]`, or `[label]`.
    /// Reference forms only count when the label resolves right now;
    /// otherwise the source text passes through verbatim.
    fn take_link(&self, chars: &[char], start: usize, out: &mut String) -> usize {
        if let Some(Parsed { text, inner, end }) = parse_bracket_paren(chars, start) {
            let url = inner.split_whitespace().next().unwrap_or("");
            self.push_link(&text, url, out);
            return end;
        }
        if let Some(close) = find_char(chars, start + 1, ']') {
            let text: String = chars[start + 1..close].iter().collect();
            if chars.get(close + 1) == Some(&'[') {
                if let Some(label_close) = find_char(chars, close + 2, ']') {
                    let label: String = chars[close + 2..label_close].iter().collect();
                    let lookup = if label.trim().is_empty() { &text } else { &label };
                    if let Some(definition) = self.links.resolve(lookup) {
                        let url = definition.url.clone();
                        self.push_link(&text, &url, out);
                    } else {
                        out.extend(chars[start..=label_close].iter());
                    }
                    return label_close + 1;
                }
            }
            if let Some(definition) = self.links.resolve(&text) {
                let url = definition.url.clone();
                self.push_link(&text, &url, out);
            } else {
                out.extend(chars[start..=close].iter());
            }
            return close + 1;
        }
        out.push('[');
        start + 1
    }

    fn push_link(&self, text: &str, url: &str, out: &mut String) {
        if self.hyperlinks {
            out.push_str(&ansi::hyperlink_open(url));
            out.push_str(&ansi::styled(self.colors, &self.theme.link_text, text));
            out.push_str(ansi::HYPERLINK_CLOSE);
        } else {
            out.push_str(&ansi::styled(self.colors, &self.theme.link_text, text));
            out.push_str(" (");
            out.push_str(&ansi::styled(self.colors, &self.theme.link_url, url));
            out.push(')');
        }
    }

    /// `` `code` `` — literal span content in the inline-code style.
    fn take_code_span(&self, chars: &[char], start: usize, out: &mut String) -> usize {
        match find_char(chars, start + 1, '`') {
            Some(close) => {
                let content: String = chars[start + 1..close].iter().collect();
                out.push_str(&ansi::styled(self.colors, &self.theme.code_inline, &content));
                close + 1
            }
            None => {
                out.push('`');
                start + 1
            }
        }
    }

    /// A run of identical emphasis markers. Recognized runs toggle a
    /// span; anything else is literal.
    fn take_marker_run(
        &self,
        chars: &[char],
        start: usize,
        stack: &mut Vec<Span>,
        out: &mut String,
    ) -> usize {
        let marker = chars[start];
        let mut len = 0;
        while chars.get(start + len) == Some(&marker) {
            len += 1;
        }
        let span = match (marker, len) {
            ('*' | '_', 3) => Some(Span::BoldItalic),
            ('*' | '_', 2) => Some(Span::Bold),
            ('*' | '_', 1) => Some(Span::Italic),
            ('~', 2) => Some(Span::Strikethrough),
            _ => None,
        };
        match span {
            Some(span) => {
                if stack.last() == Some(&span) {
                    stack.pop();
                    let off = self.off(span);
                    out.push_str(self.sgr(&off));
                } else {
                    stack.push(span);
                    let on = self.on(span);
                    out.push_str(self.sgr(&on));
                }
            }
            None => {
                for _ in 0..len {
                    out.push(marker);
                }
            }
        }
        start + len
    }
}

struct Parsed {
    text: String,
    inner: String,
    end: usize,
}

/// Parse `[text](inner)` starting at an opening bracket. Brackets and
/// parentheses do not nest.
fn parse_bracket_paren(chars: &[char], open: usize) -> Option<Parsed> {
    if chars.get(open) != Some(&'[') {
        return None;
    }
    let close = find_char(chars, open + 1, ']')?;
    if chars.get(close + 1) != Some(&'(') {
        return None;
    }
    let paren_close = find_char(chars, close + 2, ')')?;
    Some(Parsed {
        text: chars[open + 1..close].iter().collect(),
        inner: chars[close + 2..paren_close].iter().collect(),
        end: paren_close + 1,
    })
}

fn find_char(chars: &[char], from: usize, target: char) -> Option<usize> {
    (from..chars.len()).find(|&i| chars[i] == target)
}
