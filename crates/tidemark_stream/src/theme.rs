//! Theme configuration for markdown rendering.
//!
//! A [`Theme`] is a passive palette: every style field is a ready-made
//! SGR sequence (empty means "no styling"), and the remaining fields are
//! the literal marker strings the renderer writes. The renderer never
//! mutates a theme.

use crate::ansi;

/// Style palette consumed by the renderer.
#[derive(Debug, Clone)]
pub struct Theme {
    // Headings
    pub heading1: String,
    pub heading2: String,
    pub heading3: String,

    // Lists
    pub bullet: String,
    pub unordered_marker: String,
    /// Ordered-list prefix format; `{}` is replaced with the item number.
    pub ordered_format: String,
    pub task_unchecked: String,
    pub task_checked: String,

    // Blockquotes
    pub blockquote: String,
    pub blockquote_marker: String,

    // Code
    pub code_block: String,
    pub code_inline: String,

    // Links
    pub link_text: String,
    pub link_url: String,

    // Images
    pub image_prefix: String,
    pub image_suffix: String,
    pub image_alt: String,

    // Emphasis on/off pairs. Off codes are per-attribute so that
    // closing one span leaves enclosing spans intact.
    pub bold_on: String,
    pub bold_off: String,
    pub italic_on: String,
    pub italic_off: String,
    pub strikethrough_on: String,
    pub strikethrough_off: String,

    // Horizontal rules
    pub hr_char: char,
}

impl Default for Theme {
    fn default() -> Self {
        Self::colored()
    }
}

impl Theme {
    /// Colored default theme.
    pub fn colored() -> Self {
        Self {
            heading1: format!("{}{}", ansi::BOLD, ansi::FG_MAGENTA),
            heading2: format!("{}{}", ansi::BOLD, ansi::FG_BLUE),
            heading3: format!("{}{}", ansi::BOLD, ansi::FG_CYAN),

            bullet: ansi::FG_CYAN.to_string(),
            unordered_marker: "•".to_string(),
            ordered_format: "{}.".to_string(),
            task_unchecked: "[ ] ".to_string(),
            task_checked: "[x] ".to_string(),

            blockquote: ansi::FG_BRIGHT_BLACK.to_string(),
            blockquote_marker: "│ ".to_string(),

            code_block: ansi::FG_YELLOW.to_string(),
            code_inline: ansi::FG_YELLOW.to_string(),

            link_text: format!("{}{}", ansi::UNDERLINE, ansi::FG_CYAN),
            link_url: format!("{}{}", ansi::DIM, ansi::FG_BLUE),

            image_prefix: "[🖼 ".to_string(),
            image_suffix: "]".to_string(),
            image_alt: ansi::FG_CYAN.to_string(),

            bold_on: ansi::BOLD.to_string(),
            bold_off: ansi::BOLD_OFF.to_string(),
            italic_on: ansi::ITALIC.to_string(),
            italic_off: ansi::ITALIC_OFF.to_string(),
            strikethrough_on: ansi::STRIKETHROUGH.to_string(),
            strikethrough_off: ansi::STRIKETHROUGH_OFF.to_string(),

            hr_char: '─',
        }
    }

    /// Monochrome theme: every style field is empty, so style emission
    /// is a no-op by construction. Marker strings stay plain text.
    pub fn monochrome() -> Self {
        Self {
            heading1: String::new(),
            heading2: String::new(),
            heading3: String::new(),

            bullet: String::new(),
            unordered_marker: "•".to_string(),
            ordered_format: "{}.".to_string(),
            task_unchecked: "[ ] ".to_string(),
            task_checked: "[x] ".to_string(),

            blockquote: String::new(),
            blockquote_marker: "│ ".to_string(),

            code_block: String::new(),
            code_inline: String::new(),

            link_text: String::new(),
            link_url: String::new(),

            image_prefix: "[🖼 ".to_string(),
            image_suffix: "]".to_string(),
            image_alt: String::new(),

            bold_on: String::new(),
            bold_off: String::new(),
            italic_on: String::new(),
            italic_off: String::new(),
            strikethrough_on: String::new(),
            strikethrough_off: String::new(),

            hr_char: '-',
        }
    }

    /// Style for a heading level; levels above 3 clamp to the deepest.
    pub fn heading(&self, level: u8) -> &str {
        match level {
            1 => &self.heading1,
            2 => &self.heading2,
            _ => &self.heading3,
        }
    }

    /// Ordered-list marker for item number `n`.
    pub fn ordered_marker(&self, n: u64) -> String {
        self.ordered_format.replace("{}", &n.to_string())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_ordered_marker() {
        let theme = Theme::colored();
        assert_eq!(theme.ordered_marker(1), "1.");
        assert_eq!(theme.ordered_marker(12), "12.");
    }

    #[test]
    fn test_heading_clamps() {
        let theme = Theme::colored();
        assert_eq!(theme.heading(1), theme.heading1.as_str());
        assert_eq!(theme.heading(5), theme.heading3.as_str());
    }

    #[test]
    fn test_monochrome_has_no_styles() {
        let theme = Theme::monochrome();
        for style in [
            &theme.heading1,
            &theme.heading2,
            &theme.heading3,
            &theme.bullet,
            &theme.blockquote,
            &theme.code_block,
            &theme.code_inline,
            &theme.link_text,
            &theme.link_url,
            &theme.image_alt,
            &theme.bold_on,
            &theme.bold_off,
            &theme.italic_on,
            &theme.italic_off,
            &theme.strikethrough_on,
            &theme.strikethrough_off,
        ] {
            assert_eq!(style, "");
        }
    }
}
