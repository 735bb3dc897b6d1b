//! ANSI escape sequences and visible-width measurement.
//!
//! Everything the renderer emits besides plain text is built from the
//! constants and helpers in this module: SGR style codes, their specific
//! "off" counterparts, and OSC-8 hyperlink wrapping.

use unicode_width::UnicodeWidthChar;

pub const ESC: char = '\u{1b}';

/// Reset all attributes.
pub const RESET: &str = "\x1b[0m";

pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const ITALIC: &str = "\x1b[3m";
pub const UNDERLINE: &str = "\x1b[4m";
pub const STRIKETHROUGH: &str = "\x1b[9m";

// Specific off codes. Closing a span must not reset unrelated
// attributes that are still open, so a generic RESET is not enough.
pub const BOLD_OFF: &str = "\x1b[22m";
pub const ITALIC_OFF: &str = "\x1b[23m";
pub const UNDERLINE_OFF: &str = "\x1b[24m";
pub const STRIKETHROUGH_OFF: &str = "\x1b[29m";

pub const FG_RED: &str = "\x1b[31m";
pub const FG_GREEN: &str = "\x1b[32m";
pub const FG_YELLOW: &str = "\x1b[33m";
pub const FG_BLUE: &str = "\x1b[34m";
pub const FG_MAGENTA: &str = "\x1b[35m";
pub const FG_CYAN: &str = "\x1b[36m";
pub const FG_BRIGHT_BLACK: &str = "\x1b[90m";

/// 256-color foreground.
pub fn fg_256(color: u8) -> String {
    format!("\x1b[38;5;{color}m")
}

/// 24-bit foreground.
pub fn fg_rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{r};{g};{b}m")
}

/// OSC-8 hyperlink opener; the closer is [`HYPERLINK_CLOSE`].
pub fn hyperlink_open(url: &str) -> String {
    format!("\x1b]8;;{url}\x07")
}

pub const HYPERLINK_CLOSE: &str = "\x1b]8;;\x1b\\";

/// Wrap `text` in `style` + [`RESET`] when styling is enabled and the
/// style is non-empty; otherwise pass the text through untouched.
pub(crate) fn styled(enabled: bool, style: &str, text: &str) -> String {
    if enabled && !style.is_empty() {
        format!("{style}{text}{RESET}")
    } else {
        text.to_string()
    }
}

/// Visible terminal width of `text`, skipping CSI and OSC sequences.
pub fn visible_width(text: &str) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut width = 0;
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == ESC {
            i = sequence_end(&chars, i);
            continue;
        }
        width += UnicodeWidthChar::width(chars[i]).unwrap_or(0);
        i += 1;
    }
    width
}

/// Index just past the escape sequence starting at `start`
/// (`chars[start]` must be ESC). CSI sequences run to their final byte,
/// OSC sequences to BEL or ST.
pub(crate) fn sequence_end(chars: &[char], start: usize) -> usize {
    let mut i = start + 1;
    match chars.get(i) {
        Some('[') => {
            i += 1;
            while i < chars.len() {
                let c = chars[i];
                i += 1;
                if ('\u{40}'..='\u{7e}').contains(&c) {
                    break;
                }
            }
        }
        Some(']') => {
            i += 1;
            while i < chars.len() {
                let c = chars[i];
                i += 1;
                if c == '\u{7}' {
                    break;
                }
                if c == ESC && chars.get(i) == Some(&'\\') {
                    i += 1;
                    break;
                }
            }
        }
        Some(_) => i += 1,
        None => {}
    }
    i
}
