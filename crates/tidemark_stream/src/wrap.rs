//! ANSI-aware word wrapping.

use unicode_width::UnicodeWidthChar;

use crate::ansi;

/// Wrap styled text into lines of at most `width` visible columns.
///
/// Escape sequences pass through without affecting the column count.
/// When a character would overflow the width, the line breaks at its
/// most recent space (which is consumed); a word longer than the whole
/// width breaks at the boundary. The output always ends with a newline.
pub fn wrap_styled(text: &str, width: usize) -> String {
    let width = width.max(1);
    let chars: Vec<char> = text.chars().collect();

    let mut out = String::new();
    let mut line = String::new();
    let mut col = 0;
    // Byte offset of the last space in `line` and the column before it.
    let mut last_space: Option<(usize, usize)> = None;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == ansi::ESC {
            let end = ansi::sequence_end(&chars, i);
            line.extend(&chars[i..end]);
            i = end;
            continue;
        }
        let char_width = UnicodeWidthChar::width(c).unwrap_or(0);
        if col + char_width > width {
            if c == ' ' {
                // The overflowing character is itself a break point.
                out.push_str(&line);
                out.push('\n');
                line.clear();
                col = 0;
                last_space = None;
                i += 1;
                continue;
            }
            match last_space.take() {
                Some((space_at, space_col)) => {
                    let rest = line.split_off(space_at);
                    out.push_str(&line);
                    out.push('\n');
                    line = rest[1..].to_string();
                    col -= space_col + 1;
                }
                None => {
                    out.push_str(&line);
                    out.push('\n');
                    line.clear();
                    col = 0;
                }
            }
        }
        line.push(c);
        col += char_width;
        if c == ' ' {
            last_space = Some((line.len() - 1, col - 1));
        }
        i += 1;
    }

    if !line.is_empty() || out.is_empty() {
        out.push_str(&line);
        out.push('\n');
    }
    out
}
