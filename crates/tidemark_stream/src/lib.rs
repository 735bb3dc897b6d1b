//! Tidemark Stream - incremental Markdown renderer for terminal output.
//!
//! This crate renders Markdown into ANSI-styled, word-wrapped terminal
//! output in a single forward pass: callers push characters, strings,
//! or lines as they arrive, and formatted bytes reach the sink as early
//! as the grammar permits. No document tree is ever built; the only
//! buffered state is the in-progress paragraph and the current table.
//!
//! # Example
//!
//! ```
//! use tidemark_stream::{MarkdownWriter, RenderOptions};
//!
//! let mut out = Vec::new();
//! let mut writer = MarkdownWriter::with_options(&mut out, RenderOptions::default().colors(false));
//!
//! // Push input as it arrives; it need not align with line boundaries.
//! writer.write_str("Hello **wor")?;
//! writer.write_str("ld**!\n")?;
//! writer.complete()?;
//!
//! drop(writer);
//! assert_eq!(out, b"Hello world!\n");
//! # Ok::<(), tidemark_stream::RenderError>(())
//! ```

pub mod ansi;
mod block;
mod error;
mod inline;
pub mod links;
mod options;
mod renderer;
pub mod table;
mod theme;
mod wrap;

use std::io::Write;

pub use block::BlockKind;
pub use error::{RenderError, Result};
pub use options::{DEFAULT_WIDTH, RenderOptions};
pub use renderer::Renderer;
pub use theme::Theme;
pub use wrap::wrap_styled;

/// Streaming markdown writer.
///
/// Buffers raw input until a complete logical line is available, then
/// feeds it to the block state machine. `\r` is discarded, so CRLF and
/// LF input render identically. Dropping the writer completes it.
pub struct MarkdownWriter<W: Write> {
    renderer: Renderer<W>,
    line_buffer: String,
    completed: bool,
}

impl<W: Write> MarkdownWriter<W> {
    /// Create a writer over `sink` with default options.
    pub fn new(sink: W) -> Self {
        Self::with_options(sink, RenderOptions::default())
    }

    pub fn with_options(sink: W, options: RenderOptions) -> Self {
        Self {
            renderer: Renderer::new(sink, options),
            line_buffer: String::new(),
            completed: false,
        }
    }

    /// Append one character. A newline hands the buffered line to the
    /// state machine.
    pub fn write_char(&mut self, c: char) -> Result<()> {
        self.ensure_open()?;
        match c {
            '\r' => Ok(()),
            '\n' => {
                let line = std::mem::take(&mut self.line_buffer);
                self.renderer.handle_line(&line)
            }
            _ => {
                self.line_buffer.push(c);
                Ok(())
            }
        }
    }

    /// Append a string; it may contain any number of newlines.
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        for c in s.chars() {
            self.write_char(c)?;
        }
        Ok(())
    }

    /// Append a string followed by a newline.
    pub fn write_line(&mut self, s: &str) -> Result<()> {
        self.write_str(s)?;
        self.write_char('\n')
    }

    /// Append a bare newline.
    pub fn write_newline(&mut self) -> Result<()> {
        self.write_char('\n')
    }

    /// Flush the sink. Safe at any point; never alters the rendered
    /// byte stream.
    pub fn flush(&mut self) -> Result<()> {
        self.renderer.flush_sink()
    }

    /// Finish the stream: the unterminated residue is handled as a
    /// final line, the open block is finalized, and the sink flushed.
    /// Idempotent; implied by drop.
    pub fn complete(&mut self) -> Result<()> {
        if self.completed {
            return Ok(());
        }
        self.completed = true;
        if !self.line_buffer.is_empty() {
            let line = std::mem::take(&mut self.line_buffer);
            self.renderer.handle_line(&line)?;
        }
        self.renderer.finish()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.completed {
            Err(RenderError::EndOfStream)
        } else {
            Ok(())
        }
    }
}

impl<W: Write> Drop for MarkdownWriter<W> {
    fn drop(&mut self) {
        let _ = self.complete();
    }
}

/// Feed a whole document through the streaming renderer and collect
/// the output. Convenience for callers that already hold the input.
pub fn render_to_string(input: &str, options: RenderOptions) -> String {
    let mut sink = Vec::new();
    {
        let mut writer = MarkdownWriter::with_options(&mut sink, options);
        // A Vec sink cannot fail and the writer is used before completion.
        let _ = writer.write_str(input);
        let _ = writer.complete();
    }
    String::from_utf8_lossy(&sink).into_owned()
}
