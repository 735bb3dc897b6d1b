//! The block state machine.
//!
//! One logical line at a time, the renderer classifies input, drives
//! block transitions, and emits output as early as the grammar permits.
//! Paragraphs accumulate until their block ends; tables buffer until
//! finalized; everything else streams line by line.

use std::io::Write;

use tracing::{debug, trace};

use crate::ansi;
use crate::block::{self, BlockKind, Line};
use crate::error::Result;
use crate::inline::InlineFormatter;
use crate::links::LinkDefinitions;
use crate::options::RenderOptions;
use crate::table::TableBuffer;
use crate::wrap;

pub struct Renderer<W: Write> {
    sink: W,
    options: RenderOptions,
    max_width: usize,
    current: BlockKind,
    last_finalized: BlockKind,
    /// One pending blank line owed before the next block's output.
    needs_separation: bool,
    /// Whether the current block has emitted (or accumulated) anything.
    produced_output: bool,
    paragraph: String,
    ordered_counter: u64,
    links: LinkDefinitions,
    table: Option<TableBuffer>,
    /// Open fence marker and run length while inside a fenced block.
    fence: Option<(char, usize)>,
}

impl<W: Write> Renderer<W> {
    pub fn new(sink: W, options: RenderOptions) -> Self {
        let max_width = options.max_width();
        Self {
            sink,
            options,
            max_width,
            current: BlockKind::None,
            last_finalized: BlockKind::None,
            needs_separation: false,
            produced_output: false,
            paragraph: String::new(),
            ordered_counter: 0,
            links: LinkDefinitions::default(),
            table: None,
            fence: None,
        }
    }

    /// Process one logical line (without its terminator).
    pub fn handle_line(&mut self, line: &str) -> Result<()> {
        if let Some((marker, len)) = self.fence {
            if block::is_fence_close(line, marker, len) {
                self.finalize_block()?;
                self.current = BlockKind::None;
            } else {
                self.write_code_line(line, false)?;
            }
            return Ok(());
        }

        let blank = line.trim().is_empty();
        if self.needs_separation && !blank {
            self.sink.write_all(b"\n")?;
            self.needs_separation = false;
        }
        if blank {
            self.finalize_block()?;
            self.current = BlockKind::None;
            return Ok(());
        }

        let classified = block::classify(line, self.current);
        let new_kind = classified.kind();
        if new_kind != self.current && self.current != BlockKind::None {
            if self.current == BlockKind::Paragraph && new_kind == BlockKind::Table {
                // The buffered paragraph becomes the table header, so it
                // must not be finalized here; it still counts as
                // produced output for separation bookkeeping.
                self.produced_output = true;
            } else {
                self.finalize_block()?;
            }
        }
        // A transition finalize may have left a pending separation; it
        // belongs before this block's first output. Link definitions
        // swallow it without emitting.
        if self.needs_separation {
            if new_kind != BlockKind::LinkDefinition {
                self.sink.write_all(b"\n")?;
            }
            self.needs_separation = false;
        }
        if new_kind == BlockKind::OrderedList && self.current != BlockKind::OrderedList {
            self.ordered_counter = 0;
        }
        if new_kind != self.current {
            trace!(from = ?self.current, to = ?new_kind, "block transition");
        }
        self.current = new_kind;
        self.dispatch(classified)
    }

    /// Finalize the open block and flush the sink.
    pub fn finish(&mut self) -> Result<()> {
        self.finalize_block()?;
        self.current = BlockKind::None;
        self.sink.flush()?;
        Ok(())
    }

    pub fn flush_sink(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    fn dispatch(&mut self, line: Line) -> Result<()> {
        match line {
            Line::Blank => Ok(()),
            Line::LinkDefinition { label, definition } => {
                debug!(label = %label, url = %definition.url, "stored link definition");
                self.links.insert(&label, definition);
                Ok(())
            }
            Line::Heading { level, content } => self.write_heading(level, &content),
            Line::UnorderedItem { indent, content } => self.write_list_item(indent, &content, false),
            Line::OrderedItem { indent, content } => self.write_list_item(indent, &content, true),
            Line::Blockquote { indent, content } => self.write_blockquote(indent, &content),
            Line::HorizontalRule => self.write_rule(),
            Line::FenceOpen { marker, len } => {
                self.fence = Some((marker, len));
                Ok(())
            }
            Line::CodeLine { line } => {
                let strip = !matches!(
                    self.last_finalized,
                    BlockKind::UnorderedList | BlockKind::OrderedList
                );
                self.write_code_line(&line, strip)
            }
            Line::TableSeparator { line } => {
                let header = std::mem::take(&mut self.paragraph);
                self.table = Some(TableBuffer::new(&header, &line));
                Ok(())
            }
            Line::TableRow { line } => {
                if let Some(table) = self.table.as_mut() {
                    table.push_row(&line);
                }
                Ok(())
            }
            Line::Paragraph { content } => {
                self.buffer_paragraph(&content);
                Ok(())
            }
        }
    }

    /// Headings self-terminate with two newlines, which already
    /// separate them from the following block.
    fn write_heading(&mut self, level: u8, content: &str) -> Result<()> {
        let formatted = InlineFormatter::new(&self.options, &self.links).format(content);
        let style = self.options.theme.heading(level);
        let mut out = ansi::styled(self.options.enable_colors, style, &formatted);
        out.push_str("\n\n");
        self.sink.write_all(out.as_bytes())?;
        self.produced_output = true;
        Ok(())
    }

    fn write_list_item(&mut self, indent: usize, content: &str, ordered: bool) -> Result<()> {
        let trimmed = content.trim_start();
        let theme = &self.options.theme;
        let (marker, rest) = if let Some(rest) = trimmed.strip_prefix("[ ] ") {
            (theme.task_unchecked.clone(), rest)
        } else if let Some(rest) = trimmed
            .strip_prefix("[x] ")
            .or_else(|| trimmed.strip_prefix("[X] "))
        {
            (theme.task_checked.clone(), rest)
        } else if ordered {
            self.ordered_counter += 1;
            (self.options.theme.ordered_marker(self.ordered_counter), trimmed)
        } else {
            (theme.unordered_marker.clone(), trimmed)
        };

        let formatted = InlineFormatter::new(&self.options, &self.links).format(rest);
        let mut out = " ".repeat(indent);
        out.push_str(&ansi::styled(
            self.options.enable_colors,
            &self.options.theme.bullet,
            &marker,
        ));
        out.push(' ');
        out.push_str(&formatted);
        out.push('\n');
        self.sink.write_all(out.as_bytes())?;
        self.produced_output = true;
        Ok(())
    }

    fn write_blockquote(&mut self, indent: usize, content: &str) -> Result<()> {
        let formatted = InlineFormatter::new(&self.options, &self.links).format(content);
        let mut out = " ".repeat(indent);
        out.push_str(&ansi::styled(
            self.options.enable_colors,
            &self.options.theme.blockquote,
            &self.options.theme.blockquote_marker,
        ));
        out.push_str(&formatted);
        out.push('\n');
        self.sink.write_all(out.as_bytes())?;
        self.produced_output = true;
        Ok(())
    }

    /// `strip` removes one level of indentation (four spaces or one
    /// tab). Inside a list context the indentation is preserved.
    fn write_code_line(&mut self, line: &str, strip: bool) -> Result<()> {
        let content = if strip { strip_code_indent(line) } else { line };
        let mut out = String::new();
        if self.options.enable_colors && !self.options.theme.code_block.is_empty() {
            out.push_str(&self.options.theme.code_block);
        }
        out.push_str(content);
        out.push('\n');
        self.sink.write_all(out.as_bytes())?;
        self.produced_output = true;
        Ok(())
    }

    fn write_rule(&mut self) -> Result<()> {
        let mut out = self
            .options
            .theme
            .hr_char
            .to_string()
            .repeat(self.max_width);
        out.push('\n');
        self.sink.write_all(out.as_bytes())?;
        self.produced_output = true;
        Ok(())
    }

    /// Consecutive paragraph lines join on a single space.
    fn buffer_paragraph(&mut self, content: &str) {
        if !self.paragraph.is_empty() {
            let joined_at_whitespace = self
                .paragraph
                .chars()
                .last()
                .map(char::is_whitespace)
                .unwrap_or(false)
                || content.chars().next().map(char::is_whitespace).unwrap_or(false);
            if !joined_at_whitespace {
                self.paragraph.push(' ');
            }
        }
        self.paragraph.push_str(content);
    }

    /// Close out the current block. Sets the separation flag when the
    /// block both wants separation and produced output.
    fn finalize_block(&mut self) -> Result<()> {
        if self.current == BlockKind::None {
            return Ok(());
        }
        trace!(block = ?self.current, "finalize");
        let mut produced = self.produced_output;
        let mut separates = true;
        match self.current {
            BlockKind::None => {}
            BlockKind::Paragraph => {
                if self.paragraph.is_empty() {
                    produced = false;
                } else {
                    let text = std::mem::take(&mut self.paragraph);
                    let formatted = InlineFormatter::new(&self.options, &self.links).format(&text);
                    let wrapped = wrap::wrap_styled(&formatted, self.max_width);
                    self.sink.write_all(wrapped.as_bytes())?;
                    produced = true;
                }
            }
            BlockKind::CodeBlock | BlockKind::FencedCode => {
                if self.options.enable_colors && !self.options.theme.code_block.is_empty() {
                    self.sink.write_all(ansi::RESET.as_bytes())?;
                }
                self.fence = None;
            }
            BlockKind::UnorderedList | BlockKind::OrderedList => {
                self.ordered_counter = 0;
            }
            BlockKind::Heading(_) => {
                // Already separated by its own trailing newlines.
                separates = false;
            }
            BlockKind::Blockquote | BlockKind::HorizontalRule => {}
            BlockKind::LinkDefinition => {
                produced = false;
                separates = false;
            }
            BlockKind::Table => {
                if let Some(table) = self.table.take() {
                    debug!(
                        columns = table.column_count(),
                        rows = table.row_count(),
                        "table finalized"
                    );
                    let lines = table.render();
                    for line in &lines {
                        self.sink.write_all(line.as_bytes())?;
                        self.sink.write_all(b"\n")?;
                    }
                    produced = !lines.is_empty();
                } else {
                    produced = false;
                }
            }
        }
        self.last_finalized = self.current;
        self.needs_separation = separates && produced;
        self.produced_output = false;
        Ok(())
    }
}

fn strip_code_indent(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix('\t') {
        return rest;
    }
    let mut rest = line;
    for _ in 0..4 {
        match rest.strip_prefix(' ') {
            Some(stripped) => rest = stripped,
            None => break,
        }
    }
    rest
}
