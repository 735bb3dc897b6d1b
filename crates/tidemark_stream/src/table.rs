//! Table buffering and layout.
//!
//! Tables are the one block that departs from pure streaming: the
//! header, separator, and data rows are buffered and the whole table is
//! laid out on finalization. Cell content is written as-is; it does not
//! pass through the inline formatter.

use unicode_width::UnicodeWidthStr;

/// Placeholder emitted when the buffered table cannot be laid out.
pub const TABLE_ERROR: &str = "[Table Render Error]";

const MIN_COLUMN_WIDTH: usize = 3;

/// Column alignment derived from the separator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// Buffered table awaiting layout.
#[derive(Debug)]
pub struct TableBuffer {
    header: Vec<String>,
    alignments: Vec<Alignment>,
    rows: Vec<Vec<String>>,
}

impl TableBuffer {
    /// Start a table from its header line and the separator line that
    /// triggered table mode.
    pub fn new(header_line: &str, separator_line: &str) -> Self {
        let header = split_cells(header_line);
        let mut alignments: Vec<Alignment> = split_cells(separator_line)
            .iter()
            .map(|cell| parse_alignment(cell))
            .collect();
        // A separator shorter than the header gets default-aligned
        // columns appended so both sides describe the same columns.
        while alignments.len() < header.len() {
            alignments.push(Alignment::Left);
        }
        Self { header, alignments, rows: Vec::new() }
    }

    pub fn push_row(&mut self, line: &str) {
        self.rows.push(split_cells(line));
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Lay the table out as `2 + rows` lines of equal visible width.
    /// Rows wider than the header are truncated; missing cells render
    /// empty. An alignment/column mismatch yields the error placeholder.
    pub fn render(&self) -> Vec<String> {
        let columns = self.header.len();
        if self.alignments.len() != columns {
            return vec![TABLE_ERROR.to_string()];
        }

        let mut widths: Vec<usize> = self
            .header
            .iter()
            .map(|cell| cell.width().max(MIN_COLUMN_WIDTH))
            .collect();
        for row in &self.rows {
            for (i, cell) in row.iter().take(columns).enumerate() {
                widths[i] = widths[i].max(cell.width());
            }
        }

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(layout_row(&self.header, &self.alignments, &widths));
        lines.push(separator_row(&self.alignments, &widths));
        for row in &self.rows {
            lines.push(layout_row(row, &self.alignments, &widths));
        }
        lines
    }
}

/// Split a table line into trimmed cells: one leading and one trailing
/// `|` are stripped before splitting on the remaining pipes.
pub fn split_cells(line: &str) -> Vec<String> {
    let mut trimmed = line.trim();
    trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);
    trimmed
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

fn parse_alignment(cell: &str) -> Alignment {
    match (cell.starts_with(':'), cell.ends_with(':')) {
        (true, true) => Alignment::Center,
        (false, true) => Alignment::Right,
        _ => Alignment::Left,
    }
}

fn layout_row(cells: &[String], alignments: &[Alignment], widths: &[usize]) -> String {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, &width)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            pad_cell(cell, alignments[i], width)
        })
        .collect();
    format!("| {} |", padded.join(" | "))
}

fn pad_cell(cell: &str, alignment: Alignment, width: usize) -> String {
    let fill = width.saturating_sub(cell.width());
    match alignment {
        Alignment::Left => format!("{cell}{}", " ".repeat(fill)),
        Alignment::Right => format!("{}{cell}", " ".repeat(fill)),
        Alignment::Center => {
            let left = fill / 2;
            format!("{}{cell}{}", " ".repeat(left), " ".repeat(fill - left))
        }
    }
}

fn separator_row(alignments: &[Alignment], widths: &[usize]) -> String {
    let cells: Vec<String> = alignments
        .iter()
        .zip(widths)
        .map(|(alignment, &width)| match alignment {
            Alignment::Left => "-".repeat(width),
            Alignment::Right => format!("{}:", "-".repeat(width.saturating_sub(1))),
            Alignment::Center => {
                format!(":{}:", "-".repeat(width.saturating_sub(2)))
            }
        })
        .collect();
    format!("| {} |", cells.join(" | "))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(header: &str, separator: &str, rows: &[&str]) -> String {
        let mut table = TableBuffer::new(header, separator);
        for row in rows {
            table.push_row(row);
        }
        table.render().join("\n")
    }

    #[test]
    fn test_split_cells_strips_outer_pipes() {
        assert_eq!(split_cells("| a | b |"), vec!["a", "b"]);
        assert_eq!(split_cells("a | b"), vec!["a", "b"]);
        assert_eq!(split_cells("  a|b  "), vec!["a", "b"]);
    }

    #[test]
    fn test_simple_table_layout() {
        insta::assert_snapshot!(
            render(
                "Header 1 | Header 2",
                "-------- | --------",
                &["Row 1 Cell 1 | Row 1 Cell 2", "Row 2 Cell 1 | Row 2 Cell 2"],
            ),
            @r"
        | Header 1     | Header 2     |
        | ------------ | ------------ |
        | Row 1 Cell 1 | Row 1 Cell 2 |
        | Row 2 Cell 1 | Row 2 Cell 2 |
        "
        );
    }

    #[test]
    fn test_alignments() {
        insta::assert_snapshot!(
            render("L | C | R", ":--- | :---: | ---:", &["a | b | c"]),
            @r"
        | L   |  C  |   R |
        | --- | :-: | --: |
        | a   |  b  |   c |
        "
        );
    }

    #[test]
    fn test_minimum_column_width() {
        assert_eq!(
            render("a | b", "- | -", &[]),
            "| a   | b   |\n| --- | --- |"
        );
    }

    #[test]
    fn test_missing_cells_render_empty() {
        insta::assert_snapshot!(
            render("A | B | C", "--- | --- | ---", &["1 | 2", "x"]),
            @r"
        | A   | B   | C   |
        | --- | --- | --- |
        | 1   | 2   |     |
        | x   |     |     |
        "
        );
    }

    #[test]
    fn test_extra_cells_are_truncated() {
        assert_eq!(
            render("A | B", "--- | ---", &["1 | 2 | 3"]),
            "| A   | B   |\n| --- | --- |\n| 1   | 2   |"
        );
    }

    #[test]
    fn test_short_separator_pads_default_alignment() {
        assert_eq!(
            render("A | B", "---", &[]),
            "| A   | B   |\n| --- | --- |"
        );
    }

    #[test]
    fn test_alignment_mismatch_reports_error() {
        assert_eq!(
            render("A | B", "--- | --- | ---", &["1 | 2"]),
            TABLE_ERROR
        );
    }

    #[test]
    fn test_equal_visible_widths() {
        let mut table = TableBuffer::new("Name | Age", "--- | ---:");
        table.push_row("Alice | 30");
        table.push_row("Bob | 7");
        let lines = table.render();
        assert_eq!(lines.len(), 4);
        let width = lines[0].width();
        for line in &lines {
            assert_eq!(line.width(), width);
        }
    }

    #[test]
    fn test_unicode_cells_pad_by_display_width() {
        assert_eq!(
            render("名前 | 年齢", "--- | ---", &["田中 | 25"]),
            "| 名前 | 年齢 |\n| ---- | ---- |\n| 田中 | 25   |"
        );
    }
}
