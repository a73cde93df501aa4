//! Table rendering utilities for CLI outputs.
//! Widths are measured on visible text, so cells may carry ANSI colors.

use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

static ANSI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI pattern"));

pub fn strip_ansi(s: &str) -> String {
    ANSI.replace_all(s, "").into_owned()
}

pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

pub struct Column {
    pub header: String,
    /// Plain-text cells longer than this are wrapped onto extra lines.
    pub max_width: Option<usize>,
    pub align_right: bool,
}

impl Column {
    pub fn new(header: &str) -> Self {
        Self {
            header: header.to_string(),
            max_width: None,
            align_right: false,
        }
    }

    pub fn wrap(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn right(mut self) -> Self {
        self.align_right = true;
        self
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Split every cell into display lines.
    fn cell_lines(&self, row: &[String]) -> Vec<Vec<String>> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let cell = row.get(i).cloned().unwrap_or_default();
                match col.max_width {
                    Some(w) if visible_width(&cell) > w && cell == strip_ansi(&cell) => {
                        textwrap::wrap(&cell, w)
                            .into_iter()
                            .map(|c| c.into_owned())
                            .collect()
                    }
                    _ => vec![cell],
                }
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let wrapped: Vec<Vec<Vec<String>>> = self.rows.iter().map(|r| self.cell_lines(r)).collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                wrapped
                    .iter()
                    .flat_map(|row| row[i].iter())
                    .map(|line| visible_width(line))
                    .chain(std::iter::once(visible_width(&col.header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();

        // Header
        for (col, w) in self.columns.iter().zip(&widths) {
            out.push_str(&pad(&col.header, *w, col.align_right));
            out.push(' ');
        }
        out.truncate(out.trim_end().len());
        out.push('\n');

        let total: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(total));
        out.push('\n');

        // Rows
        for row in &wrapped {
            let height = row.iter().map(Vec::len).max().unwrap_or(1);
            for line_idx in 0..height {
                let mut line = String::new();
                for ((col, cell), w) in self.columns.iter().zip(row).zip(&widths) {
                    let text = cell.get(line_idx).map(String::as_str).unwrap_or("");
                    line.push_str(&pad(text, *w, col.align_right));
                    line.push(' ');
                }
                out.push_str(line.trim_end());
                out.push('\n');
            }
        }

        out
    }
}

fn pad(s: &str, width: usize, right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(visible_width(s)));
    if right {
        format!("{fill}{s}")
    } else {
        format!("{s}{fill}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_ignore_ansi_codes() {
        assert_eq!(visible_width("\x1b[32m09:00\x1b[0m"), 5);
        assert_eq!(visible_width("€12"), 3);
    }

    #[test]
    fn renders_aligned_columns() {
        let mut t = Table::new(vec![Column::new("Name"), Column::new("Min").right()]);
        t.add_row(vec!["CODE".into(), "90".into()]);
        t.add_row(vec!["LEARNING".into(), "5".into()]);

        let out = t.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Name     Min");
        assert_eq!(lines[2], "CODE      90");
        assert_eq!(lines[3], "LEARNING   5");
    }

    #[test]
    fn long_cells_wrap() {
        let mut t = Table::new(vec![Column::new("Description").wrap(11), Column::new("Min")]);
        t.add_row(vec!["fixed parser and wrote tests".into(), "60".into()]);

        let out = t.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2 + 3);
        assert!(lines[2].starts_with("fixed"));
        assert!(lines[2].ends_with("60"));
    }
}
