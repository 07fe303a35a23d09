//! Box-drawn comparison table
//!
//! Every column has the same content width; longer cell text is word-wrapped
//! onto extra lines within its row, and words longer than a column are split.

use crate::config::TableConfig;
use crate::constants::LABEL_HEADER;
use crate::outcome::{CellOutcome, ResultMatrix};

/// Renders a result matrix as a text table
pub struct TableRenderer {
    column_width: usize,
}

impl TableRenderer {
    pub fn new(config: &TableConfig) -> Self {
        Self {
            column_width: config.column_width.max(1),
        }
    }

    /// Header row plus one row per case
    pub fn render(&self, matrix: &ResultMatrix) -> String {
        let mut header = Vec::with_capacity(matrix.targets().len() + 1);
        header.push(LABEL_HEADER.to_string());
        header.extend(matrix.targets().iter().cloned());

        let rows: Vec<Vec<String>> = matrix
            .rows()
            .iter()
            .map(|row| {
                let mut cells = Vec::with_capacity(row.cells.len() + 1);
                cells.push(row.case.to_string());
                cells.extend(row.cells.iter().map(CellOutcome::cell_text));
                cells
            })
            .collect();

        self.render_rows(&header, &rows)
    }

    /// Render arbitrary rows under `header`; every row must match its width
    pub fn render_rows(&self, header: &[String], rows: &[Vec<String>]) -> String {
        let columns = header.len();
        let mut out = String::new();

        out.push_str(&self.border('┌', '┬', '┐', columns));
        self.push_row(&mut out, header);

        for row in rows {
            out.push_str(&self.border('├', '┼', '┤', columns));
            self.push_row(&mut out, row);
        }

        out.push_str(&self.border('└', '┴', '┘', columns));
        out
    }

    fn border(&self, left: char, mid: char, right: char, columns: usize) -> String {
        let segment = "─".repeat(self.column_width + 2);
        let mut line = String::new();
        line.push(left);
        for i in 0..columns {
            if i > 0 {
                line.push(mid);
            }
            line.push_str(&segment);
        }
        line.push(right);
        line.push('\n');
        line
    }

    fn push_row(&self, out: &mut String, cells: &[String]) {
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .map(|cell| wrap(cell, self.column_width))
            .collect();
        let height = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);

        for line_no in 0..height {
            out.push('│');
            for lines in &wrapped {
                let text = lines.get(line_no).map(String::as_str).unwrap_or("");
                let pad = self.column_width.saturating_sub(text.chars().count());
                out.push(' ');
                out.push_str(text);
                out.push_str(&" ".repeat(pad));
                out.push_str(" │");
            }
            out.push('\n');
        }
    }
}

/// Word-wrap `text` into lines of at most `width` characters
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            // Hard-split words that can never fit
            while word.len() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let current_len = current.chars().count();
            let needed = if current.is_empty() { word.len() } else { current_len + 1 + word.len() };
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.extend(word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::{CaseRow, ProbeFailure};
    use geobench_common::CaseId;

    fn renderer(width: usize) -> TableRenderer {
        TableRenderer::new(&TableConfig {
            column_width: width,
        })
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("Benchmark (time required in ms)", 20), vec![
            "Benchmark (time",
            "required in ms)"
        ]);
        assert_eq!(wrap("12", 20), vec!["12"]);
        assert_eq!(wrap("", 20), vec![""]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("a abcdefgh", 4), vec!["a", "abcd", "efgh"]);
    }

    #[test]
    fn test_render_rows_layout() {
        let table = renderer(4).render_rows(
            &["A".to_string(), "B".to_string()],
            &[vec!["1".to_string(), "22".to_string()]],
        );

        assert_eq!(
            table,
            "┌──────┬──────┐\n\
             │ A    │ B    │\n\
             ├──────┼──────┤\n\
             │ 1    │ 22   │\n\
             └──────┴──────┘\n"
        );
    }

    #[test]
    fn test_render_matrix_shape() {
        let targets: Vec<String> = ["GEOS (C)", "Shapely (Py)", "Geo (Rust)"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut matrix = ResultMatrix::new(targets);
        for name in ["contains", "within"] {
            matrix.push_row(CaseRow {
                case: CaseId::new(name).unwrap(),
                cells: vec![
                    CellOutcome::from_stdout("3"),
                    CellOutcome::from_stdout("41"),
                    ProbeFailure::TimedOut(1000).into(),
                ],
            });
        }

        let table = renderer(20).render(&matrix);
        let lines: Vec<&str> = table.lines().collect();

        // Header wraps to two lines; each case row fits on one
        let separators = lines.iter().filter(|l| l.starts_with('├')).count();
        assert_eq!(separators, 2);

        for line in lines.iter().filter(|l| l.starts_with('│')) {
            assert_eq!(line.matches('│').count(), 5);
            assert_eq!(line.chars().count(), lines[0].chars().count());
        }

        assert!(table.contains("│ contains "));
        assert!(table.contains("│ within "));
        assert!(table.contains("│ 41 "));
        assert!(table.contains("│ error: timeout "));
        assert!(table.contains("Benchmark (time"));
    }
}
