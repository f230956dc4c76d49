//! Pipe tables inside a memo body
//!
//! A table is a run of consecutive body lines such as
//!
//! ```text
//! | Item | Qty | Cost |
//! |:-----|:---:|-----:|
//! | Tape | 2   | $4   |
//! ```
//!
//! The second row is the separator and sets each column's alignment. Cells are
//! escaped like any other memo text and the result is a bordered `tabular`.
//! Tables that cannot be understood render as nothing; the source rows are
//! still kept so the memo can be written back out unchanged.

use tracing::warn;

use crate::escape::escape;
use crate::model::Table;

/// Column alignment from a separator cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    fn from_separator(cell: &str) -> Option<Self> {
        let left = cell.starts_with(':');
        let inner = cell.strip_prefix(':').unwrap_or(cell);
        let right = inner.ends_with(':');
        let dashes = inner.strip_suffix(':').unwrap_or(inner);
        if dashes.is_empty() || !dashes.chars().all(|c| c == '-') {
            return None;
        }
        Some(match (left, right) {
            (true, true) => Alignment::Center,
            (false, true) => Alignment::Right,
            _ => Alignment::Left,
        })
    }

    fn column_spec(self) -> char {
        match self {
            Alignment::Left => 'l',
            Alignment::Center => 'c',
            Alignment::Right => 'r',
        }
    }
}

/// Header row, alignments and body rows of a well-formed table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub header: Vec<String>,
    pub alignments: Vec<Alignment>,
    pub rows: Vec<Vec<String>>,
}

/// True when `line` belongs to a pipe table rather than the outline.
///
/// A line needs at least two pipes. Lines starting with a dash are paragraph
/// items unless they carry more than one dash, which covers separator rows
/// written without a leading pipe.
pub fn is_table_row(line: &str) -> bool {
    let pipes = line.matches('|').count();
    let dashes = line.matches('-').count();
    pipes >= 2 && (!line.trim_start().starts_with('-') || dashes > 1)
}

/// Split rows into a grid, or `None` when they do not form a table.
pub fn parse_grid(lines: &[&str]) -> Option<Grid> {
    if lines.len() < 2 {
        return None;
    }
    let rows: Vec<Vec<&str>> = lines
        .iter()
        .map(|line| line.trim().split('|').map(str::trim).collect())
        .collect();
    let width = rows[0].len();
    if rows.iter().any(|row| row.len() != width) {
        return None;
    }

    // outer pipes leave empty columns at the edges
    let kept: Vec<usize> = (0..width)
        .filter(|&column| rows.iter().any(|row| !row[column].is_empty()))
        .collect();
    if kept.is_empty() {
        return None;
    }
    let mut rows = rows.into_iter().map(|row| {
        kept.iter()
            .map(|&column| row[column].to_string())
            .collect::<Vec<_>>()
    });

    let header = rows.next()?;
    let alignments = rows
        .next()?
        .iter()
        .map(|cell| Alignment::from_separator(cell))
        .collect::<Option<Vec<_>>>()?;
    Some(Grid {
        header,
        alignments,
        rows: rows.collect(),
    })
}

/// Render a grid as a bordered `tabular` environment.
pub fn render_grid(grid: &Grid) -> String {
    let columns: String = grid
        .alignments
        .iter()
        .map(|alignment| format!("{}|", alignment.column_spec()))
        .collect();
    let mut lines = vec![
        format!("\\begin{{tabular}}{{|{columns}}}"),
        "\\hline".to_string(),
    ];
    for row in std::iter::once(&grid.header).chain(grid.rows.iter()) {
        let cells: Vec<String> = row.iter().map(|cell| escape(cell)).collect();
        lines.push(format!("{} \\\\ \\hline", cells.join(" & ")));
    }
    lines.push("\\end{tabular}".to_string());
    lines.join("\n")
}

/// Build the body node for a run of table rows.
pub fn parse_table(lines: &[&str]) -> Table {
    let source = lines
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n");
    let rendered = match parse_grid(lines) {
        Some(grid) => render_grid(&grid),
        None => {
            warn!(rows = lines.len(), "skipping malformed table");
            String::new()
        }
    };
    Table { source, rendered }
}
