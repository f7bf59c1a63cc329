//! Tabular export payloads and their CSV/TSV encodings.

use std::fmt;

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Decimal(f64),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Decimal(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<u64> for Cell {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(Self::Decimal(n as f64), Self::Integer)
    }
}

impl From<usize> for Cell {
    fn from(n: usize) -> Self {
        Self::from(n as u64)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Self::Decimal(n)
    }
}

/// Headers, rows and the base filename (without extension) of an export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    pub filename: String,
}

impl ExportTable {
    /// Create an empty table with the given headers.
    pub fn new<I, S>(filename: impl Into<String>, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            filename: filename.into(),
        }
    }

    /// Append a row.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Comma-separated encoding.
    ///
    /// Headers are written verbatim. Text cells containing a comma, a
    /// double quote or a newline are wrapped in quotes with inner quotes
    /// doubled. Lines are joined with `\n` and there is no trailing newline.
    pub fn to_csv(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(self.headers.join(","));
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(csv_cell).collect();
            lines.push(cells.join(","));
        }
        lines.join("\n")
    }

    /// Tab-separated encoding. No quoting is applied.
    pub fn to_tsv(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(self.headers.join("\t"));
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            lines.push(cells.join("\t"));
        }
        lines.join("\n")
    }
}

fn csv_cell(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) if s.contains([',', '"', '\n']) => {
            format!("\"{}\"", s.replace('"', "\"\""))
        }
        other => other.to_string(),
    }
}
