//! Table types.

use serde::{Deserialize, Serialize};

/// A single table cell as produced by table detection.
///
/// Detection may find a column with no text in a given row; that slot is
/// [`Cell::Missing`] rather than an empty string so callers can tell the two
/// apart until output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// Text found in this cell (untrimmed)
    Present(String),
    /// No text detected in this cell
    Missing,
}

impl Cell {
    /// Create a present cell.
    pub fn text(text: impl Into<String>) -> Self {
        Cell::Present(text.into())
    }

    /// Normalized output value: missing becomes empty, whitespace is trimmed.
    pub fn normalized(&self) -> String {
        match self {
            Cell::Present(text) => text.trim().to_string(),
            Cell::Missing => String::new(),
        }
    }

    /// Check if the cell is missing.
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

impl From<Option<String>> for Cell {
    fn from(value: Option<String>) -> Self {
        value.map(Cell::Present).unwrap_or(Cell::Missing)
    }
}

/// Rows of raw cells, in the order the detector found them.
pub type RawTable = Vec<Vec<Cell>>;

/// A normalized table: rows of cell strings.
pub type Table = Vec<Vec<String>>;

/// Normalize every cell of a raw table, keeping row and column order.
pub fn normalize_table(raw: &[Vec<Cell>]) -> Table {
    raw.iter()
        .map(|row| row.iter().map(Cell::normalized).collect())
        .collect()
}

/// Normalize a list of raw tables.
pub fn normalize_tables(raw: &[RawTable]) -> Vec<Table> {
    raw.iter().map(|table| normalize_table(table)).collect()
}
