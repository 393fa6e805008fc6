//! Cell and sheet data structures.
//!
//! A [`Sheet`] is a rectangular row-major grid of [`Cell`]s. Rectangularity
//! is an invariant: every constructor pads or sizes rows so all rows have
//! equal length, and nothing mutates row lengths afterwards. Cloning a sheet
//! deep-copies every cell and style, so a clone never aliases its source.

use serde::{Deserialize, Serialize};

/// Horizontal alignment for a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Optional per-cell presentation flags. Unset fields mean default rendering.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CellStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub bg_color: Option<String>,
    pub color: Option<String>,
    pub align: Option<Align>,
}

/// A single cell: displayed text, optional formula source, optional style.
///
/// When `formula` is set, `value` holds the result of its most recent
/// evaluation (or the error marker). The recalculation pass maintains this.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub value: String,
    pub formula: Option<String>,
    pub style: Option<CellStyle>,
}

impl Cell {
    /// Build a cell from user input. Input starting with `=` is stored as
    /// both the value and the formula source; anything else is a literal.
    pub fn from_input(input: &str) -> Cell {
        Cell {
            value: input.to_string(),
            formula: input.starts_with('=').then(|| input.to_string()),
            style: None,
        }
    }

    /// The text a user edits: the formula source when present, else the
    /// stored value. This is what the formula bar, clipboard, and CSV
    /// encoder all read.
    pub fn source_text(&self) -> &str {
        self.formula.as_deref().unwrap_or(&self.value)
    }
}

/// A rectangular grid of cells. Rows are stored in row-major order and all
/// rows have equal length for the lifetime of an instance.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Create a blank sheet of the given dimensions.
    pub fn new(rows: usize, cols: usize) -> Sheet {
        Sheet {
            rows: vec![vec![Cell::default(); cols]; rows],
        }
    }

    /// Build a sheet from parsed rows, padding short rows with blank cells
    /// so the grid stays rectangular.
    pub fn from_rows(mut rows: Vec<Vec<Cell>>) -> Sheet {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, Cell::default());
        }
        Sheet { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(col)
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row)?.get_mut(col)
    }

    /// Stored text of a cell, or `""` when the position is out of bounds.
    pub fn value(&self, row: usize, col: usize) -> &str {
        self.cell(row, col).map_or("", |cell| cell.value.as_str())
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.row_count() && col < self.col_count()
    }
}
