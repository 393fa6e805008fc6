//! UI-agnostic document state for the spreadsheet.

use std::path::{Path, PathBuf};

use tabula_engine::engine::{Align, Evaluator, Sheet};

use crate::history::{History, Snapshot};

/// Default grid dimensions for a new document.
pub(crate) const DEFAULT_ROWS: usize = 100;
pub(crate) const DEFAULT_COLS: usize = 26;

/// Default layout metrics, in pixels.
pub(crate) const DEFAULT_COLUMN_WIDTH: f64 = 96.0;
pub(crate) const DEFAULT_ROW_HEIGHT: f64 = 21.0;

/// Resize floors, in pixels.
pub(crate) const MIN_COLUMN_WIDTH: f64 = 40.0;
pub(crate) const MIN_ROW_HEIGHT: f64 = 16.0;

/// Clipboard contents: one cell's text, or a rectangle of texts from a
/// range copy. The two shapes never mix; paste operations reject a
/// mismatched variant as a no-op.
#[derive(Clone, Debug, PartialEq)]
pub enum Clipboard {
    Single(String),
    Range(Vec<Vec<String>>),
}

/// Transient interaction mode. At most one mode is active at a time;
/// gestures are bracketed by explicit start/stop calls from the caller,
/// and a start while another gesture is active is ignored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Interaction {
    Idle,
    Editing,
    Filling { start_row: usize, start_col: usize },
    ResizingColumn { col: usize, start_width: f64 },
    ResizingRow { row: usize, start_height: f64 },
}

/// A normalized selection rectangle: inclusive corners with `r1 <= r2` and
/// `c1 <= c2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRect {
    pub r1: usize,
    pub c1: usize,
    pub r2: usize,
    pub c2: usize,
}

/// Style intents from the rendering layer's toolbar. Boolean keys toggle
/// the current value; the others set a literal.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleUpdate {
    Bold,
    Italic,
    Underline,
    Align(Align),
    Color(String),
    BgColor(String),
}

/// UI-agnostic spreadsheet document: the grid plus selection/range state,
/// clipboard, layout metrics, undo history, and the formula evaluator.
///
/// The document is the sole mutator of the grid. Every mutating operation
/// either replaces the grid wholesale (clone, mutate, publish) or no-ops,
/// so observers only ever see fully committed rectangular states.
pub struct Document {
    pub(crate) sheet: Sheet,
    pub(crate) evaluator: Evaluator,
    pub(crate) selected_row: usize,
    pub(crate) selected_col: usize,
    pub(crate) range_start_row: usize,
    pub(crate) range_start_col: usize,
    pub(crate) range_end_row: usize,
    pub(crate) range_end_col: usize,
    pub(crate) column_widths: Vec<f64>,
    pub(crate) row_heights: Vec<f64>,
    pub(crate) formula_draft: String,
    pub(crate) clipboard: Option<Clipboard>,
    pub(crate) history: History,
    pub(crate) interaction: Interaction,
    /// Current file path, if the document was loaded from or saved to one.
    pub(crate) file_path: Option<PathBuf>,
    /// Whether the document has unsaved changes.
    pub(crate) modified: bool,
}

impl Document {
    /// Create a blank document with the default dimensions.
    pub fn new() -> Document {
        Document::with_size(DEFAULT_ROWS, DEFAULT_COLS)
    }

    /// Create a blank document of the given dimensions.
    pub fn with_size(rows: usize, cols: usize) -> Document {
        Document {
            sheet: Sheet::new(rows, cols),
            evaluator: Evaluator::new(),
            selected_row: 0,
            selected_col: 0,
            range_start_row: 0,
            range_start_col: 0,
            range_end_row: 0,
            range_end_col: 0,
            column_widths: vec![DEFAULT_COLUMN_WIDTH; cols],
            row_heights: vec![DEFAULT_ROW_HEIGHT; rows],
            formula_draft: String::new(),
            clipboard: None,
            history: History::new(),
            interaction: Interaction::Idle,
            file_path: None,
            modified: false,
        }
    }

    /// Read-only view of the current grid.
    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    /// The selection anchor as `(row, col)`.
    pub fn selected(&self) -> (usize, usize) {
        (self.selected_row, self.selected_col)
    }

    /// The normalized selection rectangle.
    pub fn selection(&self) -> SelectionRect {
        SelectionRect {
            r1: self.range_start_row.min(self.range_end_row),
            r2: self.range_start_row.max(self.range_end_row),
            c1: self.range_start_col.min(self.range_end_col),
            c2: self.range_start_col.max(self.range_end_col),
        }
    }

    /// Current formula-bar draft text.
    pub fn draft(&self) -> &str {
        &self.formula_draft
    }

    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn column_widths(&self) -> &[f64] {
        &self.column_widths
    }

    pub fn row_heights(&self) -> &[f64] {
        &self.row_heights
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Deep-copy the observable state for the history manager.
    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            sheet: self.sheet.clone(),
            selected_row: self.selected_row,
            selected_col: self.selected_col,
            column_widths: self.column_widths.clone(),
            row_heights: self.row_heights.clone(),
        }
    }

    /// Restore a snapshot and re-derive the formula-bar draft from the
    /// restored selection.
    pub(crate) fn restore(&mut self, snapshot: Snapshot) {
        self.sheet = snapshot.sheet;
        self.selected_row = snapshot.selected_row;
        self.selected_col = snapshot.selected_col;
        self.column_widths = snapshot.column_widths;
        self.row_heights = snapshot.row_heights;
        self.formula_draft = self.source_text_at(self.selected_row, self.selected_col);
    }

    /// The edit text of a cell (`formula` over `value`), or `""` out of
    /// bounds. Used everywhere the formula bar follows the grid.
    pub(crate) fn source_text_at(&self, row: usize, col: usize) -> String {
        self.sheet
            .cell(row, col)
            .map(|cell| cell.source_text().to_string())
            .unwrap_or_default()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
