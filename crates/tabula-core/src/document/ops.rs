use tabula_engine::engine::CellStyle;

use super::state::{
    Clipboard, Document, Interaction, MIN_COLUMN_WIDTH, MIN_ROW_HEIGHT, StyleUpdate,
};

impl Document {
    /// Record the pre-mutation state. Structurally redundant pushes are
    /// dropped by the history manager.
    pub(crate) fn push_history(&mut self) {
        let snapshot = self.snapshot();
        self.history.push(snapshot);
    }

    /// Select a cell: move the anchor, collapse the range to it, and
    /// refresh the formula-bar draft from the cell.
    pub fn select_cell(&mut self, row: usize, col: usize) {
        self.selected_row = row;
        self.selected_col = col;
        self.range_start_row = row;
        self.range_end_row = row;
        self.range_start_col = col;
        self.range_end_col = col;
        self.formula_draft = self.source_text_at(row, col);
    }

    /// Move the range end corner (shift-select / drag-select intent). The
    /// anchor stays put; `selection()` normalizes the corners on read.
    pub fn extend_range_to(&mut self, row: usize, col: usize) {
        self.range_end_row = row;
        self.range_end_col = col;
    }

    /// Set one cell's text, applying the `=`-prefix rule to that cell only.
    ///
    /// This is the micro-edit path shared by paste, fill, and edit commit:
    /// it records no history and triggers no recalculation. A write whose
    /// text equals the stored value, or that targets a cell outside the
    /// grid, is a no-op.
    pub fn update_cell(&mut self, row: usize, col: usize, text: &str) {
        let Some(current) = self.sheet.cell(row, col) else {
            return;
        };
        if current.value == text {
            return;
        }

        let mut next = self.sheet.clone();
        if let Some(cell) = next.cell_mut(row, col) {
            cell.value = text.to_string();
            cell.formula = text.starts_with('=').then(|| text.to_string());
        }
        self.sheet = next;
        self.modified = true;
        self.formula_draft = self.source_text_at(row, col);
    }

    /// Clear a cell's text (Delete-key intent).
    pub fn clear_cell(&mut self, row: usize, col: usize) {
        self.update_cell(row, col, "");
    }

    /// Enter editing mode. Ignored while a drag gesture is active.
    pub fn begin_edit(&mut self) {
        if self.interaction == Interaction::Idle {
            self.interaction = Interaction::Editing;
        }
    }

    /// Leave editing mode without committing.
    pub fn cancel_edit(&mut self) {
        if self.interaction == Interaction::Editing {
            self.interaction = Interaction::Idle;
        }
    }

    /// Commit an edited cell: record history, write the text, then run a
    /// full recalculation pass.
    pub fn commit_edit(&mut self, row: usize, col: usize, text: &str) {
        self.push_history();
        self.update_cell(row, col, text);
        self.recalculate();
        self.cancel_edit();
    }

    /// Replace the formula-bar draft without touching the grid.
    pub fn set_draft(&mut self, text: &str) {
        self.formula_draft = text.to_string();
    }

    /// Apply the formula-bar draft to the selected cell and recalculate.
    ///
    /// A draft starting with `=` replaces only the cell's formula; the
    /// recalculation pass supplies the value. Any other draft becomes the
    /// literal value and clears the formula.
    pub fn apply_draft(&mut self) {
        self.push_history();

        let draft = self.formula_draft.clone();
        let mut next = self.sheet.clone();
        let Some(cell) = next.cell_mut(self.selected_row, self.selected_col) else {
            return;
        };
        if draft.starts_with('=') {
            cell.formula = Some(draft);
        } else {
            cell.value = draft;
            cell.formula = None;
        }
        self.sheet = next;
        self.modified = true;
        self.recalculate();
    }

    /// Re-evaluate every formula cell in row-major order against the grid
    /// being rebuilt, so a formula observes already-recomputed values of
    /// earlier cells in the same pass. The finished grid is published
    /// wholesale.
    pub fn recalculate(&mut self) {
        let mut next = self.sheet.clone();
        for row in 0..next.row_count() {
            for col in 0..next.col_count() {
                let formula = next
                    .cell(row, col)
                    .and_then(|cell| cell.formula.clone())
                    .filter(|formula| !formula.is_empty());
                let Some(formula) = formula else {
                    continue;
                };
                let result = self.evaluator.evaluate(&formula, &next);
                if let Some(cell) = next.cell_mut(row, col) {
                    cell.value = result.to_string();
                }
            }
        }
        self.sheet = next;
    }

    /// Copy the anchor cell's source text to the clipboard.
    pub fn copy_cell(&mut self) {
        let text = self.source_text_at(self.selected_row, self.selected_col);
        self.clipboard = Some(Clipboard::Single(text));
    }

    /// Paste a single-cell clipboard at the anchor. An empty clipboard,
    /// an empty copied text, or a range clipboard is rejected as a no-op.
    pub fn paste_cell(&mut self) {
        let Some(Clipboard::Single(text)) = &self.clipboard else {
            return;
        };
        if text.is_empty() {
            return;
        }
        let text = text.clone();
        self.update_cell(self.selected_row, self.selected_col, &text);
    }

    /// Copy the normalized selection rectangle as a grid of source texts.
    pub fn copy_range(&mut self) {
        let rect = self.selection();
        let mut buffer = Vec::new();
        for row in rect.r1..=rect.r2 {
            let mut texts = Vec::new();
            for col in rect.c1..=rect.c2 {
                texts.push(self.source_text_at(row, col));
            }
            buffer.push(texts);
        }
        self.clipboard = Some(Clipboard::Range(buffer));
    }

    /// Paste a range clipboard with its top-left at the anchor, clipping
    /// silently at the grid edges. One history entry covers the whole
    /// batch and a single recalculation pass follows it. A single-cell
    /// clipboard is rejected as a no-op.
    pub fn paste_range(&mut self) {
        let Some(Clipboard::Range(data)) = &self.clipboard else {
            return;
        };
        let data = data.clone();

        self.push_history();
        for (r, texts) in data.iter().enumerate() {
            for (c, text) in texts.iter().enumerate() {
                let target_row = self.selected_row + r;
                let target_col = self.selected_col + c;
                if !self.sheet.contains(target_row, target_col) {
                    continue;
                }
                self.update_cell(target_row, target_col, text);
            }
        }
        self.recalculate();
    }

    /// Begin a drag-fill from the given cell. Ignored while another
    /// gesture is active.
    pub fn start_fill(&mut self, row: usize, col: usize) {
        if self.interaction != Interaction::Idle {
            return;
        }
        self.interaction = Interaction::Filling {
            start_row: row,
            start_col: col,
        };
    }

    /// Fill every row between the drag origin and `row` (inclusive) with
    /// the origin cell's literal value, in the origin column. Fill only
    /// ever runs vertically.
    pub fn fill_to(&mut self, row: usize) {
        let Interaction::Filling {
            start_row,
            start_col,
        } = self.interaction
        else {
            return;
        };
        let value = self.sheet.value(start_row, start_col).to_string();
        let (first, last) = (start_row.min(row), start_row.max(row));
        for target in first..=last {
            self.update_cell(target, start_col, &value);
        }
    }

    /// End the fill gesture.
    pub fn stop_fill(&mut self) {
        if matches!(self.interaction, Interaction::Filling { .. }) {
            self.interaction = Interaction::Idle;
        }
    }

    /// Begin a column resize drag. History is recorded at both ends of the
    /// gesture so the whole drag is one undo step, not one per pointer
    /// move.
    pub fn start_column_resize(&mut self, col: usize) {
        if self.interaction != Interaction::Idle || col >= self.column_widths.len() {
            return;
        }
        self.push_history();
        self.interaction = Interaction::ResizingColumn {
            col,
            start_width: self.column_widths[col],
        };
    }

    /// Apply the drag's cumulative pixel delta to the column width,
    /// flooring at the minimum width.
    pub fn resize_column_by(&mut self, delta: f64) {
        let Interaction::ResizingColumn { col, start_width } = self.interaction else {
            return;
        };
        self.column_widths[col] = (start_width + delta).max(MIN_COLUMN_WIDTH);
        self.modified = true;
    }

    /// End the column resize gesture.
    pub fn stop_column_resize(&mut self) {
        if matches!(self.interaction, Interaction::ResizingColumn { .. }) {
            self.push_history();
            self.interaction = Interaction::Idle;
        }
    }

    /// Begin a row resize drag. Same history pairing as column resize.
    pub fn start_row_resize(&mut self, row: usize) {
        if self.interaction != Interaction::Idle || row >= self.row_heights.len() {
            return;
        }
        self.push_history();
        self.interaction = Interaction::ResizingRow {
            row,
            start_height: self.row_heights[row],
        };
    }

    /// Apply the drag's cumulative pixel delta to the row height, flooring
    /// at the minimum height.
    pub fn resize_row_by(&mut self, delta: f64) {
        let Interaction::ResizingRow { row, start_height } = self.interaction else {
            return;
        };
        self.row_heights[row] = (start_height + delta).max(MIN_ROW_HEIGHT);
        self.modified = true;
    }

    /// End the row resize gesture.
    pub fn stop_row_resize(&mut self) {
        if matches!(self.interaction, Interaction::ResizingRow { .. }) {
            self.push_history();
            self.interaction = Interaction::Idle;
        }
    }

    /// Apply a style intent to the anchor cell: boolean keys toggle, the
    /// others overwrite.
    pub fn apply_style(&mut self, update: StyleUpdate) {
        self.push_history();

        let mut next = self.sheet.clone();
        let Some(cell) = next.cell_mut(self.selected_row, self.selected_col) else {
            return;
        };
        let style = cell.style.get_or_insert_with(CellStyle::default);
        match update {
            StyleUpdate::Bold => style.bold = !style.bold,
            StyleUpdate::Italic => style.italic = !style.italic,
            StyleUpdate::Underline => style.underline = !style.underline,
            StyleUpdate::Align(align) => style.align = Some(align),
            StyleUpdate::Color(color) => style.color = Some(color),
            StyleUpdate::BgColor(color) => style.bg_color = Some(color),
        }
        self.sheet = next;
        self.modified = true;
    }

    /// Undo the most recent recorded mutation. No-op when history is
    /// empty.
    pub fn undo(&mut self) {
        let current = self.snapshot();
        if let Some(previous) = self.history.undo(current) {
            self.restore(previous);
            self.modified = true;
        }
    }

    /// Redo the most recently undone mutation. No-op when there is
    /// nothing to redo.
    pub fn redo(&mut self) {
        let current = self.snapshot();
        if let Some(next) = self.history.redo(current) {
            self.restore(next);
            self.modified = true;
        }
    }
}
