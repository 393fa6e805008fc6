use std::path::{Path, PathBuf};

use crate::error::{Result, TabulaError};
use crate::storage::csv::{sheet_from_csv, sheet_to_csv};

use super::state::{DEFAULT_COLUMN_WIDTH, DEFAULT_ROW_HEIGHT, Document};

impl Document {
    /// Replace the document contents with decoded CSV text.
    ///
    /// Records one history entry, resets the layout metrics for the new
    /// dimensions, recalculates, and moves the selection to A1.
    pub fn import_csv(&mut self, text: &str) {
        self.push_history();

        self.sheet = sheet_from_csv(text);
        self.column_widths = vec![DEFAULT_COLUMN_WIDTH; self.sheet.col_count()];
        self.row_heights = vec![DEFAULT_ROW_HEIGHT; self.sheet.row_count()];
        self.modified = true;

        self.recalculate();
        self.selected_row = 0;
        self.selected_col = 0;
        self.formula_draft = self.source_text_at(0, 0);
    }

    /// Encode the current grid as CSV text.
    pub fn export_csv(&self) -> String {
        sheet_to_csv(&self.sheet)
    }

    /// Load CSV from a file and make it the current document.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)?;
        self.import_csv(&text);
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// Save to the current file path.
    /// Returns the path saved to.
    pub fn save_file(&mut self) -> Result<PathBuf> {
        let Some(path) = &self.file_path else {
            return Err(TabulaError::NoFilePath);
        };
        std::fs::write(path, self.export_csv())?;
        self.modified = false;
        Ok(path.clone())
    }

    /// Save to a new path and remember it as the current file path.
    pub fn save_file_as(&mut self, path: &Path) -> Result<()> {
        self.file_path = Some(path.to_path_buf());
        self.save_file().map(|_| ())
    }
}
