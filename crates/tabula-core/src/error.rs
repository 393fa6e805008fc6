//! Error types for Tabula core.

use thiserror::Error;

/// Errors that can occur in the document layer.
///
/// Recoverable conditions (history exhaustion, clipboard type mismatch,
/// malformed CSV, formula failures) are deliberately not represented here:
/// they resolve as no-ops or in-cell markers.
#[derive(Error, Debug)]
pub enum TabulaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No file path set")]
    NoFilePath,
}

pub type Result<T> = std::result::Result<T, TabulaError>;
