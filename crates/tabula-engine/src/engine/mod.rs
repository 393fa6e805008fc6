//! Spreadsheet engine API.
//!
//! This module provides the computation core for the spreadsheet:
//!
//! - [`Cell`], [`CellStyle`], [`Sheet`] - data structures for cell storage
//! - [`CellRef`] - cell reference parsing (A1 notation ↔ row/col indices)
//! - [`parse_range`] - `START:END` range text parsing
//! - [`Evaluator`], [`Value`] - formula evaluation against a sheet

mod cell;
mod cell_ref;
mod eval;
mod preprocess;
mod range;

pub use cell::{Align, Cell, CellStyle, Sheet};
pub use cell_ref::CellRef;
pub use eval::{ERROR_MARKER, Evaluator, Value};
pub use preprocess::{numeric_text, strip_numeric, substitute_cell_refs};
pub use range::parse_range;
