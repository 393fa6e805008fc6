//! tabula-core - UI-agnostic spreadsheet document model + storage.

pub mod document;
pub mod error;
pub mod history;
pub mod storage;

pub use document::{Clipboard, Document, Interaction, SelectionRect, StyleUpdate};
pub use error::{Result, TabulaError};
pub use history::{History, Snapshot};

pub use tabula_engine::engine::{Align, Cell, CellRef, CellStyle, Evaluator, Sheet, Value};
