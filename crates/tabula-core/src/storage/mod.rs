//! Grid text formats.

pub mod csv;

pub use csv::{sheet_from_csv, sheet_to_csv};
