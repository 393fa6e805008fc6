//! Cell reference parsing and formatting.
//!
//! Bidirectional conversion between spreadsheet-style cell references
//! (e.g., "A1", "B2", "AA100") and zero-indexed row/column coordinates.
//! Letters map to a 1-based base-26 column (there is no zero digit, so
//! index 26 is "AA", not "BA"); digits are a 1-based row number.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A reference to a cell by row and column indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

fn a1_re() -> &'static Regex {
    static A1_RE: OnceLock<Regex> = OnceLock::new();
    A1_RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z]+)([0-9]+)").expect("cell reference regex must compile")
    })
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a cell reference from spreadsheet notation (e.g., "A1", "b2",
    /// "aa10"). Letters are matched case-insensitively and digits are read
    /// greedily after them; trailing text beyond the digits is ignored.
    /// Returns `None` for malformed input, a zero row, or indices that
    /// overflow, all of which callers treat as out of bounds.
    pub fn parse(text: &str) -> Option<CellRef> {
        let caps = a1_re().captures(text)?;

        let mut acc: usize = 0;
        for b in caps[1].to_ascii_uppercase().bytes() {
            let digit = (b - b'A') as usize + 1;
            acc = acc.checked_mul(26)?.checked_add(digit)?;
        }
        let col = acc.checked_sub(1)?;

        let row = caps[2].parse::<usize>().ok()?.checked_sub(1)?;

        Some(CellRef { row, col })
    }

    /// Convert a zero-based column index to letters (0 -> A, 25 -> Z,
    /// 26 -> AA, 701 -> ZZ).
    pub fn col_to_letters(col: usize) -> String {
        let mut name = String::new();
        let mut i = col as i128;
        while i >= 0 {
            name.insert(0, (b'A' + (i % 26) as u8) as char);
            i = i / 26 - 1;
        }
        name
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row + 1)
    }
}
