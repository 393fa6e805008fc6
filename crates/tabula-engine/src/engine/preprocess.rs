//! Formula preprocessing ahead of expression evaluation.
//!
//! Before an arithmetic formula can be handed to the expression engine,
//! cell references like `A1` must be replaced with the referenced cell's
//! numeric text, and bare numeric literals normalized to float form so the
//! whole expression computes in f64.

use regex::Regex;
use std::sync::OnceLock;

use super::cell::Sheet;
use super::cell_ref::CellRef;

fn cell_token_re() -> &'static Regex {
    static CELL_TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    CELL_TOKEN_RE
        .get_or_init(|| Regex::new(r"[A-Za-z]+[0-9]+").expect("cell token regex must compile"))
}

fn number_re() -> &'static Regex {
    static NUMBER_RE: OnceLock<Regex> = OnceLock::new();
    NUMBER_RE.get_or_init(|| Regex::new(r"[0-9.]+").expect("number literal regex must compile"))
}

/// Strip every character that is not a digit, `.`, or `-`.
pub fn strip_numeric(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}

/// The numeric text a cell contributes to an expression: its stored text
/// stripped to `[0-9.-]`, or `"0"` when nothing remains.
pub fn numeric_text(raw: &str) -> String {
    let cleaned = strip_numeric(raw);
    if cleaned.is_empty() { "0".to_string() } else { cleaned }
}

/// Replace every `A1`-shaped token with the referenced cell's numeric text,
/// case-insensitively. Unresolvable or out-of-bounds references substitute
/// `0`.
pub fn substitute_cell_refs(expr: &str, sheet: &Sheet) -> String {
    cell_token_re()
        .replace_all(expr, |caps: &regex::Captures| match CellRef::parse(&caps[0]) {
            Some(cell_ref) => numeric_text(sheet.value(cell_ref.row, cell_ref.col)),
            None => "0".to_string(),
        })
        .to_string()
}

/// Rewrite numeric literals into explicit float form (`5` -> `5.0`) so the
/// expression engine computes in f64 throughout. A run of digits and dots
/// that does not parse as a number (e.g. `1.2.3`) is left in place for the
/// engine to reject.
pub(crate) fn float_literals(expr: &str) -> String {
    number_re()
        .replace_all(expr, |caps: &regex::Captures| match caps[0].parse::<f64>() {
            Ok(n) => format!("{:?}", n),
            Err(_) => caps[0].to_string(),
        })
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{float_literals, numeric_text, strip_numeric, substitute_cell_refs};
    use crate::engine::{Cell, Sheet};

    fn sheet_of(rows: &[&[&str]]) -> Sheet {
        Sheet::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|text| Cell::from_input(text)).collect())
                .collect(),
        )
    }

    #[test]
    fn test_strip_numeric() {
        assert_eq!(strip_numeric("$1,234.50"), "1234.50");
        assert_eq!(strip_numeric("-3 apples"), "-3");
        assert_eq!(strip_numeric("abc"), "");
    }

    #[test]
    fn test_numeric_text_empty_becomes_zero() {
        assert_eq!(numeric_text(""), "0");
        assert_eq!(numeric_text("x"), "0");
        assert_eq!(numeric_text("7"), "7");
    }

    #[test]
    fn test_substitute_cell_refs() {
        let sheet = sheet_of(&[&["2", "3"]]);
        assert_eq!(substitute_cell_refs("A1+B1", &sheet), "2+3");
        assert_eq!(substitute_cell_refs("a1*b1", &sheet), "2*3");
    }

    #[test]
    fn test_substitute_out_of_bounds_is_zero() {
        let sheet = sheet_of(&[&["2"]]);
        assert_eq!(substitute_cell_refs("A1+Z99", &sheet), "2+0");
    }

    #[test]
    fn test_substitute_strips_non_numeric_text() {
        let sheet = sheet_of(&[&["$5.00", "abc"]]);
        assert_eq!(substitute_cell_refs("A1-B1", &sheet), "5.00-0");
    }

    #[test]
    fn test_float_literals() {
        assert_eq!(float_literals("2+3"), "2.0+3.0");
        assert_eq!(float_literals("2.5*4"), "2.5*4.0");
        assert_eq!(float_literals("(1)/(3)"), "(1.0)/(3.0)");
    }

    #[test]
    fn test_float_literals_leaves_garbage_for_the_engine() {
        assert_eq!(float_literals("1.2.3"), "1.2.3");
    }
}
