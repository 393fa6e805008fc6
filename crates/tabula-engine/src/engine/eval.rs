//! Formula evaluation.
//!
//! The evaluator handles three shapes of input:
//!
//! - text without a leading `=` passes through unchanged
//! - `SUM`/`AVG`/`MIN`/`MAX` over a single `START:END` range
//! - any other expression is arithmetic over cell references, evaluated by
//!   Rhai after preprocessing
//!
//! Evaluation is total: malformed ranges degrade to `0` and failed
//! arithmetic surfaces as the [`ERROR_MARKER`] text, never as a panic or an
//! error value. There is no dependency tracking; ordering across cells is
//! supplied by the caller's recalculation pass.

use regex::Regex;
use rhai::{Dynamic, Engine};
use std::fmt;
use std::sync::OnceLock;

use super::cell::Sheet;
use super::preprocess::{float_literals, strip_numeric, substitute_cell_refs};
use super::range::parse_range;

/// In-cell marker for a formula that failed to evaluate.
pub const ERROR_MARKER: &str = "#ERROR";

/// Ranges above this cell count evaluate as empty instead of iterating.
const MAX_RANGE_CELLS: usize = 1_000_000;

/// Result of evaluating a formula: literal text or a number.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Number(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Aggregate {
    Sum,
    Avg,
    Min,
    Max,
}

impl Aggregate {
    const ALL: [Aggregate; 4] = [
        Aggregate::Sum,
        Aggregate::Avg,
        Aggregate::Min,
        Aggregate::Max,
    ];

    fn keyword(self) -> &'static str {
        match self {
            Aggregate::Sum => "SUM",
            Aggregate::Avg => "AVG",
            Aggregate::Min => "MIN",
            Aggregate::Max => "MAX",
        }
    }

    /// Fold the collected values. An empty collection yields `0` for every
    /// aggregate, including MIN/MAX.
    fn apply(self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let sum: f64 = values.iter().sum();
        match self {
            Aggregate::Sum => sum,
            Aggregate::Avg => sum / values.len() as f64,
            Aggregate::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Aggregate::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

fn paren_group_re() -> &'static Regex {
    static PAREN_RE: OnceLock<Regex> = OnceLock::new();
    // Greedy: captures everything between the first `(` and the last `)`.
    PAREN_RE.get_or_init(|| Regex::new(r"\((.*)\)").expect("paren group regex must compile"))
}

/// Evaluates formula text against a sheet.
///
/// Holds the Rhai engine so a recalculation pass reuses one instance across
/// every formula cell.
pub struct Evaluator {
    engine: Engine,
}

impl Evaluator {
    pub fn new() -> Evaluator {
        Evaluator {
            engine: Engine::new(),
        }
    }

    /// Evaluate a formula against the sheet.
    ///
    /// Text without a leading `=` is returned unchanged. Aggregate keywords
    /// are matched case-insensitively at the start of the expression; any
    /// other expression is arithmetic over cell references.
    pub fn evaluate(&self, formula: &str, sheet: &Sheet) -> Value {
        let Some(expr) = formula.strip_prefix('=') else {
            return Value::Text(formula.to_string());
        };
        let expr = expr.trim();
        let upper = expr.to_uppercase();

        for aggregate in Aggregate::ALL {
            if upper.starts_with(aggregate.keyword()) {
                return Value::Number(self.aggregate(&upper, sheet, aggregate));
            }
        }

        self.arithmetic(expr, sheet)
    }

    fn aggregate(&self, expr: &str, sheet: &Sheet, aggregate: Aggregate) -> f64 {
        let Some(caps) = paren_group_re().captures(expr) else {
            return 0.0;
        };
        let values = range_values(sheet, &caps[1]);
        aggregate.apply(&values)
    }

    fn arithmetic(&self, expr: &str, sheet: &Sheet) -> Value {
        let substituted = substitute_cell_refs(expr, sheet);
        let prepared = float_literals(&substituted);

        match self.engine.eval_expression::<Dynamic>(&prepared) {
            Ok(result) => match numeric(result) {
                Some(n) if n.is_finite() => Value::Number(n),
                _ => Value::Text(ERROR_MARKER.to_string()),
            },
            Err(_) => Value::Text(ERROR_MARKER.to_string()),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

fn numeric(value: Dynamic) -> Option<f64> {
    if let Some(f) = value.clone().try_cast::<f64>() {
        return Some(f);
    }
    value.try_cast::<i64>().map(|n| n as f64)
}

/// Collect the numeric contribution of every cell in the inclusive
/// rectangle spanned by a range. Out-of-bounds and non-numeric cells
/// contribute `0` and still count toward the total (AVG divides by the
/// full rectangle size). An unparsable endpoint yields no values at all.
fn range_values(sheet: &Sheet, range: &str) -> Vec<f64> {
    let Some((start, end)) = parse_range(range) else {
        return Vec::new();
    };
    let (r1, r2) = (start.row.min(end.row), start.row.max(end.row));
    let (c1, c2) = (start.col.min(end.col), start.col.max(end.col));

    let cell_count = (r2 - r1 + 1).checked_mul(c2 - c1 + 1);
    if cell_count.is_none_or(|n| n > MAX_RANGE_CELLS) {
        return Vec::new();
    }

    let mut values = Vec::new();
    for row in r1..=r2 {
        for col in c1..=c2 {
            let cleaned = strip_numeric(sheet.value(row, col));
            values.push(cleaned.parse::<f64>().unwrap_or(0.0));
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::{ERROR_MARKER, Evaluator, Value};
    use crate::engine::{Cell, Sheet};

    fn sheet_of(rows: &[&[&str]]) -> Sheet {
        Sheet::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|text| Cell::from_input(text)).collect())
                .collect(),
        )
    }

    fn eval(formula: &str, sheet: &Sheet) -> Value {
        Evaluator::new().evaluate(formula, sheet)
    }

    #[test]
    fn test_literal_passes_through() {
        let sheet = Sheet::new(1, 1);
        assert_eq!(eval("hello", &sheet), Value::Text("hello".to_string()));
        assert_eq!(eval("", &sheet), Value::Text(String::new()));
    }

    #[test]
    fn test_sum_skips_non_numeric_cells() {
        let sheet = sheet_of(&[&["1"], &["2"], &["x"]]);
        assert_eq!(eval("=SUM(A1:A3)", &sheet), Value::Number(3.0));
    }

    #[test]
    fn test_aggregate_keyword_is_case_insensitive() {
        let sheet = sheet_of(&[&["1"], &["2"], &["3"]]);
        assert_eq!(eval("=sum(a1:a3)", &sheet), Value::Number(6.0));
    }

    #[test]
    fn test_avg_counts_every_cell_in_the_rectangle() {
        // A1:A4 spans two missing rows; they contribute 0 to the sum but
        // still count toward the divisor.
        let sheet = sheet_of(&[&["4"], &["4"]]);
        assert_eq!(eval("=AVG(A1:A4)", &sheet), Value::Number(2.0));
    }

    #[test]
    fn test_min_max() {
        let sheet = sheet_of(&[&["5", "-2", "7"]]);
        assert_eq!(eval("=MIN(A1:C1)", &sheet), Value::Number(-2.0));
        assert_eq!(eval("=MAX(A1:C1)", &sheet), Value::Number(7.0));
    }

    #[test]
    fn test_aggregate_without_parens_is_zero() {
        let sheet = sheet_of(&[&["1"]]);
        assert_eq!(eval("=SUM", &sheet), Value::Number(0.0));
    }

    #[test]
    fn test_aggregate_malformed_range_is_zero() {
        let sheet = sheet_of(&[&["1"]]);
        assert_eq!(eval("=SUM(A1)", &sheet), Value::Number(0.0));
        assert_eq!(eval("=SUM(A1:XYZ)", &sheet), Value::Number(0.0));
    }

    #[test]
    fn test_aggregate_reversed_range_normalizes() {
        let sheet = sheet_of(&[&["1", "2"], &["3", "4"]]);
        assert_eq!(eval("=SUM(B2:A1)", &sheet), Value::Number(10.0));
    }

    #[test]
    fn test_aggregate_strips_currency_text() {
        let sheet = sheet_of(&[&["$1,000"], &["$500.50"]]);
        assert_eq!(eval("=SUM(A1:A2)", &sheet), Value::Number(1500.5));
    }

    #[test]
    fn test_arithmetic_over_cell_refs() {
        let sheet = sheet_of(&[&["2", "3"]]);
        assert_eq!(eval("=A1+B1", &sheet), Value::Number(5.0));
        assert_eq!(eval("=a1*b1", &sheet), Value::Number(6.0));
        assert_eq!(eval("=(A1+B1)*2", &sheet), Value::Number(10.0));
    }

    #[test]
    fn test_arithmetic_non_numeric_cell_is_zero() {
        let sheet = sheet_of(&[&["2", "abc"]]);
        assert_eq!(eval("=A1+B1", &sheet), Value::Number(2.0));
    }

    #[test]
    fn test_arithmetic_division_is_float() {
        let sheet = sheet_of(&[&["5", "2"]]);
        assert_eq!(eval("=A1/B1", &sheet), Value::Number(2.5));
        assert_eq!(eval("=5/2", &sheet), Value::Number(2.5));
    }

    #[test]
    fn test_arithmetic_malformed_is_error() {
        let sheet = sheet_of(&[&["2"]]);
        assert_eq!(eval("=A1+", &sheet), Value::Text(ERROR_MARKER.to_string()));
        assert_eq!(
            eval("=hello+1", &sheet),
            Value::Text(ERROR_MARKER.to_string())
        );
    }

    #[test]
    fn test_arithmetic_division_by_zero_is_error() {
        let sheet = sheet_of(&[&["5", "0"]]);
        assert_eq!(eval("=A1/B1", &sheet), Value::Text(ERROR_MARKER.to_string()));
    }

    #[test]
    fn test_formula_cell_contributes_its_computed_value() {
        // B1 holds a formula whose last-computed value is 6; arithmetic
        // over B1 reads that stored value, not the formula source.
        let mut sheet = sheet_of(&[&["2", "=SUM(A1:A1)"]]);
        sheet.cell_mut(0, 1).unwrap().value = "6".to_string();
        assert_eq!(eval("=B1+1", &sheet), Value::Number(7.0));
    }

    #[test]
    fn test_number_display_is_minimal() {
        assert_eq!(Value::Number(6.0).to_string(), "6");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Number(-0.25).to_string(), "-0.25");
    }
}
