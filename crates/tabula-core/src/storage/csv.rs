//! CSV text codec.
//!
//! RFC-4180-flavored: fixed `,` delimiter, `"` quoting with embedded
//! quotes doubled. Encoding writes each cell's source text (formula over
//! value) so formulas survive a round trip. Decoding is permissive and
//! never fails: blank lines are dropped and an unterminated quote consumes
//! the rest of its line.

use tabula_engine::engine::{Cell, Sheet};

/// Encode a sheet as CSV text. Fields containing `"`, `,`, or a newline
/// are quoted; rows are joined with `\n`.
pub fn sheet_to_csv(sheet: &Sheet) -> String {
    sheet
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| escape_field(cell.source_text()))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_field(field: &str) -> String {
    if field.contains('"') || field.contains(',') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Decode CSV text into a sheet. Lines are split on CRLF/LF, fields are
/// trimmed, and a trimmed field starting with `=` becomes a formula cell.
/// Short rows are padded so the result is rectangular.
pub fn sheet_from_csv(text: &str) -> Sheet {
    let rows = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            parse_line(line)
                .into_iter()
                .map(|field| Cell::from_input(field.trim()))
                .collect()
        })
        .collect();
    Sheet::from_rows(rows)
}

/// Split one line on commas outside quotes. Inside a quoted field, `""` is
/// an escaped quote and `,` is literal.
fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut current)),
                _ => current.push(c),
            }
        }
    }
    fields.push(current);
    fields
}
