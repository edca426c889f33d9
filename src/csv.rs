// src/csv.rs
use std::mem::take;

/* ---------------- Parsing ---------------- */

/// Minimal CSV parser (quotes + CRLF tolerant).
/// A quote only opens a quoted field at the start of that field; anywhere
/// else it is literal. A blank line is kept as an empty record so row
/// positions match the source lines.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut at_start = true; // nothing consumed yet for the current field
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if matches!(chars.peek(), Some('"')) {
                    chars.next(); // double-quote escape
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if at_start => {
                in_quotes = true;
                at_start = false;
            }
            c if c == sep && !in_quotes => {
                // move the field without cloning
                row.push(take(&mut field));
                at_start = true;
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                if !(row.is_empty() && at_start) {
                    row.push(take(&mut field));
                }
                rows.push(take(&mut row));
                at_start = true;
            }
            _ => {
                field.push(ch);
                at_start = false;
            }
        }
    }

    // Flush any trailing field/row even if quotes were unterminated.
    if !(row.is_empty() && at_start) {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// Widest row; sheets are sized off this.
pub fn max_columns(rows: &[Vec<String>]) -> usize {
    rows.iter().map(Vec::len).max().unwrap_or(0)
}
