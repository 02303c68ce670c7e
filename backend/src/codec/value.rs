//! Cell text conversion in both directions.
//!
//! Write side: newlines become spaces, comma-bearing values get wrapped in
//! double quotes. Read side: rows are split with the `csv` crate so quoted
//! cells come back unwrapped, then cells are coerced to numbers where they
//! parse.

use serde_json::Value;

use crate::error::CodecResult;
use crate::models::Scalar;

// =============================================================================
// Write side
// =============================================================================

/// Make a value safe for a single CSV cell.
pub fn escape_cell(raw: &str) -> String {
    let flat = raw.replace("\r\n", " ").replace(['\n', '\r'], " ");
    if flat.contains(',') {
        format!("\"{}\"", flat)
    } else {
        flat
    }
}

/// Integers print without a fractional part, everything else in shortest form.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Cell text for an arbitrary JSON value. `null` is empty.
pub fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.as_f64().map(format_number).unwrap_or_default(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn scalar_to_cell(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Number(n) => format_number(*n),
        Scalar::Text(s) => s.clone(),
    }
}

pub fn optional_int_cell(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Prices always carry two decimals.
pub fn price_cell(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

// =============================================================================
// Read side
// =============================================================================

/// Split one line into trimmed cells, unwrapping quoted cells.
///
/// An empty line has no cells.
pub fn split_row(line: &str) -> CodecResult<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(line.as_bytes());

    match reader.records().next() {
        Some(record) => Ok(record?.iter().map(str::to_string).collect()),
        None => Ok(Vec::new()),
    }
}

/// Number if the cell parses as a finite float, text otherwise, `None` if empty.
pub fn parse_scalar(cell: &str) -> Option<Scalar> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    match parse_float(cell) {
        Some(n) => Some(Scalar::Number(n)),
        None => Some(Scalar::Text(cell.to_string())),
    }
}

pub fn parse_float(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Base-10 integer from the leading digits of a cell (`"1200mm"` is 1200).
pub fn parse_int(cell: &str) -> Option<i64> {
    let cell = cell.trim();
    let (sign, digits) = match cell.as_bytes().first() {
        Some(b'-') => (-1, &cell[1..]),
        Some(b'+') => (1, &cell[1..]),
        _ => (1, cell),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
