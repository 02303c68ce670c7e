//! Format-detecting reader.
//!
//! Each known generation is an [`Attempt`]: a pure function from text to a
//! parsed quote or the reason it does not apply. Attempts run in order
//! (newest layout first) and the first success wins.

use super::items::{is_skipped_row, ItemTableBuilder};
use super::legacy;
use super::value::{parse_scalar, split_row};
use crate::error::{CodecError, CodecResult};
use crate::logs::{log_info_indent, log_success, log_warning};
use crate::models::{AggregateSnapshot, CsvFormat, ParsedQuote, ProjectInfo};
use crate::schema::{Schema, ITEM_HEADER_MARKER};

/// One way of reading a document.
pub type Attempt = fn(&str, &Schema) -> CodecResult<ParsedQuote>;

/// Every generation, newest first.
pub const ATTEMPTS: &[(CsvFormat, Attempt)] = &[
    (CsvFormat::Canonical, parse_canonical),
    (CsvFormat::LegacyMarkerRows, legacy::parse_marker_rows),
    (CsvFormat::LegacyEmbeddedColumns, legacy::parse_embedded_columns),
];

const CUSTOMER_PREFIX: &str = "customer.";

/// Read a quote document of any known generation.
///
/// Returns `None` (and logs a warning) when no generation matches.
pub fn from_csv(text: &str) -> Option<ParsedQuote> {
    match try_from_csv(text) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            log_warning(format!("Could not read quote CSV: {}", e));
            None
        }
    }
}

/// Like [`from_csv`] but reports why the document was rejected.
pub fn try_from_csv(text: &str) -> CodecResult<ParsedQuote> {
    try_from_csv_with_schema(text, &Schema::standard())
}

pub fn try_from_csv_with_schema(text: &str, schema: &Schema) -> CodecResult<ParsedQuote> {
    run_attempts(text, schema, ATTEMPTS)
}

/// Which generation `text` was written in, if any.
pub fn detect_format(text: &str) -> Option<CsvFormat> {
    try_from_csv(text).ok().map(|parsed| parsed.format)
}

pub(crate) fn run_attempts(
    text: &str,
    schema: &Schema,
    attempts: &[(CsvFormat, Attempt)],
) -> CodecResult<ParsedQuote> {
    for (format, attempt) in attempts {
        match attempt(text, schema) {
            Ok(parsed) => {
                log_success(format!(
                    "Read {} items ({} format)",
                    parsed.items.len(),
                    format
                ));
                return Ok(parsed);
            }
            Err(e) => log_info_indent(format!("Not {}: {}", format, e), 1),
        }
    }
    Err(CodecError::UnrecognizedFormat)
}

/// Current generation: project headers, project values, blank line, item table.
pub fn parse_canonical(text: &str, schema: &Schema) -> CodecResult<ParsedQuote> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    if lines.len() < 4 {
        return Err(CodecError::TooFewLines(lines.len()));
    }

    let project_headers = split_row(lines[0])?;
    if !project_headers.iter().any(|h| schema.is_known_key(h)) {
        return Err(CodecError::NotCanonical(
            "first line names no project field".to_string(),
        ));
    }
    if !lines[3].starts_with(ITEM_HEADER_MARKER) {
        return Err(CodecError::NotCanonical(
            "fourth line is not the item header".to_string(),
        ));
    }

    let project_values = split_row(lines[1])?;
    let mut project_info = ProjectInfo::default();
    let mut aggregate_snapshot = AggregateSnapshot::new();

    for (header, value) in project_headers.iter().zip(&project_values) {
        let Some(value) = parse_scalar(value) else {
            continue;
        };

        if schema.is_aggregate_key(header) {
            aggregate_snapshot.insert(header.clone(), Some(value));
        } else if let Some(field) = header.strip_prefix(CUSTOMER_PREFIX) {
            if let Some(slot) = project_info.customer.field_mut(field) {
                *slot = Some(value);
            }
        } else if schema.is_project_info_key(header) {
            if let Some(slot) = project_info.identity_mut(header) {
                *slot = Some(value);
            }
        }
    }

    let item_headers = split_row(lines[3])?;
    let mut table = ItemTableBuilder::new(&item_headers);
    for line in &lines[4..] {
        if is_skipped_row(line) {
            continue;
        }
        table.push_row(&split_row(line)?);
    }
    let (items, lf_indexes) = table.finish();

    Ok(ParsedQuote {
        items,
        lf_indexes,
        aggregate_snapshot,
        project_info,
        format: CsvFormat::Canonical,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Scalar;

    const CANONICAL: &str = "\
quoteId,issueDate,dueDate,customer.name,customer.address,customer.phone,customer.email,winderQty,discountPercentage,legacyNote
Q-1001,2024-05-01,,\"Smith, J.\",12 Main St,0412345678,,3,12.5,ignored

#,Width,Height,Type,Price,Location,Fabric,Color,Over,O/I,L/R,Dual,Chain,Winder,Motor,LF
1,1200,1500,BO,199.90,Bed 1,Linen,White,,IN,L,,800,,,0
2,900,1100,SN,89.00,Kitchen,,,,OUT,R,,,,Somfy,1

TOTAL,,,,288.90";

    #[test]
    fn test_parse_canonical() {
        let parsed = parse_canonical(CANONICAL, &Schema::standard()).unwrap();

        assert_eq!(parsed.format, CsvFormat::Canonical);
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.lf_indexes, vec![1]);
        assert_eq!(parsed.items[1].motor, "Somfy");
        assert_eq!(parsed.items[1].item_id.as_deref(), Some("item-2"));

        let info = &parsed.project_info;
        assert_eq!(info.quote_id, Some(Scalar::from("Q-1001")));
        assert_eq!(info.due_date, None);
        assert_eq!(info.customer.name, Some(Scalar::from("Smith, J.")));
        assert_eq!(info.customer.phone, Some(Scalar::Number(412345678.0)));

        assert_eq!(parsed.aggregate_snapshot["winderQty"], Some(Scalar::Number(3.0)));
        assert_eq!(parsed.aggregate_snapshot["discountPercentage"], Some(Scalar::Number(12.5)));
        assert!(!parsed.aggregate_snapshot.contains_key("legacyNote"));
    }

    #[test]
    fn test_zero_padded_cells_are_numbers() {
        let text = "\
quoteId,customer.phone,winderQty
007,0412345678,02

#,Width,Height,Type,Price,Location,Fabric,Color,Over,O/I,L/R,Dual,Chain,Winder,Motor,LF
1,600,900,BO,50.00,,,,,,,,,,,0";
        let parsed = from_csv(text).unwrap();

        assert_eq!(parsed.format, CsvFormat::Canonical);
        assert_eq!(parsed.aggregate_snapshot["winderQty"], Some(Scalar::Number(2.0)));
        assert_eq!(parsed.project_info.quote_id, Some(Scalar::Number(7.0)));
    }

    #[test]
    fn test_too_few_lines() {
        let err = parse_canonical("quoteId\nQ1", &Schema::standard()).unwrap_err();
        assert!(matches!(err, CodecError::TooFewLines(2)));
    }

    #[test]
    fn test_legacy_text_is_not_canonical() {
        let text = "Quote export\n\n#,Width,Height,Type,Price\n1,600,900,BO,50.00\n2,700,900,BO,55.00";
        let err = parse_canonical(text, &Schema::standard()).unwrap_err();
        assert!(matches!(err, CodecError::NotCanonical(_)));
    }

    #[test]
    fn test_from_csv_dispatches() {
        assert_eq!(detect_format(CANONICAL), Some(CsvFormat::Canonical));

        let legacy = "#,Width,Height,Type,Price\n1,600,900,BO,50.00";
        assert_eq!(detect_format(legacy), Some(CsvFormat::LegacyEmbeddedColumns));
    }

    #[test]
    fn test_unrecognized_input() {
        assert!(from_csv("").is_none());
        assert!(from_csv("hello world\nthis is not a quote").is_none());
        assert!(matches!(
            try_from_csv("a,b,c\n1,2,3\n\nx,y,z\n4,5,6"),
            Err(CodecError::UnrecognizedFormat)
        ));
    }
}
