//! Readers for the two generations that predate the project section.
//!
//! Neither layout carries quote identity or customer data. Both share the
//! `#,Width,...` item header and the item column positions; they differ in
//! where the aggregate snapshot lives:
//!
//! - marker rows: `F1,<key>,<value>` lines anywhere in the file
//! - embedded columns: extra named columns on the first item row

use super::items::{is_skipped_row, ItemTableBuilder};
use super::reader::{run_attempts, Attempt};
use super::value::{parse_scalar, split_row};
use crate::error::{CodecError, CodecResult};
use crate::models::{AggregateSnapshot, CsvFormat, ParsedQuote, ProjectInfo};
use crate::schema::{Schema, ITEM_HEADER_MARKER, SNAPSHOT_MARKER};

/// Legacy generations, oldest first.
pub const LEGACY_ATTEMPTS: &[(CsvFormat, Attempt)] = &[
    (CsvFormat::LegacyMarkerRows, parse_marker_rows),
    (CsvFormat::LegacyEmbeddedColumns, parse_embedded_columns),
];

/// Read a document in either legacy generation.
///
/// Returns `None` straight away when no `#,Width` header line exists.
pub fn from_legacy_csv(text: &str, schema: &Schema) -> Option<ParsedQuote> {
    find_item_header(text)?;
    run_attempts(text, schema, LEGACY_ATTEMPTS).ok()
}

fn find_item_header(text: &str) -> Option<usize> {
    text.lines()
        .position(|line| line.trim().starts_with(ITEM_HEADER_MARKER))
}

/// Trimmed lines plus the position and cells of the item header.
struct LegacyLayout<'a> {
    lines: Vec<&'a str>,
    header_index: usize,
    headers: Vec<String>,
}

impl<'a> LegacyLayout<'a> {
    fn locate(text: &'a str) -> CodecResult<Self> {
        let header_index = find_item_header(text).ok_or(CodecError::MissingItemHeader)?;
        let lines: Vec<&str> = text.lines().map(str::trim).collect();
        let headers = split_row(lines[header_index])?;
        Ok(Self {
            lines,
            header_index,
            headers,
        })
    }

    /// Lines below the header that may hold items.
    fn data_lines(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.lines[self.header_index + 1..]
            .iter()
            .copied()
            .filter(|line| !is_skipped_row(line))
    }
}

fn parsed_quote(
    table: ItemTableBuilder,
    aggregate_snapshot: AggregateSnapshot,
    format: CsvFormat,
) -> ParsedQuote {
    let (items, lf_indexes) = table.finish();
    ParsedQuote {
        items,
        lf_indexes,
        aggregate_snapshot,
        project_info: ProjectInfo::default(),
        format,
    }
}

fn is_marker_row(cells: &[String]) -> bool {
    cells.first().map(String::as_str) == Some(SNAPSHOT_MARKER)
}

/// Oldest generation: snapshot values on `F1,<key>,<value>` rows.
///
/// Only keys the schema knows are kept. Marker rows never become items.
pub fn parse_marker_rows(text: &str, schema: &Schema) -> CodecResult<ParsedQuote> {
    let layout = LegacyLayout::locate(text)?;
    let mut snapshot = AggregateSnapshot::new();
    let mut marker_rows = 0;
    let mut table = ItemTableBuilder::new(&layout.headers);

    for (index, line) in layout.lines.iter().enumerate() {
        if index == layout.header_index || is_skipped_row(line) {
            continue;
        }

        let cells = split_row(line)?;
        if is_marker_row(&cells) {
            marker_rows += 1;
            if let (Some(key), Some(value)) = (cells.get(1), cells.get(2)) {
                if schema.is_aggregate_key(key) {
                    if let Some(value) = parse_scalar(value) {
                        snapshot.insert(key.clone(), Some(value));
                    }
                }
            }
        } else if index > layout.header_index {
            table.push_row(&cells);
        }
    }

    if marker_rows == 0 {
        return Err(CodecError::NoMarkerRows(SNAPSHOT_MARKER));
    }

    Ok(parsed_quote(table, snapshot, CsvFormat::LegacyMarkerRows))
}

/// Snapshot values as named columns on the first item row.
///
/// That row is still an item. Files with no snapshot columns at all read
/// as items only.
pub fn parse_embedded_columns(text: &str, schema: &Schema) -> CodecResult<ParsedQuote> {
    let layout = LegacyLayout::locate(text)?;
    let snapshot_columns: Vec<(&str, usize)> = schema
        .aggregate_keys
        .iter()
        .filter_map(|key| {
            layout
                .headers
                .iter()
                .position(|h| h == key)
                .map(|index| (*key, index))
        })
        .collect();

    let mut snapshot = AggregateSnapshot::new();
    let mut table = ItemTableBuilder::new(&layout.headers);

    for (row, line) in layout.data_lines().enumerate() {
        let cells = split_row(line)?;
        if row == 0 {
            for (key, index) in &snapshot_columns {
                if let Some(value) = cells.get(*index).and_then(|c| parse_scalar(c)) {
                    snapshot.insert(key.to_string(), Some(value));
                }
            }
        }
        table.push_row(&cells);
    }

    Ok(parsed_quote(table, snapshot, CsvFormat::LegacyEmbeddedColumns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Scalar;

    const MARKER_ROWS: &str = "\
F1,winderQty,2
F1,motorQty,1
F1,unknownKey,9
#,Width,Height,Type,Price,Location
1,1200,1500,BO,199.90,Bed 1
F1,discountPercentage,5
2,900,1100,SN,89.00,Kitchen
Total,,,,288.90";

    const EMBEDDED: &str = "\
#,Width,Height,Type,Price,Location,Fabric,Color,Over,O/I,L/R,Dual,Chain,Winder,Motor,LF,winderQty,remote5chQty
1,1200,1500,BO,199.90,Bed 1,,,,,,,,,,1,4,1
2,900,1100,SN,89.00,Kitchen,,,,,,,,,,0,7,7";

    #[test]
    fn test_marker_rows() {
        let parsed = parse_marker_rows(MARKER_ROWS, &Schema::standard()).unwrap();

        assert_eq!(parsed.format, CsvFormat::LegacyMarkerRows);
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.items[1].location, "Kitchen");
        assert!(parsed.lf_indexes.is_empty());
        assert_eq!(parsed.aggregate_snapshot.len(), 3);
        assert_eq!(parsed.aggregate_snapshot["winderQty"], Some(Scalar::Number(2.0)));
        assert_eq!(parsed.aggregate_snapshot["discountPercentage"], Some(Scalar::Number(5.0)));
        assert!(parsed.project_info.customer.is_empty());
    }

    #[test]
    fn test_marker_rows_required() {
        let err = parse_marker_rows(EMBEDDED, &Schema::standard()).unwrap_err();
        assert!(matches!(err, CodecError::NoMarkerRows("F1")));
    }

    #[test]
    fn test_embedded_columns_first_row_only() {
        let parsed = parse_embedded_columns(EMBEDDED, &Schema::standard()).unwrap();

        assert_eq!(parsed.format, CsvFormat::LegacyEmbeddedColumns);
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.items[0].width, Some(1200));
        assert_eq!(parsed.lf_indexes, vec![0]);
        assert_eq!(parsed.aggregate_snapshot["winderQty"], Some(Scalar::Number(4.0)));
        assert_eq!(parsed.aggregate_snapshot["remote5chQty"], Some(Scalar::Number(1.0)));
        assert_eq!(parsed.aggregate_snapshot.len(), 2);
    }

    #[test]
    fn test_schema_parameter_limits_keys() {
        const ONLY_MOTORS: Schema = Schema {
            project_info_keys: &[],
            aggregate_keys: &["motorQty"],
        };
        let parsed = parse_marker_rows(MARKER_ROWS, &ONLY_MOTORS).unwrap();
        assert_eq!(parsed.aggregate_snapshot.len(), 1);
        assert!(parsed.aggregate_snapshot.contains_key("motorQty"));
    }

    #[test]
    fn test_from_legacy_csv() {
        let parsed = from_legacy_csv(MARKER_ROWS, &Schema::standard()).unwrap();
        assert_eq!(parsed.format, CsvFormat::LegacyMarkerRows);

        let parsed = from_legacy_csv(EMBEDDED, &Schema::standard()).unwrap();
        assert_eq!(parsed.format, CsvFormat::LegacyEmbeddedColumns);

        assert!(from_legacy_csv("Width,Height\n100,200", &Schema::standard()).is_none());
    }
}
