//! Canonical CSV writer.
//!
//! ```text
//! quoteId,issueDate,...,discountPercentage      <- project headers
//! Q-1001,2024-05-01,...,10                      <- project values
//!                                               <- blank separator
//! #,Width,Height,Type,Price,...,Motor,LF        <- item headers
//! 1,1200,1500,BO,199.90,...,Somfy,1             <- one row per item
//! ```

use std::collections::BTreeSet;

use serde_json::Value;

use super::path::resolve;
use super::value::{escape_cell, optional_int_cell, price_cell, scalar_to_cell, value_to_cell};
use crate::models::{LineItem, QuoteRecord};
use crate::schema::{Schema, ITEM_COLUMNS};

/// Serialize `record` in the current generation.
///
/// Returns an empty string when the active product does not exist.
pub fn to_csv(record: &QuoteRecord) -> String {
    to_csv_with_schema(record, &Schema::standard())
}

pub fn to_csv_with_schema(record: &QuoteRecord, schema: &Schema) -> String {
    let Some(product) = record.active_product() else {
        return String::new();
    };

    let project = serde_json::to_value(&record.project).unwrap_or(Value::Null);

    let project_headers: Vec<&str> = schema.project_headers().collect();
    let project_values: Vec<String> = schema
        .project_info_keys
        .iter()
        .map(|key| value_to_cell(&resolve(&project, key)))
        .chain(schema.aggregate_keys.iter().map(|key| {
            record
                .aggregate_snapshot
                .get(*key)
                .and_then(Option::as_ref)
                .map(scalar_to_cell)
                .unwrap_or_default()
        }))
        .map(|value| escape_cell(&value))
        .collect();

    let mut lines = vec![
        project_headers.join(","),
        project_values.join(","),
        String::new(),
        ITEM_COLUMNS.join(","),
    ];

    let modified = &record.ui_metadata.modified_row_indexes;
    lines.extend(
        product
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.has_dimensions())
            .map(|(index, item)| item_row(item, index, modified)),
    );

    lines.join("\n")
}

fn item_row(item: &LineItem, index: usize, modified: &BTreeSet<usize>) -> String {
    let lf = if modified.contains(&index) { "1" } else { "0" };
    let cells = [
        (index + 1).to_string(),
        optional_int_cell(item.width),
        optional_int_cell(item.height),
        item.fabric_type.clone(),
        price_cell(item.line_price),
        item.location.clone(),
        item.fabric.clone(),
        item.color.clone(),
        item.over.clone(),
        item.oi.clone(),
        item.lr.clone(),
        item.dual.clone(),
        optional_int_cell(item.chain),
        item.winder.clone(),
        item.motor.clone(),
        lf.to_string(),
    ];

    cells
        .iter()
        .map(|cell| escape_cell(cell))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProductData, Scalar};
    use crate::schema::{AGGREGATE_KEYS, PROJECT_INFO_KEYS};

    fn item(width: Option<i64>, height: Option<i64>) -> LineItem {
        LineItem {
            width,
            height,
            fabric_type: "BO".into(),
            line_price: Some(150.0),
            location: "Lounge".into(),
            ..Default::default()
        }
    }

    fn record(items: Vec<LineItem>) -> QuoteRecord {
        let mut record = QuoteRecord {
            current_product_key: "roller".into(),
            ..Default::default()
        };
        record.products.insert("roller".into(), ProductData { items });
        record
    }

    #[test]
    fn test_missing_product_yields_empty() {
        let mut r = record(vec![item(Some(1), None)]);
        r.current_product_key = "venetian".into();
        assert_eq!(to_csv(&r), "");
    }

    #[test]
    fn test_document_layout() {
        let mut r = record(vec![item(Some(1200), Some(1500))]);
        r.project.quote_id = Some(Scalar::from("Q-7"));
        r.project.customer.name = Some(Scalar::from("Smith, J."));
        r.aggregate_snapshot.insert("winderQty".into(), Some(Scalar::Number(2.0)));

        let csv = to_csv(&r);
        let lines: Vec<&str> = csv.split('\n').collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].split(',').count(), PROJECT_INFO_KEYS.len() + AGGREGATE_KEYS.len());
        assert!(lines[1].starts_with("Q-7,,,\"Smith, J.\","));
        assert!(lines[1].contains(",2,"));
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], ITEM_COLUMNS.join(","));
        assert_eq!(lines[4], "1,1200,1500,BO,150.00,Lounge,,,,,,,,,,0");
    }

    #[test]
    fn test_items_without_dimensions_are_dropped() {
        let r = record(vec![item(None, None), item(None, Some(900))]);
        let csv = to_csv(&r);
        let rows: Vec<&str> = csv.lines().skip(4).collect();

        assert_eq!(rows.len(), 1);
        // Display index follows the list position.
        assert!(rows[0].starts_with("2,,900,"));
    }

    #[test]
    fn test_lf_column() {
        let mut r = record(vec![item(Some(1), None), item(Some(2), None), item(Some(3), None)]);
        r.ui_metadata.modified_row_indexes = [0, 2].into_iter().collect();

        let csv = to_csv(&r);
        let flags: Vec<&str> = csv
            .lines()
            .skip(4)
            .map(|row| row.rsplit(',').next().unwrap())
            .collect();
        assert_eq!(flags, vec!["1", "0", "1"]);
    }

    #[test]
    fn test_newlines_flattened_in_items() {
        let mut it = item(Some(600), Some(600));
        it.location = "Bed 2\nnorth wall".into();
        let csv = to_csv(&record(vec![it]));
        assert!(csv.lines().nth(4).unwrap().contains("Bed 2 north wall"));
    }
}
