//! Domain models for quote import and export.
//!
//! - [`QuoteRecord`] - Full in-memory quote (project header + products)
//! - [`ProjectInfo`] / [`Customer`] - Quote identity and customer contact fields
//! - [`LineItem`] - One blind/shade line of a quote
//! - [`ParsedQuote`] - What the reader recovers from a CSV document
//! - [`CsvFormat`] - Which CSV generation a document was written in
//!
//! JSON field names are camelCase so records exchanged with the
//! application front end deserialize directly.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// =============================================================================
// Scalars
// =============================================================================

/// A project-level cell value: numeric when it parsed as a number, text otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Numeric value, if this scalar is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Text(_) => None,
        }
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

/// Whole-quote quantity totals ("F1"), keyed by aggregate key name.
///
/// `None` and a missing key both mean "absent".
pub type AggregateSnapshot = BTreeMap<String, Option<Scalar>>;

// =============================================================================
// Project Info
// =============================================================================

/// Customer contact fields, nested under `customer` in the record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Customer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Scalar>,
}

impl Customer {
    /// Mutable slot for a `customer.<field>` suffix.
    pub fn field_mut(&mut self, field: &str) -> Option<&mut Option<Scalar>> {
        match field {
            "name" => Some(&mut self.name),
            "address" => Some(&mut self.address),
            "phone" => Some(&mut self.phone),
            "email" => Some(&mut self.email),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.phone.is_none()
            && self.email.is_none()
    }
}

/// Quote identity and customer fields ("F3").
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Scalar>,
    pub customer: Customer,
}

impl ProjectInfo {
    /// Mutable slot for a top-level identity key.
    pub fn identity_mut(&mut self, key: &str) -> Option<&mut Option<Scalar>> {
        match key {
            "quoteId" => Some(&mut self.quote_id),
            "issueDate" => Some(&mut self.issue_date),
            "dueDate" => Some(&mut self.due_date),
            _ => None,
        }
    }
}

// =============================================================================
// Line Items
// =============================================================================

/// A single line of a quote.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItem {
    /// Synthetic id, assigned on parse and unique within one parse call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub fabric_type: String,
    pub line_price: Option<f64>,
    pub location: String,
    pub fabric: String,
    pub color: String,
    pub over: String,
    /// In/out mount.
    pub oi: String,
    /// Left/right control side.
    pub lr: String,
    pub dual: String,
    pub chain: Option<i64>,
    pub winder: String,
    pub motor: String,
}

impl LineItem {
    /// Only items with a width or a height are written out.
    pub fn has_dimensions(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }
}

/// Line items of one product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProductData {
    pub items: Vec<LineItem>,
}

/// UI state that affects export.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UiMetadata {
    /// Zero-based item indexes written with LF = 1.
    pub modified_row_indexes: BTreeSet<usize>,
}

// =============================================================================
// Quote Record
// =============================================================================

/// The full quote as held by the application.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteRecord {
    #[serde(flatten)]
    pub project: ProjectInfo,
    pub aggregate_snapshot: AggregateSnapshot,
    pub current_product_key: String,
    pub products: BTreeMap<String, ProductData>,
    pub ui_metadata: UiMetadata,
}

impl QuoteRecord {
    /// The product selected by `current_product_key`, if present.
    pub fn active_product(&self) -> Option<&ProductData> {
        self.products.get(&self.current_product_key)
    }
}

// =============================================================================
// Parse Results
// =============================================================================

/// CSV generation a document was written in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CsvFormat {
    /// Current layout: project section, blank line, item table.
    Canonical,
    /// Oldest layout: snapshot carried on `F1,<key>,<value>` rows.
    LegacyMarkerRows,
    /// Snapshot carried as extra columns on the first item row.
    LegacyEmbeddedColumns,
}

impl CsvFormat {
    pub fn name(&self) -> &'static str {
        match self {
            CsvFormat::Canonical => "canonical",
            CsvFormat::LegacyMarkerRows => "legacy-marker-rows",
            CsvFormat::LegacyEmbeddedColumns => "legacy-embedded-columns",
        }
    }

    pub fn is_legacy(&self) -> bool {
        !matches!(self, CsvFormat::Canonical)
    }
}

impl fmt::Display for CsvFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a successful read recovers from a CSV document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuote {
    pub items: Vec<LineItem>,
    /// Zero-based positions in `items` whose LF column was `1`.
    pub lf_indexes: Vec<usize>,
    pub aggregate_snapshot: AggregateSnapshot,
    pub project_info: ProjectInfo,
    pub format: CsvFormat,
}

impl ParsedQuote {
    /// Rebuild a full record with the items under `product_key`.
    pub fn into_record(self, product_key: &str) -> QuoteRecord {
        let mut products = BTreeMap::new();
        products.insert(product_key.to_string(), ProductData { items: self.items });

        QuoteRecord {
            project: self.project_info,
            aggregate_snapshot: self.aggregate_snapshot,
            current_product_key: product_key.to_string(),
            products,
            ui_metadata: UiMetadata {
                modified_row_indexes: self.lf_indexes.into_iter().collect(),
            },
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
