//! Schema registry: the fixed column vocabulary of quote documents.
//!
//! Order matters. The writer emits the project section in exactly this
//! order and the item table in [`ITEM_COLUMNS`] order; the reader maps
//! item cells back by the same positions.

/// Quote identity and customer keys, dotted paths into the record.
pub const PROJECT_INFO_KEYS: &[&str] = &[
    "quoteId",
    "issueDate",
    "dueDate",
    "customer.name",
    "customer.address",
    "customer.phone",
    "customer.email",
];

/// Whole-quote quantity totals and the discount percentage.
pub const AGGREGATE_KEYS: &[&str] = &[
    "winderQty",
    "motorQty",
    "chargerQty",
    "cordQty",
    "remote1chQty",
    "remote2chQty",
    "remote5chQty",
    "remote16chQty",
    "discountPercentage",
];

/// Item table header, shared by every generation.
pub const ITEM_COLUMNS: &[&str] = &[
    "#", "Width", "Height", "Type", "Price", "Location", "Fabric", "Color", "Over", "O/I", "L/R",
    "Dual", "Chain", "Winder", "Motor", "LF",
];

/// Header of the modified-row flag column.
pub const LF_COLUMN: &str = "LF";

/// Prefix every item header line starts with, in all generations.
pub const ITEM_HEADER_MARKER: &str = "#,Width";

/// First cell of an oldest-generation snapshot row.
pub const SNAPSHOT_MARKER: &str = "F1";

/// Fixed item column positions.
pub mod col {
    pub const INDEX: usize = 0;
    pub const WIDTH: usize = 1;
    pub const HEIGHT: usize = 2;
    pub const FABRIC_TYPE: usize = 3;
    pub const PRICE: usize = 4;
    pub const LOCATION: usize = 5;
    pub const FABRIC: usize = 6;
    pub const COLOR: usize = 7;
    pub const OVER: usize = 8;
    pub const OI: usize = 9;
    pub const LR: usize = 10;
    pub const DUAL: usize = 11;
    pub const CHAIN: usize = 12;
    pub const WINDER: usize = 13;
    pub const MOTOR: usize = 14;
}

/// Key lists handed to the readers and the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub project_info_keys: &'static [&'static str],
    pub aggregate_keys: &'static [&'static str],
}

impl Schema {
    /// The registry every generation was written against.
    pub const fn standard() -> Self {
        Self {
            project_info_keys: PROJECT_INFO_KEYS,
            aggregate_keys: AGGREGATE_KEYS,
        }
    }

    pub fn is_aggregate_key(&self, key: &str) -> bool {
        self.aggregate_keys.iter().any(|k| *k == key)
    }

    pub fn is_project_info_key(&self, key: &str) -> bool {
        self.project_info_keys.iter().any(|k| *k == key)
    }

    /// Any key the project section may carry.
    pub fn is_known_key(&self, key: &str) -> bool {
        self.is_aggregate_key(key) || self.is_project_info_key(key)
    }

    /// Project header row: identity/customer keys, then aggregate keys.
    pub fn project_headers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.project_info_keys
            .iter()
            .chain(self.aggregate_keys.iter())
            .copied()
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::standard()
    }
}
