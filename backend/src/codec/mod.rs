//! Quote CSV codec.
//!
//! - `writer`: record -> canonical CSV
//! - `reader`: CSV of any generation -> parsed quote, newest layout first
//! - `legacy`: the two generations without a project section
//! - `items`: item table parsing shared by all readers
//! - `value`: cell escaping and number coercion
//! - `path`: dotted-path lookup used by the writer
//!
//! ## Usage Flow
//!
//! ```text
//! QuoteRecord ──to_csv──▶ text ──from_csv──▶ canonical? ──no──▶ F1 rows? ──no──▶ embedded cols? ──no──▶ None
//! ```
//!
//! The codec is pure: no I/O, no shared state beyond the log channel.

pub mod items;
pub mod legacy;
pub mod path;
pub mod reader;
pub mod value;
pub mod writer;

pub use legacy::{from_legacy_csv, parse_embedded_columns, parse_marker_rows, LEGACY_ATTEMPTS};
pub use path::resolve;
pub use reader::{
    detect_format, from_csv, parse_canonical, try_from_csv, try_from_csv_with_schema, Attempt,
    ATTEMPTS,
};
pub use writer::{to_csv, to_csv_with_schema};
