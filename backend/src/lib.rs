//! # Quotecsv - quote record CSV import/export
//!
//! Converts an in-memory quote (project header + line items) to a CSV
//! document and reads such documents back, including files written by the
//! two older export layouts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐  to_csv   ┌─────────────┐
//! │ QuoteRecord │──────────▶│  CSV text   │
//! └─────────────┘           └──────┬──────┘
//!        ▲                         │ from_csv
//!        │ into_record      ┌──────▼──────┐     canonical
//!        └──────────────────│ ParsedQuote │◀──  legacy F1 rows
//!                           └─────────────┘     legacy embedded columns
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use quotecsv::{from_csv, to_csv};
//!
//! let text = to_csv(&record);
//! let parsed = from_csv(&text).expect("written by us, always readable");
//! assert_eq!(parsed.format, quotecsv::CsvFormat::Canonical);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Quote record and parse result types
//! - [`schema`] - Column vocabulary shared by writer and readers
//! - [`codec`] - Writer, format-detecting reader, legacy readers
//! - [`loader`] - Encoding detection and file I/O
//! - [`logs`] - Diagnostic log channel
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;
pub mod schema;

// Codec
pub mod codec;

// Collaborators
pub mod loader;
pub mod logs;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{CodecError, CodecResult, LoadError, LoadResult, ServerError, ServerResult};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    AggregateSnapshot, CsvFormat, Customer, LineItem, ParsedQuote, ProductData, ProjectInfo,
    QuoteRecord, Scalar, UiMetadata,
};

// =============================================================================
// Re-exports - Schema
// =============================================================================

pub use schema::{Schema, AGGREGATE_KEYS, ITEM_COLUMNS, PROJECT_INFO_KEYS};

// =============================================================================
// Re-exports - Codec
// =============================================================================

pub use codec::{
    detect_format, from_csv, from_legacy_csv, resolve, to_csv, to_csv_with_schema,
    try_from_csv, try_from_csv_with_schema,
};

// =============================================================================
// Re-exports - Loader
// =============================================================================

pub use loader::{
    decode_content, detect_encoding, load_quote_bytes, load_quote_csv, normalize_text,
    read_quote_json, write_quote_csv, LoadedQuote,
};

// =============================================================================
// Re-exports - Logs
// =============================================================================

pub use logs::{LogEntry, LogLevel, LOG_BROADCASTER};

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
