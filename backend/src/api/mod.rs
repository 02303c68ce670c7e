//! HTTP API module.
//!
//! Thin HTTP surface over the codec: export records, import uploaded
//! files, stream diagnostics.

pub mod server;
pub mod types;

pub use server::start_server;
pub use types::*;
