//! Error types for the quote CSV codec and its collaborators.
//!
//! - [`CodecError`] - why a read attempt did not produce a quote
//! - [`LoadError`] - file and byte loading errors
//! - [`ServerError`] - HTTP surface errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Codec Errors
// =============================================================================

/// Reasons a single read attempt rejects a document.
///
/// These never escape [`crate::from_csv`]; they drive the fallback chain and
/// are only surfaced by [`crate::try_from_csv`].
#[derive(Debug, Error)]
pub enum CodecError {
    /// Canonical layout needs at least four lines.
    #[error("Expected at least 4 lines, found {0}")]
    TooFewLines(usize),

    /// The canonical section markers are missing.
    #[error("Not a canonical quote document: {0}")]
    NotCanonical(String),

    /// No `#,Width` item header line anywhere in the text.
    #[error("No item header line starting with '#,Width'")]
    MissingItemHeader,

    /// Oldest legacy layout needs at least one marker row.
    #[error("No '{0}' snapshot marker rows found")]
    NoMarkerRows(&'static str),

    /// A row could not be split into cells.
    #[error("Malformed CSV row: {0}")]
    Csv(#[from] csv::Error),

    /// Every known generation rejected the document.
    #[error("Unrecognized quote CSV format")]
    UnrecognizedFormat,
}

// =============================================================================
// Load Errors
// =============================================================================

/// Errors while loading or saving quote files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read or write a file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode bytes.
    #[error("Failed to decode content as {0}")]
    Encoding(String),

    /// Invalid record JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document matched no known generation.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Nothing to read.
    #[error("Quote file is empty")]
    EmptyFile,
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Loading the uploaded document failed.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for codec read attempts.
pub type CodecResult<T> = Result<T, CodecError>;

/// Result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // CodecError -> LoadError
        let codec_err = CodecError::UnrecognizedFormat;
        let load_err: LoadError = codec_err.into();
        assert!(load_err.to_string().contains("Unrecognized"));

        // LoadError -> ServerError
        let server_err: ServerError = LoadError::EmptyFile.into();
        assert!(server_err.to_string().contains("empty"));
    }

    #[test]
    fn test_too_few_lines_format() {
        let msg = CodecError::TooFewLines(2).to_string();
        assert!(msg.contains("at least 4"));
        assert!(msg.contains('2'));
    }
}
