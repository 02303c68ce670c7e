//! REST API types.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{LoadError, ServerError};
use crate::loader::LoadedQuote;
use crate::models::{CsvFormat, ParsedQuote};

/// Response sent after a quote file upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    /// Unique job identifier
    pub job_id: String,

    /// "ready" for the current layout, "legacy" when an older one was read
    pub status: String,

    /// Original file name, if the client sent one
    pub file_name: Option<String>,

    pub format: CsvFormat,

    pub encoding: String,

    pub quote: ParsedQuote,
}

impl ImportResponse {
    pub fn new(loaded: LoadedQuote, file_name: Option<String>) -> Self {
        let status = if loaded.parsed.format.is_legacy() { "legacy" } else { "ready" };
        Self {
            job_id: Uuid::new_v4().to_string(),
            status: status.to_string(),
            file_name,
            format: loaded.parsed.format,
            encoding: loaded.encoding,
            quote: loaded.parsed,
        }
    }
}

/// Create an error response body
pub fn error_response(error: &str) -> Value {
    json!({
        "jobId": Uuid::new_v4().to_string(),
        "status": "error",
        "error": error,
        "quote": null
    })
}

/// Status code and JSON body for a failed request.
pub fn rejection(err: &ServerError) -> (StatusCode, Value) {
    let status = match err {
        ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
        ServerError::Load(LoadError::Codec(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        ServerError::Load(LoadError::EmptyFile) => StatusCode::BAD_REQUEST,
        ServerError::Load(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, error_response(&err.to_string()))
}
