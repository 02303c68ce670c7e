//! HTTP Server for the quote CSV API.
//!
//! # API Endpoints
//!
//! | Method | Path          | Description                               |
//! |--------|---------------|-------------------------------------------|
//! | GET    | `/health`     | Health check                              |
//! | POST   | `/api/export` | JSON quote record in, canonical CSV out   |
//! | POST   | `/api/import` | Multipart quote CSV in, parsed quote out  |
//! | GET    | `/api/logs`   | SSE stream for real-time logs             |

use axum::{
    extract::Multipart,
    http::{header, Method, StatusCode},
    response::{sse::Event, IntoResponse, Json, Response, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::types::{rejection, ImportResponse};
use crate::codec::to_csv;
use crate::error::{ServerError, ServerResult};
use crate::loader::load_quote_bytes;
use crate::logs::{log_error, log_info, LOG_BROADCASTER};
use crate::models::QuoteRecord;

type ApiError = (StatusCode, Json<Value>);

/// Build the application router.
pub fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_DISPOSITION]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/export", post(export_quote))
        .route("/api/import", post(import_quote))
        .route("/api/logs", get(sse_logs))
        .layer(cors)
}

/// Start the HTTP server
pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    eprintln!("🚀 Quote CSV server running on http://localhost:{}", port);
    eprintln!("   POST /api/export - Quote record to CSV");
    eprintln!("   POST /api/import - Upload quote CSV");
    eprintln!("   GET  /api/logs   - SSE log stream");
    eprintln!("   GET  /health     - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router()).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "quotecsv",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "export": "POST /api/export",
            "import": "POST /api/import",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| {
        let entry = result.ok()?;
        let json = serde_json::to_string(&entry).ok()?;
        Some(Ok(Event::default().data(json)))
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Export endpoint
async fn export_quote(Json(record): Json<QuoteRecord>) -> Result<Response, ApiError> {
    let csv = export_record(&record).map_err(reject)?;
    let disposition = format!("attachment; filename=\"{}\"", export_file_name(&record));

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}

/// Upload endpoint
async fn import_quote(mut multipart: Multipart) -> Result<Json<ImportResponse>, ApiError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| reject(ServerError::BadRequest(format!("Multipart error: {}", e))))?
    {
        if field.name() == Some("file") {
            file_name = field.file_name().map(|s| s.to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| reject(ServerError::BadRequest(format!("Read error: {}", e))))?;
            file_data = Some(bytes.to_vec());
        }
    }

    let bytes =
        file_data.ok_or_else(|| reject(ServerError::BadRequest("No file provided".into())))?;
    import_bytes(&bytes, file_name).map(Json).map_err(reject)
}

fn export_record(record: &QuoteRecord) -> ServerResult<String> {
    if record.active_product().is_none() {
        return Err(ServerError::BadRequest(format!(
            "No product '{}' in quote",
            record.current_product_key
        )));
    }
    Ok(to_csv(record))
}

fn export_file_name(record: &QuoteRecord) -> String {
    let id = record
        .project
        .quote_id
        .as_ref()
        .map(crate::codec::value::scalar_to_cell)
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| "quote".to_string());
    let safe: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{}.csv", safe)
}

fn import_bytes(bytes: &[u8], file_name: Option<String>) -> ServerResult<ImportResponse> {
    log_info(format!(
        "📄 Import: {} ({} bytes)",
        file_name.as_deref().unwrap_or("unknown"),
        bytes.len()
    ));
    let loaded = load_quote_bytes(bytes)?;
    Ok(ImportResponse::new(loaded, file_name))
}

fn reject(err: ServerError) -> ApiError {
    log_error(err.to_string());
    let (status, body) = rejection(&err);
    (status, Json(body))
}
