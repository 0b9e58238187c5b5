//! HTTP Server for the honoraria API.
//!
//! Stateless REST endpoints for spreadsheet upload, consolidation and
//! report download. All state is rebuilt from the uploaded files on each
//! request; nothing persists between invocations.
//!
//! # API Endpoints
//!
//! | Method | Path               | Description                               |
//! |--------|--------------------|-------------------------------------------|
//! | GET    | `/health`          | Health check                              |
//! | POST   | `/api/consolidate` | Upload workbooks, get summaries           |
//! | POST   | `/api/export`      | Upload workbooks, download one report     |
//! | GET    | `/api/logs`        | SSE stream for real-time logs             |

use axum::{
    extract::{Multipart, Query, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, IntoResponse, Json, Response, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde::Deserialize;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::LOG_BROADCASTER;
use super::types::{error_response, ConsolidateResponse};
use crate::config::ReportConfig;
use crate::error::ServerError;
use crate::export::{export_summary_bytes, report_file_name};
use crate::transform::pipeline::{consolidate_named_bytes, ConsolidateOptions};

/// Start the HTTP server with the given report configuration.
pub async fn start_server(
    port: u16,
    config: ReportConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_DISPOSITION]);

    let app = Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/consolidate", post(consolidate_upload))
        .route("/api/export", post(export_upload))
        .route("/api/logs", get(sse_logs))
        .layer(cors)
        .with_state(Arc::new(config));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 Honoraria server running on http://localhost:{}", port);
    println!("   POST /api/consolidate - Upload workbook files");
    println!("   POST /api/export      - Download one physician's report");
    println!("   GET  /api/logs        - SSE log stream");
    println!("   GET  /health          - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::PhysicianNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(error_response(&self.to_string()))).into_response()
    }
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "honoraria",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "consolidate": "POST /api/consolidate",
            "export": "POST /api/export?physician=NAME",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Collect every `file` field of the multipart body as (name, bytes).
async fn collect_files(
    multipart: &mut Multipart,
) -> Result<Vec<(String, Vec<u8>)>, ServerError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Multipart error: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field
            .file_name()
            .unwrap_or("unnamed.xlsx")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))?;
        files.push((name, bytes.to_vec()));
    }

    if files.is_empty() {
        return Err(ServerError::BadRequest("No files provided".into()));
    }
    Ok(files)
}

/// Upload endpoint: consolidate the batch and return summaries.
async fn consolidate_upload(
    State(config): State<Arc<ReportConfig>>,
    mut multipart: Multipart,
) -> Result<Json<ConsolidateResponse>, ServerError> {
    let files = collect_files(&mut multipart).await?;

    println!("\n📄 NEW BATCH: {} file(s)", files.len());

    let options = ConsolidateOptions {
        config: (*config).clone(),
    };
    let result = consolidate_named_bytes(&files, &options);

    Ok(Json(ConsolidateResponse::new(result, &config)))
}

#[derive(Debug, Deserialize)]
struct ExportQuery {
    /// Exact physician name as returned by `/api/consolidate`.
    physician: String,
}

/// Export endpoint: consolidate the batch and stream one physician's
/// two-sheet report as an attachment.
async fn export_upload(
    State(config): State<Arc<ReportConfig>>,
    Query(query): Query<ExportQuery>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ServerError> {
    let files = collect_files(&mut multipart).await?;

    let options = ConsolidateOptions {
        config: (*config).clone(),
    };
    let result = consolidate_named_bytes(&files, &options);

    let summary = result
        .summaries
        .iter()
        .find(|s| s.physician == query.physician)
        .ok_or_else(|| ServerError::PhysicianNotFound(query.physician.clone()))?;

    let bytes = export_summary_bytes(summary)?;
    let file_name = report_file_name(&summary.physician);

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        bytes,
    ))
}
