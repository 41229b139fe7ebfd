//! HTTP server for the Sweeper API.
//!
//! Provides REST endpoints for the single-page frontend. The server is
//! stateless: every interaction re-runs the pipeline on the uploaded bytes,
//! so nothing is shared between requests or users.
//!
//! # API Endpoints
//!
//! | Method | Path           | Description                                |
//! |--------|----------------|--------------------------------------------|
//! | GET    | `/health`      | Health check                               |
//! | POST   | `/api/preview` | Upload files, get per-file previews        |
//! | POST   | `/api/convert` | Upload one file + options, get a download  |
//! | GET    | `/api/logs`    | SSE stream for real-time logs              |

use axum::{
    extract::{DefaultBodyLimit, Multipart},
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

use super::logs::LOG_BROADCASTER;
use super::types::{error_response, PreviewResponse};
use crate::export::OutputFormat;
use crate::pipeline::{
    convert_file, preview_batch, CleanOptions, ConvertOptions, UploadedFile,
};

/// Maximum accepted upload size (whole multipart body).
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Start the HTTP server.
pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    // Permissive CORS so the WASM frontend can run from another port
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_DISPOSITION]);

    let app = Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/preview", post(preview_files))
        .route("/api/convert", post(convert_upload))
        .route("/api/logs", get(sse_logs))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🧹 Sweeper server running on http://localhost:{}", port);
    println!("   POST /api/preview - Upload CSV/XLSX files");
    println!("   POST /api/convert - Convert one file for download");
    println!("   GET  /api/logs    - SSE log stream");
    println!("   GET  /health      - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "sweeper",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "preview": "POST /api/preview",
            "convert": "POST /api/convert",
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

type ApiError = (StatusCode, Json<Value>);

fn bad_request(message: impl std::fmt::Display) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(error_response(&message.to_string())),
    )
}

fn parse_flag(text: &str) -> bool {
    matches!(text.trim(), "true" | "1" | "on" | "yes")
}

/// Preview endpoint: accepts any number of `files` parts plus optional
/// cleaning flags applying to the whole batch.
async fn preview_files(mut multipart: Multipart) -> Result<Json<PreviewResponse>, ApiError> {
    let mut files: Vec<UploadedFile> = Vec::new();
    let mut options = CleanOptions::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "files" | "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(format!("Read error: {}", e)))?
                    .to_vec();
                files.push(UploadedFile::new(file_name, bytes));
            }
            "removeDuplicates" => {
                let text = field.text().await.unwrap_or_default();
                options.remove_duplicates = parse_flag(&text);
            }
            "fillMissing" => {
                let text = field.text().await.unwrap_or_default();
                options.fill_missing = parse_flag(&text);
            }
            _ => {}
        }
    }

    if files.is_empty() {
        return Err(bad_request("No files provided"));
    }

    println!("\n📄 Preview request: {} file(s)", files.len());

    let outcomes = preview_batch(&files, options);
    Ok(Json(PreviewResponse::from_outcomes(outcomes)))
}

/// Convert endpoint: one file plus pipeline options, returns the serialized
/// output as an attachment.
async fn convert_upload(mut multipart: Multipart) -> Result<Response, ApiError> {
    let mut file: Option<UploadedFile> = None;
    let mut clean = CleanOptions::default();
    let mut columns: Option<Vec<String>> = None;
    let mut format: Option<OutputFormat> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(format!("Read error: {}", e)))?
                    .to_vec();
                file = Some(UploadedFile::new(file_name, bytes));
            }
            "removeDuplicates" => {
                let text = field.text().await.unwrap_or_default();
                clean.remove_duplicates = parse_flag(&text);
            }
            "fillMissing" => {
                let text = field.text().await.unwrap_or_default();
                clean.fill_missing = parse_flag(&text);
            }
            "columns" => {
                let text = field.text().await.unwrap_or_default();
                columns = Some(
                    serde_json::from_str(&text)
                        .map_err(|e| bad_request(format!("Invalid column list: {}", e)))?,
                );
            }
            "format" => {
                let text = field.text().await.unwrap_or_default();
                format = Some(text.parse().map_err(bad_request)?);
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| bad_request("No file provided"))?;
    let format = format.ok_or_else(|| bad_request("No output format provided"))?;

    println!("\n🔄 Convert request: {} -> {}", file.name, format);

    let options = ConvertOptions {
        clean,
        columns,
        format,
    };

    let converted = convert_file(&file, &options).map_err(|e| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "status": "error",
                "fileName": file.name,
                "error": format!("{}: {}", file.name, e),
            })),
        )
    })?;

    let headers = [
        (header::CONTENT_TYPE, converted.mime.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", converted.file_name),
        ),
    ];

    Ok((headers, converted.bytes).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(parse_flag(" on "));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
