//! # Sweeper - tabular file cleaning and conversion
//!
//! Sweeper turns uploaded tabular files (`.csv`, `.xlsx`) into cleaned,
//! column-selected downloads in either format, driven by a single-page
//! web frontend.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Uploaded   │────▶│   Parser    │────▶│  Cleaning + │────▶│  CSV/XLSX   │
//! │  CSV/XLSX   │     │ (auto-enc)  │     │  selection  │     │  download   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! Every uploaded file runs the pipeline independently; a failure in one
//! file is reported for that file and never aborts the batch.
//!
//! ## Quick Start
//!
//! ```rust
//! use sweeper::{convert_file, ConvertOptions, CleanOptions, OutputFormat, UploadedFile};
//!
//! let file = UploadedFile::new("people.csv", b"name,age\nAlice,30\nAlice,30".to_vec());
//! let options = ConvertOptions {
//!     clean: CleanOptions { remove_duplicates: true, fill_missing: false },
//!     columns: None,
//!     format: OutputFormat::Xlsx,
//! };
//! let converted = convert_file(&file, &options).unwrap();
//! assert_eq!(converted.file_name, "people.xlsx");
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`table`] - In-memory columnar table model
//! - [`parser`] - CSV/XLSX parsing with extension dispatch
//! - [`clean`] - Duplicate removal, mean imputation, column selection
//! - [`export`] - CSV/XLSX serialization
//! - [`pipeline`] - The per-file transform pipeline
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod table;

// Parsing
pub mod parser;

// Cleaning
pub mod clean;

// Export
pub mod export;

// Pipeline
pub mod pipeline;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CleanError, ExportError, ParseError, PipelineError};

// =============================================================================
// Re-exports - Table model
// =============================================================================

pub use table::{Cell, Column, Table};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    decode_content, detect_encoding, parse_bytes, parse_csv_bytes, parse_csv_str,
    parse_xlsx_bytes, FileKind,
};

// =============================================================================
// Re-exports - Cleaning
// =============================================================================

pub use clean::{fill_missing_numeric, remove_duplicates, select_columns};

// =============================================================================
// Re-exports - Export
// =============================================================================

pub use export::{output_file_name, serialize, OutputFormat, SHEET_NAME};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{
    convert_file, preview_batch, preview_file, ChartSeries, CleanOptions, ColumnSummary,
    ConvertOptions, ConvertedFile, FilePreview, UploadedFile, MAX_CHART_POINTS,
    PREVIEW_ROWS,
};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, FileResult, PreviewResponse};

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
