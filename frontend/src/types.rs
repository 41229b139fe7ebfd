//! Common types used across the frontend application.
//!
//! This module centralizes type definitions to avoid duplication
//! and ensure consistency across components.
//!
//! # Categories
//!
//! - **API Types** - Backend response structures
//! - **File Types** - Uploaded file plus its preview outcome
//! - **Log Types** - Real-time log streaming

use serde::{Deserialize, Serialize};

// =============================================================================
// API Response Types
// =============================================================================

/// Response from the backend preview endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    /// Unique batch identifier
    pub batch_id: String,
    /// Per-file outcomes, in upload order
    pub files: Vec<FileResult>,
}

/// Outcome for a single uploaded file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResult {
    /// Original file name
    pub file_name: String,
    /// Status: "ready" or "error"
    pub status: String,
    /// Preview data when parsing succeeded
    #[serde(default)]
    pub preview: Option<FilePreview>,
    /// User-facing message when it failed
    #[serde(default)]
    pub error: Option<String>,
}

/// Preview payload for one parsed file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePreview {
    pub size_bytes: usize,
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnInfo>,
    /// First rows as display strings; `null` marks a missing cell
    pub head: Vec<Vec<Option<String>>>,
    /// Bar-chart series for numeric columns
    pub charts: Vec<ChartSeries>,
}

/// One column with its inferred kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    pub name: String,
    pub numeric: bool,
}

/// Chart values for one numeric column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub column: String,
    pub values: Vec<f64>,
}

// =============================================================================
// File Types
// =============================================================================

/// An uploaded browser file paired with its backend outcome.
///
/// The `File` handle is kept so cleaning refreshes and conversions can
/// re-send the bytes; the backend holds no state between interactions.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedFile {
    /// Browser file handle
    pub file: web_sys::File,
    /// Preview outcome from the last pipeline run
    pub result: FileResult,
}

// =============================================================================
// Log Types
// =============================================================================

/// Log severity level.
///
/// Matches the backend's log levels for SSE streaming.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LogLevel {
    /// Informational message
    Info,
    /// Success/completion message
    Success,
    /// Warning message
    Warning,
    /// Error message
    Error,
}

impl LogLevel {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            LogLevel::Info => "log-info",
            LogLevel::Success => "log-success",
            LogLevel::Warning => "log-warning",
            LogLevel::Error => "log-error",
        }
    }
}

/// A single log entry shown in the logs panel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Severity level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Timestamp string (HH:MM:SS)
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_response_deserialization() {
        let json = r#"{
            "batchId": "123e4567-e89b-12d3-a456-426614174000",
            "files": [
                {
                    "fileName": "people.csv",
                    "status": "ready",
                    "preview": {
                        "sizeBytes": 42,
                        "rowCount": 2,
                        "columnCount": 2,
                        "columns": [
                            {"name": "name", "numeric": false},
                            {"name": "age", "numeric": true}
                        ],
                        "head": [["Alice", "30"], ["Bob", null]],
                        "charts": [{"column": "age", "values": [30.0]}]
                    }
                },
                {
                    "fileName": "notes.txt",
                    "status": "error",
                    "error": "Unsupported file type: '.txt' (expected .csv or .xlsx)"
                }
            ]
        }"#;

        let response: PreviewResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.files.len(), 2);

        let ready = &response.files[0];
        assert_eq!(ready.status, "ready");
        let preview = ready.preview.as_ref().unwrap();
        assert_eq!(preview.row_count, 2);
        assert_eq!(preview.head[1][1], None);
        assert!(preview.columns[1].numeric);

        let failed = &response.files[1];
        assert_eq!(failed.status, "error");
        assert!(failed.preview.is_none());
        assert!(failed.error.as_deref().unwrap().contains(".txt"));
    }
}
