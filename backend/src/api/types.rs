//! REST API types for frontend integration.
//!
//! Pipeline results are converted into camelCase DTOs here so the WASM
//! frontend can deserialize them without field renaming of its own.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::PipelineResult;
use crate::pipeline::FilePreview;

/// Response for a preview upload: one entry per uploaded file, in upload
/// order, each either a preview or a per-file error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    /// Unique batch identifier
    pub batch_id: String,

    /// Per-file outcomes
    pub files: Vec<FileResult>,
}

/// Outcome for a single file in a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResult {
    /// Original file name
    pub file_name: String,

    /// Status: "ready" or "error"
    pub status: String,

    /// Preview data when parsing succeeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<PreviewData>,

    /// User-facing message when it failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Preview payload for one parsed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewData {
    pub size_bytes: usize,
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnInfo>,
    /// First rows as display strings; `null` marks a missing cell
    pub head: Vec<Vec<Option<String>>>,
    /// Bar-chart series for numeric columns
    pub charts: Vec<ChartData>,
}

/// One column with its inferred kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    pub name: String,
    pub numeric: bool,
}

/// Chart values for one numeric column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub column: String,
    pub values: Vec<f64>,
}

impl From<FilePreview> for PreviewData {
    fn from(preview: FilePreview) -> Self {
        PreviewData {
            size_bytes: preview.size_bytes,
            row_count: preview.row_count,
            column_count: preview.column_count,
            columns: preview
                .columns
                .into_iter()
                .map(|c| ColumnInfo {
                    name: c.name,
                    numeric: c.numeric,
                })
                .collect(),
            head: preview.head,
            charts: preview
                .charts
                .into_iter()
                .map(|s| ChartData {
                    column: s.column,
                    values: s.values,
                })
                .collect(),
        }
    }
}

impl PreviewResponse {
    /// Build the response from per-file pipeline outcomes.
    pub fn from_outcomes(outcomes: Vec<(String, PipelineResult<FilePreview>)>) -> Self {
        let files = outcomes
            .into_iter()
            .map(|(file_name, result)| match result {
                Ok(preview) => FileResult {
                    file_name,
                    status: "ready".to_string(),
                    preview: Some(preview.into()),
                    error: None,
                },
                Err(e) => FileResult {
                    file_name,
                    status: "error".to_string(),
                    preview: None,
                    error: Some(e.to_string()),
                },
            })
            .collect();

        PreviewResponse {
            batch_id: Uuid::new_v4().to_string(),
            files,
        }
    }
}

/// Create a top-level error response body.
pub fn error_response(error: &str) -> Value {
    json!({
        "batchId": Uuid::new_v4().to_string(),
        "status": "error",
        "error": error,
        "files": [],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{preview_batch, CleanOptions, UploadedFile};

    #[test]
    fn test_outcomes_keep_upload_order_and_isolation() {
        let files = vec![
            UploadedFile::new("ok.csv", b"a,b\n1,2".to_vec()),
            UploadedFile::new("nope.txt", b"whatever".to_vec()),
        ];
        let response =
            PreviewResponse::from_outcomes(preview_batch(&files, CleanOptions::default()));

        assert_eq!(response.files.len(), 2);
        assert_eq!(response.files[0].status, "ready");
        assert!(response.files[0].preview.is_some());
        assert_eq!(response.files[1].status, "error");
        let message = response.files[1].error.as_deref().unwrap();
        assert!(message.contains(".txt"));
    }

    #[test]
    fn test_camel_case_serialization() {
        let files = vec![UploadedFile::new("ok.csv", b"a\n1".to_vec())];
        let response =
            PreviewResponse::from_outcomes(preview_batch(&files, CleanOptions::default()));
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"batchId\""));
        assert!(json.contains("\"fileName\""));
        assert!(json.contains("\"rowCount\""));
        // Error field is omitted on success
        assert!(!json.contains("\"error\""));
    }
}
