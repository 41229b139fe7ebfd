//! HTTP service for uploading files and fetching per-file previews.

use gloo_net::http::Request;
use web_sys::{File, FormData};

use crate::types::PreviewResponse;

/// Upload files to the backend preview endpoint.
///
/// Every call re-runs the whole pipeline server-side: the cleaning flags
/// apply to all files in the request, and the response carries one outcome
/// per file in upload order.
pub async fn preview_files(
    files: &[File],
    remove_duplicates: bool,
    fill_missing: bool,
    backend_url: &str,
) -> Result<PreviewResponse, String> {
    let form_data =
        FormData::new().map_err(|e| format!("Failed to create FormData: {:?}", e))?;

    for file in files {
        form_data
            .append_with_blob_and_filename("files", file, &file.name())
            .map_err(|e| format!("Failed to append file: {:?}", e))?;
    }

    if remove_duplicates {
        form_data
            .append_with_str("removeDuplicates", "true")
            .map_err(|e| format!("Failed to append field: {:?}", e))?;
    }
    if fill_missing {
        form_data
            .append_with_str("fillMissing", "true")
            .map_err(|e| format!("Failed to append field: {:?}", e))?;
    }

    let url = format!("{}/api/preview", backend_url);
    let request = Request::post(&url)
        .body(form_data)
        .map_err(|e| format!("Failed to build request: {}", e))?;

    let response = request
        .send()
        .await
        .map_err(|e| format!("HTTP request failed: {}", e))?;

    if !response.ok() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(format!("Server error ({}): {}", response.status(), error_text));
    }

    response
        .json::<PreviewResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
