//! HTTP service for conversion requests and browser downloads.
//!
//! The convert endpoint returns raw bytes; this module turns them into a
//! Blob download without any server-side state.

use gloo_net::http::Request;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, File, FormData, HtmlAnchorElement, Url};

/// Options for one conversion run, mirroring the backend pipeline options.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvertRequest {
    /// Drop rows that duplicate an earlier row
    pub remove_duplicates: bool,
    /// Mean-impute missing values in numeric columns
    pub fill_missing: bool,
    /// Columns to keep, in order
    pub columns: Vec<String>,
    /// Target format: "csv" or "xlsx"
    pub format: String,
}

/// Send one file through the pipeline and trigger a browser download of
/// the result. Returns the download file name.
pub async fn convert_file(
    file: &File,
    options: &ConvertRequest,
    backend_url: &str,
) -> Result<String, String> {
    let form_data =
        FormData::new().map_err(|e| format!("Failed to create FormData: {:?}", e))?;

    form_data
        .append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| format!("Failed to append file: {:?}", e))?;
    form_data
        .append_with_str("removeDuplicates", &options.remove_duplicates.to_string())
        .map_err(|e| format!("Failed to append field: {:?}", e))?;
    form_data
        .append_with_str("fillMissing", &options.fill_missing.to_string())
        .map_err(|e| format!("Failed to append field: {:?}", e))?;
    let columns_json = serde_json::to_string(&options.columns)
        .map_err(|e| format!("Failed to encode columns: {}", e))?;
    form_data
        .append_with_str("columns", &columns_json)
        .map_err(|e| format!("Failed to append field: {:?}", e))?;
    form_data
        .append_with_str("format", &options.format)
        .map_err(|e| format!("Failed to append field: {:?}", e))?;

    let url = format!("{}/api/convert", backend_url);
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

    let mime = response
        .headers()
        .get("content-type")
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let file_name = response
        .headers()
        .get("content-disposition")
        .and_then(|d| parse_attachment_name(&d))
        .unwrap_or_else(|| file.name());

    let bytes = response
        .binary()
        .await
        .map_err(|e| format!("Failed to read response body: {}", e))?;

    trigger_download(&bytes, &file_name, &mime)?;
    Ok(file_name)
}

/// Extract the filename from a `Content-Disposition: attachment` header.
fn parse_attachment_name(disposition: &str) -> Option<String> {
    let marker = "filename=";
    let start = disposition.find(marker)? + marker.len();
    let name = disposition[start..].trim().trim_matches('"');
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Offer bytes as a browser download via a temporary object URL.
fn trigger_download(bytes: &[u8], file_name: &str, mime: &str) -> Result<(), String> {
    let array = js_sys::Array::new();
    array.push(&js_sys::Uint8Array::from(bytes).buffer());

    let blob_options = BlobPropertyBag::new();
    blob_options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&array, &blob_options)
        .map_err(|e| format!("Failed to create blob: {:?}", e))?;

    let object_url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document available")?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into()
        .map_err(|_| "Element is not an anchor".to_string())?;

    anchor.set_href(&object_url);
    anchor.set_download(file_name);
    anchor.click();

    Url::revoke_object_url(&object_url)
        .map_err(|e| format!("Failed to revoke object URL: {:?}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attachment_name() {
        assert_eq!(
            parse_attachment_name("attachment; filename=\"people.xlsx\"").as_deref(),
            Some("people.xlsx")
        );
        assert_eq!(
            parse_attachment_name("attachment; filename=data.csv").as_deref(),
            Some("data.csv")
        );
        assert_eq!(parse_attachment_name("inline"), None);
    }
}
