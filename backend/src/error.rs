//! Error types for the Sweeper file pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`ParseError`] - file decoding errors (CSV and XLSX)
//! - [`CleanError`] - cleaning and column-selection errors
//! - [`ExportError`] - output serialization errors
//! - [`PipelineError`] - top-level per-file errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries. A `PipelineError`
//! is always caught at the per-file boundary and turned into a
//! user-facing message; it never aborts a batch.

use thiserror::Error;

// =============================================================================
// Parse Errors
// =============================================================================

/// Errors while turning uploaded bytes into a [`crate::table::Table`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// Extension is not one of the accepted formats.
    #[error("Unsupported file type: '.{extension}' (expected .csv or .xlsx)")]
    UnsupportedFormat { extension: String },

    /// File contains no data at all.
    #[error("File is empty")]
    EmptyFile,

    /// First row yields no column names.
    #[error("No header row found")]
    NoHeaders,

    /// Workbook contains no worksheets.
    #[error("Workbook has no worksheets")]
    NoSheets,

    /// Malformed CSV content.
    #[error("Invalid CSV content: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed XLSX content.
    #[error("Invalid XLSX content: {0}")]
    Xlsx(#[from] calamine::XlsxError),
}

// =============================================================================
// Cleaning Errors
// =============================================================================

/// Errors during cleaning or column selection.
#[derive(Debug, Error)]
pub enum CleanError {
    /// Requested column does not exist in the table.
    #[error("Unknown column: '{0}'")]
    UnknownColumn(String),
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors while serializing a table to an output format.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV writer failure.
    #[error("CSV serialization failed: {0}")]
    Csv(String),

    /// XLSX writer failure.
    #[error("XLSX serialization failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level per-file pipeline error.
///
/// This is the error type returned by [`crate::pipeline::preview_file`] and
/// [`crate::pipeline::convert_file`]. It wraps the stage errors and adds a
/// catch-all variant for anything else raised while handling a file.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// File could not be parsed.
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// Cleaning or column selection failed.
    #[error("{0}")]
    Clean(#[from] CleanError),

    /// Output serialization failed.
    #[error("{0}")]
    Export(#[from] ExportError),

    /// Anything else raised while handling the file.
    #[error("Processing failed: {0}")]
    Processing(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for cleaning operations.
pub type CleanResult<T> = Result<T, CleanError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for per-file pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // ParseError -> PipelineError
        let parse_err = ParseError::UnsupportedFormat {
            extension: "txt".into(),
        };
        let pipeline_err: PipelineError = parse_err.into();
        assert!(pipeline_err.to_string().contains(".txt"));

        // CleanError -> PipelineError
        let clean_err = CleanError::UnknownColumn("age".into());
        let pipeline_err: PipelineError = clean_err.into();
        assert!(pipeline_err.to_string().contains("age"));
    }

    #[test]
    fn test_unsupported_format_message_names_accepted_set() {
        let err = ParseError::UnsupportedFormat {
            extension: "json".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains(".csv"));
        assert!(msg.contains(".xlsx"));
    }
}
