//! Per-file transform pipeline.
//!
//! Each uploaded file runs the same flat sequence: parse, optional
//! cleaning, column selection, serialization. Every file is independent;
//! an error in one file is reported for that file and never aborts the
//! rest of the batch. Nothing survives a run: the table is owned by the
//! run and dropped with it.

use serde::{Deserialize, Serialize};

use crate::api::logs::{log_error, log_info, log_success, log_warning};
use crate::clean::{fill_missing_numeric, remove_duplicates, select_columns};
use crate::error::{PipelineError, PipelineResult};
use crate::export::{self, OutputFormat};
use crate::parser;
use crate::table::Table;

/// Rows shown in a preview, like the original head-of-table view.
pub const PREVIEW_ROWS: usize = 5;

/// Cap on chart points returned per numeric column.
pub const MAX_CHART_POINTS: usize = 100;

/// One uploaded file: name plus raw bytes, immutable once received.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original file name, including extension.
    pub name: String,
    /// Raw byte content.
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Byte size of the upload.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Cleaning switches; both default to off.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CleanOptions {
    /// Drop rows that duplicate an earlier row.
    #[serde(default)]
    pub remove_duplicates: bool,
    /// Mean-impute missing values in numeric columns.
    #[serde(default)]
    pub fill_missing: bool,
}

/// Everything a conversion run needs beyond the file itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Cleaning switches.
    #[serde(default)]
    pub clean: CleanOptions,
    /// Columns to keep, in order; `None` keeps all columns.
    #[serde(default)]
    pub columns: Option<Vec<String>>,
    /// Target output format.
    pub format: OutputFormat,
}

/// Per-column preview info.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    /// Column name.
    pub name: String,
    /// Whether every cell is numeric or missing.
    pub numeric: bool,
}

/// Chart data for one numeric column (missing cells skipped).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    /// Source column name.
    pub column: String,
    /// Values in row order, capped at [`MAX_CHART_POINTS`].
    pub values: Vec<f64>,
}

/// What the UI shows for one successfully parsed file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilePreview {
    /// Original file name.
    pub file_name: String,
    /// Upload size in bytes.
    pub size_bytes: usize,
    /// Total data rows.
    pub row_count: usize,
    /// Total columns.
    pub column_count: usize,
    /// Columns in order, with their numeric flag.
    pub columns: Vec<ColumnSummary>,
    /// First rows as display strings, `None` for missing cells.
    pub head: Vec<Vec<Option<String>>>,
    /// Bar-chart series for the numeric columns.
    pub charts: Vec<ChartSeries>,
}

/// A finished conversion, ready to offer as a download.
#[derive(Debug, Clone)]
pub struct ConvertedFile {
    /// Download name: original name with the extension replaced.
    pub file_name: String,
    /// MIME label for the response.
    pub mime: &'static str,
    /// Serialized output, fully buffered.
    pub bytes: Vec<u8>,
}

/// Parse one file and build its preview, applying any requested cleaning
/// first so the preview reflects what a conversion would produce.
pub fn preview_file(file: &UploadedFile, options: CleanOptions) -> PipelineResult<FilePreview> {
    log_info(format!("Reading {} ({} bytes)...", file.name, file.size()));

    let mut table = parser::parse_bytes(&file.name, &file.bytes)?;
    apply_cleaning(&mut table, options, &file.name);

    log_success(format!(
        "{}: {} rows, {} columns",
        file.name,
        table.row_count(),
        table.column_count()
    ));

    let preview = build_preview(file, &table);
    if preview.charts.is_empty() {
        log_warning(format!(
            "{}: no numeric columns available for charting",
            file.name
        ));
    }

    Ok(preview)
}

/// Run the preview pipeline over a whole batch.
///
/// Each file is processed independently: a failure is logged and recorded
/// for that file, and processing continues with the next one.
pub fn preview_batch(
    files: &[UploadedFile],
    options: CleanOptions,
) -> Vec<(String, PipelineResult<FilePreview>)> {
    files
        .iter()
        .map(|file| {
            let result = preview_file(file, options);
            if let Err(ref e) = result {
                log_error(format!("{}: {}", file.name, e));
            }
            (file.name.clone(), result)
        })
        .collect()
}

/// Run the full pipeline on one file: parse, clean, select columns,
/// serialize to the requested format.
pub fn convert_file(
    file: &UploadedFile,
    options: &ConvertOptions,
) -> PipelineResult<ConvertedFile> {
    log_info(format!("Converting {} to {}...", file.name, options.format));

    let mut table = parser::parse_bytes(&file.name, &file.bytes)?;
    apply_cleaning(&mut table, options.clean, &file.name);

    if let Some(ref names) = options.columns {
        if names.is_empty() {
            return Err(PipelineError::Processing(
                "No columns selected".to_string(),
            ));
        }
        table = select_columns(&table, names)?;
    }

    let bytes = export::serialize(&table, options.format)?;
    let file_name = export::output_file_name(&file.name, options.format);

    log_success(format!("{} ready ({} bytes)", file_name, bytes.len()));

    Ok(ConvertedFile {
        file_name,
        mime: options.format.mime(),
        bytes,
    })
}

/// Apply the enabled cleaning steps in place.
fn apply_cleaning(table: &mut Table, options: CleanOptions, file_name: &str) {
    if options.remove_duplicates {
        let removed = remove_duplicates(table);
        log_success(format!("{}: removed {} duplicate rows", file_name, removed));
    }
    if options.fill_missing {
        let filled = fill_missing_numeric(table);
        log_success(format!("{}: filled {} missing values", file_name, filled));
    }
}

/// Assemble the preview payload from a parsed table.
fn build_preview(file: &UploadedFile, table: &Table) -> FilePreview {
    let columns: Vec<ColumnSummary> = table
        .columns()
        .iter()
        .map(|c| ColumnSummary {
            name: c.name.clone(),
            numeric: c.is_numeric(),
        })
        .collect();

    let head = table
        .head(PREVIEW_ROWS)
        .into_iter()
        .map(|row| row.iter().map(|cell| cell.display()).collect())
        .collect();

    let charts = table
        .columns()
        .iter()
        .filter(|c| c.is_numeric())
        .map(|c| ChartSeries {
            column: c.name.clone(),
            values: c
                .cells
                .iter()
                .filter_map(|cell| cell.as_number())
                .take(MAX_CHART_POINTS)
                .collect(),
        })
        .collect();

    FilePreview {
        file_name: file.name.clone(),
        size_bytes: file.size(),
        row_count: table.row_count(),
        column_count: table.column_count(),
        columns,
        head,
        charts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ParseError, PipelineError};

    fn csv_file(name: &str, content: &str) -> UploadedFile {
        UploadedFile::new(name, content.as_bytes().to_vec())
    }

    #[test]
    fn test_unsupported_extension_produces_no_table() {
        let file = csv_file("data.txt", "a,b\n1,2");
        let err = preview_file(&file, CleanOptions::default()).unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Parse(ParseError::UnsupportedFormat { ref extension })
                if extension == "txt"
        ));
    }

    #[test]
    fn test_preview_reports_shape_and_types() {
        let file = csv_file("people.csv", "name,age\nAlice,30\nBob,\nCara,25");
        let preview = preview_file(&file, CleanOptions::default()).unwrap();

        assert_eq!(preview.file_name, "people.csv");
        assert_eq!(preview.row_count, 3);
        assert_eq!(preview.column_count, 2);
        assert!(!preview.columns[0].numeric);
        assert!(preview.columns[1].numeric);
        assert_eq!(preview.head.len(), 3);
        assert_eq!(preview.head[1][1], None);
        assert_eq!(preview.charts.len(), 1);
        assert_eq!(preview.charts[0].values, vec![30.0, 25.0]);
    }

    #[test]
    fn test_preview_applies_cleaning() {
        let file = csv_file("v.csv", "v,w\n1,a\n1,a\n,b\n3,c");
        let options = CleanOptions {
            remove_duplicates: true,
            fill_missing: true,
        };
        let preview = preview_file(&file, options).unwrap();

        // One duplicate dropped, then the missing cell filled with mean(1, 3)
        assert_eq!(preview.row_count, 3);
        assert_eq!(preview.charts[0].values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_batch_isolates_failures() {
        let files = vec![
            csv_file("good.csv", "a,b\n1,2"),
            csv_file("bad.csv", ""),
        ];
        let outcomes = preview_batch(&files, CleanOptions::default());

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].1.is_ok());
        assert!(outcomes[1].1.is_err());
    }

    #[test]
    fn test_convert_renames_and_labels_output() {
        let file = csv_file("people.csv", "name,age\nAlice,30");
        let options = ConvertOptions {
            clean: CleanOptions::default(),
            columns: None,
            format: OutputFormat::Xlsx,
        };
        let converted = convert_file(&file, &options).unwrap();

        assert_eq!(converted.file_name, "people.xlsx");
        assert_eq!(
            converted.mime,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert!(!converted.bytes.is_empty());
    }

    #[test]
    fn test_convert_selects_columns_in_request_order() {
        let file = csv_file("t.csv", "a,b,c\n1,2,3");
        let options = ConvertOptions {
            clean: CleanOptions::default(),
            columns: Some(vec!["c".into(), "a".into()]),
            format: OutputFormat::Csv,
        };
        let converted = convert_file(&file, &options).unwrap();

        assert_eq!(String::from_utf8(converted.bytes).unwrap(), "c,a\n3,1\n");
    }

    #[test]
    fn test_convert_empty_selection_is_rejected() {
        let file = csv_file("t.csv", "a\n1");
        let options = ConvertOptions {
            clean: CleanOptions::default(),
            columns: Some(vec![]),
            format: OutputFormat::Csv,
        };
        let err = convert_file(&file, &options).unwrap_err();
        assert!(matches!(err, PipelineError::Processing(_)));
    }

    #[test]
    fn test_convert_unknown_column_is_per_file_error() {
        let file = csv_file("t.csv", "a\n1");
        let options = ConvertOptions {
            clean: CleanOptions::default(),
            columns: Some(vec!["ghost".into()]),
            format: OutputFormat::Csv,
        };
        let err = convert_file(&file, &options).unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }
}
