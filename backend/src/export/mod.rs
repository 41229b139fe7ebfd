//! Output serialization to CSV and XLSX.
//!
//! Both encoders are fully buffered: they produce an in-memory byte vector
//! that the server offers as a download. Neither writes an index column.

use std::ffi::OsStr;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use rust_xlsxwriter::Workbook;
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};
use crate::table::{Cell, Table};

/// Worksheet name used for XLSX output, matching the original download.
pub const SHEET_NAME: &str = "Sheet1";

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated text.
    Csv,
    /// Spreadsheet workbook with a single sheet.
    Xlsx,
}

impl OutputFormat {
    /// MIME label for the download response.
    pub fn mime(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "text/csv",
            OutputFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// File extension for the download name.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Xlsx => "xlsx",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "xlsx" => Ok(OutputFormat::Xlsx),
            other => Err(format!("Unknown output format: '{}'", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Serialize a table to the chosen format.
pub fn serialize(table: &Table, format: OutputFormat) -> ExportResult<Vec<u8>> {
    match format {
        OutputFormat::Csv => to_csv(table),
        OutputFormat::Xlsx => to_xlsx(table),
    }
}

/// Header row plus one comma-separated row per record; missing cells become
/// empty fields.
fn to_csv(table: &Table) -> ExportResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(table.column_names())
        .map_err(|e| ExportError::Csv(e.to_string()))?;

    for i in 0..table.row_count() {
        let fields: Vec<String> = table
            .columns()
            .iter()
            .map(|c| c.cells[i].to_field())
            .collect();
        writer
            .write_record(&fields)
            .map_err(|e| ExportError::Csv(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))
}

/// Single named sheet, header row plus one row per record; missing cells
/// are left blank.
fn to_xlsx(table: &Table) -> ExportResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, column) in table.columns().iter().enumerate() {
        let col = col as u16;
        worksheet.write_string(0, col, &column.name)?;
        for (row, cell) in column.cells.iter().enumerate() {
            let row = (row + 1) as u32;
            match cell {
                Cell::Number(n) => {
                    worksheet.write_number(row, col, *n)?;
                }
                Cell::Text(s) => {
                    worksheet.write_string(row, col, s)?;
                }
                Cell::Missing => {}
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Download name: the original file name with its extension replaced by the
/// target format's.
pub fn output_file_name(original: &str, format: OutputFormat) -> String {
    let stem = Path::new(original)
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or(original);
    format!("{}.{}", stem, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_csv_str, parse_xlsx_bytes};

    fn sample() -> Table {
        parse_csv_str("name,age\nAlice,30\nBob,25.5").unwrap()
    }

    #[test]
    fn test_format_labels() {
        assert_eq!(OutputFormat::Csv.mime(), "text/csv");
        assert_eq!(
            OutputFormat::Xlsx.mime(),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!("XLSX".parse::<OutputFormat>().unwrap(), OutputFormat::Xlsx);
        assert!("parquet".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_csv_output_layout() {
        let bytes = serialize(&sample(), OutputFormat::Csv).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "name,age\nAlice,30\nBob,25.5\n");
    }

    #[test]
    fn test_csv_missing_cells_are_empty_fields() {
        let table = parse_csv_str("a,b\n1,\n,2").unwrap();
        let bytes = serialize(&table, OutputFormat::Csv).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "a,b\n1,\n,2\n");
    }

    #[test]
    fn test_csv_round_trip() {
        let table = sample();
        let bytes = serialize(&table, OutputFormat::Csv).unwrap();
        let reparsed = parse_csv_str(&String::from_utf8(bytes).unwrap()).unwrap();
        assert_eq!(reparsed, table);
    }

    #[test]
    fn test_xlsx_round_trip() {
        let table = sample();
        let bytes = serialize(&table, OutputFormat::Xlsx).unwrap();
        let reparsed = parse_xlsx_bytes(&bytes).unwrap();
        assert_eq!(reparsed, table);
    }

    #[test]
    fn test_output_file_name_replaces_extension() {
        assert_eq!(
            output_file_name("report.xlsx", OutputFormat::Csv),
            "report.csv"
        );
        assert_eq!(
            output_file_name("data.csv", OutputFormat::Xlsx),
            "data.xlsx"
        );
        assert_eq!(
            output_file_name("archive.2024.csv", OutputFormat::Csv),
            "archive.2024.csv"
        );
    }
}
