//! File parsing with extension dispatch and encoding auto-detection.
//!
//! Turns uploaded bytes into a [`Table`]. Exactly two formats are accepted:
//! delimited text (`.csv`) and spreadsheet workbooks (`.xlsx`). Anything
//! else fails with [`ParseError::UnsupportedFormat`].

use std::collections::HashMap;
use std::ffi::OsStr;
use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader, Xlsx};
use csv::ReaderBuilder;

use crate::error::{ParseError, ParseResult};
use crate::table::{Cell, Column, Table};

/// Accepted file formats, determined by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Comma-separated text (`.csv`)
    Csv,
    /// Spreadsheet workbook (`.xlsx`)
    Xlsx,
}

impl FileKind {
    /// Determine the format from a file name, case-insensitively.
    pub fn from_name(name: &str) -> ParseResult<FileKind> {
        let extension = Path::new(name)
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(FileKind::Csv),
            Some("xlsx") => Ok(FileKind::Xlsx),
            other => Err(ParseError::UnsupportedFormat {
                extension: other.unwrap_or("").to_string(),
            }),
        }
    }
}

/// Parse uploaded bytes, dispatching on the file name's extension.
pub fn parse_bytes(name: &str, bytes: &[u8]) -> ParseResult<Table> {
    match FileKind::from_name(name)? {
        FileKind::Csv => parse_csv_bytes(bytes),
        FileKind::Xlsx => parse_xlsx_bytes(bytes),
    }
}

// =============================================================================
// CSV
// =============================================================================

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let (charset, _, _) = chardet::detect(bytes);

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the detected encoding.
///
/// Unknown encodings fall back to lossy UTF-8 so a decodable file never
/// fails outright on its encoding.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::ISO_8859_15.decode(bytes).0.to_string(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.to_string(),
        _ => String::from_utf8_lossy(bytes).to_string(),
    }
}

/// Parse CSV bytes with encoding auto-detection.
pub fn parse_csv_bytes(bytes: &[u8]) -> ParseResult<Table> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    parse_csv_str(&content)
}

/// Parse decoded CSV text into a table.
///
/// The first record is the header row. Empty fields become missing cells,
/// fields that parse as finite numbers become numeric cells, everything
/// else stays text. Rows shorter than the header are padded with missing
/// cells; extra trailing fields are ignored.
pub fn parse_csv_str(content: &str) -> ParseResult<Table> {
    if content.trim().is_empty() {
        return Err(ParseError::EmptyFile);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());
    let mut records = reader.records();

    let header = records.next().ok_or(ParseError::EmptyFile)??;
    let names = dedupe_headers(header.iter().map(|h| h.trim().to_string()));
    if names.is_empty() {
        return Err(ParseError::NoHeaders);
    }

    let mut columns: Vec<Column> = names.into_iter().map(Column::empty).collect();

    for record in records {
        let record = record?;
        for (i, column) in columns.iter_mut().enumerate() {
            column.cells.push(infer_cell(record.get(i).unwrap_or("")));
        }
    }

    Ok(Table::from_columns(columns))
}

/// Classify one CSV field.
fn infer_cell(field: &str) -> Cell {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Cell::Missing;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Cell::Number(n),
        _ => Cell::Text(field.to_string()),
    }
}

/// Make header names unique and non-empty.
///
/// A repeated name gets a positional suffix (`name`, `name.1`, `name.2`),
/// an empty header cell gets a positional name.
fn dedupe_headers<I: IntoIterator<Item = String>>(names: I) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    names
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            let base = if raw.is_empty() {
                format!("column_{}", i + 1)
            } else {
                raw
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{}.{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}

// =============================================================================
// XLSX
// =============================================================================

/// Parse XLSX bytes into a table.
///
/// Reads the first worksheet only. Typed cells map directly: floats and
/// integers become numbers, empty cells become missing, strings stay text,
/// booleans and date/duration values keep their text rendering.
pub fn parse_xlsx_bytes(bytes: &[u8]) -> ParseResult<Table> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ParseError::NoSheets)??;

    let mut rows = range.rows();
    let header = rows.next().ok_or(ParseError::NoHeaders)?;
    let names = dedupe_headers(header.iter().map(|d| d.to_string().trim().to_string()));
    if names.is_empty() {
        return Err(ParseError::NoHeaders);
    }

    let mut columns: Vec<Column> = names.into_iter().map(Column::empty).collect();

    for row in rows {
        for (i, column) in columns.iter_mut().enumerate() {
            column.cells.push(convert_cell(row.get(i)));
        }
    }

    Ok(Table::from_columns(columns))
}

/// Map one spreadsheet cell to our cell model.
fn convert_cell(data: Option<&Data>) -> Cell {
    match data {
        None | Some(Data::Empty) => Cell::Missing,
        Some(Data::Float(f)) if f.is_finite() => Cell::Number(*f),
        Some(Data::Float(_)) => Cell::Missing,
        Some(Data::Int(i)) => Cell::Number(*i as f64),
        Some(Data::String(s)) => Cell::Text(s.clone()),
        Some(Data::Bool(b)) => Cell::Text(b.to_string()),
        Some(d @ Data::DateTime(_)) => Cell::Text(d.to_string()),
        Some(Data::DateTimeIso(s)) | Some(Data::DurationIso(s)) => Cell::Text(s.clone()),
        Some(Data::Error(_)) => Cell::Missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kind_dispatch() {
        assert_eq!(FileKind::from_name("data.csv").unwrap(), FileKind::Csv);
        assert_eq!(FileKind::from_name("DATA.XLSX").unwrap(), FileKind::Xlsx);

        let err = FileKind::from_name("data.txt").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnsupportedFormat { ref extension } if extension == "txt"
        ));

        assert!(FileKind::from_name("noextension").is_err());
    }

    #[test]
    fn test_simple_csv() {
        let table = parse_csv_str("name,age\nAlice,30\nBob,25").unwrap();

        assert_eq!(table.column_names(), vec!["name", "age"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.row(0)[0], Cell::Text("Alice".into()));
        assert_eq!(table.row(0)[1], Cell::Number(30.0));
    }

    #[test]
    fn test_missing_and_type_inference() {
        let table = parse_csv_str("a,b,c\n1,,3\n1,5,3").unwrap();

        assert_eq!(table.row(0)[1], Cell::Missing);
        assert_eq!(table.row(1)[1], Cell::Number(5.0));
        assert!(table.column("b").unwrap().is_numeric());

        // Mixed column stays text-typed per cell
        let table = parse_csv_str("x\n1\nhello").unwrap();
        assert!(!table.column("x").unwrap().is_numeric());
    }

    #[test]
    fn test_short_rows_padded() {
        let table = parse_csv_str("a,b,c\n1,2").unwrap();
        assert_eq!(table.row(0)[2], Cell::Missing);
    }

    #[test]
    fn test_quoted_fields() {
        let table = parse_csv_str("name,note\n\"Smith, Jane\",\"says \"\"hi\"\"\"").unwrap();
        assert_eq!(table.row(0)[0], Cell::Text("Smith, Jane".into()));
        assert_eq!(table.row(0)[1], Cell::Text("says \"hi\"".into()));
    }

    #[test]
    fn test_duplicate_and_empty_headers() {
        let table = parse_csv_str("a,a,,a\n1,2,3,4").unwrap();
        assert_eq!(table.column_names(), vec!["a", "a.1", "column_3", "a.2"]);
    }

    #[test]
    fn test_empty_csv_error() {
        assert!(matches!(parse_csv_str(""), Err(ParseError::EmptyFile)));
        assert!(matches!(parse_csv_str("  \n "), Err(ParseError::EmptyFile)));
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert!(decoded.starts_with("Soci"));
    }

    #[test]
    fn test_garbage_xlsx_is_parse_error() {
        let err = parse_xlsx_bytes(b"this is not a zip archive").unwrap_err();
        assert!(matches!(err, ParseError::Xlsx(_)));
    }

    #[test]
    fn test_xlsx_dispatch_on_garbage_names_format() {
        let err = parse_bytes("book.xlsx", b"garbage").unwrap_err();
        assert!(err.to_string().contains("XLSX"));
    }
}
