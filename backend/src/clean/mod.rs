//! Canned cleaning operations and column selection.
//!
//! These are the three table transforms the UI exposes:
//!
//! - [`remove_duplicates`] - drop rows identical to an earlier row
//! - [`fill_missing_numeric`] - mean-impute missing values per numeric column
//! - [`select_columns`] - project the table to a requested column list

use std::collections::HashSet;

use crate::error::{CleanError, CleanResult};
use crate::table::{Cell, Column, Table};

/// Remove rows that are exact duplicates of an earlier row, comparing all
/// columns and keeping the first occurrence. Returns the number of rows
/// removed. Idempotent.
pub fn remove_duplicates(table: &mut Table) -> usize {
    let mut seen: HashSet<Vec<Cell>> = HashSet::new();
    let keep: Vec<bool> = (0..table.row_count())
        .map(|i| seen.insert(table.row(i)))
        .collect();

    let removed = keep.iter().filter(|k| !**k).count();
    if removed > 0 {
        table.retain_rows(&keep);
    }
    removed
}

/// Replace missing entries in every numeric column with that column's mean,
/// computed independently per column over its non-missing values. Returns
/// the number of cells filled.
///
/// Non-numeric columns are untouched. A numeric column with zero
/// non-missing values has no mean and is left unchanged.
pub fn fill_missing_numeric(table: &mut Table) -> usize {
    let mut filled = 0;
    for column in table.columns_mut() {
        if !column.is_numeric() {
            continue;
        }
        let Some(mean) = column.mean() else {
            continue;
        };
        for cell in &mut column.cells {
            if cell.is_missing() {
                *cell = Cell::Number(mean);
                filled += 1;
            }
        }
    }
    filled
}

/// Project the table to exactly the requested column names, in the order
/// given. Duplicate names in the request duplicate the column; a name not
/// present in the table is an error.
pub fn select_columns(table: &Table, names: &[String]) -> CleanResult<Table> {
    let columns = names
        .iter()
        .map(|name| {
            table
                .column(name)
                .cloned()
                .ok_or_else(|| CleanError::UnknownColumn(name.clone()))
        })
        .collect::<CleanResult<Vec<Column>>>()?;

    Ok(Table::from_columns(columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_csv_str;

    #[test]
    fn test_remove_duplicates_keeps_first() {
        let mut table = parse_csv_str("a,b\n1,x\n2,y\n1,x\n2,z").unwrap();
        let removed = remove_duplicates(&mut table);

        assert_eq!(removed, 1);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.row(0)[1], Cell::Text("x".into()));
        assert_eq!(table.row(2)[1], Cell::Text("z".into()));
    }

    #[test]
    fn test_remove_duplicates_is_idempotent() {
        let mut table = parse_csv_str("a\n1\n1\n2\n1").unwrap();
        remove_duplicates(&mut table);
        let once = table.clone();

        assert_eq!(remove_duplicates(&mut table), 0);
        assert_eq!(table, once);
    }

    #[test]
    fn test_duplicate_rows_with_missing_cells_match() {
        let mut table = parse_csv_str("a,b\n1,\n1,\n1,2").unwrap();
        assert_eq!(remove_duplicates(&mut table), 1);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_fill_missing_uses_column_mean() {
        // Mean of the single present value in column b is 5.0
        let mut table = parse_csv_str("a,b,c\n1,,3\n1,5,3").unwrap();
        let filled = fill_missing_numeric(&mut table);

        assert_eq!(filled, 1);
        assert_eq!(table.row(0)[1], Cell::Number(5.0));
        // Present values unchanged
        assert_eq!(table.row(1)[1], Cell::Number(5.0));
        assert_eq!(table.row(0)[0], Cell::Number(1.0));
    }

    #[test]
    fn test_fill_missing_leaves_text_columns_alone() {
        let mut table = parse_csv_str("name,v\nAlice,1\n,2").unwrap();
        fill_missing_numeric(&mut table);

        // The name column mixes text and missing, so it is not numeric
        assert_eq!(table.row(1)[0], Cell::Missing);
    }

    #[test]
    fn test_fill_missing_all_missing_column_unchanged() {
        let mut table = parse_csv_str("a,b\n1,\n2,").unwrap();
        let filled = fill_missing_numeric(&mut table);

        assert_eq!(filled, 0);
        assert_eq!(table.row(0)[1], Cell::Missing);
        assert_eq!(table.row(1)[1], Cell::Missing);
    }

    #[test]
    fn test_fill_then_no_missing_left() {
        let mut table = parse_csv_str("v,w\n2,x\n,y\n4,z").unwrap();
        fill_missing_numeric(&mut table);
        assert!(table.column("v").unwrap().cells.iter().all(|c| !c.is_missing()));
        assert_eq!(table.row(1)[0], Cell::Number(3.0));
    }

    #[test]
    fn test_select_all_columns_is_identity() {
        let table = parse_csv_str("a,b,c\n1,2,3\n4,5,6").unwrap();
        let selected = select_columns(&table, &table.column_names()).unwrap();
        assert_eq!(selected, table);
    }

    #[test]
    fn test_select_reorders_and_duplicates() {
        let table = parse_csv_str("a,b\n1,2").unwrap();
        let selected =
            select_columns(&table, &["b".into(), "a".into(), "b".into()]).unwrap();

        assert_eq!(selected.column_names(), vec!["b", "a", "b"]);
        assert_eq!(selected.row(0), vec![
            Cell::Number(2.0),
            Cell::Number(1.0),
            Cell::Number(2.0),
        ]);
    }

    #[test]
    fn test_select_unknown_column_fails() {
        let table = parse_csv_str("a\n1").unwrap();
        let err = select_columns(&table, &["nope".into()]).unwrap_err();
        assert!(matches!(err, CleanError::UnknownColumn(ref name) if name == "nope"));
    }
}
