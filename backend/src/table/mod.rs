//! In-memory columnar table model.
//!
//! A [`Table`] is an ordered collection of named [`Column`]s, each holding an
//! equally long sequence of [`Cell`]s. Tables are produced by the parser,
//! mutated by the cleaning operations and consumed by the exporters. They
//! live for one pipeline run and are never persisted.

use std::hash::{Hash, Hasher};

/// A single scalar value in a table.
///
/// Numbers are always finite; non-finite parses are kept as text by the
/// parser, so bitwise equality below is well defined.
#[derive(Debug, Clone)]
pub enum Cell {
    /// A finite floating-point number.
    Number(f64),
    /// Free-form text (may be empty, which is distinct from [`Cell::Missing`]).
    Text(String),
    /// No recorded value.
    Missing,
}

impl Cell {
    /// Numeric value, if this cell holds one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// True for [`Cell::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Display form, `None` for missing cells.
    ///
    /// Numbers render in shortest round-trip form (`1` rather than `1.0`).
    pub fn display(&self) -> Option<String> {
        match self {
            Cell::Number(n) => Some(format!("{}", n)),
            Cell::Text(s) => Some(s.clone()),
            Cell::Missing => None,
        }
    }

    /// Field form for delimited output: missing cells become the empty field.
    pub fn to_field(&self) -> String {
        self.display().unwrap_or_default()
    }
}

// Bitwise number comparison keeps PartialEq, Eq and Hash consistent with
// each other; cells never hold NaN so reflexivity holds.
impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Cell::Number(a), Cell::Number(b)) => a.to_bits() == b.to_bits(),
            (Cell::Text(a), Cell::Text(b)) => a == b,
            (Cell::Missing, Cell::Missing) => true,
            _ => false,
        }
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Cell::Number(n) => {
                state.write_u8(0);
                state.write_u64(n.to_bits());
            }
            Cell::Text(s) => {
                state.write_u8(1);
                s.hash(state);
            }
            Cell::Missing => state.write_u8(2),
        }
    }
}

/// A named column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name from the header row.
    pub name: String,
    /// Cell values, one per table row.
    pub cells: Vec<Cell>,
}

impl Column {
    /// Create an empty column with the given name.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: Vec::new(),
        }
    }

    /// Create a column from a name and cells.
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// A column is numeric when every cell is a number or missing.
    ///
    /// An all-missing column counts as numeric, mirroring how the upstream
    /// dataframe library types a column of only null values.
    pub fn is_numeric(&self) -> bool {
        self.cells
            .iter()
            .all(|c| matches!(c, Cell::Number(_) | Cell::Missing))
    }

    /// Arithmetic mean of the non-missing numeric values.
    ///
    /// `None` when the column has no numeric values to average.
    pub fn mean(&self) -> Option<f64> {
        let values: Vec<f64> = self.cells.iter().filter_map(Cell::as_number).collect();
        if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        }
    }
}

/// An in-memory table: ordered named columns of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table from columns.
    ///
    /// All columns must have the same length; parsers and cleaning
    /// operations uphold this invariant.
    pub fn from_columns(columns: Vec<Column>) -> Self {
        debug_assert!(
            columns.windows(2).all(|w| w[0].cells.len() == w[1].cells.len()),
            "columns must have equal length"
        );
        Self { columns }
    }

    /// Columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Mutable access for in-place cleaning.
    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Find a column by name (first match).
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.cells.len()).unwrap_or(0)
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// One row as an owned cell vector.
    pub fn row(&self, index: usize) -> Vec<Cell> {
        self.columns
            .iter()
            .map(|c| c.cells[index].clone())
            .collect()
    }

    /// Keep only the rows whose flag is `true`. `keep` must have one entry
    /// per row.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        for column in &mut self.columns {
            let mut flags = keep.iter();
            column.cells.retain(|_| *flags.next().unwrap_or(&true));
        }
    }

    /// First `n` rows, for previews.
    pub fn head(&self, n: usize) -> Vec<Vec<Cell>> {
        (0..self.row_count().min(n)).map(|i| self.row(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_columns(vec![
            Column::new(
                "name",
                vec![Cell::Text("Alice".into()), Cell::Text("Bob".into())],
            ),
            Column::new("age", vec![Cell::Number(30.0), Cell::Missing]),
        ])
    }

    #[test]
    fn test_cell_equality_is_bitwise_for_numbers() {
        assert_eq!(Cell::Number(1.0), Cell::Number(1.0));
        assert_ne!(Cell::Number(1.0), Cell::Number(2.0));
        assert_ne!(Cell::Number(0.0), Cell::Text("0".into()));
        assert_eq!(Cell::Missing, Cell::Missing);
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Number(1.0).display().as_deref(), Some("1"));
        assert_eq!(Cell::Number(1.5).display().as_deref(), Some("1.5"));
        assert_eq!(Cell::Text("x".into()).display().as_deref(), Some("x"));
        assert_eq!(Cell::Missing.display(), None);
        assert_eq!(Cell::Missing.to_field(), "");
    }

    #[test]
    fn test_numeric_column_detection() {
        let table = sample();
        assert!(!table.column("name").unwrap().is_numeric());
        assert!(table.column("age").unwrap().is_numeric());

        // All-missing columns are numeric with no mean.
        let blank = Column::new("blank", vec![Cell::Missing, Cell::Missing]);
        assert!(blank.is_numeric());
        assert_eq!(blank.mean(), None);
    }

    #[test]
    fn test_mean_ignores_missing() {
        let col = Column::new(
            "v",
            vec![Cell::Number(2.0), Cell::Missing, Cell::Number(4.0)],
        );
        assert_eq!(col.mean(), Some(3.0));
    }

    #[test]
    fn test_row_and_head() {
        let table = sample();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.row(0)[0], Cell::Text("Alice".into()));
        assert_eq!(table.head(1).len(), 1);
        assert_eq!(table.head(10).len(), 2);
    }

    #[test]
    fn test_retain_rows() {
        let mut table = sample();
        table.retain_rows(&[false, true]);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.row(0)[0], Cell::Text("Bob".into()));
    }
}
