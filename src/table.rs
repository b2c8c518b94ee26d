use std::fmt::Display;

use indexmap::{IndexMap, IndexSet};

use crate::{AsKey, Error, Key, Result, Scalar, cold_path, join_display};

/// Name of the index of a table built from plain columns.
pub const DEFAULT_INDEX: &str = "index";

/// A labeled two-dimensional table.
///
/// Rows are keyed by a tuple of [`Key`]s, one per index level, and keep
/// their insertion order. Columns are named and ordered. A cell is `None`
/// when it is missing.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    index_names: Vec<String>,
    columns: IndexSet<String>,
    // every row has exactly one cell per column
    rows: IndexMap<Vec<Key>, Vec<Option<Scalar>>>,
}

impl Table {
    /// Creates a table with no rows or columns and the given index levels.
    pub fn new<I, S>(index_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            index_names: index_names.into_iter().map(Into::into).collect(),
            columns: IndexSet::new(),
            rows: IndexMap::new(),
        }
    }

    /// Builds a table from named columns of equal length.
    ///
    /// Rows are indexed `0..n` under a single level named [`DEFAULT_INDEX`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnLengthMismatch`] if a column's length differs
    /// from the first column's.
    pub fn from_columns(columns: IndexMap<String, Vec<Option<Scalar>>>) -> Result<Self> {
        let expected = columns.values().next().map_or(0, Vec::len);
        if let Some((column, cells)) = columns.iter().find(|(_, cells)| cells.len() != expected) {
            cold_path();
            return Err(Error::ColumnLengthMismatch {
                column: column.clone(),
                expected,
                found: cells.len(),
            });
        }

        let mut table = Table::new([DEFAULT_INDEX]);
        for name in columns.keys() {
            table.add_column(name);
        }
        for row in 0..expected {
            let cells = columns.values().map(|cells| cells[row].clone()).collect();
            table.rows.insert(vec![Key::from(row)], cells);
        }
        Ok(table)
    }

    #[inline]
    pub fn index_names(&self) -> &[String] {
        &self.index_names
    }

    /// Row keys in order.
    pub fn index(&self) -> impl Iterator<Item = &[Key]> {
        self.rows.keys().map(Vec::as_slice)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&[Key], &[Option<Scalar>])> {
        self.rows
            .iter()
            .map(|(key, cells)| (key.as_slice(), cells.as_slice()))
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    /// Adds an empty column unless it exists, returning its position.
    pub fn add_column(&mut self, name: &str) -> usize {
        if let Some(position) = self.column_position(name) {
            return position;
        }
        let (position, _) = self.columns.insert_full(name.to_owned());
        for cells in self.rows.values_mut() {
            cells.push(None);
        }
        position
    }

    /// Returns the cells of `row`, adding an empty row if it is missing.
    pub fn insert_row(&mut self, row: Vec<Key>) -> &mut [Option<Scalar>] {
        let width = self.columns.len();
        self.rows.entry(row).or_insert_with(|| vec![None; width])
    }

    /// Writes one cell, adding the row and the column as needed.
    pub fn set(&mut self, row: Vec<Key>, column: &str, value: Option<Scalar>) {
        let position = self.add_column(column);
        self.insert_row(row)[position] = value;
    }

    pub fn row<K: AsKey>(&self, row: &[K]) -> Option<&[Option<Scalar>]> {
        self.rows.get(&row_key(row)).map(Vec::as_slice)
    }

    /// The cell at `row` and `column`; `None` when it is absent or missing.
    pub fn get<K: AsKey>(&self, row: &[K], column: &str) -> Option<&Scalar> {
        let position = self.column_position(column)?;
        self.row(row)?[position].as_ref()
    }

    /// The cells of `column` in row order.
    pub fn column(&self, name: &str) -> Option<Vec<Option<&Scalar>>> {
        let position = self.column_position(name)?;
        Some(
            self.rows
                .values()
                .map(|cells| cells[position].as_ref())
                .collect(),
        )
    }

    /// Reshapes long rows into a wide table.
    ///
    /// Rows of the result are keyed by the `index` columns, in first-seen
    /// order; rows with a missing index cell are dropped. Each result column
    /// is named by joining the present `columns` cells with `separator`, or
    /// is `values` when none is present. Combinations that never occur get
    /// no column. A later row overwrites an earlier one with the same index
    /// and column name.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownColumn`] if a named column does not exist
    /// - [`Error::InvalidKey`] if an index cell is neither a string nor an integer
    pub fn pivot(
        &self,
        index: &[&str],
        columns: &[&str],
        values: &str,
        separator: &str,
    ) -> Result<Table> {
        let index_at = self.positions(index)?;
        let columns_at = self.positions(columns)?;
        let values_at = self.positions(&[values])?[0];

        let mut out = Table::new(index.iter().copied());
        'rows: for cells in self.rows.values() {
            let mut key = Vec::with_capacity(index_at.len());
            for &position in &index_at {
                match &cells[position] {
                    None | Some(Scalar::Null) => continue 'rows,
                    Some(value) => key.push(Key::try_from(value)?),
                }
            }
            let parts = columns_at
                .iter()
                .filter_map(|&position| cells[position].as_ref())
                .filter(|value| !value.is_null());
            let name = column_name(parts, separator, values);
            out.set(key, &name, cells[values_at].clone());
        }
        Ok(out)
    }

    /// Renames every column through `f`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateColumn`] and leaves the table unchanged if
    /// two columns would end up with the same name.
    pub fn rename_columns(&mut self, mut f: impl FnMut(&str) -> String) -> Result<()> {
        let mut renamed = IndexSet::with_capacity(self.columns.len());
        for name in &self.columns {
            let name = f(name);
            if renamed.contains(&name) {
                cold_path();
                return Err(Error::DuplicateColumn(name));
            }
            renamed.insert(name);
        }
        self.columns = renamed;
        Ok(())
    }

    fn positions(&self, names: &[&str]) -> Result<Vec<usize>> {
        names
            .iter()
            .map(|name| {
                self.column_position(name).ok_or_else(|| {
                    cold_path();
                    Error::UnknownColumn((*name).to_owned())
                })
            })
            .collect()
    }
}

fn row_key<K: AsKey>(row: &[K]) -> Vec<Key> {
    row.iter().map(|key| key.as_key().to_key()).collect()
}

/// Joins `parts` into a column name, falling back to `fallback` when there
/// are none.
pub(crate) fn column_name<T: Display>(
    parts: impl IntoIterator<Item = T>,
    separator: &str,
    fallback: &str,
) -> String {
    let mut parts = parts.into_iter().peekable();
    if parts.peek().is_none() {
        return fallback.to_owned();
    }
    join_display(parts, separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long() -> Table {
        let mut columns = IndexMap::new();
        columns.insert(
            "row".to_owned(),
            vec![Some("a".into()), Some("a".into()), Some("b".into()), None],
        );
        columns.insert(
            "col".to_owned(),
            vec![Some("x".into()), Some("y".into()), Some("x".into()), Some("x".into())],
        );
        columns.insert(
            "val".to_owned(),
            vec![Some(1.into()), Some(2.into()), Some(3.into()), Some(4.into())],
        );
        Table::from_columns(columns).unwrap()
    }

    #[test]
    fn from_columns_uses_integer_index() {
        let table = long();
        assert_eq!(table.index_names(), &[DEFAULT_INDEX.to_owned()]);
        assert_eq!(table.len(), 4);
        assert_eq!(table.width(), 3);
        assert_eq!(table.get(&[2], "val"), Some(&Scalar::Int(3)));
        assert_eq!(table.get(&[3], "row"), None);
    }

    #[test]
    fn from_columns_rejects_ragged_columns() {
        let mut columns = IndexMap::new();
        columns.insert("a".to_owned(), vec![None, None]);
        columns.insert("b".to_owned(), vec![None]);
        let err = Table::from_columns(columns).unwrap_err();
        assert!(matches!(
            err,
            Error::ColumnLengthMismatch {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn pivot_skips_rows_without_index() {
        let wide = long().pivot(&["row"], &["col"], "val", "_").unwrap();
        assert_eq!(wide.len(), 2);
        assert_eq!(wide.columns().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(wide.get(&["a"], "y"), Some(&Scalar::Int(2)));
        assert_eq!(wide.get(&["b"], "y"), None);
    }

    #[test]
    fn pivot_unknown_column() {
        let err = long().pivot(&["nope"], &["col"], "val", "_").unwrap_err();
        assert!(matches!(err, Error::UnknownColumn(name) if name == "nope"));
    }

    #[test]
    fn pivot_rejects_float_index() {
        let mut columns = IndexMap::new();
        columns.insert("row".to_owned(), vec![Some(1.5.into())]);
        columns.insert("val".to_owned(), vec![Some(1.into())]);
        let table = Table::from_columns(columns).unwrap();
        let err = table.pivot(&["row"], &[], "val", "_").unwrap_err();
        assert!(matches!(err, Error::InvalidKey(Scalar::Float(_))));
    }

    #[test]
    fn rename_detects_collisions() {
        let mut table = long();
        table.rename_columns(|name| name.to_uppercase()).unwrap();
        assert_eq!(table.columns().collect::<Vec<_>>(), vec!["ROW", "COL", "VAL"]);
        let err = table.rename_columns(|_| "same".to_owned()).unwrap_err();
        assert!(matches!(err, Error::DuplicateColumn(_)));
        assert_eq!(table.width(), 3);
    }

    #[test]
    fn column_name_falls_back() {
        assert_eq!(column_name(Vec::<&str>::new(), "_", "value"), "value");
        assert_eq!(column_name(["a", "b"], ".", "value"), "a.b");
    }
}
