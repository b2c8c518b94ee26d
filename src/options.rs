/// Naming and layout of the table projections.
///
/// # Example
///
/// ```
/// use nested_dict::TableOptions;
///
/// let options = TableOptions::default().with_separator(".").with_index_levels(2);
/// assert_eq!(options.level_name(1), "level_1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableOptions {
    /// Joins the keys of nested levels into one column name.
    pub separator: String,
    /// How many leading levels form the row index of [`NestedMap::to_table`].
    ///
    /// [`NestedMap::to_table`]: crate::NestedMap::to_table
    pub index_levels: usize,
    /// Name of the column holding leaf values.
    pub value_column: String,
    /// Prefix of the per-level key columns (`level_0`, `level_1`, ...).
    pub level_prefix: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            separator: "_".to_owned(),
            index_levels: 1,
            value_column: "value".to_owned(),
            level_prefix: "level_".to_owned(),
        }
    }
}

impl TableOptions {
    #[inline]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Sets the number of index levels. At least one level is always used.
    #[inline]
    pub fn with_index_levels(mut self, index_levels: usize) -> Self {
        self.index_levels = index_levels.max(1);
        self
    }

    #[inline]
    pub fn with_value_column(mut self, value_column: impl Into<String>) -> Self {
        self.value_column = value_column.into();
        self
    }

    #[inline]
    pub fn with_level_prefix(mut self, level_prefix: impl Into<String>) -> Self {
        self.level_prefix = level_prefix.into();
        self
    }

    /// Name of the key column for `level`.
    #[inline]
    pub fn level_name(&self, level: usize) -> String {
        format!("{}{level}", self.level_prefix)
    }
}
