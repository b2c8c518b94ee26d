//! Table projections of a [`NestedMap`].
//!
//! Unlike the array projections these never fail: a hierarchy that is not
//! rectangular simply leaves cells missing.

use tracing::debug;

use crate::{Key, NestedMap, Node, Scalar, Table, TableOptions, table::column_name};

impl NestedMap {
    /// One row per leaf.
    ///
    /// Columns `level_0 ..` hold the key at each depth (missing below a
    /// shallow leaf) and the value column holds the leaf. Rows are indexed
    /// `0..n` in depth-first order.
    pub fn to_long_table(&self, options: &TableOptions) -> Table {
        let leaves = self.leaves();
        let depth = leaves.iter().map(|(path, _)| path.len()).max().unwrap_or(0);

        let mut table = Table::new([crate::DEFAULT_INDEX]);
        for level in 0..depth {
            table.add_column(&options.level_name(level));
        }
        let value_at = table.add_column(&options.value_column);

        for (row, (path, value)) in leaves.into_iter().enumerate() {
            let cells = table.insert_row(vec![Key::from(row)]);
            for (level, key) in path.into_iter().enumerate() {
                cells[level] = Some(Scalar::from(key));
            }
            cells[value_at] = Some(value.clone());
        }
        debug!(rows = table.len(), depth, "built long table");
        table
    }

    /// The long table pivoted into wide form.
    ///
    /// The first `index_levels` keys of a leaf's path form its row key; the
    /// remaining keys, joined with the separator, name its column. A leaf
    /// with no remaining keys lands in the value column. Leaves shallower
    /// than `index_levels` are left out.
    ///
    /// # Example
    ///
    /// ```
    /// use nested_dict::{NestedMap, Scalar, TableOptions};
    ///
    /// let mut map = NestedMap::new();
    /// map.at("c").at("d").at("x").set(1);
    /// map.at("c").at("e").at("y").set(2);
    ///
    /// let table = map.to_table(&TableOptions::default());
    /// assert_eq!(table.columns().collect::<Vec<_>>(), vec!["d_x", "e_y"]);
    /// assert_eq!(table.get(&["c"], "e_y"), Some(&Scalar::Int(2)));
    /// ```
    pub fn to_table(&self, options: &TableOptions) -> Table {
        let levels = options.index_levels.max(1);
        let mut table = Table::new((0..levels).map(|level| options.level_name(level)));
        let mut dropped = 0usize;
        self.visit_leaves(&mut Vec::new(), &mut |path, value| {
            if path.len() < levels {
                dropped += 1;
                return;
            }
            let (index, rest) = path.split_at(levels);
            let column = column_name(rest, &options.separator, &options.value_column);
            let row = index.iter().map(|key| (*key).clone()).collect();
            table.set(row, &column, Some(value.clone()));
        });
        if dropped > 0 {
            debug!(dropped, levels, "leaves above the index levels left out of table");
        }
        table
    }

    /// One row per top-level key, with every subtree flattened into
    /// separator-joined column names.
    ///
    /// A top-level leaf fills only the value column of its row; an empty
    /// top-level branch gives a row of missing cells.
    pub fn to_wide_table(&self, options: &TableOptions) -> Table {
        let mut table = Table::new([options.level_name(0)]);
        for (key, node) in self {
            let row = vec![key.clone()];
            match node {
                Node::Leaf(value) => {
                    table.set(row, &options.value_column, Some(value.clone()));
                }
                Node::Branch(child) => {
                    table.insert_row(row.clone());
                    child.visit_leaves(&mut Vec::new(), &mut |path, value| {
                        let column =
                            column_name(path, &options.separator, &options.value_column);
                        table.set(row.clone(), &column, Some(value.clone()));
                    });
                }
            }
        }
        table
    }
}
