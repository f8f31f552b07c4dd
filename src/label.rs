//! Label index: name to position lookups for columns and rows

use indexmap::IndexMap;

use crate::params::LabelParams;

/// A key that can be used to address a row or column
///
/// Only `usize` converts to an index, so integer literals need a suffix:
/// `doc.get_cell::<i32>(0usize, 1usize)`. Plain names work as `&str` or `String`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Access by logical (label-relative) index
    Index(usize),
    /// Access by label name
    Name(String),
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<&String> for Key {
    fn from(name: &String) -> Self {
        Key::Name(name.clone())
    }
}

/// Column and row label maps, keyed by label text, holding physical indices
///
/// Duplicate labels resolve to the last occurrence.
#[derive(Debug, Clone, Default)]
pub struct LabelIndex {
    columns: IndexMap<String, usize>,
    rows: IndexMap<String, usize>,
}

impl LabelIndex {
    /// Build both maps by scanning the label row and the label column
    ///
    /// # Arguments
    /// - `data` - The matrix
    /// - `labels` - Which row and column hold labels
    pub fn build(data: &[Vec<String>], labels: &LabelParams) -> Self {
        let mut index = Self::default();

        if let Some(label_row) = labels.column_label_row().and_then(|r| data.get(r)) {
            for (i, name) in label_row.iter().enumerate() {
                index.columns.insert(name.clone(), i);
            }
        }

        if let Some(label_col) = labels.row_label_column() {
            if data.len() > labels.data_row_offset() {
                for (i, row) in data.iter().enumerate() {
                    if let Some(name) = row.get(label_col) {
                        index.rows.insert(name.clone(), i);
                    }
                }
            }
        }

        index
    }

    /// Physical column index of a column label
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.get(name).copied()
    }

    /// Physical row index of a row label
    pub fn row(&self, name: &str) -> Option<usize> {
        self.rows.get(name).copied()
    }

    /// Number of distinct column labels
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of distinct row labels
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_build_both() {
        let data = matrix(&[&["", "x", "y"], &["r1", "1", "2"], &["r2", "3", "4"]]);
        let index = LabelIndex::build(&data, &LabelParams::both());

        assert_eq!(index.column("y"), Some(2));
        assert_eq!(index.row("r2"), Some(2));
        assert_eq!(index.column("missing"), None);
        assert_eq!(index.row("missing"), None);
    }

    #[test]
    fn test_duplicates_last_wins() {
        let data = matrix(&[&["a", "b", "a"]]);
        let index = LabelIndex::build(&data, &LabelParams::default());
        assert_eq!(index.column("a"), Some(2));
        assert_eq!(index.num_columns(), 2);
    }

    #[test]
    fn test_disabled_or_missing() {
        let data = matrix(&[&["a", "b"]]);
        let index = LabelIndex::build(&data, &LabelParams::none());
        assert_eq!(index.num_columns(), 0);
        assert_eq!(index.num_rows(), 0);

        // Label row beyond the data
        let index = LabelIndex::build(&data, &LabelParams::new(3, -1));
        assert_eq!(index.num_columns(), 0);

        // Only the label row exists, so no row labels are collected
        let index = LabelIndex::build(&data, &LabelParams::both());
        assert_eq!(index.num_columns(), 2);
        assert_eq!(index.num_rows(), 0);
    }

    #[test]
    fn test_key_from() {
        assert_eq!(Key::from(3), Key::Index(3));
        assert_eq!(Key::from("a"), Key::Name("a".to_string()));
    }
}
