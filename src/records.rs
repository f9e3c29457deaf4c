//! Row store: parsed spreadsheet records and their column names.
//!
//! A [`Record`] maps column names to optional cell values. Presence is
//! explicit, but an empty string is treated exactly like a missing value:
//! neither is ever rendered.

use indexmap::IndexMap;

/// One row of input data, keyed by column name.
///
/// Keys keep their original case and insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    cells: IndexMap<String, Option<String>>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell value, replacing any previous value for the same column.
    pub fn insert(&mut self, column: impl Into<String>, value: Option<String>) {
        self.cells.insert(column.into(), value);
    }

    /// Builder-style variant of [`Record::insert`] for a present value.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, Some(value.into()));
        self
    }

    /// Value for an exact column name, if present and non-empty.
    pub fn value(&self, column: &str) -> Option<&str> {
        self.cells.get(column).and_then(|v| truthy(v.as_deref()))
    }

    /// First non-empty value whose column name matches case-insensitively.
    pub fn value_ignore_case(&self, column: &str) -> Option<&str> {
        let wanted = column.to_lowercase();
        self.cells
            .iter()
            .filter(|(key, _)| key.to_lowercase() == wanted)
            .find_map(|(_, v)| truthy(v.as_deref()))
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Number of cells, including empty ones.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the record has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, Some(v.into()));
        }
        record
    }
}

fn truthy(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Ordered records plus the ordered column name set.
#[derive(Debug, Clone, Default)]
pub struct RowStore {
    records: Vec<Record>,
    columns: Vec<String>,
}

impl RowStore {
    /// Build a store whose column names come from the first record.
    ///
    /// Only keys holding a non-empty value in that record are columns.
    pub fn new(records: Vec<Record>) -> Self {
        let columns = records
            .first()
            .map(|first| {
                first
                    .columns()
                    .filter(|c| first.value(c).is_some())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Self { records, columns }
    }

    /// Build a store with an explicit column order.
    ///
    /// Duplicate names are dropped, keeping the first occurrence.
    pub fn with_columns(records: Vec<Record>, columns: Vec<String>) -> Self {
        let mut seen = indexmap::IndexSet::new();
        for c in columns {
            seen.insert(c);
        }
        Self {
            records,
            columns: seen.into_iter().collect(),
        }
    }

    /// Records in stored order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Column names in display order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
