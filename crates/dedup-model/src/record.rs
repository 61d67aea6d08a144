//! Records and record sets.
//!
//! A [`Record`] maps column names to optional text values. A [`RecordSet`]
//! owns an ordered column list and guarantees every record carries exactly
//! those columns, with absent values stored as `None`.

use std::collections::BTreeMap;

use crate::field::Field;

/// A single contact row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: BTreeMap<String, Option<String>>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(column, value)` pairs.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let values = pairs
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.map(str::to_string)))
            .collect();
        Self { values }
    }

    /// Value of a column; `None` when the column is null or absent.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).and_then(|value| value.as_deref())
    }

    /// Value of a canonical field; `None` when null or absent.
    pub fn field(&self, field: Field) -> Option<&str> {
        self.get(field.as_str())
    }

    pub fn set(&mut self, column: impl Into<String>, value: Option<String>) {
        self.values.insert(column.into(), value);
    }

    pub fn set_field(&mut self, field: Field, value: Option<String>) {
        self.set(field.as_str(), value);
    }

    /// Whether the column exists on this record (even if null).
    pub fn has_column(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    /// Iterate `(column, value)` pairs in column-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }
}

/// An ordered table of uniformly shaped records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl RecordSet {
    /// Create an empty set with the given column order.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            records: Vec::new(),
        }
    }

    /// Create a set and shape every record to `columns`.
    pub fn with_records(columns: Vec<String>, records: Vec<Record>) -> Self {
        let mut set = Self::new(columns);
        set.records.reserve(records.len());
        for record in records {
            set.push(record);
        }
        set
    }

    /// Empty set over the canonical columns.
    pub fn canonical() -> Self {
        Self::new(Field::ALL.iter().map(|f| f.as_str().to_string()).collect())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Append a record, filling missing columns with null and dropping
    /// columns this set does not carry.
    pub fn push(&mut self, record: Record) {
        let mut shaped = Record::new();
        let mut values = record.values;
        for column in &self.columns {
            let value = values.remove(column).flatten();
            shaped.set(column.clone(), value);
        }
        self.records.push(shaped);
    }

    /// Values of one column, in record order.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = Option<&'a str>> {
        self.records.iter().map(move |record| record.get(column))
    }

    /// New set holding clones of the records `keep` accepts, in order.
    pub fn filter<F>(&self, mut keep: F) -> RecordSet
    where
        F: FnMut(&Record) -> bool,
    {
        RecordSet {
            columns: self.columns.clone(),
            records: self
                .records
                .iter()
                .filter(|record| keep(*record))
                .cloned()
                .collect(),
        }
    }

    /// New set with `map` applied to every record; the result is reshaped to
    /// this set's columns.
    pub fn map_records<F>(&self, map: F) -> RecordSet
    where
        F: FnMut(&Record) -> Record,
    {
        RecordSet::with_records(self.columns.clone(), self.records.iter().map(map).collect())
    }

    /// New set with a constant column added (or overwritten) on every record.
    pub fn with_constant(&self, column: &str, value: &str) -> RecordSet {
        let mut columns = self.columns.clone();
        if !columns.iter().any(|c| c == column) {
            columns.push(column.to_string());
        }
        let records = self
            .records
            .iter()
            .map(|record| {
                let mut record = record.clone();
                record.set(column, Some(value.to_string()));
                record
            })
            .collect();
        RecordSet::with_records(columns, records)
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
