//! In-memory tabular dataset
//!
//! Named columns over JSON cells. Serializes as an array of records, the
//! layout the surrounding pipeline exchanges.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::IdentityError;

/// One row as a column → cell map
pub type Record = Map<String, Value>;

/// Tabular dataset with named columns
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Record>", into = "Vec<Record>")]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Empty dataset with the given columns
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Single-column dataset
    pub fn from_column<I, V>(name: &str, cells: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            columns: vec![name.to_string()],
            rows: cells.into_iter().map(|cell| vec![cell.into()]).collect(),
        }
    }

    /// Build from records
    ///
    /// Columns appear in first-seen order; cells a record lacks are `null`.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut dataset = Self::default();
        for record in records {
            dataset.push_record(record);
        }
        dataset
    }

    /// Append a record, widening the schema if it brings new columns
    pub fn push_record(&mut self, mut record: Record) {
        for name in record.keys() {
            if !self.columns.iter().any(|c| c == name) {
                self.columns.push(name.clone());
                for row in &mut self.rows {
                    row.push(Value::Null);
                }
            }
        }

        let row = self
            .columns
            .iter()
            .map(|c| record.remove(c).unwrap_or(Value::Null))
            .collect();
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Index of a column that must exist
    ///
    /// `role` names the dataset in the error (e.g. "existing registry").
    pub fn require_column(&self, name: &str, role: &str) -> Result<usize, IdentityError> {
        self.column_index(name)
            .ok_or_else(|| IdentityError::MissingColumn {
                column: name.to_string(),
                dataset: role.to_string(),
                present: self.columns.clone(),
            })
    }

    /// Cells of one column, in row order
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().map(move |row| &row[index])
    }

    /// Cells of a named column, if present
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        self.column_index(name)
            .map(|index| self.column_values(index).collect())
    }

    /// Copy with `name` set to `values`, appended if new
    ///
    /// `values` must hold one cell per row.
    pub fn with_column(&self, name: &str, values: Vec<Value>) -> Self {
        debug_assert_eq!(values.len(), self.rows.len());
        let mut out = self.clone();
        match out.column_index(name) {
            Some(index) => {
                for (row, value) in out.rows.iter_mut().zip(values) {
                    row[index] = value;
                }
            }
            None => {
                out.columns.push(name.to_string());
                for (row, value) in out.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        out
    }

    /// Rows as records
    pub fn to_records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::from_records(records)
    }
}

impl From<Dataset> for Vec<Record> {
    fn from(dataset: Dataset) -> Self {
        dataset.to_records()
    }
}
