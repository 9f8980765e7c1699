use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::data::value::{DataValue, EMPTY_VALUE};
use crate::error::{Result, ViewError};

/// One record of the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    /// Cell values by column id. Missing keys read as empty.
    #[serde(default)]
    pub values: HashMap<String, DataValue>,
}

impl Row {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            values: HashMap::new(),
        }
    }

    pub fn with_value(mut self, column_id: impl Into<String>, value: impl Into<DataValue>) -> Self {
        self.values.insert(column_id.into(), value.into());
        self
    }

    /// Value for a column, `Null` when the row has no data for it
    pub fn value(&self, column_id: &str) -> &DataValue {
        self.values.get(column_id).unwrap_or(&EMPTY_VALUE)
    }
}

/// The dataset with an id index
#[derive(Debug, Clone, Default)]
pub struct RowModel {
    rows: Vec<Row>,
    index: HashMap<String, usize>,
}

impl RowModel {
    /// Build the model, rejecting duplicate row ids
    pub fn new(rows: Vec<Row>) -> Result<Self> {
        let mut index = HashMap::with_capacity(rows.len());
        for (position, row) in rows.iter().enumerate() {
            if index.insert(row.id.clone(), position).is_some() {
                return Err(ViewError::DuplicateRow {
                    row_id: row.id.clone(),
                });
            }
        }
        Ok(Self { rows, index })
    }

    pub fn get(&self, row_id: &str) -> Option<&Row> {
        self.index.get(row_id).map(|&idx| &self.rows[idx])
    }

    pub fn contains(&self, row_id: &str) -> bool {
        self.index.contains_key(row_id)
    }

    pub fn require(&self, row_id: &str) -> Result<&Row> {
        self.get(row_id).ok_or_else(|| ViewError::invalid_row(row_id))
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
