use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::error::{Result, ViewError};

/// One selectable entry of an enumerated column filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub id: String,
    pub text: String,
}

impl FilterOption {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Filter descriptor of a column. A column without one is not filterable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnFilter {
    pub placeholder_text: Option<String>,
    /// When present, filter values must equal one of the option ids
    pub options: Option<Vec<FilterOption>>,
}

impl ColumnFilter {
    pub fn text(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder_text: Some(placeholder.into()),
            options: None,
        }
    }

    pub fn options(options: Vec<FilterOption>) -> Self {
        Self {
            placeholder_text: None,
            options: Some(options),
        }
    }

    pub fn has_options(&self) -> bool {
        self.options.is_some()
    }

    pub fn has_option(&self, id: &str) -> bool {
        self.options
            .as_ref()
            .is_some_and(|options| options.iter().any(|o| o.id == id))
    }
}

/// Static description of a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    pub name: String,
    /// Width hint for the renderer
    #[serde(default)]
    pub size: u16,
    #[serde(default)]
    pub is_sortable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<ColumnFilter>,
}

impl Column {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            size: 0,
            is_sortable: false,
            filter: None,
        }
    }

    pub fn with_size(mut self, size: u16) -> Self {
        self.size = size;
        self
    }

    pub fn sortable(mut self) -> Self {
        self.is_sortable = true;
        self
    }

    pub fn with_filter(mut self, filter: ColumnFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn is_filterable(&self) -> bool {
        self.filter.is_some()
    }
}

/// The column set of a table, indexed by id.
///
/// This is the single place engines ask whether a column exists, is sortable
/// or is filterable.
#[derive(Debug, Clone, Default)]
pub struct ColumnModel {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
}

impl ColumnModel {
    /// Build the model, rejecting duplicate ids
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut index = HashMap::with_capacity(columns.len());
        for (position, column) in columns.iter().enumerate() {
            if index.insert(column.id.clone(), position).is_some() {
                return Err(ViewError::DuplicateColumn {
                    column_id: column.id.clone(),
                });
            }
        }
        debug!(target: "columns", "Column model built with {} columns", columns.len());
        Ok(Self { columns, index })
    }

    pub fn get(&self, column_id: &str) -> Option<&Column> {
        self.index.get(column_id).map(|&idx| &self.columns[idx])
    }

    /// Look up a column, failing with `InvalidColumn` when absent
    pub fn require(&self, column_id: &str) -> Result<&Column> {
        self.get(column_id)
            .ok_or_else(|| ViewError::invalid_column(column_id))
    }

    pub fn contains(&self, column_id: &str) -> bool {
        self.index.contains_key(column_id)
    }

    pub fn is_sortable(&self, column_id: &str) -> bool {
        self.get(column_id).is_some_and(|c| c.is_sortable)
    }

    pub fn is_filterable(&self, column_id: &str) -> bool {
        self.get(column_id).is_some_and(Column::is_filterable)
    }

    /// Column ids in declaration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.id.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.columns.iter()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> ColumnModel {
        ColumnModel::new(vec![
            Column::new("name", "Name").sortable().with_filter(ColumnFilter::text("Filter name")),
            Column::new("age", "Age"),
            Column::new("status", "Status").with_filter(ColumnFilter::options(vec![
                FilterOption::new("ok", "OK"),
                FilterOption::new("down", "Down"),
            ])),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup_flags() {
        let columns = model();
        assert_eq!(columns.len(), 3);
        assert!(columns.is_sortable("name"));
        assert!(!columns.is_sortable("age"));
        assert!(!columns.is_sortable("missing"));
        assert!(columns.is_filterable("status"));
        assert!(!columns.is_filterable("age"));
        assert_eq!(columns.ids().collect::<Vec<_>>(), vec!["name", "age", "status"]);
    }

    #[test]
    fn test_require_unknown_column() {
        let columns = model();
        assert_eq!(
            columns.require("height").unwrap_err(),
            ViewError::invalid_column("height")
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = ColumnModel::new(vec![Column::new("a", "A"), Column::new("a", "Again")])
            .unwrap_err();
        assert_eq!(
            err,
            ViewError::DuplicateColumn {
                column_id: "a".to_string()
            }
        );
    }

    #[test]
    fn test_option_membership() {
        let columns = model();
        let filter = columns.get("status").and_then(|c| c.filter.as_ref()).unwrap();
        assert!(filter.has_options());
        assert!(filter.has_option("ok"));
        assert!(!filter.has_option("OK"));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let column: Column = serde_json::from_str(
            r#"{"id":"name","name":"Name","size":120,"isSortable":true,
                "filter":{"placeholderText":"Search"}}"#,
        )
        .unwrap();
        assert!(column.is_sortable);
        assert_eq!(column.size, 120);
        assert_eq!(
            column.filter.unwrap().placeholder_text.as_deref(),
            Some("Search")
        );
    }
}
