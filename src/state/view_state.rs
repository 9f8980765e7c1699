//! The view-state value and its sub-states
//!
//! A `ViewState` is an immutable snapshot: transitions take the current value
//! and return the next one. The host keeps the single authoritative copy.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::config::TableConfig;
use crate::data::column::ColumnModel;
use crate::engine::ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    None,
    Asc,
    Desc,
}

impl SortDirection {
    /// Next step of the NONE -> ASC -> DESC -> NONE cycle
    pub fn next(self) -> Self {
        match self {
            SortDirection::None => SortDirection::Asc,
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::None,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::None => "",
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sort {
    pub column_id: Option<String>,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(column_id: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column_id: Some(column_id.into()),
            direction,
        }
    }

    /// `direction == NONE` counts as no sort regardless of the column
    pub fn is_active(&self) -> bool {
        self.column_id.is_some() && self.direction != SortDirection::None
    }

    /// Active sort column, if any
    pub fn active_column(&self) -> Option<&str> {
        if self.is_active() {
            self.column_id.as_deref()
        } else {
            None
        }
    }

    /// Direction shown on the header of `column_id`
    pub fn direction_for(&self, column_id: &str) -> SortDirection {
        match self.column_id.as_deref() {
            Some(id) if id == column_id => self.direction,
            _ => SortDirection::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub column_id: String,
    pub value: String,
}

impl Filter {
    pub fn new(column_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based
    pub page: usize,
    pub page_size: usize,
    pub page_sizes: Vec<usize>,
    pub total_items: usize,
}

impl Pagination {
    pub fn new(page_size: usize, page_sizes: Vec<usize>) -> Self {
        Self {
            page: 1,
            page_size,
            page_sizes,
            total_items: 0,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(10, vec![10, 20, 30])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub selected_ids: BTreeSet<String>,
    pub is_select_all_selected: bool,
    pub is_select_all_indeterminate: bool,
}

impl Selection {
    pub fn is_selected(&self, row_id: &str) -> bool {
        self.selected_ids.contains(row_id)
    }

    pub fn len(&self) -> usize {
        self.selected_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_ids.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderingEntry {
    pub column_id: String,
    #[serde(default)]
    pub is_hidden: bool,
}

impl OrderingEntry {
    pub fn new(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            is_hidden: false,
        }
    }

    pub fn hidden(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            is_hidden: true,
        }
    }
}

/// Which secondary header row is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveBar {
    #[default]
    None,
    Filter,
    Column,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub pagination: Pagination,
    pub sort: Sort,
    pub filters: Vec<Filter>,
    pub selection: Selection,
    pub ordering: Vec<OrderingEntry>,
    pub active_bar: ActiveBar,
    #[serde(default)]
    pub expanded_ids: BTreeSet<String>,
}

impl ViewState {
    /// Initial state for a column set: every column shown in declaration
    /// order, first page, nothing sorted, filtered or selected
    pub fn new(columns: &ColumnModel, config: &TableConfig) -> Self {
        Self {
            pagination: Pagination::new(
                config.pagination.page_size,
                config.pagination.page_sizes.clone(),
            ),
            sort: Sort::default(),
            filters: Vec::new(),
            selection: Selection::default(),
            ordering: ordering::default_ordering(columns),
            active_bar: ActiveBar::None,
            expanded_ids: BTreeSet::new(),
        }
    }

    pub fn filter_for(&self, column_id: &str) -> Option<&Filter> {
        self.filters.iter().find(|f| f.column_id == column_id)
    }

    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::column::Column;

    #[test]
    fn test_sort_cycle_steps() {
        assert_eq!(SortDirection::None.next(), SortDirection::Asc);
        assert_eq!(SortDirection::Asc.next(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.next(), SortDirection::None);
    }

    #[test]
    fn test_none_direction_is_inactive() {
        let sort = Sort::new("name", SortDirection::None);
        assert!(!sort.is_active());
        assert_eq!(sort.active_column(), None);
        assert_eq!(Sort::new("name", SortDirection::Desc).active_column(), Some("name"));
        assert_eq!(
            Sort::new("name", SortDirection::Asc).direction_for("age"),
            SortDirection::None
        );
    }

    #[test]
    fn test_initial_state() {
        let columns =
            ColumnModel::new(vec![Column::new("name", "Name"), Column::new("age", "Age")]).unwrap();
        let state = ViewState::new(&columns, &TableConfig::default());
        assert_eq!(state.pagination.page, 1);
        assert_eq!(state.pagination.page_size, 10);
        assert_eq!(
            state.ordering,
            vec![OrderingEntry::new("name"), OrderingEntry::new("age")]
        );
        assert_eq!(state.active_bar, ActiveBar::None);
        assert!(!state.has_filters());
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(Sort::new("age", SortDirection::Desc)).unwrap();
        assert_eq!(json["columnId"], "age");
        assert_eq!(json["direction"], "DESC");
        let bar: ActiveBar = serde_json::from_str("\"column\"").unwrap();
        assert_eq!(bar, ActiveBar::Column);
    }
}
