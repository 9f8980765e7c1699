//! Projection of (rows, columns, view state) into what the renderer shows
//!
//! Stages run in a fixed order: filter, sort (local mode only), paginate,
//! then column projection. Pagination always works on the post-filter count.

use std::collections::BTreeSet;
use tracing::debug;

use crate::config::{SortMode, TableConfig, TableOptions};
use crate::data::column::{Column, ColumnModel, FilterOption};
use crate::data::row::Row;
use crate::data::value::DataValue;
use crate::engine::filter::FilterEngine;
use crate::engine::{ordering, pagination, selection, sort};
use crate::error::{Result, ViewError};
use crate::state::view_state::{ActiveBar, Pagination, Selection, Sort, SortDirection, ViewState};

/// Header of one visible column
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell<'a> {
    pub column: &'a Column,
    pub is_sort_header: bool,
    /// `None` unless this is the sort header
    pub sort_direction: SortDirection,
}

/// One cell of the filter entry row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCell<'a> {
    pub column_id: &'a str,
    pub is_filterable: bool,
    pub placeholder_text: Option<&'a str>,
    pub options: &'a [FilterOption],
    /// Currently applied value, if any
    pub value: Option<&'a str>,
}

/// One entry of the column chooser row, hidden columns included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnChooserEntry<'a> {
    pub column_id: &'a str,
    pub name: &'a str,
    pub is_hidden: bool,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarState {
    pub active_bar: ActiveBar,
    pub show_clear_all_filters: bool,
    pub show_filter_toggle: bool,
    pub selected_count: usize,
    pub show_batch_actions: bool,
}

/// Per-row rendering state
#[derive(Debug, Clone, PartialEq)]
pub struct RowView<'a> {
    pub row: &'a Row,
    pub is_selected: bool,
    pub is_expanded: bool,
    /// Cell values in visible column order
    pub cells: Vec<&'a DataValue>,
}

#[derive(Debug, Clone)]
pub struct Projection<'a> {
    /// Non-hidden columns in display order
    pub visible_columns: Vec<&'a Column>,
    /// Rows of the current page
    pub visible_rows: Vec<&'a Row>,
    /// Row count after filtering, before pagination
    pub total_filtered_count: usize,
    /// Row count of the dataset
    pub total_count: usize,
    /// Effective pagination (total set, page clamped); `None` when disabled
    pub pagination: Option<Pagination>,
    pub header: Vec<HeaderCell<'a>>,
    /// Selection with aggregate flags for the visible rows; `None` when
    /// row selection is disabled
    pub selection: Option<Selection>,
    pub filter_row: Option<Vec<FilterCell<'a>>>,
    pub column_chooser: Option<Vec<ColumnChooserEntry<'a>>>,
    pub toolbar: ToolbarState,
    /// Filter entries skipped as malformed
    pub ignored_filters: Vec<ViewError>,
    pub sort: Sort,
    options: TableOptions,
    expanded_ids: &'a BTreeSet<String>,
}

impl<'a> Projection<'a> {
    pub fn visible_row_ids(&self) -> Vec<&'a str> {
        self.visible_rows.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn is_selected(&self, row_id: &str) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|s| s.is_selected(row_id))
    }

    pub fn is_expanded(&self, row_id: &str) -> bool {
        self.options.has_row_expansion && self.expanded_ids.contains(row_id)
    }

    /// Cells of a row in visible column order
    pub fn cells(&self, row: &'a Row) -> Vec<&'a DataValue> {
        self.visible_columns
            .iter()
            .map(|column| row.value(&column.id))
            .collect()
    }

    pub fn row_views(&self) -> Vec<RowView<'a>> {
        self.visible_rows
            .iter()
            .map(|&row| RowView {
                row,
                is_selected: self.is_selected(&row.id),
                is_expanded: self.is_expanded(&row.id),
                cells: self.cells(row),
            })
            .collect()
    }

    pub fn page_count(&self) -> usize {
        self.pagination
            .as_ref()
            .map(|p| pagination::page_count(self.total_filtered_count, p.page_size))
            .unwrap_or(1)
    }

    /// One-line summary of what is on screen
    pub fn status_line(&self) -> String {
        let (start, end) = pagination::visible_range(self.pagination.as_ref(), self.total_filtered_count);
        let mut status = if end > start {
            format!("Rows {}-{} of {}", start + 1, end, self.total_filtered_count)
        } else {
            format!("Rows 0 of {}", self.total_filtered_count)
        };

        if self.total_filtered_count != self.total_count {
            status.push_str(&format!(" (filtered from {})", self.total_count));
        }

        if let Some(p) = &self.pagination {
            status.push_str(&format!(" | Page {}/{}", p.page, self.page_count()));
        }

        if let Some(column_id) = self.sort.active_column() {
            status.push_str(&format!(" | Sort: {} {}", column_id, self.sort.direction.arrow()));
        }

        if self.toolbar.selected_count > 0 {
            status.push_str(&format!(" | {} selected", self.toolbar.selected_count));
        }

        status
    }
}

pub struct ProjectionBuilder<'a> {
    columns: &'a ColumnModel,
    config: &'a TableConfig,
}

impl<'a> ProjectionBuilder<'a> {
    pub fn new(columns: &'a ColumnModel, config: &'a TableConfig) -> Self {
        Self { columns, config }
    }

    pub fn build(&self, rows: &'a [Row], state: &'a ViewState) -> Result<Projection<'a>> {
        let options = self.config.options;

        // Filter
        let (mut filtered, ignored_filters) = if options.has_filter {
            let engine = FilterEngine::new(self.columns, self.config.filter.strategy);
            let outcome = engine.apply(rows, &state.filters)?;
            (outcome.rows, outcome.ignored)
        } else {
            (rows.iter().collect::<Vec<_>>(), Vec::new())
        };
        let total_filtered_count = filtered.len();

        // Sort
        if self.config.sort.mode == SortMode::Local {
            sort::sort_rows(&mut filtered, &state.sort);
        }

        // Paginate
        let effective_pagination = options
            .has_pagination
            .then(|| pagination::clamp_page(&state.pagination, total_filtered_count));
        let visible_rows = pagination::slice(&filtered, effective_pagination.as_ref()).to_vec();

        // Project columns
        ordering::debug_assert_permutation(&state.ordering, self.columns);
        let visible_columns = ordering::visible_columns(&state.ordering, self.columns);

        let header = visible_columns
            .iter()
            .map(|&column| {
                let direction = state.sort.direction_for(&column.id);
                HeaderCell {
                    column,
                    is_sort_header: direction != SortDirection::None,
                    sort_direction: direction,
                }
            })
            .collect();

        let visible_ids: Vec<&str> = visible_rows.iter().map(|r| r.id.as_str()).collect();
        let selection = options
            .has_row_selection
            .then(|| selection::reconcile(&state.selection, &visible_ids));

        let filter_row = (options.has_filter && state.active_bar == ActiveBar::Filter)
            .then(|| self.filter_row(&visible_columns, state));
        let column_chooser =
            (state.active_bar == ActiveBar::Column).then(|| self.column_chooser(state));

        let selected_count = if options.has_row_selection {
            state.selection.len()
        } else {
            0
        };
        let toolbar = ToolbarState {
            active_bar: state.active_bar,
            show_clear_all_filters: options.has_filter && state.has_filters(),
            show_filter_toggle: options.has_filter,
            selected_count,
            show_batch_actions: selected_count > 0,
        };

        debug!(
            target: "projection",
            "{} of {} rows pass filters, showing {} rows x {} columns",
            total_filtered_count,
            rows.len(),
            visible_rows.len(),
            visible_columns.len()
        );

        Ok(Projection {
            visible_columns,
            visible_rows,
            total_filtered_count,
            total_count: rows.len(),
            pagination: effective_pagination,
            header,
            selection,
            filter_row,
            column_chooser,
            toolbar,
            ignored_filters,
            sort: state.sort.clone(),
            options,
            expanded_ids: &state.expanded_ids,
        })
    }

    fn filter_row(&self, visible_columns: &[&'a Column], state: &'a ViewState) -> Vec<FilterCell<'a>> {
        visible_columns
            .iter()
            .map(|&column| {
                let descriptor = column.filter.as_ref();
                FilterCell {
                    column_id: &column.id,
                    is_filterable: descriptor.is_some(),
                    placeholder_text: descriptor.and_then(|f| f.placeholder_text.as_deref()),
                    options: descriptor
                        .and_then(|f| f.options.as_deref())
                        .unwrap_or(&[]),
                    value: state.filter_for(&column.id).map(|f| f.value.as_str()),
                }
            })
            .collect()
    }

    fn column_chooser(&self, state: &'a ViewState) -> Vec<ColumnChooserEntry<'a>> {
        state
            .ordering
            .iter()
            .enumerate()
            .filter_map(|(position, entry)| {
                self.columns
                    .get(&entry.column_id)
                    .map(|column| ColumnChooserEntry {
                        column_id: &column.id,
                        name: &column.name,
                        is_hidden: entry.is_hidden,
                        position,
                    })
            })
            .collect()
    }
}
