//! Pure view-state transitions
//!
//! `reduce` never mutates its inputs. Every accepted transition ends with the
//! same reconciliation: the pagination total is set to the post-filter count,
//! the page is clamped, and the select-all flags are recomputed for the rows
//! now on screen.

use tracing::debug;

use crate::config::TableConfig;
use crate::data::column::ColumnModel;
use crate::data::row::RowModel;
use crate::engine::projection::ProjectionBuilder;
use crate::engine::{expansion, filter, ordering, pagination, selection, sort};
use crate::error::Result;
use crate::state::events::TableAction;
use crate::state::view_state::{ActiveBar, Filter, ViewState};

pub struct TableReducer<'a> {
    columns: &'a ColumnModel,
    rows: &'a RowModel,
    config: &'a TableConfig,
}

impl<'a> TableReducer<'a> {
    pub fn new(columns: &'a ColumnModel, rows: &'a RowModel, config: &'a TableConfig) -> Self {
        Self {
            columns,
            rows,
            config,
        }
    }

    /// Next state after `action`. Actions that never change the view state
    /// (row and batch actions) return an unchanged copy.
    pub fn reduce(&self, state: &ViewState, action: &TableAction) -> Result<ViewState> {
        let options = self.config.options;
        let mut next = state.clone();

        match action {
            TableAction::SelectAll { checked } => {
                if options.has_row_selection {
                    let visible = self.visible_row_ids(state)?;
                    next.selection = selection::toggle_all(&state.selection, &visible, *checked);
                }
            }
            TableAction::RowSelected { row_id, checked } => {
                if options.has_row_selection {
                    self.rows.require(row_id)?;
                    let visible = self.visible_row_ids(state)?;
                    next.selection =
                        selection::toggle_row(&state.selection, row_id, *checked, &visible);
                }
            }
            TableAction::ChangeSort { column_id } => {
                next.sort = sort::request_sort(&state.sort, column_id, self.columns)?;
                if next.sort != state.sort {
                    next.pagination = pagination::reset_page(&state.pagination);
                }
            }
            TableAction::ApplyFilter { filters } => {
                next.filters = self.checked_filters(filters)?;
                self.on_filter_change(state, &mut next);
            }
            TableAction::ClearAllFilters => {
                next.filters.clear();
                self.on_filter_change(state, &mut next);
            }
            TableAction::ChangeOrdering {
                column_id,
                new_index,
            } => {
                next.ordering = ordering::reorder(&state.ordering, column_id, *new_index)?;
            }
            TableAction::ToggleColumnHidden {
                column_id,
                is_hidden,
            } => {
                next.ordering = ordering::set_hidden(&state.ordering, column_id, *is_hidden)?;
            }
            TableAction::PageChange { page, page_size } => {
                next.pagination = pagination::change_page(&state.pagination, *page, *page_size)?;
            }
            TableAction::ToggleToolbar { bar } => {
                next.active_bar = toggle_bar(state.active_bar, *bar, options.has_filter);
            }
            TableAction::RowExpanded { row_id, expanded } => {
                if options.has_row_expansion {
                    self.rows.require(row_id)?;
                    next.expanded_ids =
                        expansion::toggle_expanded(&state.expanded_ids, row_id, *expanded);
                }
            }
            TableAction::ApplyRowAction { .. } | TableAction::ApplyBatchAction { .. } => {
                return Ok(next);
            }
        }

        ordering::debug_assert_permutation(&next.ordering, self.columns);
        self.reconcile(next)
    }

    /// Bring derived fields of `state` in line with the current data
    pub fn reconcile(&self, mut state: ViewState) -> Result<ViewState> {
        let (total, visible) = {
            let projection = ProjectionBuilder::new(self.columns, self.config)
                .build(self.rows.rows(), &state)?;
            let visible: Vec<String> = projection
                .visible_row_ids()
                .into_iter()
                .map(String::from)
                .collect();
            (projection.total_filtered_count, visible)
        };

        state.pagination = pagination::clamp_page(&state.pagination, total);
        state.selection = selection::reconcile(&state.selection, &visible);
        Ok(state)
    }

    /// Ids of the rows currently on screen
    pub fn visible_row_ids(&self, state: &ViewState) -> Result<Vec<String>> {
        let projection =
            ProjectionBuilder::new(self.columns, self.config).build(self.rows.rows(), state)?;
        Ok(projection
            .visible_row_ids()
            .into_iter()
            .map(String::from)
            .collect())
    }

    fn checked_filters(&self, filters: &[Filter]) -> Result<Vec<Filter>> {
        for f in filters {
            self.columns.require(&f.column_id)?;
        }
        Ok(filter::normalize_filters(filters.to_vec()))
    }

    fn on_filter_change(&self, state: &ViewState, next: &mut ViewState) {
        next.pagination = pagination::reset_page(&state.pagination);
        next.selection = selection::on_filter_change(&state.selection, self.config.selection.policy);
        debug!(
            target: "filter",
            "Filter set changed: {} -> {} entries, back to page 1",
            state.filters.len(),
            next.filters.len()
        );
    }
}

/// Pressing the active bar's button closes it; the filter bar needs filtering
/// to be enabled.
fn toggle_bar(current: ActiveBar, requested: ActiveBar, has_filter: bool) -> ActiveBar {
    match requested {
        ActiveBar::Filter if !has_filter => current,
        requested if requested == current => ActiveBar::None,
        requested => requested,
    }
}
