//! Table controller: the host-side holder of the authoritative view state
//!
//! Hosts that do not want to thread state through [`TableReducer`] themselves
//! can hand every intent to a [`TableController`]. It commits accepted
//! transitions, notifies subscribers and keeps a bounded history of what was
//! dispatched for debugging.

use serde::Serialize;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

use crate::config::TableConfig;
use crate::data::column::{Column, ColumnModel};
use crate::data::row::{Row, RowModel};
use crate::engine::projection::{Projection, ProjectionBuilder};
use crate::engine::row_actions::{
    self, BatchAction, BatchActionRequest, RowAction, RowActionLayout, RowActionRequest,
};
use crate::engine::{expansion, filter, ordering, selection, sort};
use crate::error::{Result, ViewError};
use crate::state::events::{TableAction, Transition};
use crate::state::reducer::TableReducer;
use crate::state::view_state::{ActiveBar, Filter, ViewState};

/// Components that react to committed view-state changes
pub trait ViewStateSubscriber {
    fn on_view_state_changed(&mut self, action: &TableAction, state: &ViewState);

    /// Subscriber name for logs
    fn name(&self) -> &str;
}

/// Work the host has to carry out for an accepted row or batch action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostRequest {
    RowAction(RowActionRequest),
    BatchAction(BatchActionRequest),
}

/// The intent callbacks a host wires to UI events
pub trait TableActions {
    fn on_select_all(&mut self, checked: bool) -> Result<()>;
    fn on_row_selected(&mut self, row_id: &str, checked: bool) -> Result<()>;
    fn on_change_sort(&mut self, column_id: &str) -> Result<()>;
    fn on_apply_filter(&mut self, filters: Vec<Filter>) -> Result<()>;
    fn on_clear_all_filters(&mut self) -> Result<()>;
    fn on_change_ordering(&mut self, column_id: &str, new_index: usize) -> Result<()>;
    fn on_toggle_column_hidden(&mut self, column_id: &str, is_hidden: bool) -> Result<()>;
    fn on_page_change(&mut self, page: usize, page_size: usize) -> Result<()>;
    fn on_toggle_toolbar(&mut self, bar: ActiveBar) -> Result<()>;
    fn on_row_expanded(&mut self, row_id: &str, expanded: bool) -> Result<()>;
    fn on_apply_row_action(&mut self, row_id: &str, action_id: &str) -> Result<RowActionRequest>;
    fn on_apply_batch_action(&mut self, action_id: &str) -> Result<BatchActionRequest>;
}

pub struct TableController {
    columns: ColumnModel,
    rows: RowModel,
    config: TableConfig,
    state: ViewState,
    row_actions: Vec<RowAction>,
    batch_actions: Vec<BatchAction>,
    subscribers: Vec<Box<dyn ViewStateSubscriber>>,
    history: VecDeque<Transition>,
}

impl TableController {
    pub fn new(columns: Vec<Column>, rows: Vec<Row>, config: TableConfig) -> Result<Self> {
        let columns = ColumnModel::new(columns)?;
        let rows = RowModel::new(rows)?;
        let initial = ViewState::new(&columns, &config);
        let state = TableReducer::new(&columns, &rows, &config).reconcile(initial)?;

        info!(
            target: "dispatch",
            "Table controller ready: {} columns, {} rows",
            columns.len(),
            rows.len()
        );
        Ok(Self {
            columns,
            rows,
            config,
            state,
            row_actions: Vec::new(),
            batch_actions: Vec::new(),
            subscribers: Vec::new(),
            history: VecDeque::new(),
        })
    }

    pub fn with_row_actions(mut self, actions: Vec<RowAction>) -> Self {
        self.row_actions = actions;
        self
    }

    pub fn with_batch_actions(mut self, actions: Vec<BatchAction>) -> Self {
        self.batch_actions = actions;
        self
    }

    pub fn subscribe(&mut self, subscriber: Box<dyn ViewStateSubscriber>) {
        info!(target: "dispatch", "Adding subscriber: {}", subscriber.name());
        self.subscribers.push(subscriber);
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn columns(&self) -> &ColumnModel {
        &self.columns
    }

    pub fn rows(&self) -> &RowModel {
        &self.rows
    }

    pub fn history(&self) -> impl Iterator<Item = &Transition> {
        self.history.iter()
    }

    pub fn row_action_layout(&self) -> RowActionLayout<'_> {
        if self.config.options.has_row_actions {
            row_actions::layout(&self.row_actions)
        } else {
            RowActionLayout::default()
        }
    }

    pub fn batch_actions(&self) -> &[BatchAction] {
        &self.batch_actions
    }

    /// Visible rows and columns for the current state
    pub fn projection(&self) -> Result<Projection<'_>> {
        ProjectionBuilder::new(&self.columns, &self.config).build(self.rows.rows(), &self.state)
    }

    /// Commit a replacement view state supplied by the host.
    ///
    /// The ordering must be a permutation of the columns, the page size must
    /// be positive and every filter must name a known column; otherwise the
    /// current state is kept. A sort on a column that cannot be sorted is
    /// dropped, filters are normalized to one per column, and the result is
    /// reconciled against the data like any transition result.
    pub fn set_state(&mut self, mut state: ViewState) -> Result<()> {
        ordering::validate_permutation(&state.ordering, &self.columns)?;
        if state.pagination.page_size == 0 {
            return Err(ViewError::InvalidPageSize { page_size: 0 });
        }
        for f in &state.filters {
            self.columns.require(&f.column_id)?;
        }

        state.filters = filter::normalize_filters(std::mem::take(&mut state.filters));
        state.sort = sort::reconcile(&state.sort, &self.columns);
        self.state = self.reducer().reconcile(state)?;
        Ok(())
    }

    /// Run one intent through the reducer and commit the result
    pub fn dispatch(&mut self, action: TableAction) -> Result<Option<HostRequest>> {
        debug!(target: "dispatch", "Dispatching {}: {:?}", action.name(), action);

        match self.process(&action) {
            Ok((next, request)) => {
                let changed = next != self.state;
                if changed {
                    self.state = next;
                    for subscriber in &mut self.subscribers {
                        debug!(target: "dispatch", "Notifying subscriber: {}", subscriber.name());
                        subscriber.on_view_state_changed(&action, &self.state);
                    }
                }
                self.record(Transition {
                    action,
                    changed,
                    error: None,
                });
                Ok(request)
            }
            Err(err) => {
                warn!(target: "dispatch", "Rejected {}: {}", action.name(), err);
                self.record(Transition {
                    action,
                    changed: false,
                    error: Some(err.to_string()),
                });
                Err(err)
            }
        }
    }

    /// Swap in fresh data and carry the view state over to it.
    ///
    /// Surviving columns keep their position and hidden flag, new columns are
    /// appended, sort and filters on columns that vanished or lost the
    /// capability are dropped, and selection and expansion forget rows that
    /// no longer exist.
    pub fn replace_data(&mut self, columns: Vec<Column>, rows: Vec<Row>) -> Result<()> {
        let columns = ColumnModel::new(columns)?;
        let rows = RowModel::new(rows)?;

        let mut next = self.state.clone();
        next.ordering = ordering::sync_with_columns(&self.state.ordering, &columns);
        next.sort = sort::reconcile(&self.state.sort, &columns);
        next.filters.retain(|f| columns.is_filterable(&f.column_id));
        next.selection = selection::prune(&self.state.selection, |id| rows.contains(id));
        next.expanded_ids = expansion::prune(&self.state.expanded_ids, |id| rows.contains(id));

        let next = TableReducer::new(&columns, &rows, &self.config).reconcile(next)?;
        info!(
            target: "dispatch",
            "Replaced data: {} columns, {} rows ({} filters kept)",
            columns.len(),
            rows.len(),
            next.filters.len()
        );

        self.columns = columns;
        self.rows = rows;
        self.state = next;
        Ok(())
    }

    fn reducer(&self) -> TableReducer<'_> {
        TableReducer::new(&self.columns, &self.rows, &self.config)
    }

    fn process(&self, action: &TableAction) -> Result<(ViewState, Option<HostRequest>)> {
        match action {
            TableAction::ApplyRowAction { row_id, action_id } => {
                let request = self.resolve_row_action(row_id, action_id)?;
                Ok((self.state.clone(), Some(HostRequest::RowAction(request))))
            }
            TableAction::ApplyBatchAction { action_id } => {
                let request = self.resolve_batch_action(action_id)?;
                Ok((self.state.clone(), Some(HostRequest::BatchAction(request))))
            }
            _ => Ok((self.reducer().reduce(&self.state, action)?, None)),
        }
    }

    fn resolve_row_action(&self, row_id: &str, action_id: &str) -> Result<RowActionRequest> {
        if !self.config.options.has_row_actions {
            return Err(ViewError::InvalidRowAction {
                row_id: row_id.to_string(),
                action_id: action_id.to_string(),
                reason: "row actions are disabled".to_string(),
            });
        }
        row_actions::resolve(&self.row_actions, &self.rows, row_id, action_id)
    }

    fn resolve_batch_action(&self, action_id: &str) -> Result<BatchActionRequest> {
        if !self.config.options.has_row_selection {
            return Err(ViewError::InvalidRowAction {
                row_id: String::new(),
                action_id: action_id.to_string(),
                reason: "row selection is disabled".to_string(),
            });
        }
        row_actions::resolve_batch(&self.batch_actions, &self.state.selection, action_id)
    }

    fn record(&mut self, transition: Transition) {
        self.history.push_back(transition);
        while self.history.len() > self.config.history.max_events {
            self.history.pop_front();
        }
    }
}

impl TableActions for TableController {
    fn on_select_all(&mut self, checked: bool) -> Result<()> {
        self.dispatch(TableAction::SelectAll { checked }).map(drop)
    }

    fn on_row_selected(&mut self, row_id: &str, checked: bool) -> Result<()> {
        self.dispatch(TableAction::RowSelected {
            row_id: row_id.to_string(),
            checked,
        })
        .map(drop)
    }

    fn on_change_sort(&mut self, column_id: &str) -> Result<()> {
        self.dispatch(TableAction::ChangeSort {
            column_id: column_id.to_string(),
        })
        .map(drop)
    }

    fn on_apply_filter(&mut self, filters: Vec<Filter>) -> Result<()> {
        self.dispatch(TableAction::ApplyFilter { filters }).map(drop)
    }

    fn on_clear_all_filters(&mut self) -> Result<()> {
        self.dispatch(TableAction::ClearAllFilters).map(drop)
    }

    fn on_change_ordering(&mut self, column_id: &str, new_index: usize) -> Result<()> {
        self.dispatch(TableAction::ChangeOrdering {
            column_id: column_id.to_string(),
            new_index,
        })
        .map(drop)
    }

    fn on_toggle_column_hidden(&mut self, column_id: &str, is_hidden: bool) -> Result<()> {
        self.dispatch(TableAction::ToggleColumnHidden {
            column_id: column_id.to_string(),
            is_hidden,
        })
        .map(drop)
    }

    fn on_page_change(&mut self, page: usize, page_size: usize) -> Result<()> {
        self.dispatch(TableAction::PageChange { page, page_size })
            .map(drop)
    }

    fn on_toggle_toolbar(&mut self, bar: ActiveBar) -> Result<()> {
        self.dispatch(TableAction::ToggleToolbar { bar }).map(drop)
    }

    fn on_row_expanded(&mut self, row_id: &str, expanded: bool) -> Result<()> {
        self.dispatch(TableAction::RowExpanded {
            row_id: row_id.to_string(),
            expanded,
        })
        .map(drop)
    }

    fn on_apply_row_action(&mut self, row_id: &str, action_id: &str) -> Result<RowActionRequest> {
        let request = self.dispatch(TableAction::ApplyRowAction {
            row_id: row_id.to_string(),
            action_id: action_id.to_string(),
        })?;
        match request {
            Some(HostRequest::RowAction(request)) => Ok(request),
            _ => Err(ViewError::InvalidRowAction {
                row_id: row_id.to_string(),
                action_id: action_id.to_string(),
                reason: "no request produced".to_string(),
            }),
        }
    }

    fn on_apply_batch_action(&mut self, action_id: &str) -> Result<BatchActionRequest> {
        let request = self.dispatch(TableAction::ApplyBatchAction {
            action_id: action_id.to_string(),
        })?;
        match request {
            Some(HostRequest::BatchAction(request)) => Ok(request),
            _ => Err(ViewError::InvalidRowAction {
                row_id: String::new(),
                action_id: action_id.to_string(),
                reason: "no request produced".to_string(),
            }),
        }
    }
}
