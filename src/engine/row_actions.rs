//! Per-row action menus
//!
//! Actions never change the view state. The host supplies the action list, the
//! layout splits it into inline buttons and overflow-menu entries, and
//! [`resolve`] validates a click before it is handed back to the host.
//! Batch actions work the same way on the selected rows.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::row::RowModel;
use crate::error::{Result, ViewError};
use crate::state::view_state::Selection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowAction {
    pub id: String,
    pub label_text: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    /// Shown in the overflow menu rather than as a button
    #[serde(default)]
    pub is_overflow: bool,
}

impl RowAction {
    pub fn new(id: impl Into<String>, label_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label_text: label_text.into(),
            icon: None,
            disabled: false,
            is_overflow: false,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn overflow(mut self) -> Self {
        self.is_overflow = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Inline buttons and overflow entries, each in the host's order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowActionLayout<'a> {
    pub inline: Vec<&'a RowAction>,
    pub overflow: Vec<&'a RowAction>,
}

impl RowActionLayout<'_> {
    pub fn has_overflow(&self) -> bool {
        !self.overflow.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.inline.is_empty() && self.overflow.is_empty()
    }
}

pub fn layout(actions: &[RowAction]) -> RowActionLayout<'_> {
    let (overflow, inline): (Vec<&RowAction>, Vec<&RowAction>) =
        actions.iter().partition(|a| a.is_overflow);
    RowActionLayout { inline, overflow }
}

/// A validated row action click
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowActionRequest {
    pub row_id: String,
    pub action_id: String,
}

/// Validate a row action click against the row model and action list
pub fn resolve(
    actions: &[RowAction],
    rows: &RowModel,
    row_id: &str,
    action_id: &str,
) -> Result<RowActionRequest> {
    rows.require(row_id)?;

    let rejected = |reason: &str| ViewError::InvalidRowAction {
        row_id: row_id.to_string(),
        action_id: action_id.to_string(),
        reason: reason.to_string(),
    };

    let action = actions
        .iter()
        .find(|a| a.id == action_id)
        .ok_or_else(|| rejected("no such action"))?;
    if action.disabled {
        return Err(rejected("action is disabled"));
    }

    debug!(target: "row_actions", "Row {} action {}", row_id, action_id);
    Ok(RowActionRequest {
        row_id: row_id.to_string(),
        action_id: action_id.to_string(),
    })
}

/// Toolbar action applied to every selected row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAction {
    pub id: String,
    pub label_text: String,
    #[serde(default)]
    pub icon: Option<String>,
}

impl BatchAction {
    pub fn new(id: impl Into<String>, label_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label_text: label_text.into(),
            icon: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchActionRequest {
    pub action_id: String,
    /// Every selected row, including rows off the current page
    pub row_ids: Vec<String>,
}

/// Validate a batch action against the current selection
pub fn resolve_batch(
    actions: &[BatchAction],
    selection: &Selection,
    action_id: &str,
) -> Result<BatchActionRequest> {
    let rejected = |reason: &str| ViewError::InvalidRowAction {
        row_id: String::new(),
        action_id: action_id.to_string(),
        reason: reason.to_string(),
    };

    if !actions.iter().any(|a| a.id == action_id) {
        return Err(rejected("no such batch action"));
    }
    if selection.is_empty() {
        return Err(rejected("no rows selected"));
    }

    debug!(target: "row_actions", "Batch action {} on {} rows", action_id, selection.len());
    Ok(BatchActionRequest {
        action_id: action_id.to_string(),
        row_ids: selection.selected_ids.iter().cloned().collect(),
    })
}
