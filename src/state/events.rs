//! Table actions and transition records

use serde::{Deserialize, Serialize};

use crate::state::view_state::{ActiveBar, Filter};

/// A user intent that may change the view state. One variant per intent
/// callback the host wires to UI events.
///
/// In scripts the action name is snake_case and its fields are camelCase,
/// matching the nested filter entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum TableAction {
    /// Header checkbox
    SelectAll { checked: bool },

    /// Row checkbox
    RowSelected { row_id: String, checked: bool },

    /// Header click on a column
    ChangeSort { column_id: String },

    /// Replace the whole filter set
    ApplyFilter { filters: Vec<Filter> },

    ClearAllFilters,

    /// Drag a column to a new display position
    ChangeOrdering { column_id: String, new_index: usize },

    ToggleColumnHidden { column_id: String, is_hidden: bool },

    PageChange { page: usize, page_size: usize },

    /// Toolbar button; pressing the active bar's button closes it
    ToggleToolbar { bar: ActiveBar },

    RowExpanded { row_id: String, expanded: bool },

    /// Row action menu entry. Never changes the view state.
    ApplyRowAction { row_id: String, action_id: String },

    /// Batch action on the selected rows. Never changes the view state.
    ApplyBatchAction { action_id: String },
}

impl TableAction {
    /// Short name for logs and history
    pub fn name(&self) -> &'static str {
        match self {
            TableAction::SelectAll { .. } => "select_all",
            TableAction::RowSelected { .. } => "row_selected",
            TableAction::ChangeSort { .. } => "change_sort",
            TableAction::ApplyFilter { .. } => "apply_filter",
            TableAction::ClearAllFilters => "clear_all_filters",
            TableAction::ChangeOrdering { .. } => "change_ordering",
            TableAction::ToggleColumnHidden { .. } => "toggle_column_hidden",
            TableAction::PageChange { .. } => "page_change",
            TableAction::ToggleToolbar { .. } => "toggle_toolbar",
            TableAction::RowExpanded { .. } => "row_expanded",
            TableAction::ApplyRowAction { .. } => "apply_row_action",
            TableAction::ApplyBatchAction { .. } => "apply_batch_action",
        }
    }
}

/// What a dispatched action did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub action: TableAction,
    /// `false` when the action was rejected or left the state unchanged
    pub changed: bool,
    /// Error message for rejected actions
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_deserialize_from_script() {
        let json = r#"[
            {"action": "change_sort", "columnId": "name"},
            {"action": "apply_filter", "filters": [{"columnId": "name", "value": "Bo"}]},
            {"action": "clear_all_filters"},
            {"action": "toggle_toolbar", "bar": "filter"},
            {"action": "page_change", "page": 2, "pageSize": 20}
        ]"#;
        let actions: Vec<TableAction> = serde_json::from_str(json).unwrap();
        assert_eq!(actions.len(), 5);
        assert_eq!(
            actions[1],
            TableAction::ApplyFilter {
                filters: vec![Filter::new("name", "Bo")]
            }
        );
        assert_eq!(actions[3], TableAction::ToggleToolbar { bar: ActiveBar::Filter });
        assert_eq!(actions[4].name(), "page_change");
        assert_eq!(
            actions[4],
            TableAction::PageChange {
                page: 2,
                page_size: 20
            }
        );
    }

    #[test]
    fn test_script_fields_share_one_case() {
        let action = TableAction::ChangeOrdering {
            column_id: "age".to_string(),
            new_index: 0,
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["action"], "change_ordering");
        assert_eq!(json["columnId"], "age");
        assert_eq!(json["newIndex"], 0);

        let filters = serde_json::to_value(TableAction::ApplyFilter {
            filters: vec![Filter::new("age", "3")],
        })
        .unwrap();
        assert_eq!(filters["filters"][0]["columnId"], "age");

        let snake = r#"{"action": "row_selected", "row_id": "1", "checked": true}"#;
        assert!(serde_json::from_str::<TableAction>(snake).is_err());
    }
}
