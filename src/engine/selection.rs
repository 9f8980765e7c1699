//! Row selection and the select-all checkbox state
//!
//! The aggregate flags are always computed against the visible row ids (the
//! current page after filtering). Selected rows outside that set keep their
//! membership but do not count toward "all selected".

use std::collections::BTreeSet;
use tracing::debug;

use crate::config::SelectionPolicy;
use crate::state::view_state::Selection;

/// `(is_select_all_selected, is_select_all_indeterminate)` for the visible ids
pub fn aggregate<S: AsRef<str>>(selected: &BTreeSet<String>, visible_ids: &[S]) -> (bool, bool) {
    if visible_ids.is_empty() {
        return (false, false);
    }
    let selected_visible = visible_ids
        .iter()
        .filter(|id| {
            let id: &str = (*id).as_ref();
            selected.contains(id)
        })
        .count();
    let all = selected_visible == visible_ids.len();
    let some = selected_visible > 0;
    (all, some && !all)
}

/// Recompute the aggregate flags without touching membership
pub fn reconcile<S: AsRef<str>>(selection: &Selection, visible_ids: &[S]) -> Selection {
    let (all, indeterminate) = aggregate(&selection.selected_ids, visible_ids);
    Selection {
        selected_ids: selection.selected_ids.clone(),
        is_select_all_selected: all,
        is_select_all_indeterminate: indeterminate,
    }
}

/// Check or uncheck a single row
pub fn toggle_row<S: AsRef<str>>(
    selection: &Selection,
    row_id: &str,
    checked: bool,
    visible_ids: &[S],
) -> Selection {
    let mut selected_ids = selection.selected_ids.clone();
    if checked {
        selected_ids.insert(row_id.to_string());
    } else {
        selected_ids.remove(row_id);
    }
    debug!(target: "selection", "Row {} -> {} ({} selected)", row_id, checked, selected_ids.len());

    let (all, indeterminate) = aggregate(&selected_ids, visible_ids);
    Selection {
        selected_ids,
        is_select_all_selected: all,
        is_select_all_indeterminate: indeterminate,
    }
}

/// Check or uncheck every visible row. Rows outside the visible set keep
/// their previous state.
pub fn toggle_all<S: AsRef<str>>(selection: &Selection, visible_ids: &[S], checked: bool) -> Selection {
    let mut selected_ids = selection.selected_ids.clone();
    for id in visible_ids {
        let id: &str = id.as_ref();
        if checked {
            selected_ids.insert(id.to_string());
        } else {
            selected_ids.remove(id);
        }
    }
    debug!(
        target: "selection",
        "Select all -> {} over {} visible rows ({} selected)",
        checked,
        visible_ids.len(),
        selected_ids.len()
    );

    let (all, indeterminate) = aggregate(&selected_ids, visible_ids);
    Selection {
        selected_ids,
        is_select_all_selected: all,
        is_select_all_indeterminate: indeterminate,
    }
}

/// Drop selected ids that no longer exist in the dataset
pub fn prune<F>(selection: &Selection, exists: F) -> Selection
where
    F: Fn(&str) -> bool,
{
    let selected_ids: BTreeSet<String> = selection
        .selected_ids
        .iter()
        .filter(|id| exists(id))
        .cloned()
        .collect();
    let removed = selection.selected_ids.len() - selected_ids.len();
    if removed > 0 {
        debug!(target: "selection", "Pruned {} selected rows missing from the dataset", removed);
    }
    Selection {
        selected_ids,
        ..selection.clone()
    }
}

/// Selection after the filter set changed, per the configured policy
pub fn on_filter_change(selection: &Selection, policy: SelectionPolicy) -> Selection {
    match policy {
        SelectionPolicy::Persist => selection.clone(),
        SelectionPolicy::ClearOnFilterChange => {
            if !selection.is_empty() {
                debug!(target: "selection", "Filters changed, clearing {} selected rows", selection.len());
            }
            Selection::default()
        }
    }
}
