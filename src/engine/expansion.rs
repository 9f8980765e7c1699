//! Expanded-row bookkeeping for tables with row expansion
use std::collections::BTreeSet;
use tracing::debug;

pub fn toggle_expanded(expanded_ids: &BTreeSet<String>, row_id: &str, expanded: bool) -> BTreeSet<String> {
    let mut next = expanded_ids.clone();
    if expanded {
        next.insert(row_id.to_string());
    } else {
        next.remove(row_id);
    }
    debug!(target: "expansion", "Row {} expanded -> {}", row_id, expanded);
    next
}

/// Keep only ids accepted by `exists`
pub fn prune<F>(expanded_ids: &BTreeSet<String>, exists: F) -> BTreeSet<String>
where
    F: Fn(&str) -> bool,
{
    expanded_ids.iter().filter(|id| exists(id)).cloned().collect()
}
