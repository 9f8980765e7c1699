//! Column display order and visibility
//!
//! The ordering is a permutation of the column model's ids with a hidden flag
//! per entry. Hidden columns keep their place so un-hiding restores them where
//! they were. None of these operations touch the column model.

use std::collections::HashSet;
use tracing::{debug, info};

use crate::data::column::{Column, ColumnModel};
use crate::error::{Result, ViewError};
use crate::state::view_state::OrderingEntry;

/// Every column, visible, in declaration order
pub fn default_ordering(columns: &ColumnModel) -> Vec<OrderingEntry> {
    columns.ids().map(OrderingEntry::new).collect()
}

pub fn position(ordering: &[OrderingEntry], column_id: &str) -> Option<usize> {
    ordering.iter().position(|e| e.column_id == column_id)
}

fn require_position(ordering: &[OrderingEntry], column_id: &str) -> Result<usize> {
    position(ordering, column_id).ok_or_else(|| ViewError::invalid_column(column_id))
}

/// Move a column to `new_index` (clamped to the last slot). Every other entry
/// keeps its relative order.
pub fn reorder(
    ordering: &[OrderingEntry],
    column_id: &str,
    new_index: usize,
) -> Result<Vec<OrderingEntry>> {
    let current = require_position(ordering, column_id)?;
    let mut next = ordering.to_vec();
    let entry = next.remove(current);
    let target = new_index.min(next.len());
    next.insert(target, entry);

    debug!(target: "ordering", "Moved '{}' from {} to {}", column_id, current, target);
    debug_assert!(has_unique_ids(&next));
    Ok(next)
}

/// Hide or show a single column
pub fn set_hidden(
    ordering: &[OrderingEntry],
    column_id: &str,
    is_hidden: bool,
) -> Result<Vec<OrderingEntry>> {
    let idx = require_position(ordering, column_id)?;
    let mut next = ordering.to_vec();
    next[idx].is_hidden = is_hidden;

    debug!(target: "ordering", "Column '{}' hidden -> {}", column_id, is_hidden);
    Ok(next)
}

fn has_unique_ids(ordering: &[OrderingEntry]) -> bool {
    let mut seen = HashSet::with_capacity(ordering.len());
    ordering.iter().all(|e| seen.insert(e.column_id.as_str()))
}

/// Check that the ordering names every column exactly once
pub fn validate_permutation(ordering: &[OrderingEntry], columns: &ColumnModel) -> Result<()> {
    let mut seen = HashSet::with_capacity(ordering.len());
    for entry in ordering {
        if !columns.contains(&entry.column_id) {
            return Err(ViewError::invalid_column(entry.column_id.clone()));
        }
        if !seen.insert(entry.column_id.as_str()) {
            return Err(ViewError::DuplicateColumn {
                column_id: entry.column_id.clone(),
            });
        }
    }
    if let Some(missing) = columns.ids().find(|id| !seen.contains(id)) {
        return Err(ViewError::invalid_column(missing));
    }
    Ok(())
}

/// Debug-build assertion of the permutation invariant. A failure is a host
/// bug: ordering and column model went out of sync.
pub fn debug_assert_permutation(ordering: &[OrderingEntry], columns: &ColumnModel) {
    if cfg!(debug_assertions) {
        if let Err(err) = validate_permutation(ordering, columns) {
            panic!("column ordering is not a permutation of the column model: {err}");
        }
    }
}

/// Bring an ordering in line with a replaced column model: surviving columns
/// keep their order and hidden flag, removed ones are dropped, new ones are
/// appended visible.
pub fn sync_with_columns(ordering: &[OrderingEntry], columns: &ColumnModel) -> Vec<OrderingEntry> {
    let mut seen = HashSet::new();
    let mut next: Vec<OrderingEntry> = ordering
        .iter()
        .filter(|e| columns.contains(&e.column_id) && seen.insert(e.column_id.clone()))
        .cloned()
        .collect();
    let dropped = ordering.len() - next.len();

    let mut added = 0;
    for id in columns.ids() {
        if !seen.contains(id) {
            next.push(OrderingEntry::new(id));
            added += 1;
        }
    }

    if dropped > 0 || added > 0 {
        info!(
            target: "ordering",
            "Synced ordering with column model: {} dropped, {} added",
            dropped, added
        );
    }
    next
}

/// Non-hidden columns in display order
pub fn visible_columns<'c>(ordering: &[OrderingEntry], columns: &'c ColumnModel) -> Vec<&'c Column> {
    ordering
        .iter()
        .filter(|e| !e.is_hidden)
        .filter_map(|e| columns.get(&e.column_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> ColumnModel {
        ColumnModel::new(vec![
            Column::new("a", "A"),
            Column::new("b", "B"),
            Column::new("c", "C"),
            Column::new("d", "D"),
        ])
        .unwrap()
    }

    fn ids(ordering: &[OrderingEntry]) -> Vec<&str> {
        ordering.iter().map(|e| e.column_id.as_str()).collect()
    }

    #[test]
    fn test_reorder_forward_and_back() {
        let start = default_ordering(&columns());
        let moved = reorder(&start, "a", 2).unwrap();
        assert_eq!(ids(&moved), vec!["b", "c", "a", "d"]);

        let restored = reorder(&moved, "a", 0).unwrap();
        assert_eq!(restored, start);
    }

    #[test]
    fn test_reorder_clamps_index() {
        let start = default_ordering(&columns());
        let moved = reorder(&start, "b", 99).unwrap();
        assert_eq!(ids(&moved), vec!["a", "c", "d", "b"]);
    }

    #[test]
    fn test_reorder_unknown_column() {
        let start = default_ordering(&columns());
        assert_eq!(
            reorder(&start, "z", 0).unwrap_err(),
            ViewError::invalid_column("z")
        );
    }

    #[test]
    fn test_set_hidden_keeps_position() {
        let columns = columns();
        let start = default_ordering(&columns);
        let hidden = set_hidden(&start, "b", true).unwrap();
        assert_eq!(ids(&hidden), ids(&start));
        let visible: Vec<_> = visible_columns(&hidden, &columns)
            .into_iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(visible, vec!["a", "c", "d"]);

        assert!(set_hidden(&start, "z", true).is_err());
        let shown = set_hidden(&hidden, "b", false).unwrap();
        assert_eq!(shown, start);
    }

    #[test]
    fn test_validate_permutation() {
        let columns = columns();
        let ordering = default_ordering(&columns);
        assert!(validate_permutation(&ordering, &columns).is_ok());

        let missing = &ordering[..3];
        assert_eq!(
            validate_permutation(missing, &columns).unwrap_err(),
            ViewError::invalid_column("d")
        );

        let mut duplicated = ordering.clone();
        duplicated[3] = OrderingEntry::new("a");
        assert!(matches!(
            validate_permutation(&duplicated, &columns),
            Err(ViewError::DuplicateColumn { .. })
        ));
    }

    #[test]
    fn test_sync_with_replaced_columns() {
        let ordering = vec![
            OrderingEntry::new("c"),
            OrderingEntry::hidden("x"),
            OrderingEntry::hidden("a"),
        ];
        let synced = sync_with_columns(&ordering, &columns());
        assert_eq!(ids(&synced), vec!["c", "a", "b", "d"]);
        assert!(synced[1].is_hidden);
        assert!(validate_permutation(&synced, &columns()).is_ok());
    }
}
