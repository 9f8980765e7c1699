//! Sort requests and the optional local sort
//!
//! By default the host sorts its own data when the sort changes; the local
//! sort only runs when configured. Descending order is the ascending stable
//! order reversed, so ties mirror exactly between the two directions.

use tracing::debug;

use crate::data::column::ColumnModel;
use crate::data::row::Row;
use crate::data::value::compare_values;
use crate::error::Result;
use crate::state::view_state::{Sort, SortDirection};

/// Next sort after a click on `column_id`'s header.
///
/// Repeating the current column steps NONE -> ASC -> DESC -> NONE; a new
/// column starts at ASC. Non-sortable columns leave the sort unchanged.
pub fn request_sort(current: &Sort, column_id: &str, columns: &ColumnModel) -> Result<Sort> {
    let column = columns.require(column_id)?;
    if !column.is_sortable {
        debug!(target: "sort", "Ignoring sort request on non-sortable column '{}'", column_id);
        return Ok(current.clone());
    }

    let direction = if current.column_id.as_deref() == Some(column_id) {
        current.direction.next()
    } else {
        SortDirection::Asc
    };

    let next = match direction {
        SortDirection::None => Sort::default(),
        direction => Sort::new(column_id, direction),
    };
    debug!(target: "sort", "Sort on '{}' -> {:?}", column_id, next.direction);
    Ok(next)
}

/// Stable in-place sort of rows by the active sort column
pub fn sort_rows(rows: &mut [&Row], sort: &Sort) {
    let Some(column_id) = sort.active_column() else {
        return;
    };

    rows.sort_by(|a, b| compare_values(a.value(column_id), b.value(column_id)));
    if sort.direction == SortDirection::Desc {
        rows.reverse();
    }
}

/// Drop a sort whose column vanished or is no longer sortable
pub fn reconcile(sort: &Sort, columns: &ColumnModel) -> Sort {
    match sort.column_id.as_deref() {
        Some(id) if !columns.is_sortable(id) => {
            debug!(target: "sort", "Clearing sort on '{}' after column change", id);
            Sort::default()
        }
        _ => sort.clone(),
    }
}
