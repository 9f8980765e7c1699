//! Error taxonomy for view-state operations
//!
//! Every fallible engine operation returns [`ViewError`]. Column and row
//! desyncs are always surfaced to the host. Out-of-range pages and malformed
//! filters are recovered locally by the engines and only reported alongside
//! the recovered result.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// A column id is absent from the column model or the ordering
    #[error("unknown column '{column_id}'")]
    InvalidColumn { column_id: String },

    #[error("duplicate column id '{column_id}'")]
    DuplicateColumn { column_id: String },

    /// A row id is absent from the row model
    #[error("unknown row '{row_id}'")]
    InvalidRow { row_id: String },

    #[error("duplicate row id '{row_id}'")]
    DuplicateRow { row_id: String },

    /// Requested page lies outside `1..=last_page`
    #[error("page {page} is out of range (last page is {last_page})")]
    InvalidPage { page: usize, last_page: usize },

    #[error("page size must be greater than zero (got {page_size})")]
    InvalidPageSize { page_size: usize },

    /// A filter value does not fit the column's filter descriptor
    #[error("filter on column '{column_id}' with value '{value}' ignored: {reason}")]
    MalformedFilter {
        column_id: String,
        value: String,
        reason: String,
    },

    #[error("row action '{action_id}' on row '{row_id}' rejected: {reason}")]
    InvalidRowAction {
        row_id: String,
        action_id: String,
        reason: String,
    },
}

impl ViewError {
    pub fn invalid_column(column_id: impl Into<String>) -> Self {
        ViewError::InvalidColumn {
            column_id: column_id.into(),
        }
    }

    pub fn invalid_row(row_id: impl Into<String>) -> Self {
        ViewError::InvalidRow {
            row_id: row_id.into(),
        }
    }

    /// Whether the engines recover from this error on their own
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ViewError::InvalidPage { .. } | ViewError::MalformedFilter { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ViewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        assert!(ViewError::InvalidPage {
            page: 9,
            last_page: 2
        }
        .is_recoverable());
        assert!(!ViewError::invalid_column("age").is_recoverable());
        assert!(!ViewError::invalid_row("7").is_recoverable());
    }

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = ViewError::invalid_column("age");
        assert_eq!(err.to_string(), "unknown column 'age'");

        let err = ViewError::MalformedFilter {
            column_id: "status".to_string(),
            value: "bogus".to_string(),
            reason: "not one of the column's options".to_string(),
        };
        assert!(err.to_string().contains("status"));
        assert!(err.to_string().contains("bogus"));
    }
}
