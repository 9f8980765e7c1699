//! View-state engines
//!
//! Each module is a set of pure functions over the view state. The
//! [`projection`] module composes them into what the renderer shows.

pub mod expansion;
pub mod filter;
pub mod ordering;
pub mod pagination;
pub mod projection;
pub mod row_actions;
pub mod selection;
pub mod sort;

pub use filter::{FilterEngine, FilterOutcome};
pub use projection::{
    ColumnChooserEntry, FilterCell, HeaderCell, Projection, ProjectionBuilder, RowView,
    ToolbarState,
};
pub use row_actions::{
    BatchAction, BatchActionRequest, RowAction, RowActionLayout, RowActionRequest,
};
