//! View-state engine for interactive data tables
//!
//! Given a column set, a dataset and a [`ViewState`](state::ViewState), the
//! engines compute which rows and columns are visible and how each user intent
//! changes the state. Rendering is left to the host.

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod logging;
pub mod state;

pub use config::TableConfig;
pub use data::{Column, ColumnFilter, ColumnModel, DataValue, FilterOption, Row, RowModel};
pub use engine::{Projection, ProjectionBuilder};
pub use error::{Result, ViewError};
pub use state::{TableAction, TableActions, TableController, TableReducer, ViewState};
