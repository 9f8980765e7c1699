//! Data layer: cell values, the column and row models, and file loaders
//!
//! The models are supplied by the host per render cycle and are never
//! mutated by the engines.

pub mod column;
pub mod loaders;
pub mod row;
pub mod value;

pub use column::{Column, ColumnFilter, ColumnModel, FilterOption};
pub use row::{Row, RowModel};
pub use value::DataValue;
