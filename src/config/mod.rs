//! Configuration module
//!
//! Table options, per-engine settings and TOML loading.

#[allow(clippy::module_inception)]
pub mod config;

pub use config::{
    FilterConfig, HistoryConfig, MatchStrategy, PaginationConfig, SelectionConfig,
    SelectionPolicy, SortConfig, SortMode, TableConfig, TableOptions,
};
