use std::fs;
use tempfile::TempDir;

use table_view::config::{MatchStrategy, SelectionPolicy, SortMode};
use table_view::state::ViewState;
use table_view::{Column, ColumnModel, TableConfig};

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = TableConfig::default();
    config.options.has_row_actions = true;
    config.pagination.page_size = 20;
    config.filter.strategy = MatchStrategy::Fuzzy;
    config.selection.policy = SelectionPolicy::ClearOnFilterChange;
    config.sort.mode = SortMode::Local;
    config.history.max_events = 5;

    config.save_to(&path).unwrap();
    let loaded = TableConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_demo_config_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join("config.toml");
    let config = TableConfig::load_from(path).unwrap();

    assert!(config.options.has_row_expansion);
    assert_eq!(config.pagination.page_size, 5);
    assert_eq!(config.pagination.page_sizes, vec![5, 10, 20]);
    assert_eq!(config.filter.strategy, MatchStrategy::CaseInsensitive);
    assert_eq!(config.sort.mode, SortMode::Local);
    // Not in the file
    assert_eq!(config.history.max_events, 100);
}

#[test]
fn test_invalid_files_are_errors() {
    let dir = TempDir::new().unwrap();

    let bad_strategy = dir.path().join("strategy.toml");
    fs::write(&bad_strategy, "[filter]\nstrategy = \"telepathy\"\n").unwrap();
    assert!(TableConfig::load_from(&bad_strategy).is_err());

    let zero_size = dir.path().join("zero.toml");
    fs::write(&zero_size, "[pagination]\npage_sizes = [0, 10]\n").unwrap();
    assert!(TableConfig::load_from(&zero_size).is_err());

    assert!(TableConfig::load_from(dir.path().join("missing.toml")).is_err());
}

#[test]
fn test_view_state_starts_from_config() {
    let config = TableConfig::from_toml_str("[pagination]\npage_size = 30\n").unwrap();
    let columns = ColumnModel::new(vec![Column::new("a", "A"), Column::new("b", "B")]).unwrap();

    let state = ViewState::new(&columns, &config);
    assert_eq!(state.pagination.page, 1);
    assert_eq!(state.pagination.page_size, 30);
    assert_eq!(state.pagination.page_sizes, vec![10, 20, 30]);
    assert_eq!(state.ordering.len(), 2);
    assert!(state.ordering.iter().all(|e| !e.is_hidden));
}
