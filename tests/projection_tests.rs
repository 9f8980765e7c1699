#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use table_view::config::{MatchStrategy, SortMode};
    use table_view::data::loaders::{load_table, read_csv};
    use table_view::engine::pagination;
    use table_view::state::{Filter, OrderingEntry, Sort, SortDirection};
    use table_view::{
        Column, ColumnFilter, ColumnModel, DataValue, ProjectionBuilder, Row, TableConfig,
        ViewError, ViewState,
    };

    fn demo_path(filename: &str) -> PathBuf {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("demos");
        path.push(filename);
        path
    }

    fn name_age() -> (ColumnModel, Vec<Row>) {
        let columns = ColumnModel::new(vec![
            Column::new("name", "Name").with_filter(ColumnFilter::default()),
            Column::new("age", "Age"),
        ])
        .unwrap();
        let rows = vec![
            Row::new("1").with_value("name", "Bo").with_value("age", "30"),
            Row::new("2").with_value("name", "Al").with_value("age", "40"),
        ];
        (columns, rows)
    }

    fn ids(rows: &[&Row]) -> Vec<String> {
        rows.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_filter_example_from_two_rows() {
        let (columns, rows) = name_age();
        let config = TableConfig::default();
        let mut state = ViewState::new(&columns, &config);
        state.filters = vec![Filter::new("name", "Bo")];
        state.pagination.page = 1;
        state.pagination.page_size = 10;

        let projection = ProjectionBuilder::new(&columns, &config)
            .build(&rows, &state)
            .unwrap();

        assert_eq!(ids(&projection.visible_rows), vec!["1"]);
        assert_eq!(projection.total_filtered_count, 1);
        assert_eq!(projection.total_count, 2);
    }

    #[test]
    fn test_pagination_uses_filtered_count() {
        let columns = ColumnModel::new(vec![
            Column::new("n", "N").with_filter(ColumnFilter::default())
        ])
        .unwrap();
        let rows: Vec<Row> = (0..45)
            .map(|i| Row::new(i.to_string()).with_value("n", if i % 3 == 0 { "fizz" } else { "x" }))
            .collect();
        let config = TableConfig::default();
        let mut state = ViewState::new(&columns, &config);
        state.filters = vec![Filter::new("n", "fizz")];
        state.pagination.page = 2;

        let projection = ProjectionBuilder::new(&columns, &config)
            .build(&rows, &state)
            .unwrap();
        assert_eq!(projection.total_filtered_count, 15);
        assert_eq!(projection.page_count(), 2);
        assert_eq!(projection.visible_rows.len(), 5);
        assert_eq!(projection.pagination.as_ref().unwrap().total_items, 15);
    }

    #[test]
    fn test_shrinking_filter_clamps_instead_of_blank_page() {
        let (columns, rows) = name_age();
        let config = TableConfig::default();
        let mut state = ViewState::new(&columns, &config);
        state.pagination.page_size = 1;
        state.pagination.page = 2;
        state.filters = vec![Filter::new("name", "Bo")];

        let projection = ProjectionBuilder::new(&columns, &config)
            .build(&rows, &state)
            .unwrap();
        assert_eq!(projection.pagination.as_ref().unwrap().page, 1);
        assert_eq!(ids(&projection.visible_rows), vec!["1"]);

        // The raw slice helper on its own just comes back empty
        let filtered: Vec<&Row> = rows.iter().take(1).collect();
        assert!(pagination::slice(&filtered, Some(&state.pagination)).is_empty());
    }

    #[test]
    fn test_malformed_option_filter_is_ignored() {
        let table = load_table(demo_path("people.json")).unwrap();
        let columns = ColumnModel::new(table.columns).unwrap();
        let config = TableConfig::default();
        let mut state = ViewState::new(&columns, &config);
        state.filters = vec![
            Filter::new("status", "pending"),
            Filter::new("city", "Oslo"),
        ];

        let projection = ProjectionBuilder::new(&columns, &config)
            .build(&table.rows, &state)
            .unwrap();

        // Only the city filter applies
        assert_eq!(ids(&projection.visible_rows), vec!["1", "5", "9"]);
        assert_eq!(projection.ignored_filters.len(), 1);
        assert!(matches!(
            &projection.ignored_filters[0],
            ViewError::MalformedFilter { column_id, .. } if column_id == "status"
        ));
    }

    #[test]
    fn test_option_filter_matches_exact_id() {
        let table = load_table(demo_path("people.json")).unwrap();
        let columns = ColumnModel::new(table.columns).unwrap();
        let config = TableConfig::default();
        let mut state = ViewState::new(&columns, &config);
        state.filters = vec![Filter::new("status", "inactive")];

        let projection = ProjectionBuilder::new(&columns, &config)
            .build(&table.rows, &state)
            .unwrap();
        assert_eq!(ids(&projection.visible_rows), vec!["2", "5", "8", "11"]);
        assert!(projection.ignored_filters.is_empty());
    }

    #[test]
    fn test_unknown_filter_column_is_surfaced() {
        let (columns, rows) = name_age();
        let config = TableConfig::default();
        let mut state = ViewState::new(&columns, &config);
        state.filters = vec![Filter::new("ghost", "x")];

        let err = ProjectionBuilder::new(&columns, &config)
            .build(&rows, &state)
            .unwrap_err();
        assert_eq!(err, ViewError::invalid_column("ghost"));
    }

    #[test]
    fn test_hidden_sorted_column_keeps_sort() {
        let table = load_table(demo_path("people.json")).unwrap();
        let columns = ColumnModel::new(table.columns).unwrap();
        let mut config = TableConfig::default();
        config.sort.mode = SortMode::Local;
        let mut state = ViewState::new(&columns, &config);
        state.sort = Sort::new("age", SortDirection::Desc);
        state.ordering = vec![
            OrderingEntry::new("name"),
            OrderingEntry::hidden("age"),
            OrderingEntry::new("status"),
            OrderingEntry::new("city"),
        ];

        let projection = ProjectionBuilder::new(&columns, &config)
            .build(&table.rows, &state)
            .unwrap();

        let visible: Vec<_> = projection.visible_columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(visible, vec!["name", "status", "city"]);
        assert!(projection.header.iter().all(|h| !h.is_sort_header));
        // Hal (61) is the oldest
        assert_eq!(projection.visible_rows[0].id, "8");
        assert!(projection.status_line().contains("Sort: age ↓"));
    }

    #[test]
    fn test_remote_sort_keeps_host_order() {
        let table = load_table(demo_path("people.json")).unwrap();
        let columns = ColumnModel::new(table.columns).unwrap();
        let config = TableConfig::default();
        let mut state = ViewState::new(&columns, &config);
        state.sort = Sort::new("age", SortDirection::Asc);

        let projection = ProjectionBuilder::new(&columns, &config)
            .build(&table.rows, &state)
            .unwrap();
        assert_eq!(projection.visible_rows[0].id, "1");
        assert_eq!(projection.visible_rows.len(), 10);
    }

    #[test]
    fn test_case_insensitive_strategy() {
        let (columns, rows) = name_age();
        let mut config = TableConfig::default();
        let mut state = ViewState::new(&columns, &config);
        state.filters = vec![Filter::new("name", "bo")];

        let builder = ProjectionBuilder::new(&columns, &config);
        assert!(builder.build(&rows, &state).unwrap().visible_rows.is_empty());

        config.filter.strategy = MatchStrategy::CaseInsensitive;
        let builder = ProjectionBuilder::new(&columns, &config);
        let projection = builder.build(&rows, &state).unwrap();
        assert_eq!(ids(&projection.visible_rows), vec!["1"]);
    }

    #[test]
    fn test_missing_values_render_empty() {
        let table = load_table(demo_path("people.json")).unwrap();
        let columns = ColumnModel::new(table.columns).unwrap();
        let config = TableConfig::default();
        let state = ViewState::new(&columns, &config);

        let projection = ProjectionBuilder::new(&columns, &config)
            .build(&table.rows, &state)
            .unwrap();
        let di = projection.visible_rows[3];
        assert_eq!(di.id, "4");
        let cells = projection.cells(di);
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[3], &DataValue::Null);
        assert_eq!(cells[3].to_string(), "");
    }

    #[test]
    fn test_filter_matches_csv_text_as_written() {
        let table = read_csv("id,code\na,007\nb,7\n".as_bytes()).unwrap();
        let columns = ColumnModel::new(table.columns).unwrap();
        let config = TableConfig::default();
        let mut state = ViewState::new(&columns, &config);
        state.filters = vec![Filter::new("code", "007")];

        let projection = ProjectionBuilder::new(&columns, &config)
            .build(&table.rows, &state)
            .unwrap();
        assert_eq!(ids(&projection.visible_rows), vec!["a"]);
        assert_eq!(projection.cells(projection.visible_rows[0])[0].to_string(), "007");
    }

    #[test]
    fn test_csv_demo_loads() {
        let table = load_table(demo_path("people.csv")).unwrap();
        let columns = ColumnModel::new(table.columns).unwrap();
        let ids: Vec<_> = columns.ids().collect();
        assert_eq!(ids, vec!["name", "age", "city", "member"]);
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[0].value("age"), &DataValue::Integer(30));
    }
}
