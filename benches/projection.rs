use criterion::{black_box, criterion_group, criterion_main, Criterion};
use table_view::config::{MatchStrategy, SortMode};
use table_view::state::{Filter, Sort, SortDirection};
use table_view::{
    Column, ColumnFilter, ColumnModel, ProjectionBuilder, Row, TableConfig, ViewState,
};

fn create_test_data(rows: usize) -> (ColumnModel, Vec<Row>) {
    let columns = ColumnModel::new(vec![
        Column::new("book", "Book")
            .sortable()
            .with_filter(ColumnFilter::text("Book")),
        Column::new("value", "Value").sortable(),
        Column::new("status", "Status").with_filter(ColumnFilter::default()),
    ])
    .unwrap();

    let books = [
        "Commodities Trading",
        "Equity Trading",
        "FX Trading",
        "Bond Trading",
        "Derivatives",
        "Options",
    ];

    let rows = (0..rows)
        .map(|i| {
            Row::new(i.to_string())
                .with_value("book", books[i % books.len()])
                .with_value("value", ((i * 7919) % 100_000) as i64)
                .with_value("status", format!("STATUS_{}", i % 5))
        })
        .collect();

    (columns, rows)
}

fn benchmark_projection(c: &mut Criterion) {
    let data_10k = create_test_data(10_000);
    let data_100k = create_test_data(100_000);

    let mut group = c.benchmark_group("projection");

    for (label, (columns, rows)) in [("10k_rows", &data_10k), ("100k_rows", &data_100k)] {
        let config = TableConfig::default();
        let mut state = ViewState::new(columns, &config);
        state.filters = vec![Filter::new("book", "Trading")];

        group.bench_function(format!("filter_{label}"), |b| {
            let builder = ProjectionBuilder::new(columns, &config);
            b.iter(|| {
                let projection = builder.build(black_box(rows), black_box(&state)).unwrap();
                black_box(projection.total_filtered_count)
            })
        });

        let mut local = TableConfig::default();
        local.sort.mode = SortMode::Local;
        local.filter.strategy = MatchStrategy::CaseInsensitive;
        let mut sorted_state = state.clone();
        sorted_state.sort = Sort::new("value", SortDirection::Desc);

        group.bench_function(format!("filter_sort_{label}"), |b| {
            let builder = ProjectionBuilder::new(columns, &local);
            b.iter(|| {
                let projection = builder
                    .build(black_box(rows), black_box(&sorted_state))
                    .unwrap();
                black_box(projection.visible_rows.len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_projection);
criterion_main!(benches);
