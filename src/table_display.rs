use anyhow::Result;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use crossterm::style::Stylize;
use std::path::Path;

use table_view::engine::projection::Projection;
use table_view::state::ActiveBar;

const CHECKED: &str = "[x]";
const UNCHECKED: &str = "[ ]";
const INDETERMINATE: &str = "[-]";

fn select_all_marker(projection: &Projection) -> &'static str {
    match &projection.selection {
        Some(s) if s.is_select_all_selected => CHECKED,
        Some(s) if s.is_select_all_indeterminate => INDETERMINATE,
        _ => UNCHECKED,
    }
}

pub fn display_projection(projection: &Projection) {
    print_toolbar(projection);

    if projection.visible_rows.is_empty() {
        println!("{}", "No rows to show.".yellow());
        println!("{}", projection.status_line().green());
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let has_selection = projection.selection.is_some();
    let mut headers: Vec<Cell> = Vec::new();
    if has_selection {
        headers.push(Cell::new(select_all_marker(projection)));
    }
    headers.extend(projection.header.iter().map(|h| {
        let arrow = h.sort_direction.arrow();
        let label = if arrow.is_empty() {
            h.column.name.clone()
        } else {
            format!("{} {}", h.column.name, arrow)
        };
        Cell::new(label).add_attribute(Attribute::Bold)
    }));
    table.set_header(headers);

    if let Some(filter_row) = &projection.filter_row {
        let mut cells: Vec<String> = Vec::new();
        if has_selection {
            cells.push(String::new());
        }
        cells.extend(filter_row.iter().map(|cell| match (cell.value, cell.is_filterable) {
            (Some(value), _) => format!("={value}"),
            (None, true) => cell.placeholder_text.unwrap_or("...").to_string(),
            (None, false) => String::new(),
        }));
        table.add_row(cells);
    }

    for view in projection.row_views() {
        let mut cells: Vec<String> = Vec::new();
        if has_selection {
            let marker = if view.is_selected { CHECKED } else { UNCHECKED };
            cells.push(marker.to_string());
        }
        cells.extend(view.cells.iter().map(|v| v.to_string()));
        table.add_row(cells);
        if view.is_expanded {
            table.add_row(vec![format!("  row {} expanded", view.row.id)]);
        }
    }

    println!("{table}");
    for ignored in &projection.ignored_filters {
        println!("{}", format!("warning: {ignored}").yellow());
    }
    println!("{}", projection.status_line().green());
}

fn print_toolbar(projection: &Projection) {
    let toolbar = &projection.toolbar;
    let mut buttons = Vec::new();
    if toolbar.show_filter_toggle {
        buttons.push(bar_button("Filter", toolbar.active_bar == ActiveBar::Filter));
    }
    buttons.push(bar_button("Columns", toolbar.active_bar == ActiveBar::Column));
    if toolbar.show_clear_all_filters {
        buttons.push("(Clear all filters)".to_string());
    }
    if toolbar.show_batch_actions {
        buttons.push(format!("(Batch: {} selected)", toolbar.selected_count));
    }
    println!("{}", buttons.join(" "));

    if let Some(chooser) = &projection.column_chooser {
        let entries: Vec<String> = chooser
            .iter()
            .map(|e| {
                let marker = if e.is_hidden { UNCHECKED } else { CHECKED };
                format!("{} {}", marker, e.name)
            })
            .collect();
        println!("Columns: {}", entries.join("  "));
    }
}

fn bar_button(label: &str, active: bool) -> String {
    if active {
        format!("<{label}>")
    } else {
        format!("[{label}]")
    }
}

/// Write the visible page, visible columns only, as CSV
pub fn export_to_csv(projection: &Projection, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut headers = vec!["id".to_string()];
    headers.extend(projection.visible_columns.iter().map(|c| c.id.clone()));
    wtr.write_record(&headers)?;

    for &row in &projection.visible_rows {
        let mut record = vec![row.id.clone()];
        record.extend(projection.cells(row).iter().map(|v| v.to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    println!(
        "{}",
        format!(
            "Exported {} rows to {}",
            projection.visible_rows.len(),
            path.display()
        )
        .green()
    );
    Ok(())
}
