use anyhow::{bail, Context, Result};
use crossterm::style::Stylize;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::fs;
use std::path::{Path, PathBuf};

use table_view::data::loaders::load_table;
use table_view::engine::{BatchAction, RowAction};
use table_view::logging::init_tracing_stderr;
use table_view::state::HostRequest;
use table_view::{TableAction, TableConfig, TableController};

mod table_display;

const USAGE: &str = "\
Usage: table-view <table.json|table.csv> [options]

Options:
  --actions <file.json>   Replay a script of table actions before printing
  --config <file.toml>    Use this config instead of the default location
  --export <file.csv>     Write the visible page as CSV
  --generate-config       Write a commented default config and exit
  --verbose               Debug logging on stderr
  --help                  Show this message";

/// An action script: either a bare array of actions or an object that also
/// declares the row and batch actions offered by the table
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActionScript {
    #[serde(default)]
    row_actions: Vec<RowAction>,
    #[serde(default)]
    batch_actions: Vec<BatchAction>,
    #[serde(default)]
    actions: Vec<TableAction>,
}

fn load_script(path: &Path) -> Result<ActionScript> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read action script: {:?}", path))?;
    let json: JsonValue = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse action script: {:?}", path))?;

    let script = match json {
        JsonValue::Array(_) => ActionScript {
            actions: serde_json::from_value(json)?,
            ..Default::default()
        },
        JsonValue::Object(_) => serde_json::from_value(json)?,
        _ => bail!("Action script must be an array or an object"),
    };
    Ok(script)
}

fn flag_value(args: &[String], flag: &str) -> Option<PathBuf> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|pos| args.get(pos + 1))
        .map(PathBuf::from)
}

/// First positional argument, skipping the values of flags that take one
fn data_file(args: &[String]) -> Option<PathBuf> {
    const VALUE_FLAGS: [&str; 3] = ["--actions", "--config", "--export"];

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with("--") {
            return Some(PathBuf::from(arg));
        }
    }
    None
}

fn generate_config() -> Result<()> {
    let path = TableConfig::get_config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Error creating config directory: {:?}", parent))?;
    }
    fs::write(&path, TableConfig::create_default_with_comments())
        .with_context(|| format!("Error writing config file: {:?}", path))?;
    println!("Configuration file created at: {:?}", path);
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{USAGE}");
        return Ok(());
    }

    init_tracing_stderr(args.iter().any(|a| a == "--verbose"));

    if args.iter().any(|a| a == "--generate-config") {
        return generate_config();
    }

    let Some(table_path) = data_file(&args) else {
        bail!("No table file given\n\n{USAGE}");
    };

    let config = match flag_value(&args, "--config") {
        Some(path) => TableConfig::load_from(&path)
            .with_context(|| format!("Failed to load config: {:?}", path))?,
        None => TableConfig::load()?,
    };

    let table = load_table(&table_path)?;
    let script = match flag_value(&args, "--actions") {
        Some(path) => load_script(&path)?,
        None => ActionScript::default(),
    };

    let mut controller = TableController::new(table.columns, table.rows, config)?
        .with_row_actions(script.row_actions)
        .with_batch_actions(script.batch_actions);

    for action in script.actions {
        let name = action.name();
        match controller.dispatch(action) {
            Ok(Some(HostRequest::RowAction(request))) => println!(
                "{}",
                format!("row action '{}' on row {}", request.action_id, request.row_id).cyan()
            ),
            Ok(Some(HostRequest::BatchAction(request))) => println!(
                "{}",
                format!(
                    "batch action '{}' on rows {}",
                    request.action_id,
                    request.row_ids.join(", ")
                )
                .cyan()
            ),
            Ok(None) => {}
            Err(e) => eprintln!("{}", format!("{name} rejected: {e}").yellow()),
        }
    }

    let projection = controller.projection()?;
    table_display::display_projection(&projection);

    if let Some(path) = flag_value(&args, "--export") {
        table_display::export_to_csv(&projection, &path)?;
    }

    Ok(())
}
