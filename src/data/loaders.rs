//! Loaders that turn JSON and CSV files into a column set and a dataset
//!
//! Files without explicit column metadata get one sortable, text-filterable
//! column per field. Row ids come from an `id` field when present and from the
//! 1-based record number otherwise.

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

use crate::data::column::{Column, ColumnFilter};
use crate::data::row::Row;
use crate::data::value::DataValue;

const ID_FIELD: &str = "id";
const DEFAULT_COLUMN_SIZE: u16 = 100;

/// Columns plus rows as read from disk
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableData {
    pub columns: Vec<Column>,
    #[serde(alias = "data")]
    pub rows: Vec<Row>,
}

/// Load a table file, picking the format from the extension
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<TableData> {
    let path = path.as_ref();
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("json") => load_json_table(path),
        Some("csv") => load_csv_table(path),
        other => bail!("Unsupported table file extension: {:?}", other),
    }
}

/// Load a JSON table.
///
/// Accepts either `{"columns": [...], "rows": [...]}` or a bare array of
/// objects.
pub fn load_json_table<P: AsRef<Path>>(path: P) -> Result<TableData> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open JSON file: {:?}", path.as_ref()))?;
    let json: JsonValue = serde_json::from_reader(BufReader::new(file))
        .with_context(|| "Failed to parse JSON file")?;
    let table = json_to_table(json)?;
    info!(
        target: "loader",
        "Loaded {} columns and {} rows from {:?}",
        table.columns.len(),
        table.rows.len(),
        path.as_ref()
    );
    Ok(table)
}

pub fn json_to_table(json: JsonValue) -> Result<TableData> {
    match json {
        JsonValue::Object(_) => {
            serde_json::from_value(json).context("JSON table must have 'columns' and 'rows'")
        }
        JsonValue::Array(records) => records_to_table(&records),
        _ => bail!("JSON table must be an object or an array of objects"),
    }
}

fn records_to_table(records: &[JsonValue]) -> Result<TableData> {
    let Some(first) = records.first() else {
        return Ok(TableData::default());
    };
    let first = first
        .as_object()
        .context("JSON data must be an array of objects")?;

    let columns: Vec<Column> = first
        .keys()
        .filter(|key| key.as_str() != ID_FIELD)
        .map(|key| default_column(key))
        .collect();

    let mut rows = Vec::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        let obj = record
            .as_object()
            .with_context(|| format!("Record {} is not an object", position + 1))?;
        let id = obj
            .get(ID_FIELD)
            .map(|v| DataValue::from(v).to_string())
            .unwrap_or_else(|| (position + 1).to_string());

        let mut row = Row::new(id);
        for (key, value) in obj {
            if key != ID_FIELD && !value.is_null() {
                row.values.insert(key.clone(), DataValue::from(value));
            }
        }
        rows.push(row);
    }

    debug!(target: "loader", "Inferred {} columns from JSON records", columns.len());
    Ok(TableData { columns, rows })
}

/// Load a CSV file with a header line
pub fn load_csv_table<P: AsRef<Path>>(path: P) -> Result<TableData> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open CSV file: {:?}", path.as_ref()))?;
    let table = read_csv(file)?;
    info!(
        target: "loader",
        "Loaded {} columns and {} rows from {:?}",
        table.columns.len(),
        table.rows.len(),
        path.as_ref()
    );
    Ok(table)
}

pub fn read_csv<R: std::io::Read>(reader: R) -> Result<TableData> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = reader.headers()?.clone();
    let id_position = headers.iter().position(|h| h == ID_FIELD);

    let columns: Vec<Column> = headers
        .iter()
        .filter(|h| *h != ID_FIELD)
        .map(default_column)
        .collect();

    let mut rows = Vec::new();
    for (position, record) in reader.records().enumerate() {
        let record = record?;
        let id = id_position
            .and_then(|idx| record.get(idx))
            .map(str::to_string)
            .unwrap_or_else(|| (position + 1).to_string());

        let mut row = Row::new(id);
        for (col_idx, field) in record.iter().enumerate() {
            if Some(col_idx) == id_position || field.is_empty() {
                continue;
            }
            if let Some(header) = headers.get(col_idx) {
                row.values.insert(header.to_string(), infer_value(field));
            }
        }
        rows.push(row);
    }

    Ok(TableData { columns, rows })
}

fn default_column(name: &str) -> Column {
    Column::new(name, name)
        .with_size(DEFAULT_COLUMN_SIZE)
        .sortable()
        .with_filter(ColumnFilter::default())
}

/// Type a CSV field as boolean, integer, float or text.
///
/// A typed value is only kept when it displays exactly as the field was
/// written, so `007`, `1e3` or `TRUE` stay text and filters see what the
/// file shows.
fn infer_value(field: &str) -> DataValue {
    match field {
        "true" => return DataValue::Boolean(true),
        "false" => return DataValue::Boolean(false),
        _ => {}
    }
    if let Ok(i) = field.parse::<i64>() {
        if i.to_string() == field {
            return DataValue::Integer(i);
        }
    } else if let Ok(f) = field.parse::<f64>() {
        if f.is_finite() && f.to_string() == field {
            return DataValue::Float(f);
        }
    }
    DataValue::String(field.to_string())
}
