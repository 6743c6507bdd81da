//! Legacy batch-load document.
//!
//! Older tooling consumed a single JSON file of the form
//! `{ "<table>": [ {"PutRequest": {"Item": {...}}}, ... ] }`, indented with
//! four spaces.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{CoreError, Result};
use crate::item::{ItemForm, WriteItem};
use crate::table::TableName;

/// Build the legacy document as a JSON value.
pub fn legacy_document(table: &TableName, items: &[WriteItem]) -> Result<Value> {
    let entries = items
        .iter()
        .map(|item| item.envelope(ItemForm::Legacy))
        .collect::<serde_json::Result<Vec<_>>>()?;

    let mut document = Map::new();
    document.insert(table.to_string(), Value::Array(entries));
    Ok(Value::Object(document))
}

/// Render the legacy document with four-space indentation.
pub fn render_legacy_document(table: &TableName, items: &[WriteItem]) -> Result<String> {
    let document = legacy_document(table, items)?;

    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    document.serialize(&mut serializer)?;

    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

pub fn write_legacy_document(
    path: impl AsRef<Path>,
    table: &TableName,
    items: &[WriteItem],
) -> Result<()> {
    let path = path.as_ref();
    let rendered = render_legacy_document(table, items)?;
    fs::write(path, rendered).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        path = %path.display(),
        table = %table,
        items = items.len(),
        "Wrote legacy batch-load document"
    );
    Ok(())
}
