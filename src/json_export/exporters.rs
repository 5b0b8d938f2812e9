use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Serialize;

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::json_export::converters::process_cell_value;
use crate::json_export::types::{JsonColumn, JsonItem, JsonScope, JsonSummary, OrderedRecords};
use crate::summary::{ColumnId, ProjectedTable, SummaryTree, project_level};

pub fn serialize_to_json<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data).context("Failed to serialize data to JSON")
}

pub fn write_json_to_file<T: Serialize>(data: &T, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;

    let json_string = serialize_to_json(data)?;

    file.write_all(json_string.as_bytes())
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    Ok(())
}

fn column_to_json(tree: &SummaryTree, id: ColumnId) -> Option<JsonColumn> {
    let column = tree.get(id)?;

    let items = column
        .items
        .iter()
        .map(|item| JsonItem {
            value: process_cell_value(&item.value),
            material: item.properties.material.clone(),
            shape: item.properties.shape.clone(),
            dimension: item.properties.dimension.clone(),
        })
        .collect();

    let children = tree
        .children(id)
        .iter()
        .filter_map(|child| column_to_json(tree, *child))
        .collect();

    Some(JsonColumn {
        name: column.name.clone(),
        level: column.level,
        level_name: column.level_name.clone(),
        items,
        children,
    })
}

// Nested columns from the level-1 components down
pub fn tree_to_json(tree: &SummaryTree) -> Vec<JsonColumn> {
    tree.roots()
        .iter()
        .filter_map(|id| column_to_json(tree, *id))
        .collect()
}

// One ordered record per table row, keyed by the display header
pub fn table_to_records(table: &ProjectedTable) -> OrderedRecords {
    let mut rows = table.display_rows().into_iter();
    let Some(headers) = rows.next() else {
        return Vec::new();
    };

    rows.map(|row| {
        let mut record = IndexMap::with_capacity(headers.len());
        for (index, (header, cell)) in headers.iter().zip(&row).enumerate() {
            // Property cells stay text, e.g. a dimension of "19.0"
            let value = if index < 3 {
                serde_json::Value::String(cell.clone())
            } else {
                process_cell_value(cell)
            };
            record.insert(header.clone(), value);
        }
        record
    })
    .collect()
}

pub fn generate_summary_json(tree: &SummaryTree, levels: &[u8], scope: JsonScope) -> JsonSummary {
    let include_tree = matches!(scope, JsonScope::Tree | JsonScope::All);
    let include_levels = matches!(scope, JsonScope::Levels | JsonScope::All);

    let levels = include_levels.then(|| {
        let mut tables = IndexMap::with_capacity(levels.len());
        for level in levels {
            let table = project_level(tree, *level);
            tables.insert(level.to_string(), table_to_records(&table));
        }
        tables
    });

    JsonSummary {
        name: tree.root_name().map(str::to_string),
        total: include_tree.then(|| tree.total().iter().map(process_cell_value).collect()),
        columns: include_tree.then(|| tree_to_json(tree)),
        levels,
    }
}
