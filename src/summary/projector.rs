use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{Result, RollupError};
use crate::summary::markers::{PROPERTY_LABELS, TOTAL, level_marker};
use crate::summary::tree::{ColumnId, Properties, SummaryTree};

/// One member row of a projected table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectedRow {
    pub properties: Properties,
    /// One cell per projected column, empty when the column has no such member.
    pub values: Vec<String>,
    pub total: String,
}

/// A flat view of part of the tree: member properties, one value column per
/// component and the row totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectedTable {
    /// Name written in the level header column when the table is exported.
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<ProjectedRow>,
}

impl ProjectedTable {
    /// Property labels, component names, then the total label.
    pub fn header_labels(&self) -> Vec<String> {
        PROPERTY_LABELS
            .iter()
            .map(|label| label.to_string())
            .chain(self.columns.iter().cloned())
            .chain(std::iter::once(TOTAL.to_string()))
            .collect()
    }

    /// Header and data rows for on-screen tables.
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::with_capacity(self.rows.len() + 1);
        rows.push(self.header_labels());
        for row in &self.rows {
            rows.push(
                row.properties
                    .cells()
                    .iter()
                    .map(|cell| cell.to_string())
                    .chain(row.values.iter().cloned())
                    .chain(std::iter::once(row.total.clone()))
                    .collect(),
            );
        }
        rows
    }

    /// Rows in the layout of a top-level summary sheet, ready to be written back.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.display_rows()
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                let first = if index == 0 {
                    level_marker(1)
                } else {
                    self.title.clone()
                };
                std::iter::once(first).chain(row).collect()
            })
            .collect()
    }
}

/// Items of one column, lined up with the row totals by position.
pub fn project_column(tree: &SummaryTree, id: ColumnId) -> Result<ProjectedTable> {
    let column = tree.get(id).ok_or(RollupError::UnknownColumn(id.index()))?;
    let total = tree.total();

    let rows = column
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| ProjectedRow {
            properties: item.properties.clone(),
            values: vec![item.value.clone()],
            total: total.get(index).unwrap_or_default().to_string(),
        })
        .collect();

    Ok(ProjectedTable {
        title: column.level_name.clone(),
        columns: vec![column.name.clone()],
        rows,
    })
}

/// Every column of `level` side by side, one row per member of the top-level columns.
///
/// Cells are matched on equal properties. When a property set occurs several
/// times, the n-th row with it takes the column's n-th item with it.
pub fn project_level(tree: &SummaryTree, level: u8) -> ProjectedTable {
    let keys: Vec<&Properties> = tree
        .roots()
        .first()
        .and_then(|id| tree.get(*id))
        .map(|column| column.properties().collect())
        .unwrap_or_default();

    let mut seen: HashMap<&Properties, usize> = HashMap::new();
    let occurrences: Vec<usize> = keys
        .iter()
        .map(|key| {
            let count = seen.entry(*key).or_insert(0);
            *count += 1;
            *count - 1
        })
        .collect();

    let columns: Vec<_> = tree
        .columns_at(level)
        .iter()
        .filter_map(|id| tree.get(*id))
        .collect();

    let values_by_column: Vec<IndexMap<&Properties, Vec<&str>>> = columns
        .iter()
        .map(|column| {
            let mut values: IndexMap<&Properties, Vec<&str>> = IndexMap::new();
            for item in &column.items {
                values
                    .entry(&item.properties)
                    .or_default()
                    .push(item.value.as_str());
            }
            values
        })
        .collect();

    let rows = keys
        .iter()
        .zip(&occurrences)
        .enumerate()
        .map(|(index, (key, occurrence))| ProjectedRow {
            properties: (*key).clone(),
            values: values_by_column
                .iter()
                .map(|values| {
                    values
                        .get(*key)
                        .and_then(|cells| cells.get(*occurrence))
                        .map(|cell| cell.to_string())
                        .unwrap_or_default()
                })
                .collect(),
            total: tree.total().get(index).unwrap_or_default().to_string(),
        })
        .collect();

    ProjectedTable {
        title: tree.root_name().unwrap_or_default().to_string(),
        columns: columns.iter().map(|column| column.name.clone()).collect(),
        rows,
    }
}
