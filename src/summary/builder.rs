use tracing::{debug, warn};

use crate::error::{Result, RollupError};
use crate::summary::classifier::ColumnLayout;
use crate::summary::markers::parse_level;
use crate::summary::splitter::Sheet;
use crate::summary::tree::{Column, ColumnId, Item, Properties, SummaryTree};

/// Builds the component tree one sheet at a time.
///
/// Parents are looked up among the columns already built one level up, so
/// sheets have to be fed shallowest level first.
#[derive(Debug)]
pub struct HierarchyBuilder {
    tree: SummaryTree,
    max_level: u8,
}

impl HierarchyBuilder {
    pub fn new(max_level: u8) -> Self {
        Self {
            tree: SummaryTree::new(),
            max_level,
        }
    }

    /// Add one column per data column of `sheet`.
    pub fn add_sheet(&mut self, sheet: &Sheet, layout: &ColumnLayout<'_>) -> Result<Vec<ColumnId>> {
        if layout.data_cols().is_empty() {
            debug!(sheet = sheet.number(), "Sheet has no component columns");
            return Ok(Vec::new());
        }

        let level = sheet_level(sheet, layout, self.max_level)?;
        let level_name = layout
            .level_marker()
            .and_then(|marker| marker.get(1))
            .cloned()
            .unwrap_or_default();

        let mut ids = Vec::with_capacity(layout.data_cols().len());
        for col in layout.data_cols() {
            let mut column = Column::new(col[0].clone(), level, level_name.clone());
            column.items = layout
                .item_rows(sheet.row_count())
                .map(|row| Item {
                    value: col[row].clone(),
                    properties: Properties::from(layout.properties_at(row)),
                })
                .collect();

            let parent = self.resolve_parent(&column)?;
            if self.tree.find(level, &column.name).is_some() {
                warn!(
                    name = %column.name,
                    depth = level,
                    sheet = sheet.number(),
                    "Duplicate component name; children will attach to the first one"
                );
            }

            debug!(
                name = %column.name,
                depth = level,
                level_name = %column.level_name,
                items = column.items.len(),
                "Built column"
            );
            ids.push(self.tree.insert(column, parent)?);
        }

        Ok(ids)
    }

    fn resolve_parent(&self, column: &Column) -> Result<Option<ColumnId>> {
        if column.level <= 1 {
            return Ok(None);
        }

        let parent_level = column.level - 1;
        self.tree
            .find(parent_level, &column.level_name)
            .map(Some)
            .ok_or_else(|| RollupError::ReferentialIntegrity {
                level_name: column.level_name.clone(),
                column: column.name.clone(),
                level: parent_level,
            })
    }

    pub fn tree(&self) -> &SummaryTree {
        &self.tree
    }

    pub fn finish(self) -> SummaryTree {
        self.tree
    }
}

/// Level number written in the sheet's level header cell.
pub fn sheet_level(sheet: &Sheet, layout: &ColumnLayout<'_>, max_level: u8) -> Result<u8> {
    let marker = layout.level_marker().ok_or_else(|| {
        RollupError::format(
            sheet.header().first().cloned().unwrap_or_default(),
            sheet.number(),
            "level header column not found",
        )
    })?;
    let cell = marker[0].as_str();

    let level = parse_level(cell).ok_or_else(|| {
        RollupError::format(cell, sheet.number(), "expected a level header like '#1レベル名'")
    })?;
    if level > max_level {
        return Err(RollupError::format(
            cell,
            sheet.number(),
            format!("level {} is deeper than the maximum of {}", level, max_level),
        ));
    }

    Ok(level)
}
