use std::path::Path;

use tracing::{debug, info};

use crate::config::{ParseOptions, ReadOptions};
use crate::error::{Result, RollupError};
use crate::grid::{self, RectGrid};
use crate::summary::builder::{HierarchyBuilder, sheet_level};
use crate::summary::classifier::ColumnLayout;
use crate::summary::markers::{is_header_row, parse_level};
use crate::summary::splitter::{Sheet, split_sheets};
use crate::summary::total::{extract_total, verify_totals};
use crate::summary::tree::SummaryTree;
use crate::utils::cell_reference;

/// Load a summary file and rebuild its component tree.
pub fn parse_file<P: AsRef<Path>>(
    path: P,
    read_options: &ReadOptions,
    parse_options: &ParseOptions,
) -> Result<SummaryTree> {
    let loaded = grid::load(path, read_options)?;
    parse_grid(&loaded.grid, parse_options)
}

/// Rebuild the component tree from an already loaded grid.
///
/// Sheets are built in ascending level order (sheets of one level keep their
/// file order), so every parent exists before its children are attached.
/// Either the whole tree is returned or the first error is.
pub fn parse_grid(grid: &RectGrid, options: &ParseOptions) -> Result<SummaryTree> {
    let sheets = split_sheets(grid);
    let Some(top_sheet) = sheets.first() else {
        return Err(RollupError::EmptyInput { path: None });
    };

    if !is_header_row(top_sheet.header()) {
        return Err(RollupError::format(
            cell_reference((1, 1)),
            top_sheet.number(),
            format!(
                "the first row must start with a level header, found '{}'",
                top_sheet.header().first().map(String::as_str).unwrap_or_default()
            ),
        ));
    }

    let mut blocks: Vec<(u8, &Sheet, ColumnLayout<'_>)> = Vec::with_capacity(sheets.len());
    for sheet in &sheets {
        let layout = ColumnLayout::classify(sheet.cols());
        if layout.data_cols().is_empty() {
            debug!(sheet = sheet.number(), "Skipping sheet without component columns");
            continue;
        }
        let level = sheet_level(sheet, &layout, options.max_level)?;
        blocks.push((level, sheet, layout));
    }
    blocks.sort_by_key(|(level, _, _)| *level);

    let mut builder = HierarchyBuilder::new(options.max_level);
    for (level, sheet, layout) in &blocks {
        let ids = builder.add_sheet(sheet, layout)?;
        debug!(sheet = sheet.number(), depth = *level, columns = ids.len(), "Built sheet");
    }

    // Totals come from the first level-1 sheet, normally the top of the file
    let total_sheet = sheets
        .iter()
        .find(|sheet| sheet.header().first().and_then(|cell| parse_level(cell)) == Some(1))
        .unwrap_or(top_sheet);

    let mut tree = builder.finish();
    tree.set_total(extract_total(total_sheet)?);
    if options.verify_totals {
        verify_totals(&tree)?;
    }

    info!(
        sheets = sheets.len(),
        columns = tree.len(),
        totals = tree.total().len(),
        "Parsed summary"
    );
    Ok(tree)
}
