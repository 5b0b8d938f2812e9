use std::ops::Deref;

use crate::grid::RectGrid;
use crate::summary::markers::is_header_row;

/// One level block of a summary file: a level header row followed by its data rows.
///
/// The rows are normalized again on their own, so columns that only carry
/// data in other blocks are gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    number: usize,
    grid: RectGrid,
}

impl Sheet {
    pub fn new(number: usize, rows: Vec<Vec<String>>) -> Self {
        Self {
            number,
            grid: RectGrid::new(rows),
        }
    }

    /// 1-based position of the sheet in the file.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn grid(&self) -> &RectGrid {
        &self.grid
    }
}

impl Deref for Sheet {
    type Target = RectGrid;

    fn deref(&self) -> &Self::Target {
        &self.grid
    }
}

/// Cut the grid into sheets at every level header row.
///
/// Rows that come before the first header row stay in the first sheet.
pub fn split_sheets(grid: &RectGrid) -> Vec<Sheet> {
    let mut sheets = Vec::new();
    let mut current_rows: Vec<Vec<String>> = Vec::new();

    for row in grid.rows() {
        if is_header_row(row) && !current_rows.is_empty() {
            sheets.push(Sheet::new(sheets.len() + 1, std::mem::take(&mut current_rows)));
        }
        current_rows.push(row.clone());
    }

    if !current_rows.is_empty() {
        sheets.push(Sheet::new(sheets.len() + 1, current_rows));
    }

    sheets
}
