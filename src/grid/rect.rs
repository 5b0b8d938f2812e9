/// A rectangular grid of trimmed text cells.
///
/// Built from ragged rows: every row is padded with empty cells up to the
/// longest row, then columns that are empty in every row are dropped. Both a
/// row-major and a column-major copy are kept since the summary parser walks
/// the grid in both directions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RectGrid {
    rows: Vec<Vec<String>>,
    cols: Vec<Vec<String>>,
}

impl RectGrid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        let cols = rows_to_cols(&rows);
        let rows = cols_to_rows(&cols, rows.len());
        Self { rows, cols }
    }

    /// Build a grid from rows of string slices, trimming every cell.
    pub fn from_cells<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|cell| cell.as_ref().trim().to_string()).collect())
            .collect();
        Self::new(rows)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn cols(&self) -> &[Vec<String>] {
        &self.cols
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row, or an empty slice for an empty grid.
    pub fn header(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every row after the header.
    pub fn data(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

fn rows_to_cols(rows: &[Vec<String>]) -> Vec<Vec<String>> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);

    (0..width)
        .map(|col_idx| {
            rows.iter()
                .map(|row| row.get(col_idx).cloned().unwrap_or_default())
                .collect::<Vec<String>>()
        })
        .filter(|col| col.iter().any(|cell| !cell.is_empty()))
        .collect()
}

fn cols_to_rows(cols: &[Vec<String>], height: usize) -> Vec<Vec<String>> {
    // No surviving column means no content at all
    if cols.is_empty() {
        return Vec::new();
    }

    (0..height)
        .map(|row_idx| cols.iter().map(|col| col[row_idx].clone()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_rows_are_padded() {
        let grid = RectGrid::from_cells(vec![vec!["a", "b", "c"], vec!["d"], vec!["e", "f"]]);

        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.col_count(), 3);
        assert!(grid.rows().iter().all(|row| row.len() == 3));
        assert_eq!(grid.rows()[1], vec!["d", "", ""]);
        assert_eq!(grid.cols()[1], vec!["b", "", "f"]);
    }

    #[test]
    fn test_empty_columns_are_dropped() {
        let grid = RectGrid::from_cells(vec![
            vec!["a", "", "c", ""],
            vec!["d", " ", "f"],
        ]);

        assert_eq!(grid.col_count(), 2);
        assert_eq!(grid.header(), ["a", "c"]);
        assert_eq!(grid.data(), [vec!["d", "f"]]);
    }

    #[test]
    fn test_cells_are_trimmed() {
        let grid = RectGrid::from_cells(vec![vec![" 19.0 ", "\tPL"]]);
        assert_eq!(grid.cell(0, 0), Some("19.0"));
        assert_eq!(grid.cell(0, 1), Some("PL"));
        assert_eq!(grid.cell(1, 0), None);
    }

    #[test]
    fn test_empty_input() {
        let grid = RectGrid::new(Vec::new());
        assert!(grid.is_empty());
        assert_eq!(grid.col_count(), 0);
        assert!(grid.header().is_empty());
        assert!(grid.data().is_empty());
    }

    #[test]
    fn test_blank_rows_collapse_to_empty_grid() {
        let grid = RectGrid::from_cells(vec![vec!["", ""], vec![""]]);
        assert!(grid.is_empty());
        assert_eq!(grid.col_count(), 0);
    }
}
