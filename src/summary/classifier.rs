use crate::summary::markers::{
    DIMENSION, MATERIAL, SHAPE, SUBTOTAL, TOTAL, is_header_label, is_level_marker,
};

/// Columns of one sheet, split into header columns and data (component) columns.
///
/// Both lists keep the left-to-right order of the sheet; row positions are
/// shared between them, which is how item properties are looked up.
#[derive(Debug, Clone, Default)]
pub struct ColumnLayout<'a> {
    header_cols: Vec<&'a [String]>,
    data_cols: Vec<&'a [String]>,
}

impl<'a> ColumnLayout<'a> {
    pub fn classify(cols: &'a [Vec<String>]) -> Self {
        let mut layout = ColumnLayout::default();

        for col in cols {
            let label = col.first().map(String::as_str).unwrap_or_default();
            if is_header_label(label) {
                layout.header_cols.push(col.as_slice());
            } else {
                layout.data_cols.push(col.as_slice());
            }
        }

        layout
    }

    pub fn header_cols(&self) -> &[&'a [String]] {
        &self.header_cols
    }

    pub fn data_cols(&self) -> &[&'a [String]] {
        &self.data_cols
    }

    /// The first header column labelled like `#Nレベル名`.
    pub fn level_marker(&self) -> Option<&'a [String]> {
        self.header_cols
            .iter()
            .copied()
            .find(|col| col.first().is_some_and(|label| is_level_marker(label)))
    }

    pub fn header(&self, label: &str) -> Option<&'a [String]> {
        self.header_cols
            .iter()
            .copied()
            .find(|col| col.first().is_some_and(|first| first == label))
    }

    pub fn total(&self) -> Option<&'a [String]> {
        self.header(TOTAL)
    }

    /// Material, shape and dimension cells at `row`; missing columns read as empty.
    pub fn properties_at(&self, row: usize) -> [&'a str; 3] {
        [MATERIAL, SHAPE, DIMENSION].map(|label| {
            self.header(label)
                .and_then(|col| col.get(row))
                .map(String::as_str)
                .unwrap_or_default()
        })
    }

    /// A subtotal row carries the subtotal label in one of its header cells.
    pub fn is_subtotal_row(&self, row: usize) -> bool {
        self.header_cols
            .iter()
            .any(|col| col.get(row).is_some_and(|cell| cell == SUBTOTAL))
    }

    /// Row positions that hold item data: everything but the header row and subtotals.
    pub fn item_rows(&self, row_count: usize) -> impl Iterator<Item = usize> + '_ {
        (1..row_count).filter(|row| !self.is_subtotal_row(*row))
    }
}
