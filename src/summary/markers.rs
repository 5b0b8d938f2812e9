//! Fixed labels of the roll-up summary format.

use std::sync::LazyLock;

use regex::Regex;

/// Suffix of every level header cell, e.g. `#2レベル名`.
pub const LEVEL_MARKER_SUFFIX: &str = "レベル名";
pub const MATERIAL: &str = "材質";
pub const SHAPE: &str = "形状";
pub const DIMENSION: &str = "寸法";
pub const TOTAL: &str = "合計";
pub const SUBTOTAL: &str = "小計";

pub const PROPERTY_LABELS: [&str; 3] = [MATERIAL, SHAPE, DIMENSION];

static LEVEL_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([1-5])レベル名$").expect("Hardcode regex pattern"));

/// Level header label for `level`, e.g. `#1レベル名`.
pub fn level_marker(level: u8) -> String {
    format!("#{}{}", level, LEVEL_MARKER_SUFFIX)
}

/// Level number encoded in a level header cell, if the cell is well formed.
pub fn parse_level(cell: &str) -> Option<u8> {
    LEVEL_MARKER
        .captures(cell)
        .and_then(|caps| caps.get(1))
        .and_then(|digit| digit.as_str().parse().ok())
}

pub fn is_level_marker(cell: &str) -> bool {
    cell.ends_with(LEVEL_MARKER_SUFFIX)
}

/// A row opens a new sheet when its first cell is a level header.
pub fn is_header_row(row: &[String]) -> bool {
    row.first().is_some_and(|cell| is_level_marker(cell))
}

pub fn is_header_label(cell: &str) -> bool {
    is_level_marker(cell) || PROPERTY_LABELS.contains(&cell) || cell == TOTAL
}
