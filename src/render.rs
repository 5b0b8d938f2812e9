use std::fmt::Write;

use crate::summary::{ProjectedTable, SummaryTree};

const COLUMN_GAP: &str = "  ";

// Wide (non-ASCII) characters take two terminal cells
fn display_width(content: &str) -> usize {
    content
        .chars()
        .map(|c| if c.is_ascii() { 1 } else { 2 })
        .sum()
}

fn column_widths(rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = Vec::new();
    for row in rows {
        for (col, cell) in row.iter().enumerate() {
            let width = display_width(cell);
            match widths.get_mut(col) {
                Some(max_width) => *max_width = (*max_width).max(width),
                None => widths.push(width),
            }
        }
    }
    widths
}

/// Lay out a projected table as aligned plain text, one line per row.
pub fn render_table(table: &ProjectedTable) -> String {
    let rows = table.display_rows();
    let widths = column_widths(&rows);
    let mut output = String::new();

    for row in &rows {
        let mut line = String::new();
        for (col, cell) in row.iter().enumerate() {
            if col > 0 {
                line.push_str(COLUMN_GAP);
            }
            line.push_str(cell);
            let padding = widths[col].saturating_sub(display_width(cell));
            line.extend(std::iter::repeat_n(' ', padding));
        }
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

/// Indented outline of the component tree with item counts.
pub fn render_tree(tree: &SummaryTree) -> String {
    let mut output = String::new();
    if let Some(name) = tree.root_name() {
        let _ = writeln!(output, "{}", name);
    }

    for id in tree.descendants() {
        let Some(column) = tree.get(id) else {
            continue;
        };
        let indent = "  ".repeat(usize::from(column.level));
        let _ = writeln!(
            output,
            "{}{} (level {}, {} items)",
            indent,
            column.name,
            column.level,
            column.items.len()
        );
    }

    output
}
