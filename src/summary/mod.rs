//! Reconstruction of the component hierarchy of a roll-up summary sheet.
//!
//! A summary file stacks one block ("sheet") per hierarchy level. Each block
//! starts with a header row whose first cell is a level header such as
//! `#2レベル名`; the header columns carry the member properties and the row
//! total, every other column is a component whose cells are its item values.

mod builder;
mod classifier;
pub mod markers;
mod parser;
mod projector;
mod splitter;
mod total;
mod tree;

pub use builder::{HierarchyBuilder, sheet_level};
pub use classifier::ColumnLayout;
pub use parser::{parse_file, parse_grid};
pub use projector::{ProjectedRow, ProjectedTable, project_column, project_level};
pub use splitter::{Sheet, split_sheets};
pub use total::{TotalColumn, extract_total, verify_totals};
pub use tree::{Column, ColumnId, Item, Properties, SummaryTree};
