mod converters;
mod exporters;
mod types;

pub use converters::process_cell_value;
pub use exporters::{
    generate_summary_json, serialize_to_json, table_to_records, tree_to_json, write_json_to_file,
};
pub use types::{JsonColumn, JsonItem, JsonScope, JsonSummary, OrderedRecords};
