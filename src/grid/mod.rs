mod reader;
mod rect;
mod writer;

pub use reader::{Decoded, LoadedGrid, decode, load, parse_rows};
pub use rect::RectGrid;
pub use writer::{default_export_path, encode_table, write_table};
