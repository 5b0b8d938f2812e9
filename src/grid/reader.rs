use std::borrow::Cow;
use std::fs;
use std::path::Path;

use encoding_rs::Encoding;
use tracing::{debug, info};

use crate::config::{ReadOptions, WriteOptions};
use crate::error::{Result, RollupError};
use crate::grid::RectGrid;

const SUPPORTED_EXTENSIONS: &[&str] = &["csv"];

/// A grid together with the text format its file was stored in.
#[derive(Debug, Clone)]
pub struct LoadedGrid {
    pub grid: RectGrid,
    /// Encoding actually used, which is the BOM's when the file has one.
    pub encoding: &'static Encoding,
    pub bom: bool,
    pub delimiter: u8,
}

impl LoadedGrid {
    /// Options that write a table back in the format the file was read in.
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            encoding: self.encoding,
            delimiter: self.delimiter,
            bom: self.bom,
        }
    }
}

/// Decoded file text and the encoding it was decoded with.
#[derive(Debug)]
pub struct Decoded<'a> {
    pub text: Cow<'a, str>,
    pub encoding: &'static Encoding,
    pub bom: bool,
}

/// Read a summary file into a rectangular grid of trimmed cells.
pub fn load<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<LoadedGrid> {
    let path = path.as_ref();
    validate_path(path)?;

    let bytes = fs::read(path).map_err(|e| RollupError::file_access(path, e.to_string()))?;
    let decoded = decode(&bytes, options.encoding)?;
    let rows = parse_rows(&decoded.text, options.delimiter)?;
    debug!(
        records = rows.len(),
        encoding = decoded.encoding.name(),
        bom = decoded.bom,
        "Parsed CSV records"
    );

    let grid = RectGrid::new(rows);
    if grid.is_empty() {
        return Err(RollupError::EmptyInput {
            path: Some(path.to_path_buf()),
        });
    }

    info!(
        path = %path.display(),
        rows = grid.row_count(),
        cols = grid.col_count(),
        "Loaded summary file"
    );
    Ok(LoadedGrid {
        grid,
        encoding: decoded.encoding,
        bom: decoded.bom,
        delimiter: options.delimiter,
    })
}

fn validate_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(RollupError::file_access(path, "no such file"));
    }
    if !path.is_file() {
        return Err(RollupError::file_access(path, "not a regular file"));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext) => Ok(()),
        Some(ext) => Err(RollupError::file_access(
            path,
            format!("unsupported extension '.{}'", ext),
        )),
        None => Err(RollupError::file_access(path, "missing file extension")),
    }
}

/// Decode raw bytes, honouring a byte order mark over the fallback encoding.
pub fn decode<'a>(bytes: &'a [u8], fallback: &'static Encoding) -> Result<Decoded<'a>> {
    let (encoding, bom_length) = Encoding::for_bom(bytes).unwrap_or((fallback, 0));

    let text = encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_length..])
        .ok_or_else(|| RollupError::Encoding {
            encoding: encoding.name(),
            reason: "malformed byte sequence".to_string(),
        })?;

    Ok(Decoded {
        text,
        encoding,
        bom: bom_length > 0,
    })
}

/// Split CSV text into rows of trimmed cells. Records may differ in length.
///
/// Rows with no content are dropped, whether the line is empty or holds only
/// delimiters and spaces.
pub fn parse_rows(text: &str, delimiter: u8) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Vec<String> = record.iter().map(|cell| cell.trim().to_string()).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}
