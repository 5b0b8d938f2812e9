use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};
use tracing::info;

use crate::config::WriteOptions;
use crate::error::{Result, RollupError};
use crate::summary::ProjectedTable;

/// Render a projected table as CSV bytes in the configured encoding.
pub fn encode_table(table: &ProjectedTable, options: &WriteOptions) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(Vec::new());

    for row in table.to_rows() {
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| RollupError::Io(e.into_error()))?;
    let text = String::from_utf8(bytes).map_err(|e| RollupError::Encoding {
        encoding: "UTF-8",
        reason: e.to_string(),
    })?;

    let mut output = Vec::with_capacity(text.len() + 3);
    if options.bom {
        output.extend_from_slice(byte_order_mark(options.encoding));
    }

    // encoding_rs has no UTF-16 encoder, so those are written unit by unit
    if options.encoding == UTF_16LE {
        output.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
        return Ok(output);
    }
    if options.encoding == UTF_16BE {
        output.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
        return Ok(output);
    }

    let (encoded, used, had_errors) = options.encoding.encode(&text);
    if used != options.encoding {
        return Err(RollupError::Encoding {
            encoding: options.encoding.name(),
            reason: format!("output would be written as {} instead", used.name()),
        });
    }
    if had_errors {
        return Err(RollupError::Encoding {
            encoding: used.name(),
            reason: "table contains characters the encoding cannot represent".to_string(),
        });
    }
    output.extend_from_slice(&encoded);
    Ok(output)
}

fn byte_order_mark(encoding: &'static Encoding) -> &'static [u8] {
    if encoding == UTF_8 {
        &b"\xEF\xBB\xBF"[..]
    } else if encoding == UTF_16LE {
        &b"\xFF\xFE"[..]
    } else if encoding == UTF_16BE {
        &b"\xFE\xFF"[..]
    } else {
        &[]
    }
}

/// Write a projected table to `path` as CSV.
pub fn write_table<P: AsRef<Path>>(
    table: &ProjectedTable,
    path: P,
    options: &WriteOptions,
) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode_table(table, options)?;
    fs::write(path, bytes)?;

    info!(
        path = %path.display(),
        rows = table.rows.len(),
        columns = table.columns.len(),
        "Exported table"
    );
    Ok(())
}

/// `<stem>_level<N>_<timestamp>.csv` next to the input file.
pub fn default_export_path(input: &Path, level: u8) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let file_stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("summary");
    let parent_dir = input.parent().unwrap_or_else(|| Path::new(""));

    parent_dir.join(format!("{}_level{}_{}.csv", file_stem, level, timestamp))
}
