use encoding_rs::{Encoding, SHIFT_JIS};

use crate::error::{Result, RollupError};

/// Deepest level the file format can encode.
pub const LEVEL_CEILING: u8 = 5;

/// Levels shown by default when no `--level` is given.
pub const DEFAULT_DISPLAY_LEVEL: u8 = 4;

/// Resolve an encoding label such as `shift_jis`, `cp932` or `utf-8`.
pub fn encoding_from_label(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| RollupError::InvalidOption(format!("unsupported encoding '{}'", label)))
}

fn delimiter_from_char(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(RollupError::InvalidOption(format!(
            "delimiter '{}' is not a single-byte character",
            delimiter
        )))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    /// Fallback encoding when the file carries no byte order mark.
    pub encoding: &'static Encoding,
    pub delimiter: u8,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            encoding: SHIFT_JIS,
            delimiter: b',',
        }
    }
}

impl ReadOptions {
    pub fn new(encoding_label: &str, delimiter: char) -> Result<Self> {
        Ok(Self {
            encoding: encoding_from_label(encoding_label)?,
            delimiter: delimiter_from_char(delimiter)?,
        })
    }

    pub fn utf8() -> Self {
        Self {
            encoding: encoding_rs::UTF_8,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WriteOptions {
    pub encoding: &'static Encoding,
    pub delimiter: u8,
    /// Start the output with the encoding's byte order mark.
    pub bom: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            encoding: SHIFT_JIS,
            delimiter: b',',
            bom: false,
        }
    }
}

impl From<ReadOptions> for WriteOptions {
    fn from(options: ReadOptions) -> Self {
        Self {
            encoding: options.encoding,
            delimiter: options.delimiter,
            bom: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Highest level accepted in a level header; at most [`LEVEL_CEILING`].
    pub max_level: u8,
    /// Check that every level-1 column has one item per total entry.
    pub verify_totals: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_level: LEVEL_CEILING,
            verify_totals: true,
        }
    }
}

impl ParseOptions {
    pub fn with_max_level(mut self, max_level: u8) -> Self {
        self.max_level = max_level.clamp(1, LEVEL_CEILING);
        self
    }
}
