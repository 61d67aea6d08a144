//! CSV source reading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};
use crate::table::RawTable;

/// Maximum size of any source file (500 MB).
pub const MAX_SOURCE_FILE_SIZE: u64 = 500 * 1024 * 1024;

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Check file existence and size before loading. Returns the size in bytes.
pub fn check_file_size(path: &Path) -> Result<u64> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > MAX_SOURCE_FILE_SIZE {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: MAX_SOURCE_FILE_SIZE,
        });
    }

    Ok(metadata.len())
}

/// Reject UTF-16 files; everything else is handed to the UTF-8 reader.
fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }

    Ok(())
}

/// Whitespace (and at most a BOM) only.
fn is_blank_file(path: &Path) -> Result<bool> {
    let contents = std::fs::read(path).map_err(|e| open_error(path, e))?;
    Ok(contents
        .iter()
        .all(|b| b.is_ascii_whitespace() || matches!(b, 0xEF | 0xBB | 0xBF)))
}

/// Read a CSV file into a [`RawTable`].
///
/// Every column is read as text. An empty file yields an empty table with
/// no headers.
pub fn read_csv_table(path: &Path) -> Result<RawTable> {
    let size = check_file_size(path)?;
    validate_encoding(path)?;

    if size == 0 || (size <= 1024 && is_blank_file(path)?) {
        tracing::warn!(path = %path.display(), "CSV file is empty");
        return Ok(RawTable::default());
    }

    let parse_error = |e: PolarsError| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(parse_error)?
        .finish()
        .map_err(parse_error)?;

    if df.width() > 500 {
        tracing::warn!(
            path = %path.display(),
            columns = df.width(),
            "source has more than 500 columns"
        );
    }

    let mut table = RawTable::from_dataframe(&df)?;
    if let Some(first) = table.headers.first_mut() {
        *first = first.trim_start_matches('\u{feff}').to_string();
    }
    tracing::debug!(
        path = %path.display(),
        rows = table.len(),
        columns = table.headers.len(),
        "read CSV source"
    );
    Ok(table)
}
