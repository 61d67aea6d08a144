//! Source format detection.

use std::fmt;
use std::path::Path;

use crate::csv::read_csv_table;
use crate::error::{IngestError, Result};
use crate::spreadsheet::read_spreadsheet_table;
use crate::table::RawTable;

/// On-disk format of a source table, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    /// Any workbook calamine can open.
    Spreadsheet,
}

impl SourceFormat {
    /// Detect the format from the path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" | "txt" => Ok(Self::Csv),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(Self::Spreadsheet),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Spreadsheet => write!(f, "spreadsheet"),
        }
    }
}

/// Read any supported source file.
pub fn read_table(path: &Path) -> Result<RawTable> {
    let format = SourceFormat::from_path(path)?;
    let _span = tracing::debug_span!("read_table", path = %path.display(), %format).entered();
    match format {
        SourceFormat::Csv => read_csv_table(path),
        SourceFormat::Spreadsheet => read_spreadsheet_table(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(
            SourceFormat::from_path(Path::new("reparto.XLSX")).unwrap(),
            SourceFormat::Spreadsheet
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("lista_negra.csv")).unwrap(),
            SourceFormat::Csv
        );
        assert!(matches!(
            SourceFormat::from_path(Path::new("notes.pdf")),
            Err(IngestError::UnsupportedFormat { extension, .. }) if extension == "pdf"
        ));
        assert!(SourceFormat::from_path(Path::new("no_extension")).is_err());
    }
}
