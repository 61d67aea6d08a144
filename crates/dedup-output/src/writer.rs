//! Table writers.

use std::fs::{self, File};
use std::path::Path;

use polars::prelude::*;
use rust_xlsxwriter::{Format, Workbook};

use dedup_common::any_to_string;

use crate::error::OutputError;

/// Sheet name the dialer import expects.
const SHEET_NAME: &str = "Sheet1";

/// File format of a written table, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Xlsx,
    Csv,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self, OutputError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "xlsx" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            _ => Err(OutputError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Write `df` to `path` as XLSX or CSV, by extension.
///
/// Parent directories are created as needed. Existing files are replaced.
pub fn write_table(df: &DataFrame, path: &Path) -> Result<(), OutputError> {
    let format = OutputFormat::from_path(path)?;
    ensure_parent_dir(path)?;
    match format {
        OutputFormat::Xlsx => write_xlsx(df, path)?,
        OutputFormat::Csv => write_csv(df, path)?,
    }
    tracing::info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "wrote output"
    );
    Ok(())
}

fn write_csv(df: &DataFrame, path: &Path) -> Result<(), OutputError> {
    let mut file = File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut df = df.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;
    Ok(())
}

fn write_xlsx(df: &DataFrame, path: &Path) -> Result<(), OutputError> {
    let xlsx_error = |source: rust_xlsxwriter::XlsxError| OutputError::Xlsx {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook
        .add_worksheet()
        .set_name(SHEET_NAME)
        .map_err(xlsx_error)?;

    for (col_idx, column) in df.get_columns().iter().enumerate() {
        let col = u16::try_from(col_idx).map_err(|_| {
            xlsx_error(rust_xlsxwriter::XlsxError::RowColumnLimitError)
        })?;
        worksheet
            .write_string_with_format(0, col, column.name().as_str(), &header_format)
            .map_err(xlsx_error)?;

        for row_idx in 0..df.height() {
            let text = any_to_string(column.get(row_idx)?);
            if text.is_empty() {
                continue;
            }
            let row = u32::try_from(row_idx + 1).map_err(|_| {
                xlsx_error(rust_xlsxwriter::XlsxError::RowColumnLimitError)
            })?;
            worksheet.write_string(row, col, &text).map_err(xlsx_error)?;
        }
    }

    workbook.save(path).map_err(xlsx_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("final.XLSX")).unwrap(),
            OutputFormat::Xlsx
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("final.csv")).unwrap(),
            OutputFormat::Csv
        );
        assert!(matches!(
            OutputFormat::from_path(Path::new("final.ods")),
            Err(OutputError::UnsupportedFormat { .. })
        ));
    }
}
