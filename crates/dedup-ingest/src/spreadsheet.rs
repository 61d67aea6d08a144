//! Spreadsheet source reading through calamine.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use dedup_common::format_numeric;

use crate::error::{IngestError, Result};
use crate::table::RawTable;

/// Render a cell as text. Numbers lose a trailing `.0`; error cells are empty.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(n) => Some(format_numeric(*n)),
        Data::Int(n) => Some(n.to_string()),
        Data::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => Some(format_numeric(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

/// Read the first sheet of a workbook into a [`RawTable`].
///
/// The first non-empty row of the used range is the header row. A sheet
/// with no cells yields an empty table.
pub fn read_spreadsheet_table(path: &Path) -> Result<RawTable> {
    crate::csv::check_file_size(path)?;

    let workbook_error = |message: String| IngestError::Workbook {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(e.to_string()))?;
    let sheet_names = workbook.sheet_names();
    let Some(sheet_name) = sheet_names.first() else {
        return Err(IngestError::NoSheets {
            path: path.to_path_buf(),
        });
    };
    if sheet_names.len() > 1 {
        tracing::debug!(
            path = %path.display(),
            sheet = %sheet_name,
            ignored = sheet_names.len() - 1,
            "reading first sheet only"
        );
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| workbook_error(format!("sheet '{sheet_name}': {e}")))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
        .skip_while(|row| row.iter().all(Option::is_none));

    let Some(header_row) = rows.next() else {
        tracing::warn!(path = %path.display(), sheet = %sheet_name, "sheet is empty");
        return Ok(RawTable::default());
    };
    let headers = header_row
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect();

    let table = RawTable::new(headers, rows.collect());
    tracing::debug!(
        path = %path.display(),
        sheet = %sheet_name,
        rows = table.len(),
        columns = table.headers.len(),
        "read spreadsheet source"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Float(5551234567.0)).as_deref(), Some("5551234567"));
        assert_eq!(cell_text(&Data::Float(1.5)).as_deref(), Some("1.5"));
        assert_eq!(cell_text(&Data::Int(42)).as_deref(), Some("42"));
        assert_eq!(cell_text(&Data::Bool(true)).as_deref(), Some("TRUE"));
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(
            cell_text(&Data::String(" Ana ".to_string())).as_deref(),
            Some(" Ana ")
        );
    }
}
