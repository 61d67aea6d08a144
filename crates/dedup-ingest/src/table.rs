//! In-memory representation of a source table.

use polars::prelude::DataFrame;

use dedup_common::any_to_text;

use crate::error::Result;

/// A table as read from disk: header names and text cells.
///
/// Every row has exactly `headers.len()` cells. Empty cells are `None`;
/// blank-but-present strings are kept as-is for the normalizer to decide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Build a table, padding or truncating rows to the header width and
    /// dropping rows with no content at all.
    ///
    /// Columns with a blank header are dropped when they hold no values and
    /// renamed `unnamed_<index>` otherwise.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let width = headers.len();
        let rows: Vec<Vec<Option<String>>> = rows
            .into_iter()
            .filter(|row| !is_blank_row(row))
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();

        let mut keep = Vec::with_capacity(width);
        let mut kept_headers = Vec::with_capacity(width);
        for (idx, header) in headers.into_iter().enumerate() {
            if !header.trim().is_empty() {
                keep.push(idx);
                kept_headers.push(header);
            } else if rows.iter().any(|row| has_content(&row[idx])) {
                keep.push(idx);
                kept_headers.push(format!("unnamed_{idx}"));
            }
        }

        if keep.len() == width {
            return Self {
                headers: kept_headers,
                rows,
            };
        }
        let rows = rows
            .into_iter()
            .map(|row| keep.iter().map(|&idx| row[idx].clone()).collect())
            .collect();
        Self {
            headers: kept_headers,
            rows,
        }
    }

    /// Convert a polars frame; every cell is rendered as text.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let headers: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        let columns = df.get_columns();
        let mut rows = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            let mut row = Vec::with_capacity(columns.len());
            for column in columns {
                row.push(any_to_text(column.get(idx)?));
            }
            rows.push(row);
        }
        Ok(Self::new(headers, rows))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First `n` rows, for previews.
    pub fn head(&self, n: usize) -> &[Vec<Option<String>>] {
        &self.rows[..n.min(self.rows.len())]
    }
}

fn has_content(cell: &Option<String>) -> bool {
    cell.as_deref().is_some_and(|value| !value.trim().is_empty())
}

fn is_blank_row(row: &[Option<String>]) -> bool {
    !row.iter().any(has_content)
}

/// Normalizes a header for matching: strips a UTF-8 BOM, trims, collapses
/// inner whitespace runs to one space and lowercases.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn test_new_pads_and_drops_blank_rows() {
        let table = RawTable::new(
            vec!["enlace".to_string(), "nombre".to_string()],
            vec![
                vec![cell("a/b")],
                vec![None, cell("  ")],
                vec![cell("c/d"), cell("Ana"), cell("extra")],
            ],
        );

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0], vec![cell("a/b"), None]);
        assert_eq!(table.rows[1], vec![cell("c/d"), cell("Ana")]);
    }

    #[test]
    fn test_blank_headers_dropped_or_named() {
        let table = RawTable::new(
            vec!["link".to_string(), String::new(), " ".to_string()],
            vec![
                vec![cell("a"), None, cell("note")],
                vec![cell("b"), cell(""), None],
            ],
        );

        assert_eq!(table.headers, vec!["link", "unnamed_2"]);
        assert_eq!(table.rows[0], vec![cell("a"), cell("note")]);
        assert_eq!(table.rows[1], vec![cell("b"), None]);
    }

    #[test]
    fn test_from_dataframe_keeps_text_and_nulls() {
        use polars::prelude::*;

        let df = df! {
            "link" => [Some("a/b"), None],
            "phone" => [Some("0055"), Some("123")],
        }
        .unwrap();
        let table = RawTable::from_dataframe(&df).unwrap();

        assert_eq!(table.headers, vec!["link", "phone"]);
        assert_eq!(table.rows[0], vec![cell("a/b"), cell("0055")]);
        assert_eq!(table.rows[1], vec![None, cell("123")]);
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Enlace  "), "enlace");
        assert_eq!(normalize_header("\u{feff}Nombre"), "nombre");
        assert_eq!(normalize_header("Full   Name"), "full name");
        assert_eq!(normalize_header("TELEFONO"), "telefono");
    }

    #[test]
    fn test_head_clamps() {
        let table = RawTable::new(vec!["link".to_string()], vec![vec![cell("a")]]);
        assert_eq!(table.head(10).len(), 1);
        assert_eq!(table.head(0).len(), 0);
    }
}
