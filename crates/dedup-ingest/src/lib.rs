//! Contact source ingestion.
//!
//! Reads the three operator-supplied tables (batch, blacklist, history) into
//! [`RawTable`]s: header names plus text cells, before any column
//! reconciliation.
//!
//! # Formats
//!
//! - **CSV**: read through polars with every column as text, so phone numbers
//!   keep their leading zeros
//! - **Spreadsheets** (`xlsx`, `xlsm`, `xls`, `xlsb`, `ods`): the first sheet is
//!   read through calamine, whatever its name
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use dedup_ingest::read_table;
//!
//! let batch = read_table(Path::new("reparto.xlsx"))?;
//! println!("{} rows, columns {:?}", batch.len(), batch.headers);
//! ```

mod csv;
mod error;
mod format;
mod spreadsheet;
mod table;

pub use csv::{MAX_SOURCE_FILE_SIZE, check_file_size, read_csv_table};
pub use error::{IngestError, Result};
pub use format::{SourceFormat, read_table};
pub use spreadsheet::read_spreadsheet_table;
pub use table::{RawTable, normalize_header};
