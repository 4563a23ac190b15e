//! Reading company names from the input sheet: an Excel/ODS workbook (first worksheet)
//! or a CSV file, both with a header row.

use std::fs::File;
use std::io;
use std::path::Path;

use calamine::{Reader, open_workbook_auto};
use tracing::debug;

use crate::core::FmpError;

/// Extensions read as workbooks; anything else is read as CSV.
pub const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Reads the `column` cells of `path`, trimmed, skipping blanks. Duplicates are kept.
///
/// Workbooks are chosen by extension (see [`WORKBOOK_EXTENSIONS`]); only the first
/// worksheet is read.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or lacks `column`.
pub fn read_company_names(path: &Path, column: &str) -> Result<Vec<String>, FmpError> {
    if is_workbook(path) {
        read_company_names_from_workbook(path, column)
    } else {
        read_company_names_from(File::open(path)?, column)
    }
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| WORKBOOK_EXTENSIONS.iter().any(|w| w.eq_ignore_ascii_case(e)))
}

/// Reads the first worksheet of a workbook.
///
/// # Errors
///
/// Returns `FmpError::Spreadsheet` if the workbook cannot be opened, or
/// `FmpError::Data` if it has no worksheet or lacks `column`.
pub fn read_company_names_from_workbook(path: &Path, column: &str) -> Result<Vec<String>, FmpError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| FmpError::Data(format!("{} has no worksheet", path.display())))??;

    let mut rows = range.rows();
    let idx = rows
        .next()
        .and_then(|header| header.iter().position(|h| h.to_string().trim() == column))
        .ok_or_else(|| missing_column(column))?;

    let names: Vec<String> = rows
        .filter_map(|row| row.get(idx))
        .map(|cell| cell.to_string().trim().to_owned())
        .filter(|name| !name.is_empty())
        .collect();
    debug!(names = names.len(), path = %path.display(), "read workbook");
    Ok(names)
}

/// Same as [`read_company_names`] over any CSV reader.
///
/// Cells that are not valid UTF-8 are decoded lossily instead of failing the run.
///
/// # Errors
///
/// Returns an error if the CSV is malformed or lacks `column`.
pub fn read_company_names_from<R: io::Read>(input: R, column: &str) -> Result<Vec<String>, FmpError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let idx = rdr
        .byte_headers()?
        .iter()
        .position(|h| String::from_utf8_lossy(h) == column)
        .ok_or_else(|| missing_column(column))?;

    let mut names = Vec::new();
    for rec in rdr.byte_records() {
        let rec = rec?;
        if let Some(name) = rec.get(idx).filter(|n| !n.is_empty()) {
            names.push(String::from_utf8_lossy(name).into_owned());
        }
    }
    Ok(names)
}

fn missing_column(column: &str) -> FmpError {
    FmpError::Data(format!("input has no `{column}` column"))
}
