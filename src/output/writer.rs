use std::collections::BTreeSet;
use std::fs::File;
use std::io;
use std::path::Path;

use super::record::{OutputRecord, Row};
use crate::core::FmpError;

/// The union of every row's keys, sorted lexicographically.
pub fn union_columns<'a, I>(rows: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Row>,
{
    rows.into_iter()
        .flat_map(|r| r.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Writes `rows` as CSV under the union header; a row's missing keys become empty cells.
///
/// Nothing is written for an empty slice.
///
/// # Errors
///
/// Returns `FmpError::Csv` if the writer fails.
pub fn write_rows<W: io::Write>(rows: &[Row], out: W) -> Result<(), FmpError> {
    if rows.is_empty() {
        return Ok(());
    }
    let header = union_columns(rows);
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(&header)?;
    for row in rows {
        wtr.write_record(
            header
                .iter()
                .map(|col| row.get(col).map_or("", String::as_str)),
        )?;
    }
    wtr.flush()?;
    Ok(())
}

/// Projects and writes `records`, returning the number of data rows.
///
/// # Errors
///
/// Returns an error if a record cannot be projected or the writer fails.
pub fn write_records<W: io::Write>(records: &[OutputRecord], out: W) -> Result<usize, FmpError> {
    let rows = records
        .iter()
        .map(OutputRecord::to_row)
        .collect::<Result<Vec<_>, _>>()?;
    write_rows(&rows, out)?;
    Ok(rows.len())
}

/// Creates (or truncates) `path` and writes the consolidated CSV in one go.
///
/// # Errors
///
/// Returns `FmpError::Io` if the file cannot be created, or any error from [`write_records`].
pub fn write_consolidated(records: &[OutputRecord], path: &Path) -> Result<usize, FmpError> {
    let file = File::create(path)?;
    write_records(records, io::BufWriter::new(file))
}
