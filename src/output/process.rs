//! Cleanup pass over a consolidated CSV: drop rows without figures, order by company and
//! period, and report which companies ended up with data.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fs::File;
use std::io;
use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use super::record::columns;
use crate::core::FmpError;

/// Columns that describe a row rather than carry a reported figure.
pub const METADATA_COLUMNS: [&str; 16] = [
    columns::COMPANY_NAME,
    columns::MATCHED_NAME,
    columns::SYMBOL,
    columns::EXCHANGE,
    columns::CURRENCY,
    columns::DATE,
    columns::STATEMENT,
    columns::ERROR,
    "calendarYear",
    "period",
    "link",
    "finalLink",
    "reportedCurrency",
    "cik",
    "fillingDate",
    "acceptedDate",
];

/// What the cleanup kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    pub rows_kept: usize,
    /// In output order.
    pub companies_with_data: Vec<String>,
    /// Sorted.
    pub companies_without_data: Vec<String>,
}

/// Reads `input`, writes the cleaned table to `output`.
///
/// # Errors
///
/// Returns an error if either file cannot be opened, the CSV is malformed, or the
/// `company_name` column is missing.
pub fn process_financial_data(input: &Path, output: &Path) -> Result<ProcessSummary, FmpError> {
    let summary = process_reader(File::open(input)?, io::BufWriter::new(File::create(output)?))?;

    info!(
        rows = summary.rows_kept,
        output = %output.display(),
        "processed data has been written"
    );
    info!(companies = ?summary.companies_with_data, "companies with financial data");
    info!(companies = ?summary.companies_without_data, "companies without financial data");
    Ok(summary)
}

/// Same as [`process_financial_data`] over arbitrary streams.
///
/// # Errors
///
/// See [`process_financial_data`].
pub fn process_reader<R: io::Read, W: io::Write>(
    input: R,
    output: W,
) -> Result<ProcessSummary, FmpError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let header = rdr.headers()?.clone();

    let company_idx = header
        .iter()
        .position(|h| h == columns::COMPANY_NAME)
        .ok_or_else(|| FmpError::Data(format!("missing `{}` column", columns::COMPANY_NAME)))?;
    let date_idx = header.iter().position(|h| h == columns::DATE);
    let figure_idx: Vec<usize> = header
        .iter()
        .enumerate()
        .filter(|(_, h)| !METADATA_COLUMNS.contains(h))
        .map(|(i, _)| i)
        .collect();

    let mut all_companies = BTreeSet::new();
    let mut kept = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let company = rec.get(company_idx).unwrap_or("").to_owned();
        if !company.is_empty() {
            all_companies.insert(company.clone());
        }
        if figure_idx.iter().any(|&i| has_figure(rec.get(i))) {
            let date = date_idx
                .and_then(|i| rec.get(i))
                .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok());
            kept.push((company, date, fit_to(&rec, header.len())));
        }
    }

    kept.sort_by(|(ca, da, _), (cb, db, _)| ca.cmp(cb).then_with(|| dates_last(*da, *db)));

    let mut wtr = csv::Writer::from_writer(output);
    wtr.write_record(&header)?;
    let mut with_data: Vec<String> = Vec::new();
    for (company, _, rec) in &kept {
        wtr.write_record(rec)?;
        if !company.is_empty() && with_data.last() != Some(company) {
            with_data.push(company.clone());
        }
    }
    wtr.flush()?;

    let with_set: BTreeSet<&String> = with_data.iter().collect();
    let without_data = all_companies
        .iter()
        .filter(|c| !with_set.contains(c))
        .cloned()
        .collect();

    Ok(ProcessSummary {
        rows_kept: kept.len(),
        companies_with_data: with_data,
        companies_without_data: without_data,
    })
}

/// Pads a short row with empty cells (and cuts a long one) so it matches the header.
fn fit_to(rec: &csv::StringRecord, width: usize) -> csv::StringRecord {
    if rec.len() == width {
        return rec.clone();
    }
    (0..width).map(|i| rec.get(i).unwrap_or("")).collect()
}

/// A cell counts as a figure when it is non-blank and not numerically zero.
fn has_figure(cell: Option<&str>) -> bool {
    match cell.map(str::trim) {
        None | Some("") => false,
        Some(v) => v.parse::<f64>().map_or(true, |n| n != 0.0),
    }
}

/// Ascending, with unparseable or blank dates after every real date.
fn dates_last(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
