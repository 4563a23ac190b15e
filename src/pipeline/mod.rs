//! The collection batch: read names, process companies concurrently, write one CSV.

mod dispatch;
mod task;

pub use dispatch::Dispatcher;
pub use task::{CompanyProcessor, CompanyService};

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::core::{FmpError, PipelineConfig};
use crate::input::read_company_names;
use crate::output::{Outcome, OutputRecord, write_consolidated};

/// File name written inside the output directory.
pub const CONSOLIDATED_FILE_NAME: &str = "consolidated_financial_data.csv";

/// What a batch run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Company names read from the input.
    pub companies: usize,
    pub rows_written: usize,
    /// Where the CSV went; `None` when there was nothing to write.
    pub output: Option<PathBuf>,
    /// Records per outcome class.
    pub outcomes: HashMap<Outcome, usize>,
}

/// Processes `companies` with the processor and pool size `config` describes.
///
/// # Errors
///
/// Returns an error only if the HTTP client cannot be built.
pub async fn collect(
    config: &PipelineConfig,
    companies: Vec<String>,
) -> Result<Vec<OutputRecord>, FmpError> {
    let client = config.client()?;
    let processor = CompanyProcessor::new(client, config);
    let dispatcher =
        Dispatcher::new(Arc::new(processor)).worker_pool_size(config.worker_pool_size);
    Ok(dispatcher.run(companies).await)
}

/// Read Inputs -> Dispatch -> Collect -> Consolidate -> Write.
///
/// Creates `output_dir` if needed and writes [`CONSOLIDATED_FILE_NAME`] into it once,
/// at the end. Per-company failures never abort the run; I/O errors do.
///
/// # Errors
///
/// Returns an error if the input cannot be read, the client cannot be built, or the
/// output cannot be written.
pub async fn run(
    config: &PipelineConfig,
    input: &Path,
    output_dir: &Path,
) -> Result<BatchSummary, FmpError> {
    let companies = read_company_names(input, &config.name_column)?;
    info!(companies = companies.len(), input = %input.display(), "read company names");
    std::fs::create_dir_all(output_dir)?;

    let total = companies.len();
    let records = collect(config, companies).await?;

    let mut outcomes = HashMap::new();
    for r in &records {
        *outcomes.entry(r.outcome()).or_insert(0) += 1;
    }

    if records.is_empty() {
        info!("No data to write.");
        return Ok(BatchSummary {
            companies: total,
            rows_written: 0,
            output: None,
            outcomes,
        });
    }

    let path = output_dir.join(CONSOLIDATED_FILE_NAME);
    let rows_written = write_consolidated(&records, &path)?;
    info!(rows = rows_written, output = %path.display(), "all financial data saved");

    Ok(BatchSummary {
        companies: total,
        rows_written,
        output: Some(path),
        outcomes,
    })
}
