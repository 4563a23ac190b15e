use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{error, info};

use super::task::CompanyService;
use crate::core::config::DEFAULT_WORKER_POOL_SIZE;
use crate::output::OutputRecord;

const NO_RECORDS: &str = "no records produced";

/// Runs one task per company name with at most `worker_pool_size` in flight.
///
/// Tasks are started in submission order and collected in completion order. Records
/// are appended only here, on the coordinating task, never from the workers.
#[derive(Clone)]
pub struct Dispatcher {
    service: Arc<dyn CompanyService>,
    worker_pool_size: usize,
}

impl Dispatcher {
    /// Creates a dispatcher with the default pool size.
    pub fn new(service: Arc<dyn CompanyService>) -> Self {
        Self {
            service,
            worker_pool_size: DEFAULT_WORKER_POOL_SIZE,
        }
    }

    /// Sets the number of companies processed at once. Zero is treated as one.
    #[must_use]
    pub fn worker_pool_size(mut self, n: usize) -> Self {
        self.worker_pool_size = n.max(1);
        self
    }

    /// Processes every company and returns all records.
    ///
    /// Every company yields at least one record: a task that panics or returns nothing
    /// becomes one [`OutputRecord::TaskFailed`].
    pub async fn run<I, S>(&self, companies: I) -> Vec<OutputRecord>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let companies: Vec<String> = companies.into_iter().map(Into::into).collect();
        let total = companies.len();
        info!(companies = total, workers = self.worker_pool_size, "dispatching");

        let mut completed = stream::iter(companies)
            .map(|company| {
                let service = Arc::clone(&self.service);
                let name = company.clone();
                let handle =
                    tokio::spawn(async move { service.process_company(&name).await });
                async move { (company, handle.await) }
            })
            .buffer_unordered(self.worker_pool_size);

        let mut records = Vec::new();
        let mut done = 0usize;
        while let Some((company, joined)) = completed.next().await {
            done += 1;
            match joined {
                Ok(recs) if recs.is_empty() => {
                    error!(company = %company, "task produced no records");
                    records.push(OutputRecord::TaskFailed {
                        company_name: company,
                        reason: NO_RECORDS.to_owned(),
                    });
                }
                Ok(recs) => {
                    info!(company = %company, records = recs.len(), done, total, "processed");
                    records.extend(recs);
                }
                Err(e) => {
                    error!(company = %company, error = %e, "task generated an exception");
                    records.push(OutputRecord::TaskFailed {
                        company_name: company,
                        reason: e.to_string(),
                    });
                }
            }
        }
        records
    }
}
