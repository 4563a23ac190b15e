use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::debug;

use crate::core::{FmpClient, PipelineConfig, RetryConfig};
use crate::fundamentals::fetch_financials;
use crate::output::{OutputRecord, ResolvedCompany};
use crate::search::{find_best_match, resolve_candidates};

/// A unit of per-company work the dispatcher can run.
///
/// This decouples the dispatcher from the HTTP-backed [`CompanyProcessor`], which makes
/// it possible to drive the dispatcher with scripted services in tests.
pub trait CompanyService: Send + Sync {
    /// Produces the output records for one company name.
    ///
    /// Implementations should always return at least one record.
    fn process_company<'a>(
        &'a self,
        company: &'a str,
    ) -> Pin<Box<dyn Future<Output = Vec<OutputRecord>> + Send + 'a>>;
}

/// Search, pick the best listing, fetch statements, annotate.
#[derive(Debug, Clone)]
pub struct CompanyProcessor {
    client: FmpClient,
    preferred_exchanges: Arc<[String]>,
    lookback_year: i32,
    search_limit: u32,
    retry_override: Option<RetryConfig>,
}

impl CompanyProcessor {
    /// Takes the ranking, lookback year and search limit from `config`; the client
    /// carries the credential, retry policy and rate limiter.
    pub fn new(client: FmpClient, config: &PipelineConfig) -> Self {
        Self {
            client,
            preferred_exchanges: config.preferred_exchanges.clone().into(),
            lookback_year: config.statement_lookback_year,
            search_limit: config.search_limit,
            retry_override: None,
        }
    }

    /// Overrides the client's retry policy for every call this processor makes.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Always returns at least one record:
    /// one per retained statement line, or a single error placeholder.
    pub async fn process(&self, company: &str) -> Vec<OutputRecord> {
        let retry = self.retry_override.as_ref();
        let candidates = resolve_candidates(&self.client, company, self.search_limit, retry).await;

        let Some(best) = find_best_match(&candidates, &self.preferred_exchanges[..]) else {
            debug!(company, "no match found");
            return vec![OutputRecord::NoMatchFound {
                company_name: company.to_owned(),
            }];
        };
        let resolved = ResolvedCompany::from_match(company, best);
        debug!(
            company,
            symbol = %resolved.symbol,
            exchange = %resolved.exchange,
            candidates = candidates.len(),
            "resolved company"
        );

        let lines = fetch_financials(&self.client, &resolved.symbol, self.lookback_year, retry).await;
        if lines.is_empty() {
            return vec![OutputRecord::NoFinancialData { company: resolved }];
        }

        lines
            .into_iter()
            .map(|line| OutputRecord::Financial {
                company: resolved.clone(),
                line,
            })
            .collect()
    }
}

impl CompanyService for CompanyProcessor {
    fn process_company<'a>(
        &'a self,
        company: &'a str,
    ) -> Pin<Box<dyn Future<Output = Vec<OutputRecord>> + Send + 'a>> {
        Box::pin(self.process(company))
    }
}
