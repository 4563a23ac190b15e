mod best_match;

pub use best_match::{DEFAULT_PREFERRED_EXCHANGES, find_best_match};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::core::client::RetryConfig;
use crate::core::net::{ensure_success, get_text};
use crate::{FmpClient, FmpError};

/// One company-name search hit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateMatch {
    pub symbol: String,
    /// Display name the provider matched.
    pub name: String,
    /// Short exchange code, e.g. `NASDAQ` or `TSX`.
    pub exchange: String,
    pub currency: String,
}

impl CandidateMatch {
    /// Convenience constructor, mostly for tests.
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        exchange: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            exchange: exchange.into(),
            currency: currency.into(),
        }
    }
}

fn parse_search_body(body: &str) -> Result<Vec<CandidateMatch>, FmpError> {
    let hits: Vec<SearchHit> = serde_json::from_str(body)?;
    Ok(hits
        .into_iter()
        .filter_map(|h| {
            let symbol = h.symbol.filter(|s| !s.is_empty())?;
            Some(CandidateMatch {
                symbol,
                name: h.name.unwrap_or_default(),
                exchange: h.exchange_short_name.unwrap_or_default(),
                currency: h.currency.unwrap_or_default(),
            })
        })
        .collect())
}

/* ---------------- Public API ---------------- */

/// Searches for listed companies matching `query`.
///
/// # Errors
///
/// Returns `FmpError` if the network request fails or the response cannot be parsed.
pub async fn search(client: &FmpClient, query: &str) -> Result<Vec<CandidateMatch>, FmpError> {
    SearchBuilder::new(client, query).fetch().await
}

/// Resolves a company name to ranked candidates.
///
/// Never fails: non-2xx statuses, transport errors and undecodable bodies are logged
/// and yield an empty list.
pub async fn resolve_candidates(
    client: &FmpClient,
    company_name: &str,
    limit: u32,
    retry_override: Option<&RetryConfig>,
) -> Vec<CandidateMatch> {
    match SearchBuilder::new(client, company_name)
        .limit(limit)
        .retry_policy(retry_override.cloned())
        .fetch()
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!(company = company_name, error = %e, "error searching for company");
            Vec::new()
        }
    }
}

/// A builder for the company-name search endpoint.
#[derive(Debug)]
pub struct SearchBuilder {
    client: FmpClient,
    query: String,
    limit: u32,
    exchange: Option<String>,
    retry_override: Option<RetryConfig>,
}

impl SearchBuilder {
    /// Creates a new `SearchBuilder` for a given search query.
    pub fn new(client: &FmpClient, query: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            query: query.into(),
            limit: DEFAULT_SEARCH_LIMIT,
            exchange: None,
            retry_override: None,
        }
    }

    /// Sets the maximum number of candidates to return.
    #[must_use]
    pub const fn limit(mut self, n: u32) -> Self {
        self.limit = n;
        self
    }

    /// Restricts the search to one exchange code on the provider side.
    #[must_use]
    pub fn exchange(mut self, code: impl Into<String>) -> Self {
        self.exchange = Some(code.into());
        self
    }

    /// Overrides the default retry policy for this specific API call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Executes the search request.
    ///
    /// # Errors
    ///
    /// This method will return an error if the network request fails, the API returns a
    /// non-successful status code, or the response body is not a list of search hits.
    pub async fn fetch(self) -> Result<Vec<CandidateMatch>, FmpError> {
        let mut url = self.client.search_url()?;
        {
            let mut qp = url.query_pairs_mut();
            qp.append_pair("query", &self.query);
            qp.append_pair("limit", &self.limit.to_string());
            if let Some(ex) = &self.exchange {
                qp.append_pair("exchange", ex);
            }
        }
        self.client.authorize(&mut url);

        debug!(query = %self.query, limit = self.limit, "searching");
        let resp = self
            .client
            .send_with_retry(
                self.client
                    .http()
                    .get(url)
                    .header("accept", "application/json"),
                self.retry_override.as_ref(),
            )
            .await?;
        let resp = ensure_success(resp)?;
        let body = get_text(resp, "search", &self.query, "json")
            .await
            .map_err(|e| FmpError::Http(e.without_url()))?;

        parse_search_body(&body)
    }
}

/// Result limit used by the original batch job.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

/* ------------- Minimal serde mapping of /api/v3/search ------------- */

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchHit {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    exchange_short_name: Option<String>,
}
