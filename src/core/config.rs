//! Batch configuration, passed explicitly to every component.

use std::env;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::core::client::RetryConfig;
use crate::core::{FmpClient, FmpError};
use crate::search::{DEFAULT_PREFERRED_EXCHANGES, DEFAULT_SEARCH_LIMIT};

pub const DEFAULT_WORKER_POOL_SIZE: usize = 30;
pub const DEFAULT_LOOKBACK_YEAR: i32 = 2021;
pub const DEFAULT_MAX_CALLS_PER_MINUTE: u32 = 300;
pub const DEFAULT_NAME_COLUMN: &str = "Company Name";

/// Everything a collection run needs.
#[derive(Clone)]
pub struct PipelineConfig {
    /// Credential appended to every outbound call.
    pub api_key: String,
    /// `None` means the provider's public v3 base.
    pub base_url: Option<Url>,
    /// Exchange codes in priority order.
    pub preferred_exchanges: Vec<String>,
    /// Statement periods before this year are dropped.
    pub statement_lookback_year: i32,
    /// Companies processed at once.
    pub worker_pool_size: usize,
    pub search_limit: u32,
    /// Shared call quota. `None` disables throttling.
    pub max_calls_per_minute: Option<NonZeroU32>,
    pub retry: RetryConfig,
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    /// Input column holding company names.
    pub name_column: String,
}

impl std::fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("preferred_exchanges", &self.preferred_exchanges)
            .field("statement_lookback_year", &self.statement_lookback_year)
            .field("worker_pool_size", &self.worker_pool_size)
            .field("search_limit", &self.search_limit)
            .field("max_calls_per_minute", &self.max_calls_per_minute)
            .field("retry", &self.retry)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("name_column", &self.name_column)
            .finish()
    }
}

impl PipelineConfig {
    /// Starts a builder with every option at its default.
    pub fn builder(api_key: impl Into<String>) -> PipelineConfigBuilder {
        PipelineConfigBuilder::new(api_key)
    }

    /// Loads configuration from the environment (and a `.env` file if present).
    ///
    /// `FMP_API_KEY` is required. Optional: `FMP_BASE_URL`, `FMP_WORKER_POOL_SIZE`,
    /// `FMP_LOOKBACK_YEAR`, `FMP_MAX_CALLS_PER_MINUTE` (0 disables throttling),
    /// `FMP_PREFERRED_EXCHANGES` (comma-separated) and `FMP_NAME_COLUMN`.
    ///
    /// # Errors
    ///
    /// Returns `FmpError::Config` if the key is missing or a value does not parse.
    pub fn from_env() -> Result<Self, FmpError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("FMP_API_KEY")
            .map_err(|_| FmpError::Config("FMP_API_KEY environment variable required".into()))?;
        let mut b = Self::builder(api_key);

        if let Some(raw) = var("FMP_BASE_URL") {
            let url = Url::parse(&raw)
                .map_err(|e| FmpError::Config(format!("FMP_BASE_URL: {e}")))?;
            b = b.base_url(url);
        }
        if let Some(n) = parse_var::<usize>("FMP_WORKER_POOL_SIZE")? {
            b = b.worker_pool_size(n);
        }
        if let Some(y) = parse_var::<i32>("FMP_LOOKBACK_YEAR")? {
            b = b.statement_lookback_year(y);
        }
        if let Some(n) = parse_var::<u32>("FMP_MAX_CALLS_PER_MINUTE")? {
            b = b.max_calls_per_minute(NonZeroU32::new(n));
        }
        if let Some(raw) = var("FMP_PREFERRED_EXCHANGES") {
            b = b.preferred_exchanges(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned),
            );
        }
        if let Some(col) = var("FMP_NAME_COLUMN") {
            b = b.name_column(col);
        }
        Ok(b.build())
    }

    /// Builds the HTTP client described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or the HTTP client cannot be built.
    pub fn client(&self) -> Result<FmpClient, FmpError> {
        let mut b = FmpClient::builder()
            .api_key(self.api_key.clone())
            .retry_config(self.retry.clone())
            .max_calls_per_minute(self.max_calls_per_minute);
        if let Some(u) = &self.base_url {
            b = b.base_url(u.clone());
        }
        if let Some(t) = self.timeout {
            b = b.timeout(t);
        }
        if let Some(t) = self.connect_timeout {
            b = b.connect_timeout(t);
        }
        b.build()
    }
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>, FmpError>
where
    T::Err: std::fmt::Display,
{
    var(name)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| FmpError::Config(format!("{name}={raw}: {e}")))
        })
        .transpose()
}

/* ----------------------- Builder ----------------------- */

pub struct PipelineConfigBuilder {
    inner: PipelineConfig,
}

impl PipelineConfigBuilder {
    fn new(api_key: impl Into<String>) -> Self {
        Self {
            inner: PipelineConfig {
                api_key: api_key.into(),
                base_url: None,
                preferred_exchanges: DEFAULT_PREFERRED_EXCHANGES
                    .iter()
                    .map(|s| (*s).to_owned())
                    .collect(),
                statement_lookback_year: DEFAULT_LOOKBACK_YEAR,
                worker_pool_size: DEFAULT_WORKER_POOL_SIZE,
                search_limit: DEFAULT_SEARCH_LIMIT,
                max_calls_per_minute: NonZeroU32::new(DEFAULT_MAX_CALLS_PER_MINUTE),
                retry: RetryConfig::disabled(),
                timeout: None,
                connect_timeout: None,
                name_column: DEFAULT_NAME_COLUMN.to_owned(),
            },
        }
    }

    /// Override the API base (e.g. a mock server in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.inner.base_url = Some(url);
        self
    }

    #[must_use]
    pub fn preferred_exchanges<I, S>(mut self, exchanges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.preferred_exchanges = exchanges.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn statement_lookback_year(mut self, year: i32) -> Self {
        self.inner.statement_lookback_year = year;
        self
    }

    /// Zero is treated as one.
    #[must_use]
    pub fn worker_pool_size(mut self, n: usize) -> Self {
        self.inner.worker_pool_size = n.max(1);
        self
    }

    #[must_use]
    pub const fn search_limit(mut self, n: u32) -> Self {
        self.inner.search_limit = n;
        self
    }

    #[must_use]
    pub const fn max_calls_per_minute(mut self, n: Option<NonZeroU32>) -> Self {
        self.inner.max_calls_per_minute = n;
        self
    }

    #[must_use]
    pub fn retry(mut self, cfg: RetryConfig) -> Self {
        self.inner.retry = cfg;
        self
    }

    #[must_use]
    pub const fn timeout(mut self, dur: Duration) -> Self {
        self.inner.timeout = Some(dur);
        self
    }

    #[must_use]
    pub const fn connect_timeout(mut self, dur: Duration) -> Self {
        self.inner.connect_timeout = Some(dur);
        self
    }

    #[must_use]
    pub fn name_column(mut self, col: impl Into<String>) -> Self {
        self.inner.name_column = col.into();
        self
    }

    #[must_use]
    pub fn build(self) -> PipelineConfig {
        self.inner
    }
}
