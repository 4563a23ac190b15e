//! Public client surface + builder.
//! Internals are split into `retry` (retry loop + policy) and `constants` (UA + defaults).

mod constants;
mod retry;

pub use retry::{Backoff, RetryConfig};

use crate::core::FmpError;
use constants::{API_KEY_PARAM, DEFAULT_BASE_URL, SEARCH_PATH, USER_AGENT};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client;
use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Thin wrapper that holds a configured HTTP client, the API base and credential,
/// the retry policy and the call-rate limiter.
///
/// Cloning is cheap; every clone shares the same connection pool and the same
/// rate limiter, so a quota holds across all workers of a batch.
#[derive(Clone)]
pub struct FmpClient {
    http: Client,
    base_url: Url,
    api_key: String,
    retry: RetryConfig,
    limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

impl fmt::Debug for FmpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FmpClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .field("retry", &self.retry)
            .field("rate_limited", &self.limiter.is_some())
            .finish_non_exhaustive()
    }
}

impl FmpClient {
    /// Create a new builder.
    pub fn builder() -> FmpClientBuilder {
        FmpClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Whether outbound calls are throttled by a shared quota.
    pub fn is_rate_limited(&self) -> bool {
        self.limiter.is_some()
    }

    /// `{base}search`, without query parameters.
    pub(crate) fn search_url(&self) -> Result<Url, FmpError> {
        Ok(self.base_url.join(SEARCH_PATH)?)
    }

    /// `{base}{path}/{symbol}` with the symbol pushed as an encoded path segment.
    pub(crate) fn symbol_url(&self, path: &str, symbol: &str) -> Result<Url, FmpError> {
        let mut url = self.base_url.join(path)?;
        url.path_segments_mut()
            .map_err(|()| FmpError::InvalidParams("base url cannot take a path".into()))?
            .pop_if_empty()
            .push(symbol);
        Ok(url)
    }

    /// Appends the credential as the last query parameter.
    pub(crate) fn authorize(&self, url: &mut Url) {
        url.query_pairs_mut().append_pair(API_KEY_PARAM, &self.api_key);
    }

    async fn throttle(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct FmpClientBuilder {
    api_key: Option<String>,
    user_agent: Option<String>,
    base_url: Option<Url>,
    retry: Option<RetryConfig>,
    max_calls_per_minute: Option<NonZeroU32>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl FmpClientBuilder {
    /// Set the API key sent as the `apikey` query parameter. Required.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the API base (e.g., `https://financialmodelingprep.com/api/v3/`).
    /// A missing trailing slash is added so endpoint paths join beneath it.
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the default retry policy. Default: [`RetryConfig::default`].
    #[must_use]
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Throttle every outbound attempt to at most `n` calls per minute across all clones.
    /// Default: unthrottled.
    #[must_use]
    pub const fn max_calls_per_minute(mut self, n: Option<NonZeroU32>) -> Self {
        self.max_calls_per_minute = n;
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub const fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub const fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns `FmpError::InvalidParams` if no API key was set, or an error if the
    /// default base URL or the HTTP client cannot be constructed.
    pub fn build(self) -> Result<FmpClient, FmpError> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| FmpError::InvalidParams("api key is not set".into()))?;

        let mut base_url = match self.base_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(FmpClient {
            http,
            base_url,
            api_key,
            retry: self.retry.unwrap_or_default(),
            limiter: self
                .max_calls_per_minute
                .map(|n| Arc::new(RateLimiter::direct(Quota::per_minute(n)))),
        })
    }
}
