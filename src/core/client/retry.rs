use std::time::Duration;

use tracing::debug;

use crate::core::FmpError;
use crate::core::net::redact;

/// Specifies the backoff strategy for retrying failed requests.
#[derive(Clone, Debug)]
pub enum Backoff {
    /// Uses a fixed delay between retries.
    Fixed(Duration),
    /// Uses an exponential delay between retries.
    /// The delay is calculated as `base * (factor ^ attempt)`.
    Exponential {
        /// The initial backoff duration.
        base: Duration,
        /// The multiplicative factor for each subsequent retry.
        factor: f64,
        /// The maximum duration to wait between retries.
        max: Duration,
    },
}

impl Backoff {
    /// Pause before retry number `retry` (0-based).
    #[must_use]
    pub fn delay(&self, retry: u32) -> Duration {
        match self {
            Self::Fixed(d) => *d,
            Self::Exponential { base, factor, max } => {
                let exp = i32::try_from(retry).unwrap_or(i32::MAX);
                let secs = base.as_secs_f64() * factor.powi(exp);
                if !secs.is_finite() || secs >= max.as_secs_f64() {
                    *max
                } else {
                    Duration::from_secs_f64(secs.max(0.0))
                }
            }
        }
    }
}

/// Configuration for the automatic retry mechanism.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Enables or disables the retry mechanism.
    pub enabled: bool,
    /// The maximum number of retries to attempt. The total number of attempts will be `max_retries + 1`.
    pub max_retries: u32,
    /// The backoff strategy to use between retries.
    pub backoff: Backoff,
    /// A list of HTTP status codes that should trigger a retry.
    pub retry_on_status: Vec<u16>,
    /// Whether to retry on request timeouts.
    pub retry_on_timeout: bool,
    /// Whether to retry on connection errors.
    pub retry_on_connect: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: 4,
            backoff: Backoff::Exponential {
                base: Duration::from_millis(200),
                factor: 2.0,
                max: Duration::from_secs(3),
            },
            retry_on_status: vec![408, 429, 500, 502, 503, 504],
            retry_on_timeout: true,
            retry_on_connect: true,
        }
    }
}

impl RetryConfig {
    /// A policy that sends every request exactly once.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Total number of attempts this policy allows.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        if self.enabled {
            self.max_retries.saturating_add(1)
        } else {
            1
        }
    }
}

impl super::FmpClient {
    /// Sends `req`, waiting on the shared rate limiter before every attempt and retrying
    /// according to `retry_override` (or the client's own policy).
    ///
    /// The response is returned as-is once the attempts are exhausted, so callers still
    /// see the final non-2xx status.
    pub(crate) async fn send_with_retry(
        &self,
        req: reqwest::RequestBuilder,
        retry_override: Option<&RetryConfig>,
    ) -> Result<reqwest::Response, FmpError> {
        let cfg = retry_override.unwrap_or(&self.retry);
        let max_attempts = cfg.max_attempts();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            let this = req.try_clone().ok_or_else(|| {
                FmpError::InvalidParams("request body cannot be cloned for retry".into())
            })?;

            self.throttle().await;

            match this.send().await {
                Ok(resp) => {
                    let code = resp.status().as_u16();
                    if attempt < max_attempts && cfg.retry_on_status.contains(&code) {
                        let pause = cfg.backoff.delay(attempt - 1);
                        debug!(
                            status = code,
                            url = %redact(resp.url()),
                            attempt,
                            ?pause,
                            "retrying after retryable status"
                        );
                        tokio::time::sleep(pause).await;
                        continue;
                    }
                    return Ok(resp);
                }
                Err(e) => {
                    let e = e.without_url();
                    let retryable = (cfg.retry_on_timeout && e.is_timeout())
                        || (cfg.retry_on_connect && e.is_connect());
                    if attempt < max_attempts && retryable {
                        let pause = cfg.backoff.delay(attempt - 1);
                        debug!(error = %e, attempt, ?pause, "retrying after transport error");
                        tokio::time::sleep(pause).await;
                        continue;
                    }
                    return Err(FmpError::Http(e));
                }
            }
        }
    }
}
