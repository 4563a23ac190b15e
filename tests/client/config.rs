use std::num::NonZeroU32;

use company_financials::PipelineConfig;
use company_financials::core::config::{
    DEFAULT_LOOKBACK_YEAR, DEFAULT_MAX_CALLS_PER_MINUTE, DEFAULT_NAME_COLUMN,
    DEFAULT_WORKER_POOL_SIZE,
};
use company_financials::search::DEFAULT_PREFERRED_EXCHANGES;

#[test]
fn builder_defaults() {
    let cfg = PipelineConfig::builder("k").build();
    assert_eq!(cfg.worker_pool_size, DEFAULT_WORKER_POOL_SIZE);
    assert_eq!(cfg.statement_lookback_year, DEFAULT_LOOKBACK_YEAR);
    assert_eq!(cfg.max_calls_per_minute, NonZeroU32::new(DEFAULT_MAX_CALLS_PER_MINUTE));
    assert_eq!(cfg.preferred_exchanges, DEFAULT_PREFERRED_EXCHANGES);
    assert_eq!(cfg.name_column, DEFAULT_NAME_COLUMN);
    assert_eq!(cfg.search_limit, 10);
    assert!(!cfg.retry.enabled);
    assert!(cfg.base_url.is_none());
}

#[test]
fn pool_size_is_at_least_one() {
    let cfg = PipelineConfig::builder("k").worker_pool_size(0).build();
    assert_eq!(cfg.worker_pool_size, 1);
}

#[test]
fn debug_output_hides_the_key() {
    let cfg = PipelineConfig::builder("super-secret").build();
    assert!(!format!("{cfg:?}").contains("super-secret"));
}

#[test]
fn client_inherits_throttling() {
    let cfg = PipelineConfig::builder("k").build();
    assert!(cfg.client().unwrap().is_rate_limited());

    let cfg = PipelineConfig::builder("k").max_calls_per_minute(None).build();
    assert!(!cfg.client().unwrap().is_rate_limited());
}

// The only test in this binary that touches the process environment.
#[test]
fn from_env_reads_overrides() {
    let vars = [
        ("FMP_API_KEY", "env-key"),
        ("FMP_BASE_URL", "http://127.0.0.1:9/api/v3/"),
        ("FMP_WORKER_POOL_SIZE", "7"),
        ("FMP_LOOKBACK_YEAR", "2019"),
        ("FMP_MAX_CALLS_PER_MINUTE", "0"),
        ("FMP_PREFERRED_EXCHANGES", "TSX, NYSE,,"),
        ("FMP_NAME_COLUMN", "Issuer"),
    ];
    for (k, v) in vars {
        // SAFETY: no other test in this binary reads or writes the environment.
        unsafe { std::env::set_var(k, v) };
    }

    let cfg = PipelineConfig::from_env().unwrap();

    assert_eq!(cfg.api_key, "env-key");
    assert_eq!(cfg.base_url.as_ref().map(url::Url::as_str), Some("http://127.0.0.1:9/api/v3/"));
    assert_eq!(cfg.worker_pool_size, 7);
    assert_eq!(cfg.statement_lookback_year, 2019);
    assert_eq!(cfg.max_calls_per_minute, None);
    assert_eq!(cfg.preferred_exchanges, ["TSX", "NYSE"]);
    assert_eq!(cfg.name_column, "Issuer");

    // SAFETY: as above.
    unsafe { std::env::set_var("FMP_LOOKBACK_YEAR", "twenty") };
    assert!(PipelineConfig::from_env().is_err());

    for (k, _) in vars {
        // SAFETY: as above.
        unsafe { std::env::remove_var(k) };
    }
}
