//! company-financials: resolve company names to listed symbols and consolidate their
//! recent financial statements into a single CSV.
//!
//! The batch is linear: read names, resolve and fetch per company on a bounded pool,
//! collect in completion order, write one file whose header is the sorted union of
//! every record's columns.

pub mod core;
pub mod fundamentals;
pub mod input;
pub(crate) mod internal {
    #[cfg(feature = "test-mode")]
    pub(crate) mod fixtures;
}
pub mod output;
pub mod pipeline;
pub mod search;

pub use crate::core::{
    Backoff, FmpClient, FmpClientBuilder, FmpError, PipelineConfig, PipelineConfigBuilder,
    RetryConfig,
};
pub use fundamentals::{StatementKind, StatementLine, fetch_financials};
pub use output::{OutputRecord, ResolvedCompany, process_financial_data, write_consolidated};
pub use pipeline::{BatchSummary, CompanyProcessor, CompanyService, Dispatcher, run};
pub use search::{CandidateMatch, SearchBuilder, find_best_match, resolve_candidates};
