//! Core components of the `company-financials` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The HTTP [`FmpClient`] and its builder, with retry and rate limiting.
//! - The primary [`FmpError`] type.
//! - The explicit run configuration, [`PipelineConfig`].
//! - Internal networking and wire-decoding helpers.

/// The HTTP client (`FmpClient`), builder, retry policy and endpoint constants.
pub mod client;
/// Run configuration (`PipelineConfig`) and its builder.
pub mod config;
/// The primary error type (`FmpError`) for the crate.
pub mod error;
pub(crate) mod net;
pub(crate) mod wire;

// convenient re-exports so most code can just `use crate::core::FmpClient`
pub use client::{Backoff, FmpClient, FmpClientBuilder, RetryConfig};
pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use error::FmpError;
pub use net::redact;
