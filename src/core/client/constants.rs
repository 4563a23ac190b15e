//! Centralized constants for default endpoints and UA.

pub(crate) const USER_AGENT: &str = concat!("company-financials/", env!("CARGO_PKG_VERSION"));

/// Financial Modeling Prep v3 API base. Endpoint paths are joined onto it.
pub(crate) const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com/api/v3/";

/// Company name search, relative to the base.
pub(crate) const SEARCH_PATH: &str = "search";

/// Query parameter carrying the credential on every call.
pub(crate) const API_KEY_PARAM: &str = "apikey";
