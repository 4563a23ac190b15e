use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum FmpError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A response body could not be decoded as JSON.
    #[error("JSON decoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a CSV file failed.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// An input workbook could not be opened or read.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// A filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error, with the API key redacted.
        url: String,
    },

    /// The provider rejected the call because the plan's call budget was exhausted.
    #[error("Rate limited at {url}")]
    RateLimited {
        /// The URL that was rate limited, with the API key redacted.
        url: String,
    },

    /// The data received was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// Invalid parameters were provided to a builder or request.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// A configuration value was missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),
}
