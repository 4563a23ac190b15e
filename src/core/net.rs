use url::Url;

use crate::core::FmpError;

#[cfg(feature = "test-mode")]
use std::env;

/// Read the response body as text.
/// In `test-mode`, if `FMP_RECORD=1`, the body is saved as a fixture via `internal::fixtures`.
pub(crate) async fn get_text(
    resp: reqwest::Response,
    _endpoint: &str,
    _key: &str,
    _ext: &str,
) -> Result<String, reqwest::Error> {
    let text = resp.text().await?;

    #[cfg(feature = "test-mode")]
    {
        if env::var("FMP_RECORD").ok().as_deref() == Some("1")
            && let Err(e) = crate::internal::fixtures::record_fixture(_endpoint, _key, _ext, &text)
        {
            tracing::warn!(key = _key, error = %e, "FMP_RECORD: failed to write fixture");
        }
    }

    Ok(text)
}

/// Maps a non-2xx response to a typed error carrying the redacted URL.
pub(crate) fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, FmpError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let url = redact(resp.url());
    Err(match status.as_u16() {
        429 => FmpError::RateLimited { url },
        code => FmpError::Status { status: code, url },
    })
}

/// Renders `url` with the `apikey` query value masked, for logs and error messages.
pub fn redact(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == "apikey") {
        return url.to_string();
    }
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "apikey" { String::from("REDACTED") } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    let mut out = url.clone();
    out.query_pairs_mut().clear().extend_pairs(pairs);
    out.to_string()
}
