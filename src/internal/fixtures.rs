//! Recording helper for persisting HTTP bodies as test fixtures.
//! Compiled only when the `test-mode` feature is enabled.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) fn get_fixture_dir() -> PathBuf {
    env::var("FMP_FIXDIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

/// Fixture names are `{endpoint}_{key}.{ext}` with the key reduced to `[A-Za-z0-9._-]`.
pub(crate) fn record_fixture(
    endpoint: &str,
    key: &str,
    ext: &str,
    body: &str,
) -> Result<(), std::io::Error> {
    let dir = get_fixture_dir();
    fs::create_dir_all(&dir)?;
    let key: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-') { c } else { '_' })
        .collect();
    let path = dir.join(format!("{endpoint}_{key}.{ext}"));
    fs::write(&path, body)?;
    tracing::debug!(path = %path.display(), "FMP_RECORD: wrote fixture");
    Ok(())
}
