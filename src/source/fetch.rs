use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{TileError, TileResult};
use crate::source::locator::{Locator, SourceLocation};

/// Largest remote body accepted, in bytes.
pub const MAX_REMOTE_BYTES: u64 = 64 * 1024 * 1024;

/// Read the raw bytes behind `locator`, downloading remote sources.
///
/// There is no retry and no timeout beyond the HTTP agent defaults.
#[tracing::instrument(skip(locator), fields(source = %locator))]
pub fn read_source_bytes(locator: &Locator) -> TileResult<Vec<u8>> {
    match locator.location() {
        SourceLocation::Local(path) => read_local(path),
        SourceLocation::Remote(url) => fetch_remote(url),
    }
}

fn read_local(path: &Path) -> TileResult<Vec<u8>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read source image '{}'", path.display()))?;
    tracing::debug!(bytes = bytes.len(), "read local source");
    Ok(bytes)
}

fn fetch_remote(url: &str) -> TileResult<Vec<u8>> {
    let mut response = ureq::get(url)
        .call()
        .map_err(|e| TileError::fetch(format!("GET {url}: {e}")))?;

    let bytes = response
        .body_mut()
        .with_config()
        .limit(MAX_REMOTE_BYTES)
        .read_to_vec()
        .map_err(|e| TileError::fetch(format!("read body of {url}: {e}")))?;

    tracing::debug!(bytes = bytes.len(), "fetched remote source");
    Ok(bytes)
}
