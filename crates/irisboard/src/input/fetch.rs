//! Remote data download.

use tracing::{debug, info};

use crate::error::Result;

/// Download a remote file and return its raw bytes.
///
/// Non-success HTTP statuses are reported as errors.
pub fn fetch(url: &str) -> Result<Vec<u8>> {
    info!(url, "downloading dataset");

    let response = reqwest::blocking::get(url)?.error_for_status()?;
    let bytes = response.bytes()?;

    debug!(url, size_bytes = bytes.len(), "download complete");
    Ok(bytes.to_vec())
}
