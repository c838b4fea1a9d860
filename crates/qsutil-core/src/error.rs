//! Error taxonomy for the wallpaper fetch path.

use thiserror::Error;

/// Failure of one fetch step, one descriptor, or the whole batch.
///
/// Only `NotFound` moves the fallback chain forward; every other variant is
/// terminal for the descriptor it belongs to.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered 404 for a candidate URL.
    #[error("not found: {url}")]
    NotFound { url: String },

    /// Transport failure or a non-2xx status other than 404.
    #[error("network failure for {url}: {reason}")]
    NetworkFailure { url: String, reason: String },

    /// Rejected before any network activity (e.g. unsupported resolution).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The archive API returned no records for any region.
    #[error("provider returned no images")]
    ProviderEmpty,
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound { .. })
    }
}
