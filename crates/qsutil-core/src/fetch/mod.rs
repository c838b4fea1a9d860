//! Resolution-fallback image fetcher.
//!
//! For one descriptor, walks the candidate chain from `candidate::plan` and
//! returns the first rendition that downloads. A 404 moves to the next
//! candidate; any other failure ends the chain for that descriptor. A file
//! already in the store under a name this fetch could produce short-circuits
//! the whole chain without touching the network.

mod candidate;

pub use candidate::{embedded_resolution, plan, Attempt, Candidate, Endpoints};

use crate::config::QsConfig;
use crate::descriptor::ImageDescriptor;
use crate::error::FetchError;
use crate::http::{get_ok, Transport};
use crate::naming::wallpaper_filename;
use crate::resolution::Resolution;
use crate::store::WallpaperStore;
use std::time::Duration;

/// Result of fetching one descriptor.
#[derive(Debug)]
pub struct FetchOutcome {
    pub succeeded: bool,
    /// Size actually obtained; differs from the request after a discovered-size fallback.
    pub resolved_resolution: String,
    /// Body of the successful response. `None` on failure and when already present.
    pub bytes: Option<Vec<u8>>,
    pub diagnostic: String,
    /// True when an existing file satisfied the request.
    pub already_present: bool,
    /// Candidates tried, in order.
    pub attempts: Vec<Attempt>,
    pub error: Option<FetchError>,
}

impl FetchOutcome {
    fn failed(resolution: &str, error: FetchError, attempts: Vec<Attempt>) -> Self {
        Self {
            succeeded: false,
            resolved_resolution: resolution.to_string(),
            bytes: None,
            diagnostic: error.to_string(),
            already_present: false,
            attempts,
            error: Some(error),
        }
    }

    /// Filename this outcome should be stored under.
    pub fn filename(&self, descriptor: &ImageDescriptor) -> String {
        wallpaper_filename(descriptor, &self.resolved_resolution)
    }
}

pub struct Fetcher<'a> {
    transport: &'a dyn Transport,
    store: &'a WallpaperStore,
    endpoints: Endpoints,
    timeout: Duration,
}

impl<'a> Fetcher<'a> {
    pub fn new(transport: &'a dyn Transport, store: &'a WallpaperStore, cfg: &QsConfig) -> Self {
        Self {
            transport,
            store,
            endpoints: Endpoints::from_config(cfg),
            timeout: cfg.image_timeout(),
        }
    }

    pub fn store(&self) -> &WallpaperStore {
        self.store
    }

    /// Like `fetch`, but validates the resolution string first. An unsupported
    /// value fails with `InvalidRequest` before any network call.
    pub fn fetch_str(&self, descriptor: &ImageDescriptor, requested: &str) -> FetchOutcome {
        match requested.parse::<Resolution>() {
            Ok(r) => self.fetch(descriptor, r),
            Err(e) => FetchOutcome::failed(requested, e, Vec::new()),
        }
    }

    pub fn fetch(&self, descriptor: &ImageDescriptor, requested: Resolution) -> FetchOutcome {
        if descriptor.base_path().is_empty() {
            return FetchOutcome::failed(
                requested.as_str(),
                FetchError::InvalidRequest("no URL base found".to_string()),
                Vec::new(),
            );
        }

        if let Some((resolution, name)) = self.existing(descriptor, requested) {
            tracing::debug!(file = %name, "already present, skipping fetch");
            return FetchOutcome {
                succeeded: true,
                resolved_resolution: resolution,
                bytes: None,
                diagnostic: format!("File already exists: {}", name),
                already_present: true,
                attempts: Vec::new(),
                error: None,
            };
        }

        let mut attempts: Vec<Attempt> = Vec::new();
        let mut last_not_found: Option<FetchError> = None;

        for candidate in plan(&self.endpoints, descriptor, requested) {
            let Some(attempt) = candidate.build(&self.endpoints, descriptor, requested) else {
                continue;
            };
            if attempts.iter().any(|a| a.url == attempt.url) {
                continue;
            }
            if attempt.resolution != requested.as_str() {
                tracing::info!(
                    "resolution {} not available, trying {}",
                    requested,
                    attempt.resolution
                );
            }
            tracing::debug!(candidate = %attempt.candidate, url = %attempt.url, "trying");
            let result = get_ok(self.transport, &attempt.url, self.timeout);
            let resolution = attempt.resolution.clone();
            let url = attempt.url.clone();
            attempts.push(attempt);

            match result {
                Ok(body) => {
                    let diagnostic = if resolution == requested.as_str() {
                        format!("fetched {}", url)
                    } else {
                        format!(
                            "resolution {} not available, fetched {} from {}",
                            requested, resolution, url
                        )
                    };
                    return FetchOutcome {
                        succeeded: true,
                        resolved_resolution: resolution,
                        bytes: Some(body),
                        diagnostic,
                        already_present: false,
                        attempts,
                        error: None,
                    };
                }
                Err(e) if e.is_not_found() => {
                    tracing::debug!("{}", e);
                    last_not_found = Some(e);
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    return FetchOutcome::failed(&resolution, e, attempts);
                }
            }
        }

        let error = last_not_found.unwrap_or_else(|| {
            FetchError::InvalidRequest("no candidate URL applies".to_string())
        });
        let resolution = attempts
            .last()
            .map(|a| a.resolution.clone())
            .unwrap_or_else(|| requested.as_str().to_string());
        FetchOutcome::failed(&resolution, error, attempts)
    }

    /// Names this fetch could end up writing: the requested size, then the
    /// size embedded in the discovered URL.
    fn existing(&self, descriptor: &ImageDescriptor, requested: Resolution) -> Option<(String, String)> {
        let mut sizes = vec![requested.as_str().to_string()];
        if let Some(actual) = descriptor.discovered_url().and_then(embedded_resolution) {
            if actual != requested.as_str() {
                sizes.push(actual);
            }
        }
        sizes.into_iter().find_map(|size| {
            let name = wallpaper_filename(descriptor, &size);
            self.store.exists(&name).then_some((size, name))
        })
    }
}
