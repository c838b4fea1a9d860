//! Bing image archive client.
//!
//! Queries `HPImageArchive.aspx` once per market, tags records with the
//! market, and drops images that several markets share.

mod parse;

use crate::config::QsConfig;
use crate::descriptor::ImageDescriptor;
use crate::error::FetchError;
use crate::http::{get_ok, Transport};
use std::collections::HashSet;

/// Archive API URL for `count` images from market `region`.
pub fn archive_url(base_url: &str, count: usize, region: &str) -> String {
    format!(
        "{}/HPImageArchive.aspx?format=js&idx=0&n={}&mkt={}",
        base_url.trim_end_matches('/'),
        count,
        region
    )
}

/// Fetch up to `count` descriptors for one market.
///
/// Failures are logged and yield an empty list so other markets can still
/// contribute; the caller decides whether an empty overall result is fatal.
pub fn fetch_region(
    transport: &dyn Transport,
    cfg: &QsConfig,
    count: usize,
    region: &str,
) -> Vec<ImageDescriptor> {
    let url = archive_url(&cfg.provider_base_url, count, region);
    let body = match get_ok(transport, &url, cfg.api_timeout()) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(region, "archive request failed: {}", e);
            return Vec::new();
        }
    };
    match parse::parse_archive(&body, region) {
        Ok(list) => {
            tracing::debug!(region, count = list.len(), "archive records");
            list
        }
        Err(e) => {
            tracing::warn!(region, "archive response unusable: {:#}", e);
            Vec::new()
        }
    }
}

/// Number of records to request from each market.
pub fn per_region_count(count: usize, regions: usize) -> usize {
    (count / regions.max(1)).max(1)
}

/// Keep the first descriptor for each (capture date, title), then cap at `count`.
pub fn unique_descriptors(all: Vec<ImageDescriptor>, count: usize) -> Vec<ImageDescriptor> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut out = Vec::with_capacity(all.len().min(count));
    for d in all {
        let (date, title) = d.dedup_key();
        if seen.insert((date.to_string(), title.to_string())) {
            out.push(d);
        }
    }
    out.truncate(count);
    out
}

/// Fetch from every market in order and return at most `count` unique descriptors.
pub fn collect_unique(
    transport: &dyn Transport,
    cfg: &QsConfig,
    count: usize,
    regions: &[String],
) -> Result<Vec<ImageDescriptor>, FetchError> {
    let per_region = per_region_count(count, regions.len());
    let mut all = Vec::new();
    for region in regions {
        tracing::info!(region = region.as_str(), "fetching archive");
        all.extend(fetch_region(transport, cfg, per_region, region));
    }
    let unique = unique_descriptors(all, count);
    if unique.is_empty() {
        return Err(FetchError::ProviderEmpty);
    }
    Ok(unique)
}
