//! Parse the `HPImageArchive.aspx?format=js` response body.

use crate::descriptor::ImageDescriptor;
use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    #[serde(default)]
    images: Vec<ArchiveImage>,
}

/// Fields we use from one `images[]` entry; everything else is ignored.
#[derive(Debug, Deserialize)]
struct ArchiveImage {
    #[serde(default)]
    urlbase: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    startdate: Option<String>,
}

/// Parse an archive body into descriptors tagged with `region`.
/// A body without an `images` key yields an empty list.
pub(crate) fn parse_archive(body: &[u8], region: &str) -> Result<Vec<ImageDescriptor>> {
    let resp: ArchiveResponse =
        serde_json::from_slice(body).context("invalid archive JSON")?;
    Ok(resp
        .images
        .into_iter()
        .map(|img| {
            ImageDescriptor::new(
                img.urlbase,
                img.url,
                img.title.unwrap_or_else(|| "bing_wallpaper".to_string()),
                img.startdate.unwrap_or_else(|| "unknown".to_string()),
                region,
            )
        })
        .collect())
}
