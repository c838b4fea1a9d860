//! Deterministic wallpaper filenames.
//!
//! `bing_<date>_<title>_<region>_<resolution>.jpg`, where the title is cleaned
//! for the filesystem and the whole name fits in NAME_MAX.

mod sanitize;

pub use sanitize::{clean_title, truncate_bytes, NAME_MAX};

use crate::descriptor::ImageDescriptor;

const PREFIX: &str = "bing";
const EXTENSION: &str = ".jpg";
const UNTITLED: &str = "bing_wallpaper";

/// Filename for `descriptor` saved at `resolution` (e.g. `1920x1080`).
///
/// The title gives way first when the name would exceed NAME_MAX, then the
/// region, then the date; the resolution and extension are always kept.
pub fn wallpaper_filename(descriptor: &ImageDescriptor, resolution: &str) -> String {
    let date = non_empty(descriptor.capture_date(), "unknown");
    let region = non_empty(descriptor.region(), "unknown");
    let title = clean_title(descriptor.title());
    let title = non_empty(&title, UNTITLED);

    let head = format!("{}_{}_", PREFIX, date);
    let suffix = format!("_{}{}", resolution, EXTENSION);
    let budget = NAME_MAX.saturating_sub(suffix.len());

    let region = truncate_bytes(region, budget.saturating_sub(head.len() + 1));
    let room = budget.saturating_sub(head.len() + 1 + region.len());
    let stem = format!("{}{}_{}", head, truncate_bytes(title, room), region);
    format!("{}{}", truncate_bytes(&stem, budget), suffix)
}

fn non_empty<'a>(s: &'a str, fallback: &'a str) -> &'a str {
    if s.is_empty() {
        fallback
    } else {
        s
    }
}
