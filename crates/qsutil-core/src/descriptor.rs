//! Provider-supplied image record.

/// One candidate image: where it lives on the provider and what to call it.
///
/// Built once by the provider client and only handed out by reference after
/// that; there are no setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    base_path: String,
    discovered_url: Option<String>,
    title: String,
    capture_date: String,
    region: String,
}

impl ImageDescriptor {
    pub fn new(
        base_path: impl Into<String>,
        discovered_url: Option<String>,
        title: impl Into<String>,
        capture_date: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            base_path: base_path.into(),
            discovered_url: discovered_url.filter(|u| !u.is_empty()),
            title: title.into(),
            capture_date: capture_date.into(),
            region: region.into(),
        }
    }

    /// Opaque path fragment (`urlbase`), e.g. `/th?id=OHR.Example_EN-US123`.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Known-good rendition (`url`), absolute or root-relative.
    pub fn discovered_url(&self) -> Option<&str> {
        self.discovered_url.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// `startdate`, e.g. `20240101`.
    pub fn capture_date(&self) -> &str {
        &self.capture_date
    }

    /// Market the record was fetched from, e.g. `en-US`.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Key used to drop the same image served by several markets.
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.capture_date, &self.title)
    }
}
