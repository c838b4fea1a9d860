//! Candidate-URL strategies for the resolution fallback chain.

use crate::config::QsConfig;
use crate::descriptor::ImageDescriptor;
use crate::resolution::Resolution;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// One way of naming an image on the provider or the resize proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    /// `<provider><urlbase>_UHD.jpg`
    Uhd,
    /// `<proxy>/<signature>/w:<width>/q:100/att:1/<base64url(discovered url)>`
    Proxy,
    /// `<provider><urlbase>_<WxH>.jpg` for the requested resolution.
    Standard,
    /// `<provider><urlbase>_<WxH>.jpg` for the size embedded in the discovered url.
    DiscoveredFallback,
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Candidate::Uhd => "uhd",
            Candidate::Proxy => "proxy",
            Candidate::Standard => "standard",
            Candidate::DiscoveredFallback => "discovered",
        };
        f.write_str(s)
    }
}

/// A concrete URL produced by a candidate, with the resolution it would yield.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub candidate: Candidate,
    pub url: String,
    pub resolution: String,
}

/// Endpoints the candidates interpolate into, taken from config once.
#[derive(Debug, Clone)]
pub struct Endpoints {
    provider_base: String,
    proxy_base: String,
    signatures: Vec<(u32, String)>,
}

impl Endpoints {
    pub fn from_config(cfg: &QsConfig) -> Self {
        let signatures = Resolution::ALL
            .iter()
            .filter(|r| r.is_top_tier())
            .filter_map(|r| {
                cfg.proxy_signature(r.width())
                    .map(|sig| (r.width(), sig.to_string()))
            })
            .collect();
        Self {
            provider_base: cfg.provider_base_url.trim_end_matches('/').to_string(),
            proxy_base: cfg.proxy_base_url.trim_end_matches('/').to_string(),
            signatures,
        }
    }

    fn signature(&self, width: u32) -> Option<&str> {
        self.signatures
            .iter()
            .find(|(w, _)| *w == width)
            .map(|(_, s)| s.as_str())
    }

    /// Absolute form of a provider URL. Relative input is appended to the
    /// provider base byte for byte; input that already parses as a URL is
    /// returned unchanged.
    pub fn absolute(&self, url: &str) -> String {
        if url::Url::parse(url).is_ok() {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{}", self.provider_base, url)
        } else {
            format!("{}/{}", self.provider_base, url)
        }
    }

    fn provider_image(&self, base_path: &str, suffix: &str) -> String {
        format!("{}{}_{}.jpg", self.provider_base, base_path, suffix)
    }
}

/// Extracts `WxH` from a `..._<W>x<H>.jpg` URL (first occurrence).
pub fn embedded_resolution(url: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"_(\d+x\d+)\.jpg").expect("valid resolution pattern"));
    re.captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Ordered strategies for `descriptor` at `requested`.
///
/// Top tiers try `_UHD` first, then the proxy when there is a discovered URL
/// and a signature for the width, otherwise the standard name. Every chain
/// ends with the discovered-resolution fallback.
pub fn plan(endpoints: &Endpoints, descriptor: &ImageDescriptor, requested: Resolution) -> Vec<Candidate> {
    let mut chain = Vec::with_capacity(3);
    if requested.is_top_tier() {
        chain.push(Candidate::Uhd);
        let proxy_applies = descriptor.discovered_url().is_some()
            && endpoints.signature(requested.width()).is_some();
        chain.push(if proxy_applies {
            Candidate::Proxy
        } else {
            Candidate::Standard
        });
    } else {
        chain.push(Candidate::Standard);
    }
    chain.push(Candidate::DiscoveredFallback);
    chain
}

impl Candidate {
    /// The URL this strategy yields, or `None` when it does not apply.
    pub fn build(
        self,
        endpoints: &Endpoints,
        descriptor: &ImageDescriptor,
        requested: Resolution,
    ) -> Option<Attempt> {
        let base_path = descriptor.base_path();
        let (url, resolution) = match self {
            Candidate::Uhd => (
                endpoints.provider_image(base_path, "UHD"),
                requested.as_str().to_string(),
            ),
            Candidate::Proxy => {
                let width = requested.width();
                let signature = endpoints.signature(width)?;
                let source = endpoints.absolute(descriptor.discovered_url()?);
                let encoded = URL_SAFE.encode(source.as_bytes());
                (
                    format!(
                        "{}/{}/w:{}/q:100/att:1/{}",
                        endpoints.proxy_base, signature, width, encoded
                    ),
                    requested.as_str().to_string(),
                )
            }
            Candidate::Standard => (
                endpoints.provider_image(base_path, requested.as_str()),
                requested.as_str().to_string(),
            ),
            Candidate::DiscoveredFallback => {
                let actual = embedded_resolution(descriptor.discovered_url()?)?;
                (endpoints.provider_image(base_path, &actual), actual)
            }
        };
        Some(Attempt {
            candidate: self,
            url,
            resolution,
        })
    }
}
