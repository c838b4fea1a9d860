//! Supported wallpaper resolutions.

use crate::error::FetchError;
use std::fmt;
use std::str::FromStr;

/// One of the closed set of target sizes the provider publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Resolution {
    Hd,
    #[default]
    FullHd,
    Qhd,
    Uhd,
}

impl Resolution {
    pub const ALL: [Resolution; 4] = [
        Resolution::FullHd,
        Resolution::Qhd,
        Resolution::Uhd,
        Resolution::Hd,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Resolution::Hd => "1366x768",
            Resolution::FullHd => "1920x1080",
            Resolution::Qhd => "2560x1440",
            Resolution::Uhd => "3840x2160",
        }
    }

    pub fn width(self) -> u32 {
        match self {
            Resolution::Hd => 1366,
            Resolution::FullHd => 1920,
            Resolution::Qhd => 2560,
            Resolution::Uhd => 3840,
        }
    }

    /// The two highest tiers, which try the provider's `_UHD` rendition first.
    pub fn is_top_tier(self) -> bool {
        matches!(self, Resolution::Qhd | Resolution::Uhd)
    }

    /// Comma-separated list of supported values, for error messages.
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| {
                FetchError::InvalidRequest(format!(
                    "unsupported resolution '{}'. Available: {}",
                    s,
                    Self::supported_list()
                ))
            })
    }
}
