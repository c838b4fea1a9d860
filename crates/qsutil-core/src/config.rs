use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://www.bing.com";
pub const DEFAULT_PROXY_BASE_URL: &str = "https://imgproxy.nanxiongnandi.com";
pub const DEFAULT_REGION: &str = "en-US";

/// Global configuration loaded from `~/.config/qsutil/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QsConfig {
    /// Scheme and host of the image provider; `urlbase` paths are appended to it.
    pub provider_base_url: String,
    /// Scheme and host of the resize proxy used when `_UHD` is missing.
    pub proxy_base_url: String,
    /// Fixed proxy signature segment keyed by target width (as a string, TOML keys).
    pub proxy_signatures: BTreeMap<String, String>,
    /// Timeout for the archive API request.
    pub api_timeout_secs: u64,
    /// Timeout for a single image GET.
    pub image_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Market used when the locale cannot be mapped to a region.
    pub default_region: String,
    /// Where wallpapers are written (default `~/Pictures/Wallpapers`).
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Icon directory to scan (default `~/.config/quickshell/assets/icons`).
    #[serde(default)]
    pub icons_dir: Option<PathBuf>,
    /// Manifest path (default `~/.local/state/Quickshell/Icons/icons.conf`).
    #[serde(default)]
    pub icons_manifest: Option<PathBuf>,
    /// Category → MIME types override; built-in table when missing.
    #[serde(default)]
    pub mime: Option<BTreeMap<String, Vec<String>>>,
}

impl Default for QsConfig {
    fn default() -> Self {
        let mut proxy_signatures = BTreeMap::new();
        proxy_signatures.insert(
            "3840".to_string(),
            "cVAe_1mC04F_AauBgAsFPicdh_DM1WaxLJmFkfnCJIA".to_string(),
        );
        proxy_signatures.insert(
            "2560".to_string(),
            "DFUK6qYlR6Y1gGqSbAy8e28QFBnc7YU5i8I_36ZSpYI".to_string(),
        );
        Self {
            provider_base_url: DEFAULT_PROVIDER_BASE_URL.to_string(),
            proxy_base_url: DEFAULT_PROXY_BASE_URL.to_string(),
            proxy_signatures,
            api_timeout_secs: 10,
            image_timeout_secs: 30,
            connect_timeout_secs: 15,
            default_region: DEFAULT_REGION.to_string(),
            output_dir: None,
            icons_dir: None,
            icons_manifest: None,
            mime: None,
        }
    }
}

impl QsConfig {
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn proxy_signature(&self, width: u32) -> Option<&str> {
        self.proxy_signatures
            .get(&width.to_string())
            .map(String::as_str)
    }

    pub fn wallpaper_dir(&self) -> Result<PathBuf> {
        match &self.output_dir {
            Some(p) => Ok(p.clone()),
            None => Ok(home_dir()?.join("Pictures").join("Wallpapers")),
        }
    }

    pub fn icons_dir(&self) -> Result<PathBuf> {
        match &self.icons_dir {
            Some(p) => Ok(p.clone()),
            None => {
                let xdg_dirs = xdg::BaseDirectories::new()?;
                Ok(xdg_dirs
                    .get_config_home()
                    .join("quickshell")
                    .join("assets")
                    .join("icons"))
            }
        }
    }

    pub fn icons_manifest(&self) -> Result<PathBuf> {
        match &self.icons_manifest {
            Some(p) => Ok(p.clone()),
            None => {
                let xdg_dirs = xdg::BaseDirectories::new()?;
                Ok(xdg_dirs
                    .get_state_home()
                    .join("Quickshell")
                    .join("Icons")
                    .join("icons.conf"))
            }
        }
    }
}

fn home_dir() -> Result<PathBuf> {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("HOME is not set"))
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("qsutil")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<QsConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = QsConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: QsConfig = toml::from_str(&data)?;
    Ok(cfg)
}
