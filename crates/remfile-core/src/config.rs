use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::checksum::ContentDigest;

/// Outbound HTTP settings (optional `[http]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent sent with every fetch.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Maximum redirects followed per request.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,
    /// Connect timeout in seconds (None = libcurl default).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Whole-transfer timeout in seconds (None = no limit).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_max_redirects() -> u32 {
    10
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            max_redirects: default_max_redirects(),
            connect_timeout_secs: None,
            timeout_secs: None,
        }
    }
}

/// Global configuration loaded from `~/.config/remfile/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemfileConfig {
    /// Site directory; files live in `public/files` and `private/files` below it.
    pub site_path: PathBuf,
    /// Absolute base URL used to expand site-relative API links.
    pub base_url: String,
    /// Links starting with this prefix are produced by the site itself and trusted.
    pub archive_api_prefix: String,
    /// Digest stored as `content_hash` ("sha256" or "md5").
    #[serde(default)]
    pub content_digest: ContentDigest,
    /// Optional HTTP settings; if missing, built-in defaults are used.
    #[serde(default)]
    pub http: Option<HttpConfig>,
}

impl Default for RemfileConfig {
    fn default() -> Self {
        Self {
            site_path: PathBuf::from("./site"),
            base_url: "http://localhost:8000".to_string(),
            archive_api_prefix: "/api/method/remfile.controller.generate_file".to_string(),
            content_digest: ContentDigest::Sha256,
            http: None,
        }
    }
}

impl RemfileConfig {
    pub fn http_or_default(&self) -> HttpConfig {
        self.http.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("remfile")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RemfileConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RemfileConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<RemfileConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: RemfileConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
