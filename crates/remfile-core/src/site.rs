//! Storage roots and base URL of one site, built from [`RemfileConfig`].

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::RemfileConfig;
use crate::host::{StorageRoots, UrlBuilder};

/// A site directory plus its public base URL.
#[derive(Debug, Clone)]
pub struct Site {
    site_path: PathBuf,
    base_url: String,
}

impl Site {
    /// Builds a site, rejecting a base URL that is not absolute.
    pub fn new(site_path: impl Into<PathBuf>, base_url: &str) -> Result<Self> {
        let parsed =
            url::Url::parse(base_url).with_context(|| format!("invalid base_url {:?}", base_url))?;
        if parsed.cannot_be_a_base() {
            anyhow::bail!("base_url {:?} cannot be used as a base", base_url);
        }
        Ok(Self {
            site_path: site_path.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(cfg: &RemfileConfig) -> Result<Self> {
        Self::new(cfg.site_path.clone(), &cfg.base_url)
    }

    pub fn site_path(&self) -> &std::path::Path {
        &self.site_path
    }

    /// Creates both storage roots if missing.
    pub fn ensure_roots(&self) -> Result<()> {
        for is_private in [false, true] {
            let root = self.files_path(is_private, &[]);
            std::fs::create_dir_all(&root)
                .with_context(|| format!("create storage root {}", root.display()))?;
        }
        Ok(())
    }
}

impl StorageRoots for Site {
    fn files_path(&self, is_private: bool, segments: &[&str]) -> PathBuf {
        let mut path = self
            .site_path
            .join(if is_private { "private" } else { "public" })
            .join("files");
        for segment in segments {
            path.push(segment);
        }
        path
    }
}

impl UrlBuilder for Site {
    /// Plain concatenation: the path is already quoted and must pass through untouched.
    fn absolute_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}
