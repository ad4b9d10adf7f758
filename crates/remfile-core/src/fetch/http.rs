//! Authenticated single-request HTTP GET.
//!
//! The caller's session id travels as the `sid` cookie so the remote endpoint
//! (usually the same site, or a signed-URL redirect to object storage) can
//! authorize the read as that user.

use std::time::Duration;

use super::FetchError;
use crate::config::HttpConfig;

/// Blocking GET client built on libcurl.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    cfg: HttpConfig,
}

impl HttpFetcher {
    pub fn new(cfg: HttpConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &HttpConfig {
        &self.cfg
    }

    /// Downloads the whole body of `url`, sending `Cookie: sid=<sid>`.
    /// Follows redirects. Runs in the current thread.
    pub fn get(&self, url: &str, sid: &str) -> Result<Vec<u8>, FetchError> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.cfg.max_redirects)?;
        easy.useragent(&self.cfg.user_agent)?;
        easy.cookie(&format!("sid={}", sid))?;
        if let Some(secs) = self.cfg.connect_timeout_secs {
            easy.connect_timeout(Duration::from_secs(secs))?;
        }
        if let Some(secs) = self.cfg.timeout_secs {
            easy.timeout(Duration::from_secs(secs))?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http {
                url: url.to_string(),
                code,
            });
        }
        tracing::debug!(url, bytes = body.len(), "fetched external file");
        Ok(body)
    }
}
