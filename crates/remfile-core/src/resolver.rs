//! Maps a record's stored URL to where its bytes actually live.
//!
//! Resolution is pure string work plus the host's root and URL lookups; it
//! never touches the filesystem or the network. Containment in the storage
//! root is checked separately by the validator.

use std::fmt;
use std::path::PathBuf;

use crate::error::FileError;
use crate::host::{StorageRoots, UrlBuilder};
use crate::record::{is_external_url, FileRecord};
use crate::url_model::{quote, API_PREFIX, FILE_NAME_PARAM, PRIVATE_PREFIX, PUBLIC_PREFIX};

/// Concrete byte source for a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// File inside one of the storage roots.
    Local(PathBuf),
    /// Absolute http(s) URL, fetched with the caller's session.
    External(String),
}

impl Locator {
    pub fn is_external(&self) -> bool {
        matches!(self, Locator::External(_))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Local(p) => write!(f, "local {}", p.display()),
            Locator::External(u) => write!(f, "external {}", u),
        }
    }
}

/// Resolves `record` to a [`Locator`]. First matching rule wins:
///
/// 1. the locator is `file_url`, or `file_name` when the URL is empty;
/// 2. a bare name without `/` is treated as `/files/<name>`;
/// 3. `/private/files/...` and `/files/...` join their segments under the private
///    or public root;
/// 4. `/api/...` links get their `file_name` value quoted and are made absolute,
///    which makes them external;
/// 5. `http://` and `https://` URLs pass through unchanged.
///
/// Anything else is [`FileError::UnresolvableUrl`].
pub fn resolve(
    record: &FileRecord,
    roots: &dyn StorageRoots,
    urls: &dyn UrlBuilder,
) -> Result<Locator, FileError> {
    let raw = if record.file_url.is_empty() {
        record.file_name.as_str()
    } else {
        record.file_url.as_str()
    };
    if raw.is_empty() {
        return Err(FileError::UnresolvableUrl { url: String::new() });
    }

    let bare;
    let file_path = if raw.contains('/') {
        raw
    } else {
        bare = format!("{}{}", PUBLIC_PREFIX, raw);
        bare.as_str()
    };

    if let Some(rest) = file_path.strip_prefix(PRIVATE_PREFIX) {
        let segments: Vec<&str> = rest.split('/').collect();
        return Ok(Locator::Local(roots.files_path(true, &segments)));
    }
    if let Some(rest) = file_path.strip_prefix(PUBLIC_PREFIX) {
        let segments: Vec<&str> = rest.split('/').collect();
        return Ok(Locator::Local(roots.files_path(false, &segments)));
    }
    if file_path.starts_with(API_PREFIX) {
        let idx = file_path
            .find(FILE_NAME_PARAM)
            .map(|i| i + FILE_NAME_PARAM.len())
            .ok_or_else(|| FileError::MalformedUrl {
                url: file_path.to_string(),
            })?;
        let (query, file_name) = file_path.split_at(idx);
        let quoted = format!("{}{}", query, quote(file_name));
        tracing::debug!(link = %quoted, "resolving api link through base url");
        return Ok(Locator::External(urls.absolute_url(&quoted)));
    }
    if is_external_url(file_path) {
        return Ok(Locator::External(file_path.to_string()));
    }

    Err(FileError::UnresolvableUrl {
        url: file_path.to_string(),
    })
}
