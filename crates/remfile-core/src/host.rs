//! Interfaces to the host framework.
//!
//! File records never persist themselves, pick storage directories, or know
//! the public base URL. Those come from the host through these traits, so the
//! record logic stays independent of any particular framework.

use std::path::PathBuf;

use crate::checksum::ContentDigest;
use crate::error::FileError;
use crate::fetch::HttpFetcher;
use crate::record::FileRecord;
use crate::resolver::Locator;
use crate::url_model::{local_file_url, PRIVATE_PREFIX, PUBLIC_PREFIX};

/// Maps a privacy flag (and optional sub-path segments) to a local directory.
pub trait StorageRoots {
    /// Path of the public or private files root, with `segments` appended.
    fn files_path(&self, is_private: bool, segments: &[&str]) -> PathBuf;
}

/// Turns a site-relative path (`/api/method/...`) into an absolute URL.
pub trait UrlBuilder {
    fn absolute_url(&self, path: &str) -> String;
}

/// Host persistence for file records.
pub trait DocumentStore {
    /// Fresh, unsaved record.
    fn new_record(&self) -> FileRecord {
        FileRecord::default()
    }

    /// Inserts or updates `record`. The store may fill in `name`, `file_url`
    /// and `content_hash`.
    fn save(&self, record: &mut FileRecord) -> anyhow::Result<()>;

    fn delete(&self, record: &FileRecord) -> anyhow::Result<()>;
}

/// Record behavior the host framework supplies by default.
pub trait FileHooks {
    /// Generic "the file exists and is well formed" check.
    fn validate_file(&self, record: &FileRecord, locator: &Locator) -> Result<(), FileError>;

    /// Called after the URL is normalized; may move bytes between roots when
    /// the privacy flag no longer matches where the file lives.
    fn handle_is_private_changed(
        &self,
        record: &mut FileRecord,
        roots: &dyn StorageRoots,
    ) -> Result<(), FileError>;
}

/// The framework's own behavior for [`FileHooks`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFileHooks;

impl FileHooks for DefaultFileHooks {
    fn validate_file(&self, record: &FileRecord, locator: &Locator) -> Result<(), FileError> {
        match locator {
            Locator::External(_) => Ok(()),
            Locator::Local(path) if path.exists() => Ok(()),
            Locator::Local(path) => {
                tracing::debug!(path = %path.display(), "file missing on disk");
                Err(FileError::SourceUnavailable {
                    url: display_locator(record),
                })
            }
        }
    }

    fn handle_is_private_changed(
        &self,
        record: &mut FileRecord,
        roots: &dyn StorageRoots,
    ) -> Result<(), FileError> {
        let (rest, was_private) = if let Some(rest) = record.file_url.strip_prefix(PRIVATE_PREFIX) {
            (rest.to_string(), true)
        } else if let Some(rest) = record.file_url.strip_prefix(PUBLIC_PREFIX) {
            (rest.to_string(), false)
        } else {
            return Ok(());
        };
        if was_private == record.is_private {
            return Ok(());
        }

        let file_name = crate::url_model::base_name(&rest).to_string();
        if file_name.is_empty() {
            return Ok(());
        }
        let from = roots.files_path(was_private, &[&file_name]);
        if !from.is_file() {
            tracing::warn!(
                url = %record.file_url,
                "privacy flag changed but no file at {}; leaving it in place",
                from.display()
            );
            return Ok(());
        }
        let to = roots.files_path(record.is_private, &[&file_name]);
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent).map_err(|e| FileError::io(parent, e))?;
        }
        std::fs::rename(&from, &to).map_err(|e| FileError::io(&from, e))?;

        let new_url = local_file_url(&file_name, record.is_private);
        tracing::info!(from = %record.file_url, to = %new_url, "moved file between storage roots");
        record.file_url = new_url;
        Ok(())
    }
}

/// Everything a file record operation borrows from the host for one call.
#[derive(Clone, Copy)]
pub struct FileContext<'a> {
    pub roots: &'a dyn StorageRoots,
    pub urls: &'a dyn UrlBuilder,
    pub store: &'a dyn DocumentStore,
    pub hooks: &'a dyn FileHooks,
    pub http: &'a HttpFetcher,
    /// Links under this prefix come from the site's own archive endpoint.
    pub archive_api_prefix: &'a str,
    /// Digest stored in `content_hash`.
    pub digest: ContentDigest,
}

fn display_locator(record: &FileRecord) -> String {
    if record.file_url.is_empty() {
        record.file_name.clone()
    } else {
        record.file_url.clone()
    }
}
