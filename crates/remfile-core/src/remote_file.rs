//! File records whose bytes may live on local disk or behind an HTTP URL.

use crate::archive;
use crate::checksum;
use crate::error::FileError;
use crate::fetch;
use crate::host::FileContext;
use crate::record::{Content, FileRecord};
use crate::resolver::{self, Locator};
use crate::validate;

/// Operations the host invokes on a file record (on save, on display, on
/// explicit user action).
///
/// Anything that may fetch over HTTP takes the caller's session id, which is
/// forwarded as the `sid` cookie.
pub trait FileOperations {
    /// Rejects URLs that are malformed or point outside the storage root.
    fn validate_url(&mut self) -> Result<(), FileError>;

    /// Where the bytes live. Pure; no filesystem or network access.
    fn get_full_path(&self) -> Result<Locator, FileError>;

    /// Bytes of the file, decoded to text when possible. Cached on the record:
    /// later calls return the cached value without validating or reading again.
    fn get_content(&mut self, sid: &str) -> Result<&Content, FileError>;

    /// Computes `content_hash` once for local files; external URLs are never hashed.
    fn generate_content_hash(&mut self, sid: &str) -> Result<(), FileError>;

    /// Replaces a `.zip` record with one record per contained file.
    fn unzip(&mut self, sid: &str) -> Result<Vec<FileRecord>, FileError>;
}

/// A [`FileRecord`] bound to the host services it needs.
pub struct RemoteFile<'a> {
    record: FileRecord,
    ctx: FileContext<'a>,
}

impl<'a> RemoteFile<'a> {
    pub fn new(record: FileRecord, ctx: FileContext<'a>) -> Self {
        Self { record, ctx }
    }

    pub fn record(&self) -> &FileRecord {
        &self.record
    }

    pub fn into_record(self) -> FileRecord {
        self.record
    }
}

impl FileOperations for RemoteFile<'_> {
    fn validate_url(&mut self) -> Result<(), FileError> {
        validate::validate_url(&mut self.record, &self.ctx)
    }

    fn get_full_path(&self) -> Result<Locator, FileError> {
        resolver::resolve(&self.record, self.ctx.roots, self.ctx.urls)
    }

    fn get_content(&mut self, sid: &str) -> Result<&Content, FileError> {
        if self.record.is_folder {
            return Err(FileError::NotReadable);
        }

        let content = match self.record.content.take() {
            Some(cached) => cached,
            None => {
                self.validate_url()?;
                let locator = self.get_full_path()?;
                tracing::debug!(url = %self.record.file_url, %locator, "reading file content");
                Content::from_bytes(fetch::read_locator(&locator, self.ctx.http, sid)?)
            }
        };
        Ok(&*self.record.content.insert(content))
    }

    fn generate_content_hash(&mut self, sid: &str) -> Result<(), FileError> {
        if self.record.content_hash.is_some()
            || self.record.file_url.is_empty()
            || self.record.is_external()
        {
            return Ok(());
        }

        let digest = self.ctx.digest;
        let hash = match self.get_content(sid).map(|c| checksum::content_hash(c, digest)) {
            Ok(hash) => hash,
            Err(FileError::Io { .. }) | Err(FileError::Http(_)) => {
                return Err(FileError::SourceUnavailable {
                    url: self.record.file_url.clone(),
                })
            }
            Err(e) => return Err(e),
        };
        self.record.content_hash = Some(hash);
        Ok(())
    }

    fn unzip(&mut self, sid: &str) -> Result<Vec<FileRecord>, FileError> {
        archive::unzip(&self.record, &self.ctx, sid)
    }
}

#[cfg(test)]
mod tests;
