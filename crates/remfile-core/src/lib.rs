//! Remote-capable file records.
//!
//! A file record's stored URL may point into the site's public or private
//! storage root, at an internal archive-generation endpoint, or at any
//! external http(s) location such as object storage. This crate resolves that
//! URL to a concrete byte source, checks it cannot escape the storage root,
//! reads and fingerprints the bytes, and expands ZIP files into child records.
//!
//! Host services (persistence, storage roots, base URL, default hooks) are
//! consumed through the traits in [`host`].

pub mod config;
pub mod logging;

pub mod archive;
pub mod checksum;
pub mod error;
pub mod fetch;
pub mod host;
pub mod record;
pub mod remote_file;
pub mod resolver;
pub mod site;
pub mod storage;
pub mod url_model;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::FileError;
pub use host::{DefaultFileHooks, DocumentStore, FileContext, FileHooks, StorageRoots, UrlBuilder};
pub use record::{Content, FileRecord, RecordFlags};
pub use remote_file::{FileOperations, RemoteFile};
pub use resolver::Locator;
