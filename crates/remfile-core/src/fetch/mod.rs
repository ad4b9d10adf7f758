//! Reading a record's bytes from wherever its locator points.

mod error;
mod http;

pub use error::FetchError;
pub use http::HttpFetcher;

use crate::error::FileError;
use crate::resolver::Locator;

/// Reads every byte behind `locator`: a local file, or an authenticated GET.
pub fn read_locator(locator: &Locator, http: &HttpFetcher, sid: &str) -> Result<Vec<u8>, FileError> {
    match locator {
        Locator::External(url) => Ok(http.get(url, sid)?),
        Locator::Local(path) => std::fs::read(path).map_err(|e| FileError::io(path, e)),
    }
}
