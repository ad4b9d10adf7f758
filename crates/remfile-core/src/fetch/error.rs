//! Outbound fetch error type.

use std::fmt;

/// Error returned by an HTTP GET of an external file URL.
#[derive(Debug)]
pub enum FetchError {
    /// Curl reported an error (bad URL, connection refused, timeout, ...).
    Curl(curl::Error),
    /// HTTP response had a non-2xx status.
    Http { url: String, code: u32 },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Curl(e) => write!(f, "GET failed: {}", e),
            FetchError::Http { url, code } => write!(f, "GET {} returned HTTP {}", url, code),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Curl(e) => Some(e),
            FetchError::Http { .. } => None,
        }
    }
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        FetchError::Curl(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_display() {
        let e = FetchError::Http {
            url: "https://x/a.pdf".into(),
            code: 403,
        };
        assert_eq!(e.to_string(), "GET https://x/a.pdf returned HTTP 403");
        assert!(std::error::Error::source(&e).is_none());
    }
}
