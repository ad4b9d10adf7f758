//! URL and path helpers shared by the resolver, validator and storage.
//!
//! Quoting follows the usual web rules for file names inside query strings;
//! containment checks always compare canonical paths.

mod path;
mod quote;
mod sanitize;

pub use path::{is_within, realpath};
pub use quote::{quote, unquote};
pub use sanitize::sanitize_file_name;

/// Stored URL prefix for files under the public root.
pub const PUBLIC_PREFIX: &str = "/files/";
/// Stored URL prefix for files under the private root.
pub const PRIVATE_PREFIX: &str = "/private/files/";
/// Prefix of internal API links (resolved through the host's base URL).
pub const API_PREFIX: &str = "/api/";
/// Query parameter carrying the file name in API links.
pub const FILE_NAME_PARAM: &str = "&file_name=";

/// Stored URL for a file called `file_name` in the selected root.
pub fn local_file_url(file_name: &str, is_private: bool) -> String {
    if is_private {
        format!("{}{}", PRIVATE_PREFIX, file_name)
    } else {
        format!("{}{}", PUBLIC_PREFIX, file_name)
    }
}

/// Last `/`-separated component of `path` (the whole string when there is no `/`).
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_file_url_by_privacy() {
        assert_eq!(local_file_url("a.txt", false), "/files/a.txt");
        assert_eq!(local_file_url("a.txt", true), "/private/files/a.txt");
    }

    #[test]
    fn base_name_of_nested_and_bare() {
        assert_eq!(base_name("dir/sub/a.txt"), "a.txt");
        assert_eq!(base_name("a.txt"), "a.txt");
        assert_eq!(base_name("dir/"), "");
    }
}
