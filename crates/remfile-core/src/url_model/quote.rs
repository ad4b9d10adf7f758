//! Percent quoting for stored file URLs and file names.

use std::borrow::Cow;

/// Percent-encodes `input`, leaving `/` and unreserved characters
/// (`A-Z a-z 0-9 - _ . ~`) as they are.
///
/// # Examples
///
/// - `quote("my file.pdf")` → `"my%20file.pdf"`
/// - `quote("a/b c")` → `"a/b%20c"`
pub fn quote(input: &str) -> String {
    input
        .split('/')
        .map(urlencoding::encode)
        .collect::<Vec<Cow<'_, str>>>()
        .join("/")
}

/// Decodes `%XX` escapes. Invalid UTF-8 after decoding is replaced with U+FFFD;
/// malformed escapes are kept literally.
pub fn unquote(input: &str) -> String {
    if !input.contains('%') {
        return input.to_string();
    }
    let bytes = urlencoding::decode_binary(input.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}
