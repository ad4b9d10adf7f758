//! Which archive entries become file records, and under what name.

use crate::url_model::base_name;

/// Top-level directory macOS Finder adds to every archive it creates.
const PLATFORM_JUNK_DIR: &[u8] = b"__MACOSX/";

/// Recovers an entry's real file name.
///
/// Many archivers write UTF-8 names without setting the UTF-8 flag, and the
/// zip reader then decodes them as CP437 (`decoded`). Valid UTF-8 raw bytes are
/// taken as UTF-8, which also covers flagged entries; anything else really was
/// CP437 and keeps the reader's decoding.
pub(crate) fn recover_name(raw: &[u8], decoded: &str) -> String {
    match std::str::from_utf8(raw) {
        Ok(name) => name.to_string(),
        Err(_) => decoded.to_string(),
    }
}

/// Base name to store the entry under, or `None` when the entry is skipped:
/// directories, anything below `__MACOSX/`, and hidden files.
pub(crate) fn kept_file_name(is_dir: bool, raw: &[u8], decoded: &str) -> Option<String> {
    if is_dir || raw.starts_with(PLATFORM_JUNK_DIR) {
        return None;
    }
    let name = recover_name(raw, decoded);
    let base = base_name(&name);
    if base.is_empty() || base.starts_with('.') {
        return None;
    }
    Some(base.to_string())
}
