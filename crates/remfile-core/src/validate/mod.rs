//! Gatekeeper for stored file URLs.
//!
//! Runs before any read. External URLs only get the host's generic existence
//! check; local URLs must name a path that canonicalizes to somewhere inside
//! the storage root picked by `is_private`.

use crate::error::FileError;
use crate::host::FileContext;
use crate::record::FileRecord;
use crate::resolver::{resolve, Locator};
use crate::url_model::{realpath, unquote, PRIVATE_PREFIX, PUBLIC_PREFIX};

/// Validates `record.file_url`.
///
/// On the local-path branch the URL is percent-decoded in place and the
/// host may move the file between roots (and rewrite the URL) when the privacy
/// flag changed.
pub fn validate_url(record: &mut FileRecord, ctx: &FileContext<'_>) -> Result<(), FileError> {
    if !ctx.archive_api_prefix.is_empty() && record.file_url.starts_with(ctx.archive_api_prefix) {
        return Ok(());
    }

    if record.file_url.is_empty() || record.is_external() {
        if !record.flags.ignore_file_validate {
            let locator = resolve(record, ctx.roots, ctx.urls)?;
            ctx.hooks.validate_file(record, &locator)?;
        }
        return Ok(());
    }

    if !record.file_url.starts_with(PUBLIC_PREFIX) && !record.file_url.starts_with(PRIVATE_PREFIX) {
        return Err(FileError::MalformedUrl {
            url: record.file_url.clone(),
        });
    }

    record.file_url = unquote(&record.file_url);
    ctx.hooks.handle_is_private_changed(record, ctx.roots)?;

    let root = realpath(&ctx.roots.files_path(record.is_private, &[]));
    let path = match resolve(record, ctx.roots, ctx.urls)? {
        Locator::Local(path) => realpath(&path),
        Locator::External(_) => {
            return Err(FileError::MalformedUrl {
                url: record.file_url.clone(),
            })
        }
    };
    if !path.starts_with(&root) {
        tracing::warn!(
            url = %record.file_url,
            resolved = %path.display(),
            root = %root.display(),
            "file url escapes storage root"
        );
        return Err(FileError::PathTraversal {
            url: record.file_url.clone(),
        });
    }
    Ok(())
}
