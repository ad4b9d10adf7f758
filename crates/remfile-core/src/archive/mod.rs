//! Expands a ZIP file record into one record per contained file.

mod entry;

use std::io::{Cursor, Read, Seek};

use crate::error::FileError;
use crate::host::FileContext;
use crate::record::{Content, FileRecord};
use crate::resolver::{resolve, Locator};
use crate::url_model::is_within;

/// File URLs must end with this to be expanded.
pub const ZIP_EXTENSION: &str = ".zip";

/// Upper bound on the buffer reserved from an entry's declared size. The
/// declared size comes from the archive itself and may be garbage.
const MAX_PREALLOC: u64 = 16 * 1024 * 1024;

/// A surviving archive entry, fully decompressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// Decompresses every entry worth keeping, in archive order.
///
/// Everything is read before returning so a corrupt entry fails the whole
/// archive rather than leaving a partial expansion behind.
pub fn read_entries<R: Read + Seek>(reader: R) -> Result<Vec<ArchiveEntry>, FileError> {
    let mut archive = zip::ZipArchive::new(reader)?;
    let mut entries = Vec::new();
    for index in 0..archive.len() {
        let mut file = archive.by_index(index)?;
        let Some(file_name) = entry::kept_file_name(file.is_dir(), file.name_raw(), file.name())
        else {
            tracing::debug!(entry = %file.name(), "skipping archive entry");
            continue;
        };
        let mut content = Vec::with_capacity(file.size().min(MAX_PREALLOC) as usize);
        file.read_to_end(&mut content)
            .map_err(|e| FileError::Archive(zip::result::ZipError::Io(e)))?;
        entries.push(ArchiveEntry { file_name, content });
    }
    Ok(entries)
}

/// Replaces the archive `record` with one saved child record per entry.
///
/// Children inherit folder, privacy and attachment from the archive. The
/// archive record is deleted after the last child is saved. A failing save is
/// returned as is; children saved before it stay saved.
pub fn unzip(
    record: &FileRecord,
    ctx: &FileContext<'_>,
    sid: &str,
) -> Result<Vec<FileRecord>, FileError> {
    if !record.file_url.ends_with(ZIP_EXTENSION) {
        return Err(FileError::NotAZip {
            file_name: record.file_name.clone(),
        });
    }

    let entries = match resolve(record, ctx.roots, ctx.urls)? {
        Locator::External(url) => read_entries(Cursor::new(ctx.http.get(&url, sid)?))?,
        Locator::Local(path) => {
            let root = ctx.roots.files_path(record.is_private, &[]);
            if !is_within(&root, &path) {
                tracing::warn!(
                    url = %record.file_url,
                    resolved = %path.display(),
                    "archive outside storage root"
                );
                return Err(FileError::PathTraversal {
                    url: record.file_url.clone(),
                });
            }
            let file = std::fs::File::open(&path).map_err(|e| FileError::io(&path, e))?;
            read_entries(file)?
        }
    };

    let mut files = Vec::with_capacity(entries.len());
    for entry in entries {
        let mut child = ctx.store.new_record();
        child.content = Some(Content::Binary(entry.content));
        child.file_name = entry.file_name;
        child.folder = record.folder.clone();
        child.is_private = record.is_private;
        child.attached_to_doctype = record.attached_to_doctype.clone();
        child.attached_to_name = record.attached_to_name.clone();
        ctx.store.save(&mut child).map_err(FileError::Store)?;
        tracing::info!(archive = %record.file_url, file_name = %child.file_name, "saved archive entry");
        files.push(child);
    }

    ctx.store.delete(record).map_err(FileError::Store)?;
    tracing::info!(archive = %record.file_url, children = files.len(), "archive expanded and removed");
    Ok(files)
}
