//! Disk-backed document store.
//!
//! Saves new records by writing their in-memory content into the selected
//! storage root (staged as `<name>.part`, then renamed), and deletes records
//! by removing their backing file. Record metadata itself is not persisted;
//! that stays with the host.

mod writer;

pub use writer::StagedFile;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::checksum::ContentDigest;
use crate::host::{DocumentStore, StorageRoots};
use crate::record::FileRecord;
use crate::resolver::{resolve, Locator};
use crate::site::Site;
use crate::url_model::{is_within, local_file_url, sanitize_file_name};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Name used when a record's file name sanitizes to nothing.
const FALLBACK_FILE_NAME: &str = "file.bin";

/// Path for the temp file: appends `.part` to the final path (e.g. `a.pdf` → `a.pdf.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// First of `name`, `stem-1.ext`, `stem-2.ext`, ... not present in `dir`.
fn unique_name(dir: &Path, name: &str) -> String {
    if !dir.join(name).exists() {
        return name.to_string();
    }
    let (stem, ext) = match name.rfind('.') {
        Some(i) if i > 0 => name.split_at(i),
        _ => (name, ""),
    };
    (1u32..)
        .map(|n| format!("{}-{}{}", stem, n, ext))
        .find(|candidate| !dir.join(candidate).exists())
        .unwrap_or_else(|| name.to_string())
}

/// [`DocumentStore`] writing file bytes under a [`Site`]'s storage roots.
#[derive(Debug, Clone)]
pub struct DiskStore {
    site: Site,
    digest: ContentDigest,
}

impl DiskStore {
    pub fn new(site: Site) -> Self {
        Self {
            site,
            digest: ContentDigest::default(),
        }
    }

    /// Digest written to `content_hash` for newly stored files.
    pub fn with_digest(mut self, digest: ContentDigest) -> Self {
        self.digest = digest;
        self
    }

    fn write_content(&self, record: &mut FileRecord, bytes: &[u8]) -> Result<()> {
        let dir = self.site.files_path(record.is_private, &[]);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create storage root {}", dir.display()))?;

        let mut base = sanitize_file_name(&record.file_name);
        if base.is_empty() {
            base = FALLBACK_FILE_NAME.to_string();
        }
        let name = unique_name(&dir, &base);
        let final_path = dir.join(&name);

        let mut staged = StagedFile::create(&temp_path(&final_path))?;
        if let Err(e) = staged.write_all(bytes) {
            staged.discard();
            return Err(e);
        }
        staged.finalize(&final_path)?;

        record.file_url = local_file_url(&name, record.is_private);
        record.file_name = name;
        if record.content_hash.is_none() {
            record.content_hash = Some(self.digest.hex(bytes));
        }
        tracing::info!(url = %record.file_url, bytes = bytes.len(), "stored file");
        Ok(())
    }
}

impl DocumentStore for DiskStore {
    fn save(&self, record: &mut FileRecord) -> Result<()> {
        if record.file_url.is_empty() && !record.is_folder {
            if let Some(content) = record.content.take() {
                let result = self.write_content(record, content.as_bytes());
                record.content = Some(content);
                result?;
            }
        }
        if record.name.is_none() {
            record.name = Some(record.file_url.clone());
        }
        Ok(())
    }

    fn delete(&self, record: &FileRecord) -> Result<()> {
        let path = match resolve(record, &self.site, &self.site) {
            Ok(Locator::Local(path)) => path,
            Ok(Locator::External(url)) => {
                tracing::debug!(%url, "external file; nothing to remove locally");
                return Ok(());
            }
            Err(e) => return Err(e).context("resolve file to delete"),
        };
        let root = self.site.files_path(record.is_private, &[]);
        if !is_within(&root, &path) {
            anyhow::bail!(
                "refusing to delete {} outside {}",
                path.display(),
                root.display()
            );
        }
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "removed file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("remove {}", path.display())),
        }
    }
}
