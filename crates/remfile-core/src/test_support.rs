//! Shared fixtures for unit tests: a temp site, an in-memory store, and a context.

use std::path::PathBuf;
use std::sync::Mutex;

use crate::checksum::ContentDigest;
use crate::fetch::HttpFetcher;
use crate::host::{DefaultFileHooks, DocumentStore, FileContext, StorageRoots};
use crate::record::FileRecord;
use crate::site::Site;

/// Records every save and delete; optionally fails the n-th save.
#[derive(Default)]
pub(crate) struct MemoryStore {
    pub saved: Mutex<Vec<FileRecord>>,
    pub deleted: Mutex<Vec<FileRecord>>,
    pub fail_on_save: Option<usize>,
}

impl DocumentStore for MemoryStore {
    fn save(&self, record: &mut FileRecord) -> anyhow::Result<()> {
        let mut saved = self.saved.lock().unwrap();
        if self.fail_on_save == Some(saved.len()) {
            anyhow::bail!("disk full");
        }
        if record.name.is_none() {
            record.name = Some(format!("file-{}", saved.len() + 1));
        }
        saved.push(record.clone());
        Ok(())
    }

    fn delete(&self, record: &FileRecord) -> anyhow::Result<()> {
        self.deleted.lock().unwrap().push(record.clone());
        Ok(())
    }
}

pub(crate) struct TestEnv {
    pub dir: tempfile::TempDir,
    pub site: Site,
    pub store: MemoryStore,
    pub hooks: DefaultFileHooks,
    pub http: HttpFetcher,
    pub prefix: String,
    pub digest: ContentDigest,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_store(MemoryStore::default())
    }

    pub fn with_store(store: MemoryStore) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path().join("site"), "http://127.0.0.1:9").unwrap();
        site.ensure_roots().unwrap();
        Self {
            dir,
            site,
            store,
            hooks: DefaultFileHooks,
            http: HttpFetcher::default(),
            prefix: "/api/method/remfile.controller.generate_file".to_string(),
            digest: ContentDigest::default(),
        }
    }

    pub fn ctx(&self) -> FileContext<'_> {
        FileContext {
            roots: &self.site,
            urls: &self.site,
            store: &self.store,
            hooks: &self.hooks,
            http: &self.http,
            archive_api_prefix: &self.prefix,
            digest: self.digest,
        }
    }

    pub fn site_root(&self, is_private: bool) -> PathBuf {
        self.site.files_path(is_private, &[])
    }

    pub fn write_public(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.site_root(false).join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    pub fn write_private(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.site_root(true).join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }
}
