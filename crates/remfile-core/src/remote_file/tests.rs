//! Tests for the record-level operations on local files.
//! HTTP-backed behavior is covered by the integration tests.

use super::{FileOperations, RemoteFile};
use crate::checksum::{sha256_bytes, ContentDigest};
use crate::error::FileError;
use crate::record::{Content, FileRecord};
use crate::resolver::Locator;
use crate::test_support::TestEnv;

#[test]
fn reads_text_file_as_text() {
    let env = TestEnv::new();
    env.write_public("notes.txt", b"hello");
    let mut file = RemoteFile::new(FileRecord::with_url("/files/notes.txt"), env.ctx());
    assert_eq!(
        file.get_content("sid").unwrap(),
        &Content::Text("hello".to_string())
    );
}

#[test]
fn reads_binary_file_as_bytes() {
    let env = TestEnv::new();
    let png = [0x89u8, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0xff];
    env.write_private("logo.png", &png);
    let mut rec = FileRecord::with_url("/private/files/logo.png");
    rec.is_private = true;
    let mut file = RemoteFile::new(rec, env.ctx());
    assert_eq!(
        file.get_content("sid").unwrap(),
        &Content::Binary(png.to_vec())
    );
}

#[test]
fn second_read_uses_cache_without_io() {
    let env = TestEnv::new();
    let path = env.write_public("once.txt", b"first");
    let mut file = RemoteFile::new(FileRecord::with_url("/files/once.txt"), env.ctx());

    let first = file.get_content("sid").unwrap().clone();
    std::fs::remove_file(&path).unwrap();
    let second = file.get_content("sid").unwrap().clone();
    assert_eq!(first, second);
}

#[test]
fn cached_content_skips_validation() {
    let env = TestEnv::new();
    let mut rec = FileRecord::with_url("/files/../../etc/passwd");
    rec.content = Some(Content::Text("preloaded".into()));
    let mut file = RemoteFile::new(rec, env.ctx());
    assert_eq!(
        file.get_content("sid").unwrap(),
        &Content::Text("preloaded".into())
    );
}

#[test]
fn folder_has_no_content() {
    let env = TestEnv::new();
    let mut rec = FileRecord::with_url("/files/Home");
    rec.is_folder = true;
    rec.content = Some(Content::Text("ignored".into()));
    let mut file = RemoteFile::new(rec, env.ctx());
    assert!(matches!(
        file.get_content("sid").unwrap_err(),
        FileError::NotReadable
    ));
}

#[test]
fn traversal_is_rejected_before_reading() {
    let env = TestEnv::new();
    std::fs::write(env.dir.path().join("secret.txt"), b"s").unwrap();
    let mut file = RemoteFile::new(
        FileRecord::with_url("/files/../../secret.txt"),
        env.ctx(),
    );
    assert!(matches!(
        file.get_content("sid").unwrap_err(),
        FileError::PathTraversal { .. }
    ));
    assert!(file.record().content.is_none());
}

#[test]
fn missing_local_file_is_io_error() {
    let env = TestEnv::new();
    let mut file = RemoteFile::new(FileRecord::with_url("/files/nope.txt"), env.ctx());
    assert!(matches!(
        file.get_content("sid").unwrap_err(),
        FileError::Io { .. }
    ));
}

#[test]
fn hash_computed_for_local_file() {
    let env = TestEnv::new();
    env.write_public("h.txt", b"hash me");
    let mut file = RemoteFile::new(FileRecord::with_url("/files/h.txt"), env.ctx());
    file.generate_content_hash("sid").unwrap();
    let rec = file.into_record();
    assert_eq!(
        rec.content_hash.as_deref(),
        Some(sha256_bytes(b"hash me").as_str())
    );
    assert_eq!(rec.content, Some(Content::Text("hash me".into())));
}

#[test]
fn hash_uses_context_digest() {
    let mut env = TestEnv::new();
    env.digest = ContentDigest::Md5;
    env.write_public("hello.txt", b"hello\n");
    let mut file = RemoteFile::new(FileRecord::with_url("/files/hello.txt"), env.ctx());
    file.generate_content_hash("sid").unwrap();
    assert_eq!(
        file.record().content_hash.as_deref(),
        Some("b1946ac92492d2347c6235b4d2611184")
    );
}

#[test]
fn existing_hash_is_never_recomputed() {
    let env = TestEnv::new();
    env.write_public("h.txt", b"new bytes");
    let mut rec = FileRecord::with_url("/files/h.txt");
    rec.content_hash = Some("stale".into());
    let mut file = RemoteFile::new(rec, env.ctx());
    file.generate_content_hash("sid").unwrap();
    assert_eq!(file.record().content_hash.as_deref(), Some("stale"));
    assert!(file.record().content.is_none());
}

#[test]
fn hash_skipped_for_empty_and_external_urls() {
    let env = TestEnv::new();
    for url in ["", "https://bucket.example.com/a.pdf", "http://127.0.0.1:9/a.pdf"] {
        let mut rec = FileRecord::with_url(url);
        rec.file_name = "a.pdf".into();
        let mut file = RemoteFile::new(rec, env.ctx());
        file.generate_content_hash("sid").unwrap();
        assert!(file.record().content_hash.is_none(), "{}", url);
        assert!(file.record().content.is_none(), "{}", url);
    }
}

#[test]
fn hash_of_missing_file_is_source_unavailable() {
    let env = TestEnv::new();
    let mut file = RemoteFile::new(FileRecord::with_url("/files/gone.txt"), env.ctx());
    let err = file.generate_content_hash("sid").unwrap_err();
    assert!(matches!(err, FileError::SourceUnavailable { ref url } if url == "/files/gone.txt"));
    assert_eq!(err.title(), "File Not Found");
    assert!(file.record().content_hash.is_none());
}

#[test]
fn hash_keeps_validation_errors() {
    let env = TestEnv::new();
    let mut file = RemoteFile::new(FileRecord::with_url("/etc/passwd"), env.ctx());
    assert!(matches!(
        file.generate_content_hash("sid").unwrap_err(),
        FileError::MalformedUrl { .. }
    ));
}

#[test]
fn full_path_of_bare_name() {
    let env = TestEnv::new();
    let file = RemoteFile::new(FileRecord::with_url("report.pdf"), env.ctx());
    assert_eq!(
        file.get_full_path().unwrap(),
        Locator::Local(env.site_root(false).join("report.pdf"))
    );
}

#[test]
fn unzip_through_record() {
    let env = TestEnv::new();
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    zip.start_file("inner.txt", zip::write::FileOptions::default())
        .unwrap();
    std::io::Write::write_all(&mut zip, b"inside").unwrap();
    env.write_public("pack.zip", &zip.finish().unwrap().into_inner());

    let mut file = RemoteFile::new(FileRecord::with_url("/files/pack.zip"), env.ctx());
    let children = file.unzip("sid").unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].file_name, "inner.txt");
    assert_eq!(env.store.deleted.lock().unwrap().len(), 1);
}
