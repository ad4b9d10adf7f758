//! The file record and its transient content buffer.

use serde::{Deserialize, Serialize};

/// Bytes read for a record, decoded to text when they are valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Plain text asset.
    Text(String),
    /// Anything that did not decode (images, archives, ...).
    Binary(Vec<u8>),
}

impl Content {
    /// Best-effort text decode: valid UTF-8 becomes `Text`, everything else stays `Binary`.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Content::Text(text),
            Err(e) => Content::Binary(e.into_bytes()),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Content::Text(s) => s.as_bytes(),
            Content::Binary(b) => b,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Content::Text(_))
    }
}

/// Per-call switches the host sets on a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFlags {
    /// Skip the generic existence check for empty or external URLs.
    #[serde(default)]
    pub ignore_file_validate: bool,
}

/// A managed file document.
///
/// `file_url` is the authoritative locator; `file_name` is the fallback when it
/// is empty. `content` is never persisted: it caches bytes for the lifetime of
/// this instance only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileRecord {
    /// Host document id, assigned on save.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub file_url: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub is_folder: bool,
    #[serde(default)]
    pub content_hash: Option<String>,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub attached_to_doctype: Option<String>,
    #[serde(default)]
    pub attached_to_name: Option<String>,
    #[serde(skip)]
    pub content: Option<Content>,
    #[serde(skip)]
    pub flags: RecordFlags,
}

impl FileRecord {
    /// Record pointing at `file_url`.
    pub fn with_url(file_url: impl Into<String>) -> Self {
        Self {
            file_url: file_url.into(),
            ..Self::default()
        }
    }

    /// True when `file_url` is an absolute http(s) URL.
    pub fn is_external(&self) -> bool {
        is_external_url(&self.file_url)
    }
}

/// Absolute http(s) URL check shared by the validator and resolver.
pub fn is_external_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
