//! Error taxonomy for file record operations.
//!
//! The first six variants are user-facing: they carry a title and a message
//! suitable for showing to whoever saved or opened the record. The rest wrap
//! the underlying cause.

use std::path::PathBuf;

use crate::fetch::FetchError;

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// URL has none of the recognized shapes.
    #[error("URL must start with http:// or https:// (got {url:?})")]
    MalformedUrl { url: String },

    /// Resolved path is not inside the storage root.
    #[error("The File URL you've entered is incorrect: {url}")]
    PathTraversal { url: String },

    /// Neither `file_url` nor `file_name` gives anything to resolve.
    #[error("There is some problem with the file url: {url:?}")]
    UnresolvableUrl { url: String },

    #[error("{file_name} is not a zip file")]
    NotAZip { file_name: String },

    #[error("Cannot get file contents of a Folder")]
    NotReadable,

    #[error("File {url} does not exist")]
    SourceUnavailable { url: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Http(#[from] FetchError),

    #[error("invalid zip archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("document store: {0:#}")]
    Store(anyhow::Error),
}

impl FileError {
    /// Short dialog title for user-facing variants.
    pub fn title(&self) -> &'static str {
        match self {
            FileError::MalformedUrl { .. } => "Invalid URL",
            FileError::PathTraversal { .. } => "Invalid File URL",
            FileError::UnresolvableUrl { .. } => "Invalid File URL",
            FileError::NotAZip { .. } => "Not a Zip File",
            FileError::NotReadable => "Cannot Read Folder",
            FileError::SourceUnavailable { .. } => "File Not Found",
            FileError::Io { .. }
            | FileError::Http(_)
            | FileError::Archive(_)
            | FileError::Store(_) => "Error",
        }
    }

    /// True for the validation and resolution failures raised before any I/O.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            FileError::MalformedUrl { .. }
                | FileError::PathTraversal { .. }
                | FileError::UnresolvableUrl { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FileError::Io {
            path: path.into(),
            source,
        }
    }
}
