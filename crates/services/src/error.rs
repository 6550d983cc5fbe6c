//! Shared error types for the services crate.
//!
//! Progress reads and writes never return these: they fail soft. Only
//! bootstrapping and content lookups do.

use thiserror::Error;

use storage::content_source::ContentSourceError;
use storage::sqlite::SqliteInitError;

/// Errors emitted while loading content.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentServiceError {
    #[error("no checklist with slug {0}")]
    UnknownChecklist(String),
    #[error("no quiz with slug {0}")]
    UnknownQuiz(String),
    #[error(transparent)]
    Source(#[from] ContentSourceError),
}

/// Errors emitted by a download target. Logged, never returned to callers
/// of `ExportService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DownloadError {
    #[error("download cancelled")]
    Cancelled,
    #[error("failed to write {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors emitted by a clipboard. Logged, never returned to callers of
/// `ShareService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClipboardError {
    #[error("clipboard permission denied")]
    PermissionDenied,
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Content(#[from] ContentServiceError),
}
