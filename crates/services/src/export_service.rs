use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use daily_core::export::{
    MARKDOWN_MIME, export_to_markdown, markdown_filename, progress_from_markdown,
};
use daily_core::model::Checklist;
use daily_core::progress::ChecklistProgress;

use crate::error::DownloadError;

/// A file ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub filename: String,
    pub mime: &'static str,
    pub contents: String,
}

/// Client-side "save as" for exported files.
#[async_trait]
pub trait DownloadTarget: Send + Sync {
    /// # Errors
    ///
    /// Returns `DownloadError` when the file was not saved. A user cancelling
    /// the save is reported as `DownloadError::Cancelled`.
    async fn save(&self, file: &ExportedFile) -> Result<(), DownloadError>;
}

/// Writes downloads into a directory, creating it if needed.
#[derive(Debug, Clone)]
pub struct DirectoryDownloads {
    dir: PathBuf,
}

impl DirectoryDownloads {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn path_for(&self, file: &ExportedFile) -> PathBuf {
        self.dir.join(&file.filename)
    }
}

#[async_trait]
impl DownloadTarget for DirectoryDownloads {
    async fn save(&self, file: &ExportedFile) -> Result<(), DownloadError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| DownloadError::Io {
                path: self.dir.clone(),
                source,
            })?;
        let path = self.path_for(file);
        tokio::fs::write(&path, file.contents.as_bytes())
            .await
            .map_err(|source| DownloadError::Io { path, source })
    }
}

/// Builds export documents and hands them to a download target.
#[derive(Clone)]
pub struct ExportService {
    downloads: Arc<dyn DownloadTarget>,
}

impl ExportService {
    #[must_use]
    pub fn new(downloads: Arc<dyn DownloadTarget>) -> Self {
        Self { downloads }
    }

    #[must_use]
    pub fn checklist_markdown(checklist: &Checklist, progress: &ChecklistProgress) -> ExportedFile {
        ExportedFile {
            filename: markdown_filename(checklist),
            mime: MARKDOWN_MIME,
            contents: export_to_markdown(checklist, progress),
        }
    }

    /// Exports `checklist` and triggers a download. Returns whether the file
    /// was saved; a cancelled or failed save is logged, never raised.
    pub async fn download_checklist(
        &self,
        checklist: &Checklist,
        progress: &ChecklistProgress,
    ) -> bool {
        let file = Self::checklist_markdown(checklist, progress);
        match self.downloads.save(&file).await {
            Ok(()) => {
                info!(filename = %file.filename, "checklist exported");
                true
            }
            Err(DownloadError::Cancelled) => {
                debug!(filename = %file.filename, "checklist export cancelled");
                false
            }
            Err(err) => {
                warn!(filename = %file.filename, error = %err, "checklist export failed");
                false
            }
        }
    }

    /// Reads completion state back out of an exported document.
    #[must_use]
    pub fn import_checklist(checklist: &Checklist, markdown: &str) -> ChecklistProgress {
        progress_from_markdown(checklist, markdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daily_core::model::{ChecklistItem, Difficulty, ItemId, Slug};

    struct CancellingTarget;

    #[async_trait]
    impl DownloadTarget for CancellingTarget {
        async fn save(&self, _file: &ExportedFile) -> Result<(), DownloadError> {
            Err(DownloadError::Cancelled)
        }
    }

    fn checklist() -> Checklist {
        Checklist::new(
            Slug::new("ci-pipeline").unwrap(),
            "CI Pipeline",
            "CI/CD",
            Difficulty::Beginner,
            vec![
                ChecklistItem::new(ItemId::new("lint").unwrap(), "Lint on every push"),
                ChecklistItem::new(ItemId::new("cache").unwrap(), "Cache dependencies"),
            ],
        )
    }

    #[tokio::test]
    async fn writes_markdown_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let downloads = DirectoryDownloads::new(dir.path().join("exports"));
        let service = ExportService::new(Arc::new(downloads.clone()));
        let progress = ChecklistProgress::new().with_item(ItemId::new("lint").unwrap(), true);

        assert!(service.download_checklist(&checklist(), &progress).await);

        let written = std::fs::read_to_string(dir.path().join("exports/ci-pipeline.md")).unwrap();
        assert!(written.contains("- [x] Lint on every push\n"));
        assert!(written.contains("- [ ] Cache dependencies\n"));
    }

    #[tokio::test]
    async fn cancelled_download_is_not_an_error() {
        let service = ExportService::new(Arc::new(CancellingTarget));
        let saved = service
            .download_checklist(&checklist(), &ChecklistProgress::new())
            .await;
        assert!(!saved);
    }

    #[tokio::test]
    async fn unwritable_directory_reports_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "occupied").unwrap();
        let service = ExportService::new(Arc::new(DirectoryDownloads::new(&blocker)));

        let saved = service
            .download_checklist(&checklist(), &ChecklistProgress::new())
            .await;
        assert!(!saved);
        assert!(!blocker.join("ci-pipeline.md").exists());
    }

    #[test]
    fn exported_file_metadata() {
        let file = ExportService::checklist_markdown(&checklist(), &ChecklistProgress::new());
        assert_eq!(file.filename, "ci-pipeline.md");
        assert_eq!(file.mime, "text/markdown");
    }

    #[test]
    fn import_recovers_completion() {
        let checklist = checklist();
        let progress = ChecklistProgress::new().with_item(ItemId::new("cache").unwrap(), true);
        let file = ExportService::checklist_markdown(&checklist, &progress);

        let restored = ExportService::import_checklist(&checklist, &file.contents);
        assert_eq!(restored.completion(&checklist.items), 50);
        assert!(restored.is_done(&ItemId::new("cache").unwrap()));
    }
}
