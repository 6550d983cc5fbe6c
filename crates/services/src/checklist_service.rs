use daily_core::model::{Checklist, ItemId, Slug};
use daily_core::progress::ChecklistProgress;
use storage::StorageKey;

use crate::progress_store::{ProgressStore, ProgressUpdate, SaveStatus};

/// Presentation-agnostic completion summary of one checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistSummary {
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
}

impl ChecklistSummary {
    #[must_use]
    pub fn of(checklist: &Checklist, progress: &ChecklistProgress) -> Self {
        Self {
            completed: progress.completed_count(&checklist.items),
            total: checklist.items.len(),
            percentage: progress.completion(&checklist.items),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Read-modify-write access to checklist progress.
///
/// Concurrent writers are not coordinated: the last write wins.
#[derive(Clone)]
pub struct ChecklistProgressService {
    store: ProgressStore,
}

impl ChecklistProgressService {
    #[must_use]
    pub fn new(store: ProgressStore) -> Self {
        Self { store }
    }

    pub async fn progress(&self, slug: &Slug) -> ChecklistProgress {
        self.store.load(&StorageKey::checklist(slug)).await
    }

    pub async fn summary(&self, checklist: &Checklist) -> ChecklistSummary {
        let progress = self.progress(&checklist.slug).await;
        ChecklistSummary::of(checklist, &progress)
    }

    /// Sets one item and persists the whole record.
    pub async fn set_item(
        &self,
        slug: &Slug,
        item: ItemId,
        done: bool,
    ) -> ProgressUpdate<ChecklistProgress> {
        let progress = self.progress(slug).await.with_item(item, done);
        self.persist(slug, progress).await
    }

    pub async fn toggle_item(&self, slug: &Slug, item: &ItemId) -> ProgressUpdate<ChecklistProgress> {
        let progress = self.progress(slug).await.toggled(item);
        self.persist(slug, progress).await
    }

    /// Deletes the stored record. Callers confirm with the user first.
    pub async fn reset(&self, slug: &Slug) -> SaveStatus {
        self.store.remove(&StorageKey::checklist(slug)).await
    }

    /// Replaces the stored record, e.g. after importing an exported file.
    pub async fn replace(
        &self,
        slug: &Slug,
        progress: ChecklistProgress,
    ) -> ProgressUpdate<ChecklistProgress> {
        self.persist(slug, progress).await
    }

    async fn persist(
        &self,
        slug: &Slug,
        progress: ChecklistProgress,
    ) -> ProgressUpdate<ChecklistProgress> {
        let status = self.store.save(&StorageKey::checklist(slug), &progress).await;
        ProgressUpdate { progress, status }
    }
}
