use daily_core::Clock;
use daily_core::model::{InterviewQuestion, ItemId, Scope};
use daily_core::progress::InterviewProgress;
use storage::StorageKey;

use crate::progress_store::{ProgressStore, ProgressUpdate, SaveStatus};

/// Reviewed/confident counts for a question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterviewSummary {
    pub reviewed: usize,
    pub confident: usize,
    pub total: usize,
    pub percentage: u8,
}

impl InterviewSummary {
    #[must_use]
    pub fn of(questions: &[InterviewQuestion], progress: &InterviewProgress) -> Self {
        Self {
            reviewed: progress.reviewed_count(questions),
            confident: progress.confident_count(questions),
            total: questions.len(),
            percentage: progress.completion(questions),
        }
    }
}

/// Tracks which interview questions were reviewed, per scope.
#[derive(Clone)]
pub struct InterviewProgressService {
    clock: Clock,
    store: ProgressStore,
}

impl InterviewProgressService {
    #[must_use]
    pub fn new(clock: Clock, store: ProgressStore) -> Self {
        Self { clock, store }
    }

    pub async fn progress(&self, scope: &Scope) -> InterviewProgress {
        self.store.load(&StorageKey::interview(scope)).await
    }

    pub async fn summary(&self, scope: &Scope, questions: &[InterviewQuestion]) -> InterviewSummary {
        let progress = self.progress(scope).await;
        InterviewSummary::of(questions, &progress)
    }

    pub async fn set_reviewed(
        &self,
        scope: &Scope,
        question: ItemId,
        reviewed: bool,
    ) -> ProgressUpdate<InterviewProgress> {
        let progress = self
            .progress(scope)
            .await
            .with_reviewed(question, reviewed, self.clock.now());
        self.persist(scope, progress).await
    }

    pub async fn toggle_confident(
        &self,
        scope: &Scope,
        question: ItemId,
    ) -> ProgressUpdate<InterviewProgress> {
        let progress = self
            .progress(scope)
            .await
            .with_confidence_toggled(question, self.clock.now());
        self.persist(scope, progress).await
    }

    /// Deletes the stored record. Callers confirm with the user first.
    pub async fn reset(&self, scope: &Scope) -> SaveStatus {
        self.store.remove(&StorageKey::interview(scope)).await
    }

    async fn persist(
        &self,
        scope: &Scope,
        progress: InterviewProgress,
    ) -> ProgressUpdate<InterviewProgress> {
        let status = self.store.save(&StorageKey::interview(scope), &progress).await;
        ProgressUpdate { progress, status }
    }
}
