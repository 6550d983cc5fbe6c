use daily_core::Clock;
use daily_core::model::{QuizQuestion, Scope};
use daily_core::progress::{QuizAttempt, QuizResult, ScoreRating, score_rating};
use storage::StorageKey;

use crate::progress_store::{ProgressStore, ProgressUpdate, SaveStatus};

/// Score, rating and points of an attempt against its question set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub result: QuizResult,
    pub rating: ScoreRating,
    pub points_earned: u32,
    pub points_possible: u32,
}

impl QuizOutcome {
    #[must_use]
    pub fn of(attempt: &QuizAttempt, questions: &[QuizQuestion]) -> Self {
        let result = attempt.result_for(questions);
        Self {
            result,
            rating: score_rating(result.percentage),
            points_earned: attempt.points_earned(questions),
            points_possible: questions.iter().map(|q| q.points).sum(),
        }
    }
}

/// Quiz-mode attempts, one per scope ("all" or a category).
#[derive(Clone)]
pub struct QuizModeService {
    clock: Clock,
    store: ProgressStore,
}

impl QuizModeService {
    #[must_use]
    pub fn new(clock: Clock, store: ProgressStore) -> Self {
        Self { clock, store }
    }

    pub async fn attempt(&self, scope: &Scope) -> QuizAttempt {
        self.store.load(&StorageKey::quiz_mode(scope)).await
    }

    /// Replaces any stored attempt with a fresh one started now.
    pub async fn start(&self, scope: &Scope) -> ProgressUpdate<QuizAttempt> {
        self.persist(scope, QuizAttempt::started(self.clock.now()))
            .await
    }

    /// Grades `option` for `question` and moves to the next question.
    ///
    /// Answering after a finished attempt begins a new attempt.
    pub async fn answer(
        &self,
        scope: &Scope,
        question: &QuizQuestion,
        option: usize,
    ) -> ProgressUpdate<QuizAttempt> {
        let current = self.attempt(scope).await;
        let base = if current.completed {
            QuizAttempt::started(self.clock.now())
        } else if current.started_at.is_none() {
            QuizAttempt {
                started_at: Some(self.clock.now()),
                ..current
            }
        } else {
            current
        };
        self.persist(scope, base.with_answer(question, option)).await
    }

    /// Marks the attempt completed now. Finishing twice keeps the first time.
    pub async fn finish(&self, scope: &Scope) -> ProgressUpdate<QuizAttempt> {
        let current = self.attempt(scope).await;
        if current.completed {
            return ProgressUpdate {
                progress: current,
                status: SaveStatus::Saved,
            };
        }
        let finished = current.finished(self.clock.now());
        self.persist(scope, finished).await
    }

    pub async fn outcome(&self, scope: &Scope, questions: &[QuizQuestion]) -> QuizOutcome {
        QuizOutcome::of(&self.attempt(scope).await, questions)
    }

    /// Deletes the stored attempt. Callers confirm with the user first.
    pub async fn reset(&self, scope: &Scope) -> SaveStatus {
        self.store.remove(&StorageKey::quiz_mode(scope)).await
    }

    async fn persist(&self, scope: &Scope, attempt: QuizAttempt) -> ProgressUpdate<QuizAttempt> {
        let status = self.store.save(&StorageKey::quiz_mode(scope), &attempt).await;
        ProgressUpdate {
            progress: attempt,
            status,
        }
    }
}
