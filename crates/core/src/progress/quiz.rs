use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{ContentItem, ItemId, QuizQuestion};
use crate::time::rounded_seconds_between;

use super::{PersistedShape, percentage};

/// In-progress or finished attempt at a quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub current_index: usize,
    pub answers: BTreeMap<ItemId, bool>,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Score summary of an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    pub correct: usize,
    pub total: usize,
    pub percentage: u8,
    pub time_spent_seconds: Option<u64>,
}

impl QuizAttempt {
    /// A fresh attempt starting at `at`.
    #[must_use]
    pub fn started(at: DateTime<Utc>) -> Self {
        Self {
            started_at: Some(at),
            ..Self::default()
        }
    }

    /// Returns a copy with `question` graded against `option` and the cursor
    /// moved past it.
    #[must_use]
    pub fn with_answer(&self, question: &QuizQuestion, option: usize) -> Self {
        let mut next = self.clone();
        next.answers
            .insert(question.id().clone(), question.is_correct(option));
        next.current_index = self.current_index.saturating_add(1);
        next
    }

    /// Returns a copy with `id` recorded as `correct`, cursor unchanged.
    #[must_use]
    pub fn with_correctness(&self, id: ItemId, correct: bool) -> Self {
        let mut next = self.clone();
        next.answers.insert(id, correct);
        next
    }

    /// Returns a copy marked completed at `at`.
    #[must_use]
    pub fn finished(&self, at: DateTime<Utc>) -> Self {
        Self {
            completed: true,
            completed_at: Some(at),
            ..self.clone()
        }
    }

    /// Scores every recorded answer.
    #[must_use]
    pub fn result(&self) -> QuizResult {
        let correct = self.answers.values().filter(|ok| **ok).count();
        self.build_result(correct, self.answers.len())
    }

    /// Scores against the current question set. Answers to questions that
    /// are no longer in `questions` are ignored; unanswered questions count
    /// toward the total.
    #[must_use]
    pub fn result_for(&self, questions: &[QuizQuestion]) -> QuizResult {
        let correct = questions
            .iter()
            .filter(|q| self.answers.get(q.id()).copied().unwrap_or(false))
            .count();
        self.build_result(correct, questions.len())
    }

    /// Points from correctly answered questions in `questions`.
    #[must_use]
    pub fn points_earned(&self, questions: &[QuizQuestion]) -> u32 {
        questions
            .iter()
            .filter(|q| self.answers.get(q.id()).copied().unwrap_or(false))
            .map(|q| q.points)
            .sum()
    }

    fn build_result(&self, correct: usize, total: usize) -> QuizResult {
        let time_spent_seconds = match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => Some(rounded_seconds_between(start, end)),
            _ => None,
        };
        QuizResult {
            correct,
            total,
            percentage: percentage(correct, total),
            time_spent_seconds,
        }
    }
}

impl PersistedShape for QuizAttempt {
    fn is_well_formed(&self) -> bool {
        if self.completed_at.is_some() && !self.completed {
            return false;
        }
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => start <= end,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn id(raw: &str) -> ItemId {
        ItemId::new(raw).unwrap()
    }

    fn question(raw: &str, correct: usize) -> QuizQuestion {
        QuizQuestion::new(id(raw), format!("Q {raw}"), vec!["a".into(), "b".into()], correct)
    }

    #[test]
    fn result_counts_recorded_answers() {
        let attempt = QuizAttempt::default()
            .with_correctness(id("q1"), true)
            .with_correctness(id("q2"), false)
            .with_correctness(id("q3"), true);

        let result = attempt.result();
        assert_eq!(result.correct, 2);
        assert_eq!(result.total, 3);
        assert_eq!(result.percentage, 67);
        assert_eq!(result.time_spent_seconds, None);
    }

    #[test]
    fn empty_attempt_scores_zero() {
        let result = QuizAttempt::default().result();
        assert_eq!((result.correct, result.total, result.percentage), (0, 0, 0));
    }

    #[test]
    fn time_spent_requires_both_timestamps() {
        let started = QuizAttempt::started(fixed_now());
        assert_eq!(started.result().time_spent_seconds, None);

        let done = started.finished(fixed_now() + Duration::milliseconds(95_600));
        assert_eq!(done.result().time_spent_seconds, Some(96));
    }

    #[test]
    fn with_answer_grades_and_advances() {
        let q1 = question("q1", 1);
        let attempt = QuizAttempt::started(fixed_now()).with_answer(&q1, 1);
        assert_eq!(attempt.current_index, 1);
        assert_eq!(attempt.answers.get(&id("q1")), Some(&true));

        let wrong = attempt.with_answer(&question("q2", 0), 1);
        assert_eq!(wrong.current_index, 2);
        assert_eq!(wrong.answers.get(&id("q2")), Some(&false));
    }

    #[test]
    fn result_for_ignores_stale_answers() {
        let questions = vec![question("q1", 0), question("q2", 0)];
        let attempt = QuizAttempt::default()
            .with_correctness(id("q1"), true)
            .with_correctness(id("removed"), true);

        let result = attempt.result_for(&questions);
        assert_eq!(result.correct, 1);
        assert_eq!(result.total, 2);
        assert_eq!(result.percentage, 50);
    }

    #[test]
    fn points_earned_sums_correct_answers() {
        let mut q2 = question("q2", 0);
        q2.points = 30;
        let questions = vec![question("q1", 0), q2];
        let attempt = QuizAttempt::default()
            .with_correctness(id("q1"), false)
            .with_correctness(id("q2"), true);
        assert_eq!(attempt.points_earned(&questions), 30);
    }

    #[test]
    fn shape_check_rejects_inconsistent_timestamps() {
        let mut attempt = QuizAttempt::started(fixed_now()).finished(fixed_now());
        assert!(attempt.is_well_formed());

        attempt.completed = false;
        assert!(!attempt.is_well_formed());

        let backwards = QuizAttempt::started(fixed_now()).finished(fixed_now() - Duration::seconds(1));
        assert!(!backwards.is_well_formed());
    }

    #[test]
    fn decodes_persisted_shape() {
        let raw = r#"{"currentIndex": 2, "answers": {"q1": true, "q2": false}, "completed": false, "startedAt": "2024-06-01T12:00:00Z"}"#;
        let attempt: QuizAttempt = serde_json::from_str(raw).unwrap();
        assert_eq!(attempt.current_index, 2);
        assert_eq!(attempt.started_at, Some(fixed_now()));
        assert!(serde_json::from_str::<QuizAttempt>(r#"{"answers": {}}"#).is_err());
    }
}
