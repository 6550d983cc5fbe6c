use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{ContentItem, ItemId};

use super::{PersistedShape, percentage};

/// Study state of a single interview question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionProgress {
    pub reviewed: bool,
    pub confident: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Study state for a bank of interview questions (one category or all).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterviewProgress {
    questions: BTreeMap<ItemId, QuestionProgress>,
}

impl InterviewProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: &ItemId) -> QuestionProgress {
        self.questions.get(id).copied().unwrap_or_default()
    }

    /// Returns a copy with `id` set to `state`.
    #[must_use]
    pub fn with_question(&self, id: ItemId, state: QuestionProgress) -> Self {
        let mut next = self.clone();
        next.questions.insert(id, state);
        next
    }

    /// Returns a copy with `id` marked reviewed (or un-reviewed).
    ///
    /// Un-reviewing also clears confidence.
    #[must_use]
    pub fn with_reviewed(&self, id: ItemId, reviewed: bool, at: DateTime<Utc>) -> Self {
        let current = self.get(&id);
        let state = if reviewed {
            QuestionProgress {
                reviewed: true,
                confident: current.confident,
                reviewed_at: current.reviewed_at.or(Some(at)),
            }
        } else {
            QuestionProgress::default()
        };
        self.with_question(id, state)
    }

    /// Returns a copy with confidence flipped. Being confident implies reviewed.
    #[must_use]
    pub fn with_confidence_toggled(&self, id: ItemId, at: DateTime<Utc>) -> Self {
        let current = self.get(&id);
        let confident = !current.confident;
        let state = QuestionProgress {
            reviewed: current.reviewed || confident,
            confident,
            reviewed_at: current.reviewed_at.or(confident.then_some(at)),
        };
        self.with_question(id, state)
    }

    #[must_use]
    pub fn reviewed_count<T: ContentItem>(&self, items: &[T]) -> usize {
        items.iter().filter(|q| self.get(q.id()).reviewed).count()
    }

    #[must_use]
    pub fn confident_count<T: ContentItem>(&self, items: &[T]) -> usize {
        items.iter().filter(|q| self.get(q.id()).confident).count()
    }

    /// Percentage of `items` that have been reviewed.
    #[must_use]
    pub fn completion<T: ContentItem>(&self, items: &[T]) -> u8 {
        percentage(self.reviewed_count(items), items.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl PersistedShape for InterviewProgress {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InterviewQuestion, Slug, Tier};
    use crate::time::fixed_now;

    fn question(raw: &str) -> InterviewQuestion {
        InterviewQuestion::new(
            ItemId::new(raw).unwrap(),
            Slug::new(raw).unwrap(),
            format!("What is {raw}?"),
            "Kubernetes",
            Tier::Mid,
        )
    }

    fn id(raw: &str) -> ItemId {
        ItemId::new(raw).unwrap()
    }

    #[test]
    fn confidence_implies_reviewed() {
        let progress = InterviewProgress::new().with_confidence_toggled(id("pods"), fixed_now());
        let state = progress.get(&id("pods"));
        assert!(state.reviewed);
        assert!(state.confident);
        assert_eq!(state.reviewed_at, Some(fixed_now()));
    }

    #[test]
    fn unreviewing_clears_confidence() {
        let progress = InterviewProgress::new()
            .with_confidence_toggled(id("pods"), fixed_now())
            .with_reviewed(id("pods"), false, fixed_now());
        assert_eq!(progress.get(&id("pods")), QuestionProgress::default());
    }

    #[test]
    fn reviewed_at_keeps_first_review() {
        let later = fixed_now() + chrono::Duration::hours(1);
        let progress = InterviewProgress::new()
            .with_reviewed(id("pods"), true, fixed_now())
            .with_reviewed(id("pods"), true, later);
        assert_eq!(progress.get(&id("pods")).reviewed_at, Some(fixed_now()));
    }

    #[test]
    fn counts_ignore_stale_questions() {
        let bank = vec![question("pods"), question("services")];
        let progress = InterviewProgress::new()
            .with_reviewed(id("pods"), true, fixed_now())
            .with_confidence_toggled(id("removed"), fixed_now());

        assert_eq!(progress.reviewed_count(&bank), 1);
        assert_eq!(progress.confident_count(&bank), 0);
        assert_eq!(progress.completion(&bank), 50);
    }

    #[test]
    fn decodes_camel_case_shape() {
        let raw = r#"{"pods": {"reviewed": true, "confident": false, "reviewedAt": "2024-06-01T12:00:00Z"}}"#;
        let progress: InterviewProgress = serde_json::from_str(raw).unwrap();
        assert_eq!(progress.get(&id("pods")).reviewed_at, Some(fixed_now()));
        assert!(serde_json::from_str::<InterviewProgress>(r#"{"pods": true}"#).is_err());
    }
}
