use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::model::{ItemId, Slug, Tier};

use super::{ContentItem, Resource};

/// A question from the interview-question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQuestion {
    pub id: ItemId,
    pub slug: Slug,
    pub question: String,
    #[serde(default)]
    pub answer: Option<String>,
    pub category: String,
    pub tier: Tier,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub published_at: Option<NaiveDate>,
}

impl InterviewQuestion {
    #[must_use]
    pub fn new(
        id: ItemId,
        slug: Slug,
        question: impl Into<String>,
        category: impl Into<String>,
        tier: Tier,
    ) -> Self {
        Self {
            id,
            slug,
            question: question.into(),
            answer: None,
            category: category.into(),
            tier,
            tags: Vec::new(),
            resources: Vec::new(),
            published_at: None,
        }
    }

    /// Validates a whole question bank.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` on blank questions or repeated ids.
    pub fn validate_bank(questions: &[InterviewQuestion]) -> Result<(), ContentError> {
        super::validate_items(questions)
    }
}

impl ContentItem for InterviewQuestion {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.question
    }
}
