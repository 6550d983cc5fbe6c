use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::model::{Difficulty, ItemId, Slug};

use super::{ContentItem, validate_items};

fn default_points() -> u32 {
    10
}

/// A multiple-choice question inside a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: ItemId,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option: usize,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default = "default_points")]
    pub points: u32,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

impl QuizQuestion {
    #[must_use]
    pub fn new(id: ItemId, prompt: impl Into<String>, options: Vec<String>, correct_option: usize) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            options,
            correct_option,
            explanation: None,
            points: default_points(),
            difficulty: None,
        }
    }

    /// Returns whether `option` is the correct answer.
    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_option
    }
}

impl ContentItem for QuizQuestion {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.prompt
    }
}

/// A quiz: an ordered list of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub slug: Slug,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
    #[serde(default)]
    pub published_at: Option<NaiveDate>,
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    /// Sum of every question's point value.
    #[must_use]
    pub fn total_points(&self) -> u32 {
        self.questions.iter().map(|q| q.points).sum()
    }

    /// Validates the quiz after loading.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` for blank titles, repeated question ids, or a
    /// correct option index outside a question's options.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.title.trim().is_empty() {
            return Err(ContentError::EmptyTitle);
        }
        validate_items(&self.questions)?;
        for question in &self.questions {
            if question.correct_option >= question.options.len() {
                return Err(ContentError::CorrectOptionOutOfRange {
                    question: question.id.to_string(),
                    index: question.correct_option,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, correct: usize) -> QuizQuestion {
        QuizQuestion::new(
            ItemId::new(id).unwrap(),
            format!("Prompt {id}"),
            vec!["a".into(), "b".into()],
            correct,
        )
    }

    fn quiz(questions: Vec<QuizQuestion>) -> Quiz {
        Quiz {
            slug: Slug::new("git-basics").unwrap(),
            title: "Git basics".into(),
            description: None,
            category: "Git".into(),
            difficulty: Difficulty::Beginner,
            estimated_minutes: Some(5),
            published_at: None,
            questions,
        }
    }

    #[test]
    fn total_points_sums_questions() {
        let mut q2 = question("q2", 1);
        q2.points = 25;
        assert_eq!(quiz(vec![question("q1", 0), q2]).total_points(), 35);
    }

    #[test]
    fn out_of_range_correct_option_fails_validation() {
        let err = quiz(vec![question("q1", 2)]).validate().unwrap_err();
        assert!(matches!(err, ContentError::CorrectOptionOutOfRange { index: 2, .. }));
    }

    #[test]
    fn points_default_when_missing() {
        let q: QuizQuestion = serde_json::from_str(
            r#"{"id": "q1", "prompt": "What is HEAD?", "options": ["x", "y"], "correctOption": 0}"#,
        )
        .unwrap();
        assert_eq!(q.points, 10);
        assert!(q.is_correct(0));
    }
}
