use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::model::{Scope, Slug};

use super::{Checklist, InterviewQuestion, Quiz, QuizQuestion};

/// Every piece of authored content, loaded together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentLibrary {
    #[serde(default)]
    pub checklists: Vec<Checklist>,
    #[serde(default)]
    pub interview_questions: Vec<InterviewQuestion>,
    #[serde(default)]
    pub quizzes: Vec<Quiz>,
}

impl ContentLibrary {
    #[must_use]
    pub fn checklist(&self, slug: &Slug) -> Option<&Checklist> {
        self.checklists.iter().find(|c| &c.slug == slug)
    }

    #[must_use]
    pub fn quiz(&self, slug: &Slug) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| &q.slug == slug)
    }

    /// Interview questions in `scope`, in authored order.
    #[must_use]
    pub fn interview_questions_in(&self, scope: &Scope) -> Vec<InterviewQuestion> {
        self.interview_questions
            .iter()
            .filter(|q| scope.includes(&q.category))
            .cloned()
            .collect()
    }

    /// Questions of every quiz in `scope`, quiz by quiz, for quiz mode.
    #[must_use]
    pub fn quiz_questions_in(&self, scope: &Scope) -> Vec<QuizQuestion> {
        self.quizzes
            .iter()
            .filter(|quiz| scope.includes(&quiz.category))
            .flat_map(|quiz| quiz.questions.iter().cloned())
            .collect()
    }

    /// Validates every collection.
    ///
    /// # Errors
    ///
    /// Returns the first `ContentError` found, or `DuplicateId` if two
    /// checklists or quizzes share a slug, or if a question id appears in
    /// more than one quiz. Quiz mode records answers by question id across
    /// every quiz in a scope, so ids are unique library-wide.
    pub fn validate(&self) -> Result<(), ContentError> {
        let mut slugs = std::collections::HashSet::new();
        for checklist in &self.checklists {
            checklist.validate()?;
            if !slugs.insert(checklist.slug.as_str()) {
                return Err(ContentError::DuplicateId(checklist.slug.to_string()));
            }
        }
        slugs.clear();
        let mut question_ids = std::collections::HashSet::new();
        for quiz in &self.quizzes {
            quiz.validate()?;
            if !slugs.insert(quiz.slug.as_str()) {
                return Err(ContentError::DuplicateId(quiz.slug.to_string()));
            }
            if let Some(repeated) = quiz
                .questions
                .iter()
                .find(|q| !question_ids.insert(q.id.as_str()))
            {
                return Err(ContentError::DuplicateId(repeated.id.to_string()));
            }
        }
        InterviewQuestion::validate_bank(&self.interview_questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemId;

    fn library() -> ContentLibrary {
        serde_json::from_str(
            r#"{
                "checklists": [],
                "interviewQuestions": [
                    {"id": "vpc", "slug": "what-is-a-vpc", "question": "What is a VPC?", "category": "AWS", "tier": "junior"},
                    {"id": "cgroups", "slug": "cgroups", "question": "What are cgroups?", "category": "Linux", "tier": "mid"}
                ],
                "quizzes": [
                    {"slug": "aws-quiz", "title": "AWS", "category": "AWS", "difficulty": "beginner",
                     "questions": [{"id": "q1", "prompt": "S3 is?", "options": ["storage", "compute"], "correctOption": 0}]},
                    {"slug": "linux-quiz", "title": "Linux", "category": "Linux", "difficulty": "advanced",
                     "questions": [{"id": "q2", "prompt": "PID 1?", "options": ["init", "bash"], "correctOption": 0}]}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn scoped_lookups_filter_by_category() {
        let library = library();
        library.validate().unwrap();

        assert_eq!(library.interview_questions_in(&Scope::All).len(), 2);
        let aws = library.interview_questions_in(&Scope::category("AWS"));
        assert_eq!(aws.len(), 1);
        assert_eq!(aws[0].id.as_str(), "vpc");

        let linux = library.quiz_questions_in(&Scope::category("Linux"));
        assert_eq!(linux.len(), 1);
        assert_eq!(linux[0].id.as_str(), "q2");
    }

    #[test]
    fn finds_quiz_by_slug() {
        let library = library();
        let slug = Slug::new("linux-quiz").unwrap();
        assert_eq!(library.quiz(&slug).map(|q| q.title.as_str()), Some("Linux"));
        assert!(library.checklist(&slug).is_none());
    }

    #[test]
    fn question_ids_are_unique_across_quizzes() {
        let mut library = library();
        library.quizzes[1].questions[0].id = ItemId::new("q1").unwrap();
        library.quizzes[1].category = "AWS".into();

        let err = library.validate().unwrap_err();
        assert_eq!(err, ContentError::DuplicateId("q1".into()));
    }

    #[test]
    fn repeated_ids_rejected_across_categories() {
        // Scope::All aggregates every quiz, so different categories still clash.
        let mut library = library();
        library.quizzes[1].questions[0].id = ItemId::new("q1").unwrap();
        assert!(matches!(
            library.validate(),
            Err(ContentError::DuplicateId(id)) if id == "q1"
        ));
    }
}
