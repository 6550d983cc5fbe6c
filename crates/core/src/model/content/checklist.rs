use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::model::{Difficulty, ItemId, Slug};

use super::{ContentItem, Resource, validate_items};

/// One checkable entry of a checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl ChecklistItem {
    #[must_use]
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            resources: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl ContentItem for ChecklistItem {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}

/// A published checklist and its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    pub slug: Slug,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
    #[serde(default)]
    pub published_at: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub items: Vec<ChecklistItem>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl Checklist {
    #[must_use]
    pub fn new(
        slug: Slug,
        title: impl Into<String>,
        category: impl Into<String>,
        difficulty: Difficulty,
        items: Vec<ChecklistItem>,
    ) -> Self {
        Self {
            slug,
            title: title.into(),
            description: String::new(),
            category: category.into(),
            difficulty,
            estimated_minutes: None,
            published_at: None,
            tags: Vec::new(),
            items,
            resources: Vec::new(),
        }
    }

    /// Validates the checklist after loading.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the title is blank or item ids repeat.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.title.trim().is_empty() {
            return Err(ContentError::EmptyTitle);
        }
        validate_items(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_authored_json() {
        let raw = r#"{
            "slug": "docker-security",
            "title": "Docker Security",
            "category": "Containers",
            "difficulty": "intermediate",
            "estimatedMinutes": 30,
            "publishedAt": "2024-03-01",
            "items": [
                {"id": "non-root", "title": "Run as non-root"},
                {"id": "scan", "title": "Scan images", "description": "Use trivy",
                 "resources": [{"title": "Trivy", "url": "https://trivy.dev/"}]}
            ]
        }"#;
        let checklist: Checklist = serde_json::from_str(raw).unwrap();
        checklist.validate().unwrap();

        assert_eq!(checklist.items.len(), 2);
        assert_eq!(checklist.estimated_minutes, Some(30));
        assert_eq!(checklist.items[1].resources.len(), 1);
        assert!(checklist.resources.is_empty());
    }

    #[test]
    fn duplicate_item_ids_are_rejected() {
        let id = ItemId::new("a").unwrap();
        let checklist = Checklist::new(
            Slug::new("dupes").unwrap(),
            "Dupes",
            "Misc",
            Difficulty::Beginner,
            vec![
                ChecklistItem::new(id.clone(), "One"),
                ChecklistItem::new(id, "Two"),
            ],
        );

        assert_eq!(
            checklist.validate(),
            Err(ContentError::DuplicateId("a".to_string()))
        );
    }
}
