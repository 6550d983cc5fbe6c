pub mod checklist;
pub mod interview;
pub mod library;
pub mod quiz;
pub mod resource;

pub use checklist::{Checklist, ChecklistItem};
pub use interview::InterviewQuestion;
pub use library::ContentLibrary;
pub use quiz::{Quiz, QuizQuestion};
pub use resource::Resource;

use std::collections::HashSet;

use crate::error::ContentError;
use crate::model::ItemId;

/// Shape shared by every statically authored unit that progress is tracked for.
pub trait ContentItem {
    fn id(&self) -> &ItemId;
    fn title(&self) -> &str;
}

/// Checks that every id in `items` is unique and every title is non-blank.
pub(crate) fn validate_items<'a, T>(items: impl IntoIterator<Item = &'a T>) -> Result<(), ContentError>
where
    T: ContentItem + 'a,
{
    let mut seen = HashSet::new();
    for item in items {
        if item.title().trim().is_empty() {
            return Err(ContentError::EmptyTitle);
        }
        if !seen.insert(item.id().as_str()) {
            return Err(ContentError::DuplicateId(item.id().to_string()));
        }
    }
    Ok(())
}
