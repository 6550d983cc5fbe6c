use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{ContentItem, ItemId};

use super::{PersistedShape, percentage};

/// Completed-state of each item in one checklist.
///
/// Persisted as a flat JSON object, `{"<itemId>": true}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChecklistProgress {
    items: BTreeMap<ItemId, bool>,
}

impl ChecklistProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_done(&self, id: &ItemId) -> bool {
        self.items.get(id).copied().unwrap_or(false)
    }

    /// Returns a copy with `id` set to `done`.
    #[must_use]
    pub fn with_item(&self, id: ItemId, done: bool) -> Self {
        let mut next = self.clone();
        next.items.insert(id, done);
        next
    }

    /// Returns a copy with `id` flipped.
    #[must_use]
    pub fn toggled(&self, id: &ItemId) -> Self {
        self.with_item(id.clone(), !self.is_done(id))
    }

    /// Number of `items` marked done. Keys for items not in `items` are ignored.
    #[must_use]
    pub fn completed_count<T: ContentItem>(&self, items: &[T]) -> usize {
        items.iter().filter(|item| self.is_done(item.id())).count()
    }

    /// Completion percentage over the current item list.
    #[must_use]
    pub fn completion<T: ContentItem>(&self, items: &[T]) -> u8 {
        percentage(self.completed_count(items), items.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Raw entries, stale keys included.
    pub fn entries(&self) -> impl Iterator<Item = (&ItemId, bool)> {
        self.items.iter().map(|(id, done)| (id, *done))
    }
}

impl PersistedShape for ChecklistProgress {}
