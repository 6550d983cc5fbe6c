use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ContentError;

/// Identifier of a content item, unique within its parent collection.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Creates a validated `ItemId`.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::EmptyId` if the value is blank after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, ContentError> {
        normalize(value.into()).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// URL-safe slug naming a checklist, quiz or question page.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Creates a validated `Slug`.
    ///
    /// Slugs are lowercase ASCII letters, digits and single dashes.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::EmptyId` for blank input and
    /// `ContentError::InvalidSlug` for any other character.
    pub fn new(value: impl Into<String>) -> Result<Self, ContentError> {
        let value = normalize(value.into())?;
        let valid = value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            && !value.starts_with('-')
            && !value.ends_with('-')
            && !value.contains("--");
        if !valid {
            return Err(ContentError::InvalidSlug(value));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn normalize(raw: String) -> Result<String, ContentError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ContentError::EmptyId);
    }
    if trimmed.len() == raw.len() {
        Ok(raw)
    } else {
        Ok(trimmed.to_string())
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Debug for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slug({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Conversions ───────────────────────────────────────────────────────────────

impl FromStr for ItemId {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl FromStr for Slug {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ItemId {
    type Error = ContentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Slug {
    type Error = ContentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl std::borrow::Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_trims_whitespace() {
        let id = ItemId::new("  item-1 ").unwrap();
        assert_eq!(id.as_str(), "item-1");
    }

    #[test]
    fn item_id_rejects_blank() {
        assert!(matches!(ItemId::new("   "), Err(ContentError::EmptyId)));
    }

    #[test]
    fn slug_accepts_kebab_case() {
        let slug: Slug = "kubernetes-security-2024".parse().unwrap();
        assert_eq!(slug.to_string(), "kubernetes-security-2024");
    }

    #[test]
    fn slug_rejects_uppercase_and_double_dash() {
        assert!(matches!(Slug::new("Docker"), Err(ContentError::InvalidSlug(_))));
        assert!(matches!(Slug::new("a--b"), Err(ContentError::InvalidSlug(_))));
        assert!(matches!(Slug::new("-a"), Err(ContentError::InvalidSlug(_))));
    }

    #[test]
    fn ids_deserialize_with_validation() {
        let id: ItemId = serde_json::from_str("\"q1\"").unwrap();
        assert_eq!(id.as_str(), "q1");
        assert!(serde_json::from_str::<ItemId>("\"  \"").is_err());
        assert!(serde_json::from_str::<Slug>("\"Not A Slug\"").is_err());
    }
}
