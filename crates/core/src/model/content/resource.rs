use serde::{Deserialize, Serialize};
use url::Url;

/// An external link attached to a content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: Url,
}

impl Resource {
    #[must_use]
    pub fn new(title: impl Into<String>, url: Url) -> Self {
        Self {
            title: title.into(),
            url,
        }
    }

    /// Markdown link syntax, `[title](url)`.
    #[must_use]
    pub fn to_markdown_link(&self) -> String {
        format!("[{}]({})", self.title.trim(), self.url)
    }
}
