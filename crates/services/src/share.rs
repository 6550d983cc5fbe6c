use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use url::Url;

use daily_core::model::Slug;

use crate::error::ClipboardError;

/// Page families that can be linked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Checklist,
    InterviewQuestion,
    Quiz,
}

impl ContentKind {
    #[must_use]
    pub fn path_segment(self) -> &'static str {
        match self {
            ContentKind::Checklist => "checklists",
            ContentKind::InterviewQuestion => "interview-questions",
            ContentKind::Quiz => "quizzes",
        }
    }
}

/// Builds absolute share URLs from the site origin.
#[derive(Debug, Clone, Default)]
pub struct ShareLinks {
    origin: Option<String>,
}

impl ShareLinks {
    /// Uses the scheme, host and port of `origin`; any path is ignored.
    /// Origins without a host (e.g. `data:` URLs) are treated as absent.
    #[must_use]
    pub fn new(origin: Option<Url>) -> Self {
        let origin = origin
            .map(|url| url.origin())
            .filter(url::Origin::is_tuple)
            .map(|origin| origin.ascii_serialization());
        Self { origin }
    }

    /// Links for a context without an origin; every URL is empty.
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    /// `<origin>/<kind>/<slug>`, or an empty string without an origin.
    #[must_use]
    pub fn url_for(&self, kind: ContentKind, slug: &Slug) -> String {
        match &self.origin {
            Some(origin) => format!("{origin}/{}/{slug}", kind.path_segment()),
            None => String::new(),
        }
    }

    #[must_use]
    pub fn checklist_url(&self, slug: &Slug) -> String {
        self.url_for(ContentKind::Checklist, slug)
    }
}

/// System clipboard.
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// # Errors
    ///
    /// Returns `ClipboardError` if the text was not copied.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Share actions. Failures are logged and reported as `false`.
#[derive(Clone)]
pub struct ShareService {
    links: ShareLinks,
    clipboard: Arc<dyn Clipboard>,
}

impl ShareService {
    #[must_use]
    pub fn new(links: ShareLinks, clipboard: Arc<dyn Clipboard>) -> Self {
        Self { links, clipboard }
    }

    #[must_use]
    pub fn links(&self) -> &ShareLinks {
        &self.links
    }

    /// Copies the share URL of `slug`. Returns whether the copy visibly
    /// succeeded.
    pub async fn copy_link(&self, kind: ContentKind, slug: &Slug) -> bool {
        let url = self.links.url_for(kind, slug);
        if url.is_empty() {
            return false;
        }
        match self.clipboard.write_text(&url).await {
            Ok(()) => true,
            Err(err) => {
                warn!(%slug, error = %err, "failed to copy share link");
                false
            }
        }
    }
}
