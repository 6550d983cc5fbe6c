use std::sync::Arc;

use url::Url;

use daily_core::Clock;
use storage::content_source::ContentSource;
use storage::repository::Storage;

use crate::checklist_service::ChecklistProgressService;
use crate::content_repository::{ContentRepository, RefreshPolicy};
use crate::error::AppServicesError;
use crate::interview_service::InterviewProgressService;
use crate::progress_store::ProgressStore;
use crate::quiz_service::QuizModeService;
use crate::share::ShareLinks;

/// Knobs needed to assemble services.
#[derive(Debug, Clone)]
pub struct ServicesConfig {
    pub clock: Clock,
    pub refresh_policy: RefreshPolicy,
    pub origin: Option<Url>,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            clock: Clock::System,
            refresh_policy: RefreshPolicy::Never,
            origin: None,
        }
    }
}

/// Assembles app-facing services over one storage backend and content source.
#[derive(Clone)]
pub struct AppServices {
    content: Arc<ContentRepository>,
    checklists: Arc<ChecklistProgressService>,
    interview: Arc<InterviewProgressService>,
    quiz_mode: Arc<QuizModeService>,
    share_links: ShareLinks,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: &Storage, source: Arc<dyn ContentSource>, config: ServicesConfig) -> Self {
        let store = ProgressStore::new(Arc::clone(&storage.kv));
        let clock = config.clock;

        Self {
            content: Arc::new(ContentRepository::new(clock, config.refresh_policy, source)),
            checklists: Arc::new(ChecklistProgressService::new(store.clone())),
            interview: Arc::new(InterviewProgressService::new(clock, store.clone())),
            quiz_mode: Arc::new(QuizModeService::new(clock, store)),
            share_links: ShareLinks::new(config.origin),
        }
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// content cannot be loaded.
    pub async fn new_sqlite(
        db_url: &str,
        source: Arc<dyn ContentSource>,
        config: ServicesConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let services = Self::new(&storage, source, config);
        // Surface broken content at startup rather than on first use.
        services.content.library().await?;
        Ok(services)
    }

    #[must_use]
    pub fn content(&self) -> Arc<ContentRepository> {
        Arc::clone(&self.content)
    }

    #[must_use]
    pub fn checklists(&self) -> Arc<ChecklistProgressService> {
        Arc::clone(&self.checklists)
    }

    #[must_use]
    pub fn interview(&self) -> Arc<InterviewProgressService> {
        Arc::clone(&self.interview)
    }

    #[must_use]
    pub fn quiz_mode(&self) -> Arc<QuizModeService> {
        Arc::clone(&self.quiz_mode)
    }

    #[must_use]
    pub fn share_links(&self) -> &ShareLinks {
        &self.share_links
    }
}
