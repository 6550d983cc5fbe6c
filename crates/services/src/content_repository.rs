use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use daily_core::Clock;
use daily_core::model::{Checklist, ContentLibrary, Quiz, Slug};
use storage::content_source::ContentSource;

use crate::error::ContentServiceError;

/// When a loaded library is considered stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Reload once the cached copy is older than the window (development).
    Window(Duration),
    /// Load once and keep forever (production).
    Never,
}

impl RefreshPolicy {
    /// Default development window: content edits show up within a minute.
    #[must_use]
    pub fn development() -> Self {
        Self::Window(Duration::seconds(60))
    }
}

struct Cached {
    library: Arc<ContentLibrary>,
    loaded_at: DateTime<Utc>,
}

/// Read-only content access with an explicit refresh policy.
///
/// Constructed once and passed to whoever needs content; there is no
/// process-wide cache.
pub struct ContentRepository {
    clock: Clock,
    policy: RefreshPolicy,
    source: Arc<dyn ContentSource>,
    cache: RwLock<Option<Cached>>,
}

impl ContentRepository {
    #[must_use]
    pub fn new(clock: Clock, policy: RefreshPolicy, source: Arc<dyn ContentSource>) -> Self {
        Self {
            clock,
            policy,
            source,
            cache: RwLock::new(None),
        }
    }

    #[must_use]
    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    /// The current library, loading or refreshing it as the policy requires.
    ///
    /// # Errors
    ///
    /// Returns `ContentServiceError::Source` if loading fails. A failed
    /// refresh leaves the previous, stale library cached, so the next call
    /// retries the load.
    pub async fn library(&self) -> Result<Arc<ContentLibrary>, ContentServiceError> {
        let now = self.clock.now();
        {
            let guard = self.cache.read().await;
            if let Some(cached) = guard.as_ref().filter(|c| self.is_fresh(c, now)) {
                return Ok(Arc::clone(&cached.library));
            }
        }

        let mut guard = self.cache.write().await;
        // Another caller may have refreshed while we waited for the lock.
        if let Some(cached) = guard.as_ref().filter(|c| self.is_fresh(c, now)) {
            return Ok(Arc::clone(&cached.library));
        }

        let library = Arc::new(self.source.load().await?);
        debug!(policy = ?self.policy, "content library loaded");
        *guard = Some(Cached {
            library: Arc::clone(&library),
            loaded_at: now,
        });
        Ok(library)
    }

    /// Drops the cached library so the next read reloads it.
    pub async fn invalidate(&self) {
        *self.cache.write().await = None;
    }

    /// # Errors
    ///
    /// Returns `UnknownChecklist` for a missing slug, or a load error.
    pub async fn checklist(&self, slug: &Slug) -> Result<Checklist, ContentServiceError> {
        self.library()
            .await?
            .checklist(slug)
            .cloned()
            .ok_or_else(|| ContentServiceError::UnknownChecklist(slug.to_string()))
    }

    /// # Errors
    ///
    /// Returns `UnknownQuiz` for a missing slug, or a load error.
    pub async fn quiz(&self, slug: &Slug) -> Result<Quiz, ContentServiceError> {
        self.library()
            .await?
            .quiz(slug)
            .cloned()
            .ok_or_else(|| ContentServiceError::UnknownQuiz(slug.to_string()))
    }

    fn is_fresh(&self, cached: &Cached, now: DateTime<Utc>) -> bool {
        match self.policy {
            RefreshPolicy::Never => true,
            RefreshPolicy::Window(window) => now - cached.loaded_at < window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use daily_core::time::fixed_now;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use storage::content_source::ContentSourceError;

    #[derive(Default)]
    struct CountingSource {
        loads: AtomicUsize,
    }

    #[async_trait]
    impl ContentSource for CountingSource {
        async fn load(&self) -> Result<ContentLibrary, ContentSourceError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(ContentLibrary::default())
        }
    }

    #[tokio::test]
    async fn production_policy_loads_once() {
        let source = Arc::new(CountingSource::default());
        let repo = ContentRepository::new(
            Clock::fixed(fixed_now()),
            RefreshPolicy::Never,
            source.clone(),
        );

        repo.library().await.unwrap();
        repo.library().await.unwrap();
        assert_eq!(source.loads.load(Ordering::SeqCst), 1);

        repo.invalidate().await;
        repo.library().await.unwrap();
        assert_eq!(source.loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn window_policy_reloads_after_expiry() {
        let source = Arc::new(CountingSource::default());
        let window = Duration::seconds(60);

        let early = ContentRepository::new(
            Clock::fixed(fixed_now()),
            RefreshPolicy::Window(window),
            source.clone(),
        );
        early.library().await.unwrap();
        early.library().await.unwrap();
        assert_eq!(source.loads.load(Ordering::SeqCst), 1);

        // Same cache entry observed from a later point in time.
        let stale = early.cache.write().await.take().map(|mut cached| {
            cached.loaded_at -= window;
            cached
        });
        *early.cache.write().await = stale;
        early.library().await.unwrap();
        assert_eq!(source.loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn unknown_slug_is_reported() {
        let repo = ContentRepository::new(
            Clock::fixed(fixed_now()),
            RefreshPolicy::Never,
            Arc::new(CountingSource::default()),
        );
        let err = repo.checklist(&Slug::new("missing").unwrap()).await.unwrap_err();
        assert!(matches!(err, ContentServiceError::UnknownChecklist(slug) if slug == "missing"));
    }

    #[derive(Default)]
    struct FlakySource {
        failing: AtomicBool,
        loads: AtomicUsize,
    }

    #[async_trait]
    impl ContentSource for FlakySource {
        async fn load(&self) -> Result<ContentLibrary, ContentSourceError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(ContentSourceError::Io {
                    path: "content".into(),
                    source: std::io::Error::other("disk gone"),
                });
            }
            Ok(ContentLibrary::default())
        }
    }

    #[tokio::test]
    async fn failed_refresh_keeps_stale_entry_and_retries() {
        let source = Arc::new(FlakySource::default());
        let window = Duration::seconds(60);
        let repo = ContentRepository::new(
            Clock::fixed(fixed_now()),
            RefreshPolicy::Window(window),
            source.clone(),
        );
        repo.library().await.unwrap();

        if let Some(cached) = repo.cache.write().await.as_mut() {
            cached.loaded_at -= window;
        }
        source.failing.store(true, Ordering::SeqCst);
        assert!(repo.library().await.is_err());
        assert!(repo.cache.read().await.is_some());

        source.failing.store(false, Ordering::SeqCst);
        repo.library().await.unwrap();
        assert_eq!(source.loads.load(Ordering::SeqCst), 3);
    }
}
