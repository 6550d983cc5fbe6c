use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use daily_core::ContentError;
use daily_core::model::{ContentLibrary, InterviewQuestion};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentSourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Invalid(#[from] ContentError),
}

/// Supplies the authored content library.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Load and validate every collection.
    ///
    /// # Errors
    ///
    /// Returns `ContentSourceError` if content cannot be read, parsed, or
    /// fails validation.
    async fn load(&self) -> Result<ContentLibrary, ContentSourceError>;
}

/// A fixed, already-loaded library.
#[derive(Debug, Clone, Default)]
pub struct StaticContentSource {
    library: ContentLibrary,
}

impl StaticContentSource {
    #[must_use]
    pub fn new(library: ContentLibrary) -> Self {
        Self { library }
    }
}

#[async_trait]
impl ContentSource for StaticContentSource {
    async fn load(&self) -> Result<ContentLibrary, ContentSourceError> {
        self.library.validate()?;
        Ok(self.library.clone())
    }
}

/// Reads JSON files from a content directory:
///
/// ```text
/// <root>/checklists/*.json           one checklist per file
/// <root>/interview-questions/*.json  one question, or an array of them
/// <root>/quizzes/*.json              one quiz per file
/// ```
///
/// Missing subdirectories are empty collections. Files load in name order.
#[derive(Debug, Clone)]
pub struct JsonDirectorySource {
    root: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl JsonDirectorySource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn json_files(&self, dir: &str) -> Result<Vec<PathBuf>, ContentSourceError> {
        let dir = self.root.join(dir);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(ContentSourceError::Io { path: dir, source }),
        };

        let mut files = Vec::new();
        loop {
            let entry = entries.next_entry().await.map_err(|source| ContentSourceError::Io {
                path: dir.clone(),
                source,
            })?;
            let Some(entry) = entry else { break };
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ContentSourceError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ContentSourceError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&raw).map_err(|source| ContentSourceError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[async_trait]
impl ContentSource for JsonDirectorySource {
    async fn load(&self) -> Result<ContentLibrary, ContentSourceError> {
        let mut library = ContentLibrary::default();

        for path in self.json_files("checklists").await? {
            library.checklists.push(Self::read_json(&path).await?);
        }
        for path in self.json_files("interview-questions").await? {
            match Self::read_json::<OneOrMany<InterviewQuestion>>(&path).await? {
                OneOrMany::Many(questions) => library.interview_questions.extend(questions),
                OneOrMany::One(question) => library.interview_questions.push(question),
            }
        }
        for path in self.json_files("quizzes").await? {
            library.quizzes.push(Self::read_json(&path).await?);
        }

        library.validate()?;
        tracing::debug!(
            root = %self.root.display(),
            checklists = library.checklists.len(),
            interview_questions = library.interview_questions.len(),
            quizzes = library.quizzes.len(),
            "content loaded"
        );
        Ok(library)
    }
}
