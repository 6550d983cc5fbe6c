use std::fmt;

use daily_core::model::{Scope, Slug};

/// Feature a persisted record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Checklist,
    Interview,
    QuizMode,
}

impl Namespace {
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Namespace::Checklist => "devops-daily-checklist",
            Namespace::Interview => "devops-daily-interview",
            Namespace::QuizMode => "devops-daily-quiz-mode",
        }
    }
}

/// Namespaced key of one persisted progress record: `<prefix>_<discriminator>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey {
    namespace: Namespace,
    discriminator: String,
}

impl StorageKey {
    #[must_use]
    pub fn checklist(slug: &Slug) -> Self {
        Self {
            namespace: Namespace::Checklist,
            discriminator: slug.to_string(),
        }
    }

    #[must_use]
    pub fn interview(scope: &Scope) -> Self {
        Self {
            namespace: Namespace::Interview,
            discriminator: scope.to_string(),
        }
    }

    #[must_use]
    pub fn quiz_mode(scope: &Scope) -> Self {
        Self {
            namespace: Namespace::QuizMode,
            discriminator: scope.to_string(),
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.namespace.prefix(), self.discriminator)
    }
}
