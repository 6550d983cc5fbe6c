use thiserror::Error;

use daily_core::model::{ItemId, Scope, Slug};
use services::{AppServicesError, ContentServiceError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliError {
    #[error("invalid database url: {0}")]
    InvalidDbUrl(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to install tracing subscriber: {0}")]
    Telemetry(String),

    #[error("refusing to reset `{0}` without --yes")]
    ResetNotConfirmed(Slug),

    #[error("checklist `{slug}` has no item `{item}`")]
    UnknownItem { slug: Slug, item: ItemId },

    #[error("no question `{question}` in scope `{scope}`")]
    UnknownQuestion { scope: Scope, question: ItemId },

    #[error("no site origin configured; set DEVOPS_DAILY_ORIGIN")]
    MissingOrigin,

    #[error(transparent)]
    Services(#[from] AppServicesError),

    #[error(transparent)]
    Content(#[from] ContentServiceError),
}
