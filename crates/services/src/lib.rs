#![forbid(unsafe_code)]

pub mod app_services;
pub mod checklist_service;
pub mod content_repository;
pub mod error;
pub mod export_service;
pub mod interview_service;
pub mod progress_store;
pub mod quiz_service;
pub mod share;

pub use daily_core::Clock;

pub use app_services::{AppServices, ServicesConfig};
pub use checklist_service::{ChecklistProgressService, ChecklistSummary};
pub use content_repository::{ContentRepository, RefreshPolicy};
pub use error::{AppServicesError, ClipboardError, ContentServiceError, DownloadError};
pub use export_service::{DirectoryDownloads, DownloadTarget, ExportService, ExportedFile};
pub use interview_service::{InterviewProgressService, InterviewSummary};
pub use progress_store::{ProgressStore, ProgressUpdate, SaveStatus};
pub use quiz_service::{QuizModeService, QuizOutcome};
pub use share::{Clipboard, ContentKind, ShareLinks, ShareService};
