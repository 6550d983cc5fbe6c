use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::level_filters::LevelFilter;
use url::Url;

use daily_core::filter::{Selection, SortField};
use daily_core::model::{Difficulty, ItemId, Scope, Slug};
use services::RefreshPolicy;

/// Command-line arguments for the `devops-daily` binary.
#[derive(Debug, Parser)]
#[command(
    name = "devops-daily",
    version,
    about = "Track checklist, interview and quiz progress"
)]
pub struct CliArgs {
    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args, Clone)]
pub struct Settings {
    /// `SQLite` database holding progress records.
    #[arg(
        long = "db",
        env = "DEVOPS_DAILY_DB_URL",
        value_name = "URL",
        default_value = "sqlite://devops-daily.sqlite3",
        global = true
    )]
    pub db_url: String,

    /// Directory with `checklists/`, `interview-questions/` and `quizzes/`.
    #[arg(
        long = "content-dir",
        env = "DEVOPS_DAILY_CONTENT_DIR",
        value_name = "PATH",
        default_value = "content",
        global = true
    )]
    pub content_dir: PathBuf,

    /// Site origin used for share links.
    #[arg(long, env = "DEVOPS_DAILY_ORIGIN", value_name = "URL", global = true)]
    pub origin: Option<Url>,

    #[arg(
        long = "env",
        env = "DEVOPS_DAILY_ENV",
        value_enum,
        default_value_t = Environment::Production,
        global = true
    )]
    pub environment: Environment,

    #[arg(
        long = "log-format",
        env = "DEVOPS_DAILY_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    pub log_format: LogFormat,

    #[arg(long = "log-level", value_name = "LEVEL", default_value_t = LevelFilter::INFO, global = true)]
    pub log_level: LevelFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub fn refresh_policy(self) -> RefreshPolicy {
        match self {
            Environment::Development => RefreshPolicy::development(),
            Environment::Production => RefreshPolicy::Never,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// List checklists with their progress.
    List(ListArgs),
    /// Show per-item progress of one checklist.
    Status { slug: Slug },
    /// Flip one checklist item between done and not done.
    Toggle { slug: Slug, item: ItemId },
    /// Clear all progress of a checklist.
    Reset {
        slug: Slug,
        /// Confirm the reset; nothing is cleared without it.
        #[arg(long)]
        yes: bool,
    },
    /// Write the checklist as a Markdown task list.
    Export {
        slug: Slug,
        #[arg(long, value_name = "DIR", default_value = ".")]
        out: PathBuf,
    },
    /// Print the share link of a checklist.
    Share { slug: Slug },
    /// Show the quiz-mode score for a scope ("all" or a category).
    #[command(name = "quiz-result")]
    QuizResult { scope: Scope },
    /// Show reviewed and confident counts for an interview scope.
    Interview { scope: Scope },
    /// Mark an interview question reviewed.
    Review {
        scope: Scope,
        question: ItemId,
        /// Clear the reviewed mark instead.
        #[arg(long)]
        undo: bool,
        /// Also flip the confident mark.
        #[arg(long, conflicts_with = "undo")]
        confident: bool,
    },
    /// Answer one quiz-mode question with a zero-based option index.
    Answer {
        scope: Scope,
        question: ItemId,
        option: usize,
    },
    /// Complete the current quiz-mode attempt.
    #[command(name = "finish-quiz")]
    FinishQuiz { scope: Scope },
}

#[derive(Debug, Args, Clone)]
pub struct ListArgs {
    #[arg(long, default_value = "all")]
    pub category: Selection<String>,

    #[arg(long, default_value = "all")]
    pub difficulty: Selection<Difficulty>,

    /// One of date, difficulty, time, title.
    #[arg(long, default_value = "date")]
    pub sort: SortField,

    /// Sort descending.
    #[arg(long)]
    pub desc: bool,
}
