use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use daily_core::filter::{FilterState, SortDirection, SortSpec, apply_filters};
use daily_core::model::{Difficulty, ItemId, Scope, Slug};
use services::{
    AppServices, Clipboard, ClipboardError, ContentKind, DirectoryDownloads, ExportService,
    SaveStatus, ShareService,
};

use crate::config::{Command, ListArgs};
use crate::error::CliError;

/// Prints copied text; the terminal is the clipboard.
struct TerminalClipboard;

#[async_trait]
impl Clipboard for TerminalClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        writeln!(std::io::stdout(), "{text}")
            .map_err(|err| ClipboardError::Unavailable(err.to_string()))
    }
}

pub async fn run(command: Command, app: &AppServices, out: &mut impl Write) -> Result<(), CliError> {
    match command {
        Command::List(args) => list(app, &args, out).await,
        Command::Status { slug } => status(app, &slug, out).await,
        Command::Toggle { slug, item } => toggle(app, &slug, item, out).await,
        Command::Reset { slug, yes } => reset(app, slug, yes, out).await,
        Command::Export { slug, out: dir } => export(app, &slug, &dir, out).await,
        Command::Share { slug } => share(app, &slug, Arc::new(TerminalClipboard), out).await,
        Command::QuizResult { scope } => quiz_result(app, &scope, out).await,
        Command::Interview { scope } => interview(app, &scope, out).await,
        Command::Review {
            scope,
            question,
            undo,
            confident,
        } => review(app, scope, question, !undo, confident, out).await,
        Command::Answer {
            scope,
            question,
            option,
        } => answer(app, scope, question, option, out).await,
        Command::FinishQuiz { scope } => finish_quiz(app, &scope, out).await,
    }
}

async fn list(app: &AppServices, args: &ListArgs, out: &mut impl Write) -> Result<(), CliError> {
    let library = app.content().library().await?;
    let direction = if args.desc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };
    let filters = FilterState::<Difficulty> {
        category: args.category.clone(),
        level: args.difficulty.clone(),
        sort: SortSpec::new(args.sort, direction),
    };

    for checklist in apply_filters(&library.checklists, &filters) {
        let summary = app.checklists().summary(checklist).await;
        writeln!(
            out,
            "{:<32} {:<16} {:<12} {:>3}%  {}",
            checklist.slug,
            checklist.category,
            checklist.difficulty.label(),
            summary.percentage,
            checklist.title
        )?;
    }
    Ok(())
}

async fn status(app: &AppServices, slug: &Slug, out: &mut impl Write) -> Result<(), CliError> {
    let checklist = app.content().checklist(slug).await?;
    let progress = app.checklists().progress(slug).await;
    let summary = app.checklists().summary(&checklist).await;

    writeln!(out, "{}", checklist.title)?;
    for item in &checklist.items {
        let mark = if progress.is_done(&item.id) { 'x' } else { ' ' };
        writeln!(out, "  [{mark}] {:<24} {}", item.id, item.title)?;
    }
    writeln!(
        out,
        "{}/{} done ({}%)",
        summary.completed, summary.total, summary.percentage
    )?;
    Ok(())
}

async fn toggle(
    app: &AppServices,
    slug: &Slug,
    item: ItemId,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let checklist = app.content().checklist(slug).await?;
    if !checklist.items.iter().any(|i| i.id == item) {
        return Err(CliError::UnknownItem {
            slug: slug.clone(),
            item,
        });
    }

    let update = app.checklists().toggle_item(slug, &item).await;
    let state = if update.progress.is_done(&item) {
        "done"
    } else {
        "not done"
    };
    writeln!(out, "{item}: {state}")?;
    warn_unsaved(update.status, out)
}

async fn reset(
    app: &AppServices,
    slug: Slug,
    confirmed: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if !confirmed {
        return Err(CliError::ResetNotConfirmed(slug));
    }
    let status = app.checklists().reset(&slug).await;
    if status.is_saved() {
        writeln!(out, "{slug}: progress cleared")?;
    }
    warn_unsaved(status, out)
}

async fn export(
    app: &AppServices,
    slug: &Slug,
    dir: &Path,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let checklist = app.content().checklist(slug).await?;
    let progress = app.checklists().progress(slug).await;

    let downloads = DirectoryDownloads::new(dir);
    let file = ExportService::checklist_markdown(&checklist, &progress);
    let saved = ExportService::new(Arc::new(downloads.clone()))
        .download_checklist(&checklist, &progress)
        .await;
    if saved {
        writeln!(out, "{}", downloads.path_for(&file).display())?;
    } else {
        writeln!(out, "warning: {} was not written", file.filename)?;
    }
    Ok(())
}

async fn share(
    app: &AppServices,
    slug: &Slug,
    clipboard: Arc<dyn Clipboard>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    app.content().checklist(slug).await?;
    if app.share_links().checklist_url(slug).is_empty() {
        return Err(CliError::MissingOrigin);
    }
    let copied = ShareService::new(app.share_links().clone(), clipboard)
        .copy_link(ContentKind::Checklist, slug)
        .await;
    if !copied {
        writeln!(out, "warning: share link was not copied")?;
    }
    Ok(())
}

async fn quiz_result(app: &AppServices, scope: &Scope, out: &mut impl Write) -> Result<(), CliError> {
    let questions = app.content().library().await?.quiz_questions_in(scope);
    let outcome = app.quiz_mode().outcome(scope, &questions).await;
    let result = outcome.result;

    writeln!(
        out,
        "{scope}: {}/{} correct ({}%) {} {}",
        result.correct, result.total, result.percentage, outcome.rating.emoji, outcome.rating.label
    )?;
    writeln!(
        out,
        "points: {}/{}",
        outcome.points_earned, outcome.points_possible
    )?;
    if let Some(seconds) = result.time_spent_seconds {
        writeln!(out, "time: {}m {:02}s", seconds / 60, seconds % 60)?;
    }
    Ok(())
}

async fn interview(app: &AppServices, scope: &Scope, out: &mut impl Write) -> Result<(), CliError> {
    let questions = app.content().library().await?.interview_questions_in(scope);
    let summary = app.interview().summary(scope, &questions).await;
    writeln!(
        out,
        "{scope}: {}/{} reviewed ({}%), {} confident",
        summary.reviewed, summary.total, summary.percentage, summary.confident
    )?;
    Ok(())
}

async fn review(
    app: &AppServices,
    scope: Scope,
    question: ItemId,
    reviewed: bool,
    confident: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let questions = app.content().library().await?.interview_questions_in(&scope);
    if !questions.iter().any(|q| q.id == question) {
        return Err(CliError::UnknownQuestion { scope, question });
    }

    let mut update = app
        .interview()
        .set_reviewed(&scope, question.clone(), reviewed)
        .await;
    if confident {
        update = app.interview().toggle_confident(&scope, question.clone()).await;
    }
    let state = update.progress.get(&question);
    writeln!(
        out,
        "{question}: reviewed={} confident={}",
        state.reviewed, state.confident
    )?;
    warn_unsaved(update.status, out)
}

async fn answer(
    app: &AppServices,
    scope: Scope,
    question: ItemId,
    option: usize,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let questions = app.content().library().await?.quiz_questions_in(&scope);
    let Some(found) = questions.iter().find(|q| q.id == question) else {
        return Err(CliError::UnknownQuestion { scope, question });
    };

    let update = app.quiz_mode().answer(&scope, found, option).await;
    let verdict = if found.is_correct(option) {
        "correct"
    } else {
        "incorrect"
    };
    writeln!(out, "{question}: {verdict}")?;
    if let Some(explanation) = found.explanation.as_deref() {
        writeln!(out, "  {explanation}")?;
    }
    warn_unsaved(update.status, out)
}

async fn finish_quiz(app: &AppServices, scope: &Scope, out: &mut impl Write) -> Result<(), CliError> {
    let update = app.quiz_mode().finish(scope).await;
    warn_unsaved(update.status, out)?;
    quiz_result(app, scope, out).await
}

fn warn_unsaved(status: SaveStatus, out: &mut impl Write) -> Result<(), CliError> {
    if !status.is_saved() {
        writeln!(out, "warning: progress was not saved ({status:?})")?;
    }
    Ok(())
}
