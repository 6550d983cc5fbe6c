//! Markdown rendering of a checklist and its progress, and the reverse
//! mapping from task-list lines back to completion state.

use std::fmt::Write as _;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::model::Checklist;
use crate::progress::ChecklistProgress;

pub const MARKDOWN_MIME: &str = "text/markdown";

/// File name used when saving an exported checklist.
#[must_use]
pub fn markdown_filename(checklist: &Checklist) -> String {
    format!("{}.md", checklist.slug)
}

/// Renders `checklist` as a Markdown task list reflecting `progress`.
///
/// Output is deterministic for the same inputs.
#[must_use]
pub fn export_to_markdown(checklist: &Checklist, progress: &ChecklistProgress) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}", single_line(&checklist.title));
    out.push('\n');

    let description = checklist.description.trim();
    if !description.is_empty() {
        let _ = writeln!(out, "{description}");
        out.push('\n');
    }

    let _ = writeln!(out, "**Category:** {}  ", single_line(&checklist.category));
    let _ = writeln!(out, "**Difficulty:** {}  ", checklist.difficulty.label());
    if let Some(minutes) = checklist.estimated_minutes {
        let _ = writeln!(out, "**Estimated time:** {minutes} minutes  ");
    }
    let done = progress.completed_count(&checklist.items);
    let _ = writeln!(
        out,
        "**Progress:** {done}/{} ({}%)",
        checklist.items.len(),
        progress.completion(&checklist.items)
    );
    out.push('\n');

    out.push_str("## Items\n\n");
    for item in &checklist.items {
        let mark = if progress.is_done(&item.id) { 'x' } else { ' ' };
        let _ = writeln!(out, "- [{mark}] {}", single_line(&item.title));
        if let Some(description) = item.description.as_deref().map(str::trim) {
            if !description.is_empty() {
                let _ = writeln!(out, "  - {}", single_line(description));
            }
        }
        for resource in &item.resources {
            let _ = writeln!(out, "  - {}", resource.to_markdown_link());
        }
    }

    if !checklist.resources.is_empty() {
        out.push_str("\n## Resources\n\n");
        for resource in &checklist.resources {
            let _ = writeln!(out, "- {}", resource.to_markdown_link());
        }
    }

    out
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A task-list entry read back from Markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTask {
    pub title: String,
    pub done: bool,
}

/// Extracts every `- [x]` / `- [ ]` entry from `markdown`, in document order.
///
/// Nested content under an entry is not part of its title.
#[must_use]
pub fn parse_task_list(markdown: &str) -> Vec<ParsedTask> {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TASKLISTS);

    let mut tasks = Vec::new();
    // (title, done) of the entry whose inline text is being collected.
    let mut current: Option<(String, bool)> = None;

    for event in parser {
        match event {
            Event::TaskListMarker(done) => current = Some((String::new(), done)),
            Event::Text(text) | Event::Code(text) => {
                if let Some((title, _)) = current.as_mut() {
                    title.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((title, _)) = current.as_mut() {
                    title.push(' ');
                }
            }
            Event::Start(Tag::List(_)) | Event::End(TagEnd::Item) => {
                if let Some((title, done)) = current.take() {
                    tasks.push(ParsedTask {
                        title: title.trim().to_string(),
                        done,
                    });
                }
            }
            _ => {}
        }
    }
    tasks
}

/// Rebuilds checklist progress from an exported document.
///
/// Task lines pair with items by position, the order `export_to_markdown`
/// writes them in. A pair only counts when the line's text equals the item
/// title read through the same parser, so inline markup and repeated titles
/// survive while edited or reordered documents restore nothing wrong.
#[must_use]
pub fn progress_from_markdown(checklist: &Checklist, markdown: &str) -> ChecklistProgress {
    checklist
        .items
        .iter()
        .zip(parse_task_list(markdown))
        .filter(|(item, task)| parsed_title(&item.title) == task.title)
        .fold(ChecklistProgress::new(), |progress, (item, task)| {
            progress.with_item(item.id.clone(), task.done)
        })
}

/// `title` as `parse_task_list` reads it back from an exported line.
fn parsed_title(title: &str) -> String {
    parse_task_list(&format!("- [ ] {}", single_line(title)))
        .into_iter()
        .next()
        .map(|task| task.title)
        .unwrap_or_default()
}
