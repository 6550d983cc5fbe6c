use std::sync::Arc;

use daily_core::model::{
    Checklist, ChecklistItem, ContentLibrary, Difficulty, ItemId, Scope, Slug,
};
use daily_core::time::fixed_now;
use services::{AppServices, Clock, ExportService, RefreshPolicy, SaveStatus, ServicesConfig};
use storage::content_source::StaticContentSource;
use storage::repository::Storage;
use storage::StorageKey;
use url::Url;

fn library() -> ContentLibrary {
    let checklist = Checklist::new(
        Slug::new("incident-response").unwrap(),
        "Incident Response",
        "SRE",
        Difficulty::Advanced,
        vec![
            ChecklistItem::new(ItemId::new("page").unwrap(), "Page the on-call"),
            ChecklistItem::new(ItemId::new("status").unwrap(), "Post a status update"),
        ],
    );
    ContentLibrary {
        checklists: vec![checklist],
        ..ContentLibrary::default()
    }
}

fn config() -> ServicesConfig {
    ServicesConfig {
        clock: Clock::fixed(fixed_now()),
        refresh_policy: RefreshPolicy::Never,
        origin: Some(Url::parse("https://devops-daily.com").unwrap()),
    }
}

fn services(storage: &Storage) -> AppServices {
    AppServices::new(storage, Arc::new(StaticContentSource::new(library())), config())
}

#[tokio::test]
async fn corrupt_record_reads_as_empty_and_is_overwritten() {
    let storage = Storage::in_memory();
    let slug = Slug::new("incident-response").unwrap();
    storage
        .kv
        .set(&StorageKey::checklist(&slug), "{not json")
        .await
        .unwrap();

    let app = services(&storage);
    assert!(app.checklists().progress(&slug).await.is_empty());

    let update = app
        .checklists()
        .toggle_item(&slug, &ItemId::new("page").unwrap())
        .await;
    assert_eq!(update.status, SaveStatus::Saved);

    let raw = storage.kv.get(&StorageKey::checklist(&slug)).await.unwrap();
    assert_eq!(raw.as_deref(), Some(r#"{"page":true}"#));
}

#[tokio::test]
async fn checklist_flow_over_sqlite() {
    let storage = Storage::sqlite("sqlite:file:memdb_progress_flow?mode=memory&cache=shared")
        .await
        .expect("connect sqlite");
    let app = services(&storage);
    let content = app.content();
    let slug = Slug::new("incident-response").unwrap();
    let checklist = content.checklist(&slug).await.unwrap();

    app.checklists()
        .set_item(&slug, ItemId::new("page").unwrap(), true)
        .await;
    app.checklists()
        .set_item(&slug, ItemId::new("retired-step").unwrap(), true)
        .await;

    let summary = app.checklists().summary(&checklist).await;
    assert_eq!((summary.completed, summary.total, summary.percentage), (1, 2, 50));

    let progress = app.checklists().progress(&slug).await;
    let file = ExportService::checklist_markdown(&checklist, &progress);
    assert_eq!(file.contents.matches("- [x] Page the on-call").count(), 1);
    assert_eq!(file.contents.matches("- [ ] Post a status update").count(), 1);

    assert_eq!(
        app.share_links().checklist_url(&slug),
        "https://devops-daily.com/checklists/incident-response"
    );

    app.checklists().reset(&slug).await;
    app.checklists().reset(&slug).await;
    assert!(app.checklists().progress(&slug).await.is_empty());
}

#[tokio::test]
async fn detached_storage_never_fails() {
    let storage = Storage::detached();
    let app = services(&storage);
    let slug = Slug::new("incident-response").unwrap();

    let update = app
        .checklists()
        .toggle_item(&slug, &ItemId::new("page").unwrap())
        .await;
    assert_eq!(update.status, SaveStatus::Unavailable);
    assert!(update.progress.is_done(&ItemId::new("page").unwrap()));
    assert!(app.checklists().progress(&slug).await.is_empty());

    assert_eq!(app.interview().reset(&Scope::All).await, SaveStatus::Unavailable);
    let outcome = app.quiz_mode().outcome(&Scope::All, &[]).await;
    assert_eq!(outcome.result.percentage, 0);
}

#[tokio::test]
async fn last_write_wins_between_two_writers() {
    let storage = Storage::in_memory();
    let first_tab = services(&storage);
    let second_tab = services(&storage);
    let slug = Slug::new("incident-response").unwrap();

    // Both tabs read the empty record before either writes.
    let stale_first = first_tab.checklists().progress(&slug).await;
    let stale_second = second_tab.checklists().progress(&slug).await;

    first_tab
        .checklists()
        .replace(&slug, stale_first.with_item(ItemId::new("page").unwrap(), true))
        .await;
    second_tab
        .checklists()
        .replace(&slug, stale_second.with_item(ItemId::new("status").unwrap(), true))
        .await;

    let merged = first_tab.checklists().progress(&slug).await;
    assert!(!merged.is_done(&ItemId::new("page").unwrap()));
    assert!(merged.is_done(&ItemId::new("status").unwrap()));
}
