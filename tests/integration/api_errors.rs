//! Integration tests for error handling: server detail extraction, generic
//! fallbacks, re-raising to the caller, and stale-state retention.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod support;

use support::{TestApi, sample_task};
use chrono::{Duration as ChronoDuration, Utc};
use taskdeck_proto::task::{TaskDraft, TaskId, TaskPatch, TaskStatus};

#[tokio::test]
async fn fetch_failure_keeps_stale_tasks_and_uses_generic_fallback() {
    let api = TestApi::start().await;
    api.seed(vec![sample_task("1", "Stale but shown")]);

    let mut store = api.store();
    store.fetch_tasks().await;
    assert_eq!(store.tasks().len(), 1);

    // Non-JSON error body: no detail to extract.
    api.fail_once(500, None);
    store.fetch_tasks().await;

    assert_eq!(store.error(), Some("failed to load tasks"));
    assert!(!store.is_loading());
    // The stale collection is retained, not cleared.
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].title, "Stale but shown");
}

#[tokio::test]
async fn create_failure_surfaces_server_detail_and_reraises() {
    let api = TestApi::start().await;
    let mut store = api.store();

    api.fail_once(500, Some("database exploded"));
    let draft = TaskDraft {
        title: "Will not make it".to_string(),
        ..TaskDraft::default()
    };
    let result = store.create_task(draft).await;

    assert!(result.is_err());
    assert_eq!(store.error(), Some("database exploded"));
    assert!(!store.is_loading());
    assert!(store.tasks().is_empty());
}

#[tokio::test]
async fn server_rejects_past_due_date_with_detail() {
    let api = TestApi::start().await;
    let mut store = api.store();

    let draft = TaskDraft {
        title: "Time traveler".to_string(),
        due_date: Some(Utc::now() - ChronoDuration::days(1)),
        ..TaskDraft::default()
    };
    let result = store.create_task(draft).await;

    assert!(result.is_err());
    assert_eq!(store.error(), Some("Due date cannot be in the past"));
    assert!(store.tasks().is_empty());
    assert!(api.tasks_snapshot().is_empty());
}

#[tokio::test]
async fn update_of_unknown_task_surfaces_not_found_detail() {
    let api = TestApi::start().await;
    api.seed(vec![sample_task("1", "Only me")]);

    let mut store = api.store();
    store.fetch_tasks().await;
    let before = store.tasks().to_vec();

    let id = TaskId::new("nope");
    let result = store
        .update_task(&id, TaskPatch::with_status(TaskStatus::Completed))
        .await;

    assert!(result.is_err());
    assert_eq!(store.error(), Some("Task nope not found"));
    assert!(!store.is_loading());
    // Nothing was applied locally.
    assert_eq!(store.tasks(), before.as_slice());
}

#[tokio::test]
async fn delete_failure_retains_the_entry_and_reraises() {
    let api = TestApi::start().await;
    api.seed(vec![sample_task("1", "Survivor")]);

    let mut store = api.store();
    store.fetch_tasks().await;

    api.fail_once(500, None);
    let id = TaskId::new("1");
    let result = store.delete_task(&id).await;

    assert!(result.is_err());
    assert_eq!(store.error(), Some("failed to delete task"));
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(api.tasks_snapshot().len(), 1);
}

#[tokio::test]
async fn next_operation_clears_a_previous_error() {
    let api = TestApi::start().await;
    let mut store = api.store();

    api.fail_once(500, None);
    store.fetch_tasks().await;
    assert!(store.error().is_some());

    store.fetch_tasks().await;
    assert!(store.error().is_none());
}
