//! Integration tests for filter behavior: which filters reach the wire,
//! which stay client-side, and what each change triggers.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod support;

use support::{TestApi, sample_task};
use taskdeck::store::FilterChange;
use taskdeck_proto::task::{Task, TaskPriority, TaskStatus};

fn task_with(id: &str, title: &str, status: TaskStatus, priority: TaskPriority) -> Task {
    let mut task = sample_task(id, title);
    task.status = status;
    task.priority = priority;
    task
}

// ---------------------------------------------------------------------------
// Server-side filters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_filter_sends_exactly_one_request_with_only_status() {
    let api = TestApi::start().await;
    let mut store = api.store();

    store
        .set_filter(FilterChange::Status(Some(TaskStatus::Pending)))
        .await;

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/tasks");
    assert_eq!(
        requests[0].query,
        vec![("status".to_string(), "pending".to_string())]
    );
}

#[tokio::test]
async fn priority_filter_sends_only_priority() {
    let api = TestApi::start().await;
    let mut store = api.store();

    store
        .set_filter(FilterChange::Priority(Some(TaskPriority::Urgent)))
        .await;

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].query,
        vec![("priority".to_string(), "urgent".to_string())]
    );
}

#[tokio::test]
async fn combined_filters_send_both_params() {
    let api = TestApi::start().await;
    let mut store = api.store();

    store
        .set_filter(FilterChange::Status(Some(TaskStatus::InProgress)))
        .await;
    store
        .set_filter(FilterChange::Priority(Some(TaskPriority::High)))
        .await;

    let requests = api.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[1].query,
        vec![
            ("status".to_string(), "in_progress".to_string()),
            ("priority".to_string(), "high".to_string()),
        ]
    );
}

#[tokio::test]
async fn server_side_filter_narrows_the_collection() {
    let api = TestApi::start().await;
    api.seed(vec![
        task_with("1", "Done thing", TaskStatus::Completed, TaskPriority::Low),
        task_with("2", "Open thing", TaskStatus::Pending, TaskPriority::Low),
        task_with("3", "Other done", TaskStatus::Completed, TaskPriority::High),
    ]);

    let mut store = api.store();
    store
        .set_filter(FilterChange::Status(Some(TaskStatus::Completed)))
        .await;

    assert_eq!(store.tasks().len(), 2);
    assert!(
        store
            .tasks()
            .iter()
            .all(|t| t.status == TaskStatus::Completed)
    );
}

// ---------------------------------------------------------------------------
// Client-side search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_change_sends_no_request_and_applies_immediately() {
    let api = TestApi::start().await;
    api.seed(vec![
        sample_task("1", "Quarterly report"),
        sample_task("2", "Grocery run"),
    ]);

    let mut store = api.store();
    store.fetch_tasks().await;
    api.clear_requests();

    store
        .set_filter(FilterChange::Search("report".to_string()))
        .await;

    assert!(api.requests().is_empty());
    let visible = store.filtered_tasks();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id.as_str(), "1");
}

#[tokio::test]
async fn search_never_reaches_the_query_string() {
    let api = TestApi::start().await;
    let mut store = api.store();

    store
        .set_filter(FilterChange::Search("report".to_string()))
        .await;
    store
        .set_filter(FilterChange::Status(Some(TaskStatus::Pending)))
        .await;

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    // Only the status pair — no trace of the search text.
    assert_eq!(
        requests[0].query,
        vec![("status".to_string(), "pending".to_string())]
    );
}

// ---------------------------------------------------------------------------
// clear_filters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn clear_filters_resets_and_fetches_exactly_once_unfiltered() {
    let api = TestApi::start().await;
    let mut store = api.store();

    store
        .set_filter(FilterChange::Status(Some(TaskStatus::Completed)))
        .await;
    store
        .set_filter(FilterChange::Priority(Some(TaskPriority::Low)))
        .await;
    store
        .set_filter(FilterChange::Search("report".to_string()))
        .await;
    api.clear_requests();

    store.clear_filters().await;

    assert_eq!(store.filters().status, None);
    assert_eq!(store.filters().priority, None);
    assert_eq!(store.filters().search, "");

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].query.is_empty());
}
