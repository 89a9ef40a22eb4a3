//! In-process fake of the task API for integration tests.
//!
//! Serves the same endpoints and bodies as the real task API on an
//! OS-assigned port, records every request (method, path, query pairs) so
//! tests can assert exactly what went over the wire, and supports one-shot
//! failure injection for error-path tests.

#![allow(dead_code, clippy::expect_used, clippy::unwrap_used)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use taskdeck::api::ApiClient;
use taskdeck::store::TaskStore;
use taskdeck_proto::reply::{DeleteReply, ErrorBody, Health};
use taskdeck_proto::task::{Task, TaskDraft, TaskId, TaskPatch, TaskPriority, TaskStatus};
use tokio::net::TcpListener;
use url::Url;
use uuid::Uuid;

/// One request as the fixture saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: String,
    /// Request path (no query string).
    pub path: String,
    /// Query pairs, in order of appearance.
    pub query: Vec<(String, String)>,
}

#[derive(Default)]
struct ApiState {
    /// Held tasks, newest first (the order the real server lists them in).
    tasks: Mutex<Vec<Task>>,
    requests: Mutex<Vec<RecordedRequest>>,
    /// One-shot injected failure: status code plus optional `detail`.
    /// `None` detail produces a non-JSON body, exercising the generic
    /// fallback path.
    fail_next: Mutex<Option<(u16, Option<String>)>>,
}

impl ApiState {
    fn record(&self, method: &str, path: &str, query: &[(String, String)]) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            path: path.to_string(),
            query: query.to_vec(),
        });
    }

    fn take_failure(&self) -> Option<Response> {
        let (code, detail) = self.fail_next.lock().unwrap().take()?;
        let status = StatusCode::from_u16(code).expect("valid injected status");
        Some(match detail {
            Some(detail) => (status, Json(ErrorBody { detail })).into_response(),
            None => (status, "internal error").into_response(),
        })
    }
}

/// Handle to a running fixture server.
pub struct TestApi {
    /// Bound address of the server.
    pub addr: SocketAddr,
    state: Arc<ApiState>,
    _handle: tokio::task::JoinHandle<()>,
}

impl TestApi {
    /// Starts the fixture on an OS-assigned port.
    pub async fn start() -> Self {
        let state = Arc::new(ApiState::default());
        let app = Router::new()
            .route("/tasks", get(list_tasks).post(create_task))
            .route(
                "/tasks/{id}",
                get(get_task).put(update_task).delete(delete_task),
            )
            .route("/health", get(health))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind fixture listener");
        let addr = listener.local_addr().expect("fixture local addr");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            state,
            _handle: handle,
        }
    }

    /// Base URL of the fixture.
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).expect("fixture base url")
    }

    /// An [`ApiClient`] pointed at the fixture.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url(), Duration::from_secs(5)).expect("fixture api client")
    }

    /// A fresh, isolated [`TaskStore`] backed by the fixture.
    pub fn store(&self) -> TaskStore {
        TaskStore::new(self.client())
    }

    /// Replaces the server-side task set (newest first).
    pub fn seed(&self, tasks: Vec<Task>) {
        *self.state.tasks.lock().unwrap() = tasks;
    }

    /// Snapshot of the server-side task set.
    pub fn tasks_snapshot(&self) -> Vec<Task> {
        self.state.tasks.lock().unwrap().clone()
    }

    /// Snapshot of every request received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Forgets previously recorded requests.
    pub fn clear_requests(&self) {
        self.state.requests.lock().unwrap().clear();
    }

    /// Makes the next request fail with the given status; `detail`
    /// controls whether the body carries a structured message.
    pub fn fail_once(&self, status: u16, detail: Option<&str>) {
        *self.state.fail_next.lock().unwrap() = Some((status, detail.map(String::from)));
    }
}

/// Builds a task the way the server would, for seeding.
pub fn sample_task(id: &str, title: &str) -> Task {
    let now = Utc::now();
    Task {
        id: TaskId::new(id),
        title: title.to_string(),
        description: None,
        priority: TaskPriority::Medium,
        status: TaskStatus::Pending,
        assigned_to: None,
        due_date: None,
        created_at: now,
        updated_at: now,
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn list_tasks(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    state.record("GET", "/tasks", &params);
    if let Some(resp) = state.take_failure() {
        return resp;
    }

    let status = params.iter().find(|(k, _)| k == "status").map(|(_, v)| v.clone());
    let priority = params
        .iter()
        .find(|(k, _)| k == "priority")
        .map(|(_, v)| v.clone());

    let tasks = state.tasks.lock().unwrap();
    let filtered: Vec<Task> = tasks
        .iter()
        .filter(|t| {
            status.as_deref().is_none_or(|s| t.status.as_str() == s)
                && priority.as_deref().is_none_or(|p| t.priority.as_str() == p)
        })
        .cloned()
        .collect();
    Json(filtered).into_response()
}

async fn create_task(State(state): State<Arc<ApiState>>, Json(draft): Json<TaskDraft>) -> Response {
    state.record("POST", "/tasks", &[]);
    if let Some(resp) = state.take_failure() {
        return resp;
    }

    if draft.due_date.is_some_and(|d| d < Utc::now()) {
        return error_response(StatusCode::BAD_REQUEST, "Due date cannot be in the past");
    }

    let now = Utc::now();
    let task = Task {
        id: TaskId::new(Uuid::new_v4().to_string()),
        title: draft.title,
        description: draft.description,
        priority: draft.priority,
        status: draft.status,
        assigned_to: draft.assigned_to,
        due_date: draft.due_date,
        created_at: now,
        updated_at: now,
    };
    state.tasks.lock().unwrap().insert(0, task.clone());
    (StatusCode::CREATED, Json(task)).into_response()
}

async fn get_task(State(state): State<Arc<ApiState>>, Path(id): Path<String>) -> Response {
    state.record("GET", &format!("/tasks/{id}"), &[]);
    if let Some(resp) = state.take_failure() {
        return resp;
    }

    let tasks = state.tasks.lock().unwrap();
    match tasks.iter().find(|t| t.id.as_str() == id) {
        Some(task) => Json(task.clone()).into_response(),
        None => not_found(&id),
    }
}

async fn update_task(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> Response {
    state.record("PUT", &format!("/tasks/{id}"), &[]);
    if let Some(resp) = state.take_failure() {
        return resp;
    }

    let mut tasks = state.tasks.lock().unwrap();
    let Some(task) = tasks.iter_mut().find(|t| t.id.as_str() == id) else {
        return not_found(&id);
    };

    // Omitted fields stay; explicit nulls clear (exclude-unset semantics).
    if let Some(title) = patch.title {
        task.title = title;
    }
    if let Some(description) = patch.description {
        task.description = description;
    }
    if let Some(priority) = patch.priority {
        task.priority = priority;
    }
    if let Some(status) = patch.status {
        task.status = status;
    }
    if let Some(assigned_to) = patch.assigned_to {
        task.assigned_to = assigned_to;
    }
    if let Some(due_date) = patch.due_date {
        task.due_date = due_date;
    }
    task.updated_at = Utc::now();
    Json(task.clone()).into_response()
}

async fn delete_task(State(state): State<Arc<ApiState>>, Path(id): Path<String>) -> Response {
    state.record("DELETE", &format!("/tasks/{id}"), &[]);
    if let Some(resp) = state.take_failure() {
        return resp;
    }

    let mut tasks = state.tasks.lock().unwrap();
    let before = tasks.len();
    tasks.retain(|t| t.id.as_str() != id);
    if tasks.len() == before {
        return not_found(&id);
    }
    Json(DeleteReply {
        message: format!("Task {id} deleted successfully"),
    })
    .into_response()
}

async fn health(State(state): State<Arc<ApiState>>) -> Response {
    state.record("GET", "/health", &[]);
    if let Some(resp) = state.take_failure() {
        return resp;
    }

    let total_tasks = state.tasks.lock().unwrap().len();
    Json(Health {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        total_tasks,
    })
    .into_response()
}

fn not_found(id: &str) -> Response {
    error_response(StatusCode::NOT_FOUND, &format!("Task {id} not found"))
}

fn error_response(status: StatusCode, detail: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            detail: detail.to_string(),
        }),
    )
        .into_response()
}
