//! Client-side task store.
//!
//! [`TaskStore`] is the single source of truth for the fetched task
//! collection, request status, and filter state. All reads and writes go
//! through the remote API — state is only mutated after the server has
//! acknowledged an operation (pessimistic updates), and no task ever
//! exists locally that the server has not returned.
//!
//! The store is an explicit, injectable container: construct one per
//! client (or per test) with [`TaskStore::new`]; there is no global
//! instance.

use taskdeck_proto::query::TaskQuery;
use taskdeck_proto::task::{Task, TaskDraft, TaskId, TaskPatch, TaskPriority, TaskStatus};

use crate::api::{ApiClient, ApiError};

/// Generic error text when a fetch fails without a server message.
const FETCH_FALLBACK: &str = "failed to load tasks";
/// Generic error text when a create fails without a server message.
const CREATE_FALLBACK: &str = "failed to create task";
/// Generic error text when an update fails without a server message.
const UPDATE_FALLBACK: &str = "failed to update task";
/// Generic error text when a delete fails without a server message.
const DELETE_FALLBACK: &str = "failed to delete task";

/// Active filters narrowing the displayed task set.
///
/// `status` and `priority` are applied server-side on the next fetch;
/// `search` is applied client-side only and never reaches the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Server-side status filter.
    pub status: Option<TaskStatus>,
    /// Server-side priority filter.
    pub priority: Option<TaskPriority>,
    /// Client-side case-insensitive search over title and description.
    pub search: String,
}

impl FilterState {
    /// The server-side portion of the filters; search is excluded by
    /// construction.
    #[must_use]
    pub const fn to_query(&self) -> TaskQuery {
        TaskQuery {
            status: self.status,
            priority: self.priority,
        }
    }

    /// Returns true if any filter differs from its empty default.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.is_some() || self.priority.is_some() || !self.search.is_empty()
    }
}

/// A change to a single filter field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    /// Set or clear the status filter (triggers a refetch).
    Status(Option<TaskStatus>),
    /// Set or clear the priority filter (triggers a refetch).
    Priority(Option<TaskPriority>),
    /// Replace the search text (client-side only, no refetch).
    Search(String),
}

/// Returns the tasks matching `search`, preserving order.
///
/// An empty search returns every task. Otherwise a task matches when its
/// title or description contains the search text case-insensitively.
/// Pure — no mutation, no I/O.
#[must_use]
pub fn search_tasks<'a>(tasks: &'a [Task], search: &str) -> Vec<&'a Task> {
    if search.is_empty() {
        return tasks.iter().collect();
    }
    let needle = search.to_lowercase();
    tasks
        .iter()
        .filter(|task| {
            task.title.to_lowercase().contains(&needle)
                || task
                    .description
                    .as_ref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Client-side state container mediating all CRUD against the task API.
pub struct TaskStore {
    api: ApiClient,
    /// Last-fetched collection, in server order (newest first).
    tasks: Vec<Task>,
    /// True while a request is in flight.
    loading: bool,
    /// Display text of the most recent failure, cleared when the next
    /// operation starts.
    error: Option<String>,
    filters: FilterState,
}

impl TaskStore {
    /// Creates an empty store backed by the given API client.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            loading: false,
            error: None,
            filters: FilterState::default(),
        }
    }

    /// The full last-fetched collection, in server order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// True while a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Display text of the most recent failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The current filter state.
    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Fetches the task list using the current status/priority filters
    /// (search excluded), replacing the held collection wholesale on
    /// success.
    ///
    /// Failures are absorbed: the error text is surfaced through
    /// [`error`](Self::error) and the stale collection is retained.
    /// Single attempt, no retry.
    pub async fn fetch_tasks(&mut self) {
        self.loading = true;
        self.error = None;
        match self.api.list_tasks(&self.filters.to_query()).await {
            Ok(tasks) => {
                tracing::debug!(count = tasks.len(), "fetched tasks");
                self.tasks = tasks;
                self.loading = false;
            }
            Err(err) => {
                tracing::warn!(error = %err, "fetch failed, keeping stale tasks");
                self.error = Some(err.display_message(FETCH_FALLBACK));
                self.loading = false;
            }
        }
    }

    /// Creates a task and prepends the server's representation to the
    /// collection (newest first).
    ///
    /// # Errors
    ///
    /// Re-raises the [`ApiError`] so the caller can keep in-progress form
    /// state; the error text is also surfaced through
    /// [`error`](Self::error).
    pub async fn create_task(&mut self, draft: TaskDraft) -> Result<Task, ApiError> {
        self.loading = true;
        self.error = None;
        match self.api.create_task(&draft).await {
            Ok(task) => {
                self.tasks.insert(0, task.clone());
                self.loading = false;
                Ok(task)
            }
            Err(err) => {
                self.error = Some(err.display_message(CREATE_FALLBACK));
                self.loading = false;
                Err(err)
            }
        }
    }

    /// Applies a partial update and replaces the matching entry with the
    /// server's returned representation, preserving collection order.
    ///
    /// # Errors
    ///
    /// Re-raises the [`ApiError`]; the local entry is left untouched.
    pub async fn update_task(&mut self, id: &TaskId, patch: TaskPatch) -> Result<Task, ApiError> {
        self.loading = true;
        self.error = None;
        match self.api.update_task(id, &patch).await {
            Ok(updated) => {
                if let Some(slot) = self.tasks.iter_mut().find(|t| &t.id == id) {
                    *slot = updated.clone();
                }
                self.loading = false;
                Ok(updated)
            }
            Err(err) => {
                self.error = Some(err.display_message(UPDATE_FALLBACK));
                self.loading = false;
                Err(err)
            }
        }
    }

    /// Deletes a task and removes the matching entry from the collection.
    ///
    /// # Errors
    ///
    /// Re-raises the [`ApiError`]; the entry is retained on failure.
    pub async fn delete_task(&mut self, id: &TaskId) -> Result<(), ApiError> {
        self.loading = true;
        self.error = None;
        match self.api.delete_task(id).await {
            Ok(()) => {
                self.tasks.retain(|t| &t.id != id);
                self.loading = false;
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.display_message(DELETE_FALLBACK));
                self.loading = false;
                Err(err)
            }
        }
    }

    /// Updates one filter field. Status and priority changes immediately
    /// trigger a single refetch (server-side re-filter); search changes
    /// never touch the network.
    pub async fn set_filter(&mut self, change: FilterChange) {
        match change {
            FilterChange::Status(status) => {
                self.filters.status = status;
                self.fetch_tasks().await;
            }
            FilterChange::Priority(priority) => {
                self.filters.priority = priority;
                self.fetch_tasks().await;
            }
            FilterChange::Search(search) => {
                self.filters.search = search;
            }
        }
    }

    /// Resets all filters to their empty defaults and triggers exactly one
    /// unfiltered refetch.
    pub async fn clear_filters(&mut self) {
        self.filters = FilterState::default();
        self.fetch_tasks().await;
    }

    /// The tasks matching the current search text, in collection order.
    ///
    /// Pure view over the held collection; see [`search_tasks`].
    #[must_use]
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        search_tasks(&self.tasks, &self.filters.search)
    }
}
