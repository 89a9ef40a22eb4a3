//! HTTP client for the remote task API.
//!
//! A thin wrapper over [`reqwest`] that maps each endpoint of the task API
//! to one method. Non-2xx responses are turned into [`ApiError::Api`] with
//! the server's `detail` message when the body carries one; connection and
//! protocol problems surface as [`ApiError::Transport`]. No retries — every
//! method issues exactly one request.

use std::time::Duration;

use reqwest::{Response, StatusCode};
use taskdeck_proto::query::TaskQuery;
use taskdeck_proto::reply::{DeleteReply, ErrorBody, Health};
use taskdeck_proto::task::{Task, TaskDraft, TaskId, TaskPatch};
use url::Url;

/// Errors that can occur when calling the task API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a valid HTTP response (connection
    /// refused, timeout, malformed body on a success response, ...).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("api returned {status}")]
    Api {
        /// HTTP status of the response.
        status: StatusCode,
        /// The `detail` field of the error body, if the server sent one.
        detail: Option<String>,
    },
}

impl ApiError {
    /// The text to surface to the user for this failure.
    ///
    /// Server-provided detail wins; everything else (transport failures,
    /// detail-less error responses) falls back to the caller's generic
    /// per-operation message.
    #[must_use]
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            Self::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::Api { detail: None, .. } | Self::Transport(_) => fallback.to_string(),
        }
    }
}

/// Client for the remote task API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    /// Base URL without a trailing slash, e.g. `http://127.0.0.1:8000`.
    base: String,
}

impl ApiClient {
    /// Creates a client for the API at `base_url` with the given
    /// per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(base_url: &Url, request_timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            http,
            base: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// `GET /tasks` with the given server-side filters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    pub async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>, ApiError> {
        let mut request = self.http.get(self.collection_url());
        let pairs = query.query_pairs();
        if !pairs.is_empty() {
            request = request.query(&pairs);
        }
        let resp = Self::check(request.send().await?).await?;
        Ok(resp.json().await?)
    }

    /// `POST /tasks`, returning the created task with its server-assigned
    /// identity.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response
    /// (e.g. the server rejecting a past due date).
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
        let resp = self.http.post(self.collection_url()).json(draft).send().await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }

    /// `GET /tasks/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    pub async fn get_task(&self, id: &TaskId) -> Result<Task, ApiError> {
        let resp = self.http.get(self.task_url(id)).send().await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }

    /// `PUT /tasks/{id}` with a partial body; omitted fields are left
    /// unchanged server-side. Returns the server's updated representation.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    pub async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task, ApiError> {
        let resp = self.http.put(self.task_url(id)).json(patch).send().await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }

    /// `DELETE /tasks/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    pub async fn delete_task(&self, id: &TaskId) -> Result<(), ApiError> {
        let resp = self.http.delete(self.task_url(id)).send().await?;
        let resp = Self::check(resp).await?;
        // The reference server replies with a confirmation body, but a
        // plain 204 is equally acceptable.
        if let Ok(reply) = resp.json::<DeleteReply>().await {
            tracing::debug!(message = %reply.message, "task deleted");
        }
        Ok(())
    }

    /// `GET /health` — reachability probe for the status bar.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    pub async fn health(&self) -> Result<Health, ApiError> {
        let resp = self.http.get(format!("{}/health", self.base)).send().await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }

    fn collection_url(&self) -> String {
        format!("{}/tasks", self.base)
    }

    fn task_url(&self, id: &TaskId) -> String {
        format!("{}/tasks/{}", self.base, id)
    }

    /// Maps a non-2xx response to [`ApiError::Api`], extracting the
    /// `detail` field when the body is the conventional error shape.
    async fn check(resp: Response) -> Result<Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let detail = match resp.text().await {
            Ok(body) => serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .map(|b| b.detail),
            Err(_) => None,
        };
        tracing::warn!(status = %status, detail = ?detail, "api request failed");
        Err(ApiError::Api { status, detail })
    }
}
