//! Miscellaneous response bodies of the task API.

use serde::{Deserialize, Serialize};

/// Error body returned with non-2xx responses: `{"detail": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure message.
    pub detail: String,
}

/// Success body of `DELETE /tasks/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteReply {
    /// Human-readable confirmation message.
    pub message: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Service status string, `"ok"` when healthy.
    pub status: String,
    /// Server-side timestamp, ISO 8601.
    pub timestamp: String,
    /// Number of tasks the server currently holds.
    pub total_tasks: usize,
}
