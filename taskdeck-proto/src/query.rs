//! List-endpoint query parameters.

use serde::{Deserialize, Serialize};

use crate::task::{TaskPriority, TaskStatus};

/// Server-side filters for `GET /tasks`.
///
/// Only status and priority exist on the wire; the client-side search text
/// is deliberately not representable here, so it can never leak into a
/// request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskQuery {
    /// Restrict to tasks with this status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// Restrict to tasks with this priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
}

impl TaskQuery {
    /// Returns the query-string pairs for this filter set.
    ///
    /// Unset fields produce no pair at all, so an empty query yields an
    /// empty vec and the request URL carries no `?`.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, &'static str)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str()));
        }
        if let Some(priority) = self.priority {
            pairs.push(("priority", priority.as_str()));
        }
        pairs
    }

    /// Returns true if no filter is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none()
    }
}
