//! Task form state and validation.
//!
//! The form is the only place where input validation happens — the store
//! deliberately validates nothing. A draft or patch is produced only once
//! validation passes, so an invalid submission can never reach the store
//! or the wire.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use taskdeck_proto::task::{
    DESCRIPTION_MAX_LENGTH, TITLE_MAX_LENGTH, TITLE_MIN_LENGTH, Task, TaskDraft, TaskId,
    TaskPatch, TaskPriority, TaskStatus,
};

/// Text format accepted by the due-date field (time is optional).
const DUE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";
const DUE_DATE_FORMAT_DAY: &str = "%Y-%m-%d";

/// Validation errors raised at the form boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// The title is empty (after trimming).
    #[error("title is required")]
    TitleRequired,
    /// The title is shorter than the minimum.
    #[error("title must be at least {} characters", TITLE_MIN_LENGTH)]
    TitleTooShort,
    /// The title exceeds the maximum.
    #[error("title must be at most {} characters", TITLE_MAX_LENGTH)]
    TitleTooLong,
    /// The description exceeds the maximum.
    #[error("description must be at most {} characters", DESCRIPTION_MAX_LENGTH)]
    DescriptionTooLong,
    /// The due date text is not a recognized date.
    #[error("due date must be YYYY-MM-DD or YYYY-MM-DD HH:MM")]
    BadDueDate,
}

/// The input fields of the form, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Task title (required).
    Title,
    /// Free-form description.
    Description,
    /// Priority selector.
    Priority,
    /// Status selector.
    Status,
    /// Assignee email.
    AssignedTo,
    /// Due date text.
    DueDate,
}

impl FormField {
    /// All fields in navigation order.
    pub const ALL: [Self; 6] = [
        Self::Title,
        Self::Description,
        Self::Priority,
        Self::Status,
        Self::AssignedTo,
        Self::DueDate,
    ];

    /// Display label for the field row.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Priority => "Priority",
            Self::Status => "Status",
            Self::AssignedTo => "Assigned to",
            Self::DueDate => "Due date",
        }
    }

    /// The next field in navigation order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// The previous field in navigation order, wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// True for fields edited by typing (as opposed to cycling).
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(
            self,
            Self::Title | Self::Description | Self::AssignedTo | Self::DueDate
        )
    }
}

/// In-progress state of the create/edit form.
#[derive(Debug, Clone)]
pub struct FormState {
    /// Id of the task being edited, or `None` when creating.
    pub editing: Option<TaskId>,
    /// Title text.
    pub title: String,
    /// Description text (empty means absent).
    pub description: String,
    /// Selected priority.
    pub priority: TaskPriority,
    /// Selected status.
    pub status: TaskStatus,
    /// Assignee text (empty means absent).
    pub assigned_to: String,
    /// Due date text (empty means absent).
    pub due_date: String,
    /// Currently focused field.
    pub field: FormField,
    /// Last validation failure, shown inline until the next submit.
    pub error: Option<FormError>,
}

impl FormState {
    /// A blank form for creating a new task.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            editing: None,
            title: String::new(),
            description: String::new(),
            priority: TaskPriority::default(),
            status: TaskStatus::default(),
            assigned_to: String::new(),
            due_date: String::new(),
            field: FormField::Title,
            error: None,
        }
    }

    /// A form pre-filled from an existing task, for editing.
    #[must_use]
    pub fn for_task(task: &Task) -> Self {
        Self {
            editing: Some(task.id.clone()),
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            priority: task.priority,
            status: task.status,
            assigned_to: task.assigned_to.clone().unwrap_or_default(),
            due_date: task
                .due_date
                .map(|d| d.format(DUE_DATE_FORMAT).to_string())
                .unwrap_or_default(),
            field: FormField::Title,
            error: None,
        }
    }

    /// True when the form edits an existing task.
    #[must_use]
    pub const fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    /// Appends a character to the focused text field.
    pub fn insert_char(&mut self, c: char) {
        if let Some(text) = self.focused_text_mut() {
            text.push(c);
        }
    }

    /// Removes the last character of the focused text field.
    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text_mut() {
            text.pop();
        }
    }

    /// Cycles the focused selector field forward (or backward).
    pub fn cycle_selector(&mut self, forward: bool) {
        match self.field {
            FormField::Priority => {
                self.priority = cycle(&TaskPriority::ALL, self.priority, forward);
            }
            FormField::Status => {
                self.status = cycle(&TaskStatus::ALL, self.status, forward);
            }
            _ => {}
        }
    }

    /// Builds the create body, validating first.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] when validation fails; nothing reaches the
    /// store in that case.
    pub fn to_draft(&self) -> Result<TaskDraft, FormError> {
        self.validate()?;
        Ok(TaskDraft {
            title: self.title.trim().to_string(),
            description: optional(&self.description),
            priority: self.priority,
            status: self.status,
            assigned_to: optional(&self.assigned_to),
            due_date: self.parse_due_date()?,
        })
    }

    /// Builds the full update body, validating first.
    ///
    /// Every field is sent: the edit form submits its complete state, with
    /// emptied optional fields as explicit nulls so the server clears them.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] when validation fails.
    pub fn to_patch(&self) -> Result<TaskPatch, FormError> {
        self.validate()?;
        Ok(TaskPatch {
            title: Some(self.title.trim().to_string()),
            description: Some(optional(&self.description)),
            priority: Some(self.priority),
            status: Some(self.status),
            assigned_to: Some(optional(&self.assigned_to)),
            due_date: Some(self.parse_due_date()?),
        })
    }

    fn validate(&self) -> Result<(), FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::TitleRequired);
        }
        let title_len = title.chars().count();
        if title_len < TITLE_MIN_LENGTH {
            return Err(FormError::TitleTooShort);
        }
        if title_len > TITLE_MAX_LENGTH {
            return Err(FormError::TitleTooLong);
        }
        if self.description.chars().count() > DESCRIPTION_MAX_LENGTH {
            return Err(FormError::DescriptionTooLong);
        }
        // Surface a bad due date before submit rather than from the server.
        self.parse_due_date()?;
        Ok(())
    }

    fn parse_due_date(&self) -> Result<Option<DateTime<Utc>>, FormError> {
        let text = self.due_date.trim();
        if text.is_empty() {
            return Ok(None);
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, DUE_DATE_FORMAT) {
            return Ok(Some(dt.and_utc()));
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, DUE_DATE_FORMAT_DAY) {
            let dt = date.and_hms_opt(0, 0, 0).ok_or(FormError::BadDueDate)?;
            return Ok(Some(dt.and_utc()));
        }
        Err(FormError::BadDueDate)
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::AssignedTo => Some(&mut self.assigned_to),
            FormField::DueDate => Some(&mut self.due_date),
            FormField::Priority | FormField::Status => None,
        }
    }
}

/// Maps an empty text field to `None`, anything else to the trimmed text.
fn optional(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Advances `current` through `values`, wrapping around.
fn cycle<T: Copy + PartialEq>(values: &[T], current: T, forward: bool) -> T {
    let len = values.len();
    let idx = values.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    };
    values[next]
}
