//! Application state and event handling.
//!
//! [`App`] owns the [`TaskStore`] plus the purely visual state (focus,
//! selection, modal mode). Key handling is synchronous and returns an
//! optional [`StoreAction`]; the main loop executes the action against the
//! store via [`App::apply`], so all I/O stays at a single call site.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskdeck_proto::task::{Task, TaskDraft, TaskId, TaskPatch, TaskPriority, TaskStatus};

use crate::form::FormState;
use crate::store::{FilterChange, TaskStore};

/// Which panel is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Task list is focused (default).
    List,
    /// Filter panel is focused.
    Filters,
}

/// Which row of the filter panel is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    /// Free-text search row.
    Search,
    /// Status selector row.
    Status,
    /// Priority selector row.
    Priority,
}

/// Modal state layered over the panels.
#[derive(Debug)]
pub enum Mode {
    /// No modal; keys go to the focused panel.
    Normal,
    /// The create/edit form is open.
    Form(FormState),
    /// Waiting for delete confirmation of the given task.
    ConfirmDelete(TaskId),
}

/// A store operation requested by a key event.
///
/// Produced by [`App::handle_key_event`] and executed by [`App::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    /// Refetch the task list with current filters.
    Fetch,
    /// Create a task from a validated form draft.
    Create(TaskDraft),
    /// Apply a partial update to a task.
    Update {
        /// Target task.
        id: TaskId,
        /// Validated patch body.
        patch: TaskPatch,
    },
    /// Delete a task (already confirmed).
    Delete(TaskId),
    /// Change one filter field.
    SetFilter(FilterChange),
    /// Reset all filters.
    ClearFilters,
}

/// Main application state.
pub struct App {
    /// The task store; single source of truth for task data.
    pub store: TaskStore,
    /// Which panel receives navigation keys.
    pub focus: PanelFocus,
    /// Selected row of the filter panel.
    pub filter_field: FilterField,
    /// Selected index into the visible (search-filtered) task list.
    pub selected: usize,
    /// Modal state.
    pub mode: Mode,
    /// Result of the startup health probe, shown in the status bar.
    pub connected: bool,
    /// Timestamp display format (chrono) for due dates.
    pub timestamp_format: String,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates the application around an injected store.
    #[must_use]
    pub fn new(store: TaskStore) -> Self {
        Self {
            store,
            focus: PanelFocus::List,
            filter_field: FilterField::Search,
            selected: 0,
            mode: Mode::Normal,
            connected: false,
            timestamp_format: "%Y-%m-%d %H:%M".to_string(),
            should_quit: false,
        }
    }

    /// Sets the timestamp display format from the resolved config.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Records the startup reachability probe result.
    pub const fn set_connection_status(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// The tasks currently visible (after client-side search).
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.store.filtered_tasks()
    }

    /// The task under the selection cursor, if any.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.selected).copied()
    }

    /// Handle a key event, returning the store operation it requests.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<StoreAction> {
        // Ctrl-C always quits, regardless of mode.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        match self.mode {
            Mode::Form(_) => self.handle_form_key(key),
            Mode::ConfirmDelete(_) => self.handle_confirm_key(key),
            Mode::Normal => self.handle_normal_key(key),
        }
    }

    /// Executes a store action and reconciles the UI state afterwards.
    ///
    /// Create/update failures leave the form open so the user's input
    /// survives (the error is shown in the status bar); successes close it.
    pub async fn apply(&mut self, action: StoreAction) {
        match action {
            StoreAction::Fetch => self.store.fetch_tasks().await,
            StoreAction::Create(draft) => {
                if self.store.create_task(draft).await.is_ok() {
                    self.mode = Mode::Normal;
                }
            }
            StoreAction::Update { id, patch } => {
                if self.store.update_task(&id, patch).await.is_ok()
                    && matches!(self.mode, Mode::Form(_))
                {
                    self.mode = Mode::Normal;
                }
            }
            StoreAction::Delete(id) => {
                // Failure is surfaced through the store's error text; the
                // entry stays in the list.
                let _ = self.store.delete_task(&id).await;
            }
            StoreAction::SetFilter(change) => self.store.set_filter(change).await,
            StoreAction::ClearFilters => self.store.clear_filters().await,
        }
        self.clamp_selection();
    }

    // -- Normal mode ------------------------------------------------------

    fn handle_normal_key(&mut self, key: KeyEvent) -> Option<StoreAction> {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    PanelFocus::List => PanelFocus::Filters,
                    PanelFocus::Filters => PanelFocus::List,
                };
                None
            }
            KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            _ => match self.focus {
                PanelFocus::List => self.handle_list_key(key),
                PanelFocus::Filters => self.handle_filter_key(key),
            },
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<StoreAction> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('r') => Some(StoreAction::Fetch),
            KeyCode::Char('n') => {
                self.mode = Mode::Form(FormState::blank());
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let last = self.visible_tasks().len().saturating_sub(1);
                if self.selected < last {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(task) = self.selected_task() {
                    self.mode = Mode::Form(FormState::for_task(task));
                }
                None
            }
            KeyCode::Char('d') => {
                if let Some(task) = self.selected_task() {
                    self.mode = Mode::ConfirmDelete(task.id.clone());
                }
                None
            }
            KeyCode::Char(' ') => {
                // Toggle between completed and pending, like the list
                // view's status checkbox.
                let task = self.selected_task()?;
                let next = if task.status == TaskStatus::Completed {
                    TaskStatus::Pending
                } else {
                    TaskStatus::Completed
                };
                Some(StoreAction::Update {
                    id: task.id.clone(),
                    patch: TaskPatch::with_status(next),
                })
            }
            _ => None,
        }
    }

    // -- Filter panel -----------------------------------------------------

    fn handle_filter_key(&mut self, key: KeyEvent) -> Option<StoreAction> {
        match key.code {
            KeyCode::Up => {
                self.filter_field = match self.filter_field {
                    FilterField::Search | FilterField::Status => FilterField::Search,
                    FilterField::Priority => FilterField::Status,
                };
                None
            }
            KeyCode::Down => {
                self.filter_field = match self.filter_field {
                    FilterField::Search => FilterField::Status,
                    FilterField::Status | FilterField::Priority => FilterField::Priority,
                };
                None
            }
            KeyCode::Left | KeyCode::Right => {
                let forward = key.code == KeyCode::Right;
                match self.filter_field {
                    FilterField::Status => Some(StoreAction::SetFilter(FilterChange::Status(
                        cycle_option(&TaskStatus::ALL, self.store.filters().status, forward),
                    ))),
                    FilterField::Priority => Some(StoreAction::SetFilter(FilterChange::Priority(
                        cycle_option(&TaskPriority::ALL, self.store.filters().priority, forward),
                    ))),
                    FilterField::Search => None,
                }
            }
            KeyCode::Char(c) if self.filter_field == FilterField::Search => {
                let mut search = self.store.filters().search.clone();
                search.push(c);
                Some(StoreAction::SetFilter(FilterChange::Search(search)))
            }
            KeyCode::Backspace if self.filter_field == FilterField::Search => {
                let mut search = self.store.filters().search.clone();
                search.pop();
                Some(StoreAction::SetFilter(FilterChange::Search(search)))
            }
            KeyCode::Char('c') => Some(StoreAction::ClearFilters),
            _ => None,
        }
    }

    // -- Form mode --------------------------------------------------------

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<StoreAction> {
        let Mode::Form(form) = &mut self.mode else {
            return None;
        };
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                None
            }
            KeyCode::Tab | KeyCode::Down => {
                form.field = form.field.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                form.field = form.field.prev();
                None
            }
            KeyCode::Left | KeyCode::Right => {
                form.cycle_selector(key.code == KeyCode::Right);
                None
            }
            KeyCode::Char(c) => {
                form.insert_char(c);
                None
            }
            KeyCode::Backspace => {
                form.backspace();
                None
            }
            KeyCode::Enter => {
                // Validation failures stay inside the form; the store is
                // never involved.
                if let Some(id) = form.editing.clone() {
                    match form.to_patch() {
                        Ok(patch) => Some(StoreAction::Update { id, patch }),
                        Err(err) => {
                            form.error = Some(err);
                            None
                        }
                    }
                } else {
                    match form.to_draft() {
                        Ok(draft) => Some(StoreAction::Create(draft)),
                        Err(err) => {
                            form.error = Some(err);
                            None
                        }
                    }
                }
            }
            _ => None,
        }
    }

    // -- Delete confirmation ----------------------------------------------

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Option<StoreAction> {
        let Mode::ConfirmDelete(id) = &self.mode else {
            return None;
        };
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                let id = id.clone();
                self.mode = Mode::Normal;
                Some(StoreAction::Delete(id))
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.mode = Mode::Normal;
                None
            }
            _ => None,
        }
    }

    /// Keeps the selection inside the visible list after mutations.
    fn clamp_selection(&mut self) {
        let last = self.visible_tasks().len().saturating_sub(1);
        if self.selected > last {
            self.selected = last;
        }
    }
}

/// Cycles an optional selector through `None` and every value of `values`.
fn cycle_option<T: Copy + PartialEq>(values: &[T], current: Option<T>, forward: bool) -> Option<T> {
    // Positions: 0 = None, 1..=len = values.
    let len = values.len();
    let idx = current.map_or(0, |c| {
        values.iter().position(|v| *v == c).map_or(0, |i| i + 1)
    });
    let next = if forward {
        (idx + 1) % (len + 1)
    } else {
        (idx + len) % (len + 1)
    };
    if next == 0 { None } else { Some(values[next - 1]) }
}
