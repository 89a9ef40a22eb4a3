//! Stats row rendering: per-status counts and completion rate.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use taskdeck_proto::task::{Task, TaskStatus};

use super::theme;
use crate::app::App;

/// Counts derived from the full (unfiltered) task collection.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TaskCounts {
    /// Total number of tasks.
    pub total: usize,
    /// Tasks with completed status.
    pub completed: usize,
    /// Tasks with in-progress status.
    pub in_progress: usize,
    /// Tasks with pending status.
    pub pending: usize,
}

impl TaskCounts {
    /// Tallies the collection by status.
    #[must_use]
    pub fn compute(tasks: &[Task]) -> Self {
        let mut counts = Self {
            total: tasks.len(),
            ..Self::default()
        };
        for task in tasks {
            match task.status {
                TaskStatus::Completed => counts.completed += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Pending => counts.pending += 1,
                TaskStatus::Cancelled => {}
            }
        }
        counts
    }

    /// Completed share of the total, as a whole percentage (0 when empty).
    #[must_use]
    pub const fn completion_rate(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.completed * 100 / self.total
        }
    }
}

/// Render the stats row over the full task collection.
///
/// Stats always reflect every fetched task, not the search-narrowed view.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let counts = TaskCounts::compute(app.store.tasks());

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let completed_label = format!("{} ({}%)", counts.completed, counts.completion_rate());
    render_cell(frame, cells[0], "Total", &counts.total.to_string(), theme::STATS_TITLE);
    render_cell(frame, cells[1], "Completed", &completed_label, theme::SUCCESS);
    render_cell(
        frame,
        cells[2],
        "In progress",
        &counts.in_progress.to_string(),
        theme::HIGHLIGHT,
    );
    render_cell(
        frame,
        cells[3],
        "Pending",
        &counts.pending.to_string(),
        theme::WARNING,
    );
}

fn render_cell(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    color: ratatui::style::Color,
) {
    let block = Block::default()
        .title(Span::styled(label, theme::panel_title(color)))
        .borders(Borders::ALL);
    let paragraph =
        Paragraph::new(Line::from(Span::styled(value.to_string(), theme::bold()))).block(block);
    frame.render_widget(paragraph, area);
}
