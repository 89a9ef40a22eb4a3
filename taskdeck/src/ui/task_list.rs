//! Task list rendering.
//!
//! Each visible task renders as a small card: status checkbox and title,
//! a priority badge, then dimmed description and metadata lines.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use taskdeck_proto::task::{Task, TaskStatus};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the task list panel (or the empty state).
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::List;
    let tasks = app.visible_tasks();

    let block = Block::default()
        .title(Span::styled(
            format!("Tasks ({})", tasks.len()),
            theme::panel_title(theme::LIST_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    if tasks.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No tasks to show", theme::dimmed())),
            Line::from(Span::styled(
                "press n to create one",
                theme::dimmed(),
            )),
        ])
        .block(block)
        .centered();
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let selected = is_focused && idx == app.selected;
            card(task, selected, &app.timestamp_format)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

/// Builds the multi-line card for one task.
fn card<'a>(task: &'a Task, selected: bool, timestamp_format: &str) -> ListItem<'a> {
    let title_style = if task.status == TaskStatus::Completed {
        theme::completed_title()
    } else {
        theme::bold()
    };

    let mut first = vec![
        Span::styled(
            theme::status_symbol(task.status),
            theme::normal().fg(theme::status_color(task.status)),
        ),
        Span::raw(" "),
        Span::styled(task.title.as_str(), title_style),
        Span::raw(" "),
        Span::styled(
            format!("[{}]", task.priority),
            theme::normal().fg(theme::priority_color(task.priority)),
        ),
    ];
    if selected {
        first.insert(0, Span::styled("\u{25b6} ", theme::highlighted()));
    } else {
        first.insert(0, Span::raw("  "));
    }

    let mut lines = vec![Line::from(first)];

    if let Some(description) = &task.description {
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(description.as_str(), theme::dimmed()),
        ]));
    }

    let mut meta = vec![Span::raw("    ")];
    if let Some(assignee) = &task.assigned_to {
        meta.push(Span::styled(format!("@ {assignee}  "), theme::dimmed()));
    }
    if let Some(due) = task.due_date {
        meta.push(Span::styled(
            format!("due {}  ", due.format(timestamp_format)),
            theme::dimmed(),
        ));
    }
    meta.push(Span::styled(
        task.status.to_string().replace('_', " "),
        theme::dimmed(),
    ));
    lines.push(Line::from(meta));

    let style = if selected {
        theme::normal().bg(ratatui::style::Color::Rgb(25, 35, 45))
    } else {
        theme::normal()
    };
    ListItem::new(lines).style(style)
}
