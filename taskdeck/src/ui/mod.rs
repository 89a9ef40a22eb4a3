//! Terminal UI rendering.

pub mod filter_panel;
pub mod header;
pub mod stats_panel;
pub mod status_bar;
pub mod task_form;
pub mod task_list;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, Mode};

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    // Header and stats on top, status bar at the bottom.
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(frame, main_chunks[0]);
    stats_panel::render(frame, main_chunks[1], app);

    // Filter sidebar on the left, task list filling the rest.
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(20)])
        .split(main_chunks[2]);

    filter_panel::render(frame, content_chunks[0], app);
    task_list::render(frame, content_chunks[1], app);

    status_bar::render(frame, main_chunks[3], app);

    // Modals overlay the panels.
    match &app.mode {
        Mode::Form(form) => task_form::render(frame, frame.area(), form),
        Mode::ConfirmDelete(_) => draw_confirm(frame, frame.area()),
        Mode::Normal => {}
    }
}

/// Small centered confirmation dialog for deletes.
fn draw_confirm(frame: &mut Frame, area: Rect) {
    let width = 36u16.min(area.width);
    let height = 4u16.min(area.height);
    let modal = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .title(Span::styled(
            "Delete task",
            theme::panel_title(theme::ERROR),
        ))
        .borders(Borders::ALL)
        .border_style(theme::error());
    let paragraph = Paragraph::new(vec![
        Line::from("Delete the selected task?"),
        Line::from(Span::styled("y: delete | n: keep", theme::dimmed())),
    ])
    .block(block)
    .centered();
    frame.render_widget(paragraph, modal);
}
