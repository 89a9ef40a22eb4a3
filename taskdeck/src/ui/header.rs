//! Header bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;

/// Render the header with the application title and tagline.
pub fn render(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled("\u{2611} TaskDeck", theme::bold().fg(theme::HIGHLIGHT)),
        Span::raw("  "),
        Span::styled("task management from the terminal", theme::dimmed()),
    ]);

    let block = Block::default().borders(Borders::BOTTOM);
    let paragraph = Paragraph::new(title).block(block);
    frame.render_widget(paragraph, area);
}
