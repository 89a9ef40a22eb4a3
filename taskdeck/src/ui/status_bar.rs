//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, Mode, PanelFocus};

/// Render the status bar at the bottom of the screen.
///
/// Shows the API connection dot, the in-flight/loading state, the store's
/// last error (if any), and focus-specific key help.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match (&app.mode, app.focus) {
        (Mode::Form(_), _) => "Enter: save | Esc: cancel | Tab/\u{2191}\u{2193}: fields",
        (Mode::ConfirmDelete(_), _) => "y: delete | n: keep",
        (Mode::Normal, PanelFocus::List) => {
            "n: new | e: edit | d: delete | space: toggle | r: refresh | /Tab: filters | q: quit"
        }
        (Mode::Normal, PanelFocus::Filters) => {
            "type: search | \u{2191}\u{2193}: row | \u{2190}\u{2192}: cycle | c: clear | Tab: tasks"
        }
    };

    let (dot_color, state_text) = if app.store.is_loading() {
        (theme::WARNING, "Loading...".to_string())
    } else if let Some(error) = app.store.error() {
        (theme::ERROR, format!("Error: {error}"))
    } else if app.connected {
        (theme::SUCCESS, "Connected".to_string())
    } else {
        (theme::ERROR, "API unreachable".to_string())
    };

    let state_style = if app.store.error().is_some() && !app.store.is_loading() {
        theme::error()
    } else {
        theme::normal()
    };

    let status_line = Line::from(vec![
        Span::styled("TaskDeck v0.1.0", theme::bold()),
        Span::raw(" | "),
        Span::styled("\u{25cf}", theme::normal().fg(dot_color)),
        Span::raw(" "),
        Span::styled(state_text, state_style),
        Span::raw(" | "),
        Span::styled(help_text, theme::dimmed()),
    ]);

    let paragraph = Paragraph::new(status_line).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
