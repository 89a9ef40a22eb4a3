//! Filter panel rendering: search box plus status/priority selectors.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, FilterField, PanelFocus};

/// Render the filter panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::Filters;
    let filters = app.store.filters();

    let row_style = |field: FilterField| {
        if is_focused && app.filter_field == field {
            theme::selected()
        } else {
            theme::normal()
        }
    };

    let search_text = if filters.search.is_empty() && !is_focused {
        Span::styled("type to search...", theme::dimmed())
    } else {
        Span::raw(filters.search.clone())
    };

    let status_text = filters
        .status
        .map_or_else(|| "all".to_string(), |s| s.to_string());
    let priority_text = filters
        .priority
        .map_or_else(|| "all".to_string(), |p| p.to_string());

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Search:   ", row_style(FilterField::Search)),
            search_text,
        ]),
        Line::from(vec![
            Span::styled("Status:   ", row_style(FilterField::Status)),
            Span::raw(format!("\u{2039} {status_text} \u{203a}")),
        ]),
        Line::from(vec![
            Span::styled("Priority: ", row_style(FilterField::Priority)),
            Span::raw(format!("\u{2039} {priority_text} \u{203a}")),
        ]),
    ];

    if filters.is_active() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "c: clear filters",
            theme::dimmed(),
        )));
    }

    let block = Block::default()
        .title(Span::styled(
            "Filters",
            theme::panel_title(theme::FILTERS_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
