//! Create/edit form modal rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::theme;
use crate::form::{FormField, FormState};

/// Render the form as a centered modal over `area`.
pub fn render(frame: &mut Frame, area: Rect, form: &FormState) {
    let modal = centered_rect(area, 54, 13);
    frame.render_widget(Clear, modal);

    let title = if form.is_edit() { "Edit task" } else { "New task" };

    let mut lines: Vec<Line> = FormField::ALL
        .iter()
        .map(|field| field_line(form, *field))
        .collect();

    lines.push(Line::from(""));
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(error.to_string(), theme::error())));
    } else {
        lines.push(Line::from(Span::styled(
            "Enter: save | Esc: cancel | Tab: next field",
            theme::dimmed(),
        )));
    }

    let block = Block::default()
        .title(Span::styled(title, theme::panel_title(theme::HIGHLIGHT)))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, modal);
}

/// Builds the display line for one form field.
fn field_line(form: &FormState, field: FormField) -> Line<'_> {
    let focused = form.field == field;
    let label_style = if focused {
        theme::selected()
    } else {
        theme::normal()
    };
    let label = format!("{:<12}", field.label());

    let value: String = match field {
        FormField::Title => form.title.clone(),
        FormField::Description => form.description.clone(),
        FormField::Priority => format!("\u{2039} {} \u{203a}", form.priority),
        FormField::Status => format!("\u{2039} {} \u{203a}", form.status),
        FormField::AssignedTo => form.assigned_to.clone(),
        FormField::DueDate => form.due_date.clone(),
    };

    let mut spans = vec![Span::styled(label, label_style), Span::raw(" "), Span::raw(value)];
    if focused && field.is_text() {
        spans.push(Span::styled("\u{258f}", theme::highlighted()));
    }
    Line::from(spans)
}

/// A fixed-size rect centered inside `area`, clamped to its bounds.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
