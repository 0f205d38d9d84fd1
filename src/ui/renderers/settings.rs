use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::form::FormField;
use crate::types::App;

/// Render the settings form: one bordered input per field, a submit line,
/// and any active notification banners.
pub fn render(f: &mut Frame, app: &App) {
    let mut constraints = vec![Constraint::Length(3)];
    constraints.extend(app.notifications.iter().map(|_| Constraint::Length(3)));
    constraints.extend(app.settings_form.fields.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Length(3));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(constraints)
        .split(f.size());

    render_title(f, chunks[0]);
    let banners = app.notifications.len();
    super::render_notifications(f, app, &chunks[1..1 + banners]);

    let first_field = 1 + banners;
    for (index, field) in app.settings_form.fields.iter().enumerate() {
        render_field(f, field, index == app.settings_form.focus, chunks[first_field + index]);
    }
    render_submit(f, app, chunks[first_field + app.settings_form.fields.len()]);

    // Cursor sits at the end of the focused field's value.
    let focused = &app.settings_form.fields[app.settings_form.focus];
    let area = chunks[first_field + app.settings_form.focus];
    f.set_cursor(area.x + focused.value.len() as u16 + 1, area.y + 1);
}

fn render_title(f: &mut Frame, area: ratatui::layout::Rect) {
    let title = Paragraph::new("Esc: back | Tab: next field | Enter: save").block(
        Block::default()
            .borders(Borders::ALL)
            .title("Settings"),
    );
    f.render_widget(title, area);
}

fn render_field(f: &mut Frame, field: &FormField, focused: bool, area: ratatui::layout::Rect) {
    let mut title = field.label.to_string();
    if field.required {
        title.push_str(" *");
    }
    let mut block_style = Style::default();
    let mut text_style = Style::default();
    if field.invalid {
        title.push_str(" — required");
        block_style = block_style.fg(Color::Red);
    }
    if focused {
        text_style = text_style.fg(Color::Yellow);
    }
    let input = Paragraph::new(field.value.as_str()).style(text_style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(block_style)
            .title(title),
    );
    f.render_widget(input, area);
}

fn render_submit(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let label = if app.settings_form.saving {
        "Saving..."
    } else {
        "Press Enter to save"
    };
    let style = if app.settings_form.saving {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let submit = Paragraph::new(Line::from(Span::styled(label, style)))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(submit, area);
}
