use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::types::{App, RideSummary};
use crate::ui::utils::{format_amount, format_date_time};

pub const EMPTY_STATE_TITLE: &str = "No rides available at the moment";
pub const EMPTY_STATE_HINT: &str = "Check back later for new ride offers";

/// Render the dashboard: title, notification banners, ride cards, footer.
pub fn render(f: &mut Frame, app: &App) {
    let mut constraints = vec![Constraint::Length(3)];
    constraints.extend(app.notifications.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(f.size());

    render_title(f, chunks[0]);
    let banners = app.notifications.len();
    super::render_notifications(f, app, &chunks[1..1 + banners]);
    render_ride_list(f, app, chunks[1 + banners]);
    render_footer(f, app, chunks[2 + banners]);
}

fn render_title(f: &mut Frame, area: ratatui::layout::Rect) {
    let title = Block::default()
        .title("Rideterm")
        .borders(Borders::ALL);
    f.render_widget(title, area);
}

/// One card per ride; passenger-count text only for group rides.
pub fn ride_card_lines(ride: &RideSummary, currency: &str) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} → {}", ride.pickup_location, ride.dropoff_location),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format_amount(currency, ride.fare),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(format!("  🕒 {}", format_date_time(&ride.pickup_time))),
        Line::from(format!("  🚗 Driver: {}", ride.driver_name)),
    ];
    if ride.is_group_ride {
        lines.push(Line::from(format!(
            "  👥 Group Ride: {}/{} passengers",
            ride.current_passengers, ride.max_passengers
        )));
    }
    lines
}

fn render_ride_list(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let block = Block::default().borders(Borders::ALL).title("Rides");

    if app.rides.is_empty() {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                EMPTY_STATE_TITLE,
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                EMPTY_STATE_HINT,
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = app
        .rides
        .iter()
        .map(|ride| {
            let mut lines = ride_card_lines(ride, &app.currency);
            lines.push(Line::from(""));
            ListItem::new(Text::from(lines))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let mut state = ListState::default();
    state.select(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_footer(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let updated = match app.last_updated {
        Some(at) => format!("updated {}s ago", at.elapsed().as_secs()),
        None => "loading rides...".to_string(),
    };
    let footer_text = format!(
        "q: quit | ↑/↓: select | b: book | s: start | c: complete | r: refresh | x: dismiss | Tab: settings | {updated}"
    );
    let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
