pub mod dashboard;
pub mod settings;

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
};

use crate::types::App;
use crate::ui::utils::{severity_color, severity_title};

/// Render the notification stack, newest first, one banner per chunk.
/// Shared by both modes so a warning raised in the settings form stays
/// visible there.
pub(crate) fn render_notifications(f: &mut Frame, app: &App, chunks: &[Rect]) {
    for (notification, area) in app.notifications.iter().zip(chunks) {
        let banner = Paragraph::new(notification.message.as_str())
            .style(Style::default().fg(severity_color(notification.severity)))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(severity_title(notification.severity)),
            );
        f.render_widget(banner, *area);
    }
}
