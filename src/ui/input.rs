use crossterm::event::KeyCode;

use crate::api::RideAction;
use crate::types::{App, AppMode, Severity};

/// Handle a key press for the current mode. Returns true to exit.
pub fn handle_key_event(app: &mut App, key: KeyCode) -> bool {
    match app.mode {
        AppMode::Dashboard => handle_dashboard_keys(app, key),
        AppMode::Settings => handle_settings_keys(app, key),
    }
}

fn handle_dashboard_keys(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Up => app.select_prev(),
        KeyCode::Down => app.select_next(),
        KeyCode::Char('b') => app.run_action(RideAction::Book),
        KeyCode::Char('s') => app.run_action(RideAction::Start),
        KeyCode::Char('c') => app.run_action(RideAction::Complete),
        KeyCode::Char('r') => app.force_refresh(),
        KeyCode::Char('x') => app.dismiss_notification(),
        KeyCode::Tab => app.mode = AppMode::Settings,
        _ => {}
    }
    false
}

fn handle_settings_keys(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Esc => app.mode = AppMode::Dashboard,
        KeyCode::Tab | KeyCode::Down => app.settings_form.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.settings_form.prev_field(),
        KeyCode::Char(c) => app.settings_form.focused_mut().value.push(c),
        KeyCode::Backspace => {
            app.settings_form.focused_mut().value.pop();
        }
        KeyCode::Enter => submit_settings(app),
        _ => {}
    }
    false
}

/// The submit gate: an invalid form never reaches the save path.
fn submit_settings(app: &mut App) {
    if app.settings_form.saving {
        return;
    }
    if app.settings_form.validate() {
        app.settings_form.saving = true;
        let config = app.settings_form.to_config();
        app.queue_settings(config);
    } else {
        app.notify("Please fill in all required fields", Severity::Warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::config::SavedConfig;
    use crate::form::SERVER_URL_FIELD;

    fn test_app() -> App {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let client = ApiClient::new("http://localhost:5000").unwrap();
        App::new(client, tx, &SavedConfig::default())
    }

    #[test]
    fn quit_key_exits_only_from_dashboard() {
        let mut app = test_app();
        assert!(handle_key_event(&mut app, KeyCode::Char('q')));
        app.mode = AppMode::Settings;
        assert!(!handle_key_event(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn invalid_submit_is_blocked_with_one_warning() {
        let mut app = test_app();
        app.mode = AppMode::Settings;
        app.settings_form.fields[SERVER_URL_FIELD].value.clear();
        handle_key_event(&mut app, KeyCode::Enter);
        assert!(app.take_pending_settings().is_none());
        assert_eq!(app.notifications.len(), 1);
        assert_eq!(app.notifications[0].severity, Severity::Warning);
        assert_eq!(
            app.notifications[0].message,
            "Please fill in all required fields"
        );
        assert!(app.settings_form.fields[SERVER_URL_FIELD].invalid);
        assert!(!app.settings_form.saving);
    }

    #[test]
    fn valid_submit_queues_settings_and_enters_saving_state() {
        let mut app = test_app();
        app.mode = AppMode::Settings;
        handle_key_event(&mut app, KeyCode::Enter);
        assert!(app.settings_form.saving);
        let pending = app.take_pending_settings().expect("settings queued");
        assert_eq!(pending.server_url, SavedConfig::default().server_url);
        // a second Enter while saving is ignored
        handle_key_event(&mut app, KeyCode::Enter);
        assert!(app.take_pending_settings().is_none());
    }

    #[test]
    fn typing_edits_the_focused_field() {
        let mut app = test_app();
        app.mode = AppMode::Settings;
        app.settings_form.fields[SERVER_URL_FIELD].value.clear();
        for c in "abc".chars() {
            handle_key_event(&mut app, KeyCode::Char(c));
        }
        handle_key_event(&mut app, KeyCode::Backspace);
        assert_eq!(app.settings_form.fields[SERVER_URL_FIELD].value, "ab");
    }
}
