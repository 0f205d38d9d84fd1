use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, ApiError, RideAction};
use crate::config::SavedConfig;
use crate::form::SettingsForm;
use crate::poll::RefreshHandle;

/// How long a notification banner stays up without manual dismissal.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);
/// Oldest banners are dropped past this depth.
pub const MAX_NOTIFICATIONS: usize = 4;
/// Delay between a successful ride action and the follow-up ride-list reload.
pub const RELOAD_DELAY: Duration = Duration::from_secs(1);

/// One bookable ride as reported by `GET /api/rides`. Replaced wholesale on
/// every refresh; nothing is tracked across refreshes client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideSummary {
    pub id: i64,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub pickup_time: String,
    pub fare: f64,
    pub is_group_ride: bool,
    pub max_passengers: u32,
    pub current_passengers: u32,
    pub driver_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub created: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Dashboard,
    Settings,
}

/// Messages from the refresher task and spawned action tasks back to the UI
/// loop, drained once per tick.
pub enum UiEvent {
    Rides(Vec<RideSummary>),
    ActionFinished(RideAction, Result<(), ApiError>),
}

pub struct App {
    pub mode: AppMode,
    pub rides: Vec<RideSummary>,
    pub selected: usize,
    pub notifications: VecDeque<Notification>,
    pub settings_form: SettingsForm,
    pub currency: String,
    pub last_updated: Option<Instant>,
    client: ApiClient,
    events_tx: tokio::sync::mpsc::UnboundedSender<UiEvent>,
    refresh: Option<RefreshHandle>,
    reload_at: Option<Instant>,
    pending_settings: Option<SavedConfig>,
}

impl App {
    pub fn new(
        client: ApiClient,
        events_tx: tokio::sync::mpsc::UnboundedSender<UiEvent>,
        config: &SavedConfig,
    ) -> Self {
        App {
            mode: AppMode::Dashboard,
            rides: Vec::new(),
            selected: 0,
            notifications: VecDeque::new(),
            settings_form: SettingsForm::from_config(config),
            currency: config.currency.clone(),
            last_updated: None,
            client,
            events_tx,
            refresh: None,
            reload_at: None,
            pending_settings: None,
        }
    }

    /// Push one dismissible banner. Newest first, capped.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notifications.push_front(Notification {
            message: message.into(),
            severity,
            created: Instant::now(),
        });
        self.notifications.truncate(MAX_NOTIFICATIONS);
    }

    /// Drop banners older than the auto-dismiss window.
    pub fn prune_notifications(&mut self) {
        self.notifications
            .retain(|n| n.created.elapsed() < NOTIFICATION_TTL);
    }

    /// Manual dismissal removes the newest banner.
    pub fn dismiss_notification(&mut self) {
        self.notifications.pop_front();
    }

    pub fn selected_ride(&self) -> Option<&RideSummary> {
        self.rides.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.rides.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Full replacement of the rendered set; no diffing.
    pub fn apply_rides(&mut self, rides: Vec<RideSummary>) {
        self.rides = rides;
        if self.rides.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.rides.len() {
            self.selected = self.rides.len() - 1;
        }
        self.last_updated = Some(Instant::now());
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Rides(rides) => self.apply_rides(rides),
            UiEvent::ActionFinished(action, result) => match result {
                Ok(()) => {
                    self.notify(action.success_message(), Severity::Success);
                    self.reload_at = Some(Instant::now() + RELOAD_DELAY);
                }
                Err(ApiError::Rejected { message }) => {
                    self.notify(message, Severity::Danger);
                }
                Err(err) => {
                    tracing::error!("{} request failed: {err}", action.label());
                    self.notify(action.generic_error(), Severity::Danger);
                }
            },
        }
    }

    /// Fire one action request for the selected ride. The outcome arrives
    /// later as a `UiEvent`; two actions in flight may complete in either
    /// order.
    pub fn run_action(&mut self, action: RideAction) {
        let Some(ride_id) = self.selected_ride().map(|ride| ride.id) else {
            self.notify("No ride selected", Severity::Warning);
            return;
        };
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.ride_action(action, ride_id).await;
            let _ = tx.send(UiEvent::ActionFinished(action, result));
        });
    }

    pub fn set_refresh_handle(&mut self, handle: RefreshHandle) {
        self.refresh = Some(handle);
    }

    pub fn set_client(&mut self, client: ApiClient) {
        self.client = client;
    }

    pub fn force_refresh(&self) {
        if let Some(handle) = &self.refresh {
            handle.request();
        }
    }

    /// True once the post-action reload delay has elapsed. Consumes the
    /// schedule so the reload fires once.
    pub fn reload_due(&mut self) -> bool {
        match self.reload_at {
            Some(at) if Instant::now() >= at => {
                self.reload_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn queue_settings(&mut self, config: SavedConfig) {
        self.pending_settings = Some(config);
    }

    pub fn take_pending_settings(&mut self) -> Option<SavedConfig> {
        self.pending_settings.take()
    }

    pub fn settings_saved(&mut self, config: &SavedConfig) {
        self.settings_form.saving = false;
        self.currency = config.currency.clone();
        self.mode = AppMode::Dashboard;
        self.notify("Settings saved!", Severity::Success);
    }

    pub fn settings_failed(&mut self) {
        self.settings_form.saving = false;
        self.notify("Could not save settings", Severity::Danger);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let client = ApiClient::new("http://localhost:5000").unwrap();
        App::new(client, tx, &SavedConfig::default())
    }

    fn ride(id: i64) -> RideSummary {
        RideSummary {
            id,
            pickup_location: "A".into(),
            dropoff_location: "B".into(),
            pickup_time: "2026-03-14T09:30:00".into(),
            fare: 100.0,
            is_group_ride: false,
            max_passengers: 1,
            current_passengers: 0,
            driver_name: "driver".into(),
        }
    }

    #[test]
    fn notify_appends_exactly_one_banner() {
        let mut app = test_app();
        app.notify("hello", Severity::Info);
        assert_eq!(app.notifications.len(), 1);
        app.notify("again", Severity::Warning);
        assert_eq!(app.notifications.len(), 2);
        assert_eq!(app.notifications[0].message, "again");
    }

    #[test]
    fn notification_stack_is_capped() {
        let mut app = test_app();
        for i in 0..10 {
            app.notify(format!("n{i}"), Severity::Info);
        }
        assert_eq!(app.notifications.len(), MAX_NOTIFICATIONS);
        assert_eq!(app.notifications[0].message, "n9");
    }

    #[test]
    fn prune_drops_only_expired_banners() {
        let mut app = test_app();
        app.notify("fresh", Severity::Info);
        app.notifications.push_back(Notification {
            message: "stale".into(),
            severity: Severity::Info,
            created: Instant::now() - Duration::from_secs(6),
        });
        app.prune_notifications();
        assert_eq!(app.notifications.len(), 1);
        assert_eq!(app.notifications[0].message, "fresh");
    }

    #[test]
    fn apply_rides_replaces_the_whole_set() {
        let mut app = test_app();
        app.apply_rides(vec![ride(1), ride(2), ride(3)]);
        app.selected = 2;
        app.apply_rides(vec![ride(9)]);
        assert_eq!(app.rides.len(), 1);
        assert_eq!(app.rides[0].id, 9);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn successful_action_schedules_reload() {
        let mut app = test_app();
        app.handle_event(UiEvent::ActionFinished(RideAction::Book, Ok(())));
        assert_eq!(app.notifications[0].message, "Ride booked successfully!");
        assert_eq!(app.notifications[0].severity, Severity::Success);
        assert!(app.reload_at.is_some());
    }

    #[test]
    fn rejected_action_shows_server_message_without_reload() {
        let mut app = test_app();
        app.handle_event(UiEvent::ActionFinished(
            RideAction::Book,
            Err(ApiError::Rejected {
                message: "Group ride is full".into(),
            }),
        ));
        assert_eq!(app.notifications[0].message, "Group ride is full");
        assert_eq!(app.notifications[0].severity, Severity::Danger);
        assert!(app.reload_at.is_none());
        assert!(!app.reload_due());
    }

    #[test]
    fn transport_failure_shows_generic_message() {
        let mut app = test_app();
        app.handle_event(UiEvent::ActionFinished(
            RideAction::Complete,
            Err(ApiError::Status {
                status: reqwest::StatusCode::BAD_GATEWAY,
            }),
        ));
        assert_eq!(
            app.notifications[0].message,
            "An error occurred while completing the ride"
        );
        assert!(app.reload_at.is_none());
    }
}
