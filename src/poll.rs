use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::api::ApiClient;
use crate::types::UiEvent;

/// Lets the UI request an off-schedule refresh (post-action reload, manual
/// refresh key) without owning the polling task.
#[derive(Clone)]
pub struct RefreshHandle {
    force_tx: mpsc::Sender<()>,
}

impl RefreshHandle {
    pub fn request(&self) {
        // A full channel means a refresh is already queued.
        let _ = self.force_tx.try_send(());
    }
}

/// The ride list refresher. Started once per dashboard session, stopped
/// explicitly on quit or when settings change the interval or server.
///
/// Each tick fetches the ride list and ships it to the UI loop; a failed
/// fetch is logged and the tick skipped. The fetch is awaited inline, so a
/// slow response delays the next tick instead of overlapping it.
pub struct Refresher {
    task: JoinHandle<()>,
    force_tx: mpsc::Sender<()>,
}

impl Refresher {
    pub fn start(
        client: ApiClient,
        period: Duration,
        events: mpsc::UnboundedSender<UiEvent>,
    ) -> Self {
        let (force_tx, mut force_rx) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    cmd = force_rx.recv() => {
                        if cmd.is_none() {
                            break;
                        }
                    }
                }
                match client.fetch_rides().await {
                    Ok(rides) => {
                        if events.send(UiEvent::Rides(rides)).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::warn!("ride list refresh failed: {err}");
                    }
                }
            }
        });
        Self { task, force_tx }
    }

    pub fn handle(&self) -> RefreshHandle {
        RefreshHandle {
            force_tx: self.force_tx.clone(),
        }
    }

    pub fn stop(&self) {
        self.task.abort();
    }
}
