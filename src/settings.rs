// Animation settings provider.
// Polls the settings endpoint on a background task owned by the app context.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::api::{AnimationSettings, SettingsSource};
use crate::error::CueRoomError;
use crate::session::{Query, QueryOptions, fetch_with_retry};

/// Shortest accepted poll period.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// How often the polling task checks whether a refetch is due.
const CHECK_PERIOD: Duration = Duration::from_millis(250);

/// Point-in-time view of the settings query.
#[derive(Debug, Clone, Default)]
pub struct SettingsSnapshot {
    pub settings: Option<AnimationSettings>,
    pub error: Option<Arc<CueRoomError>>,
    pub is_loading: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

impl SettingsSnapshot {
    /// Settings to render with: the fetched ones or the defaults.
    pub fn effective(&self) -> AnimationSettings {
        self.settings.clone().unwrap_or_default()
    }
}

/// Owns the polling task. Construct once at startup, shut down on exit.
pub struct AnimationSettingsProvider {
    state: Arc<RwLock<Query<AnimationSettings>>>,
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl AnimationSettingsProvider {
    /// Start polling `source`. The first fetch happens immediately.
    ///
    /// The task wakes every `CHECK_PERIOD` and fetches whenever the query
    /// reports a refetch is due. A stop request cancels an in-flight fetch.
    pub fn start<S>(source: Arc<S>, interval: Duration) -> Self
    where
        S: SettingsSource + Send + Sync + 'static,
    {
        let interval = interval.max(MIN_POLL_INTERVAL);
        let state = Arc::new(RwLock::new(Query::new(QueryOptions::polling(interval))));
        let (stop, mut stop_rx) = oneshot::channel();

        let task_state = Arc::clone(&state);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(CHECK_PERIOD);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        let due = task_state.read().refetch_due(Utc::now());
                        if !due {
                            continue;
                        }
                        tokio::select! {
                            _ = &mut stop_rx => break,
                            _ = poll_once(source.as_ref(), &task_state) => {}
                        }
                    }
                }
            }
            debug!("animation settings polling stopped");
        });

        info!(interval_secs = interval.as_secs(), "animation settings polling started");
        Self { state, stop, task }
    }

    pub fn snapshot(&self) -> SettingsSnapshot {
        let query = self.state.read();
        SettingsSnapshot {
            settings: query.data().cloned(),
            error: query.error().cloned(),
            is_loading: query.is_loading(),
            updated_at: query.data_updated_at(),
        }
    }

    /// Stop polling and wait for the task to finish.
    pub async fn shutdown(self) {
        // The task may already be gone; nothing to signal then.
        let _ = self.stop.send(());
        if let Err(e) = self.task.await {
            warn!(error = %e, "animation settings task ended abnormally");
        }
    }
}

async fn poll_once<S: SettingsSource>(source: &S, state: &RwLock<Query<AnimationSettings>>) {
    let retry = {
        let mut query = state.write();
        query.begin_fetch();
        query.options().retry
    };

    let result = fetch_with_retry(retry, move || source.fetch_animation_settings()).await;
    if let Err(e) = &result {
        warn!(error = %e, "animation settings fetch failed");
    }
    state.write().settle(result);
}
