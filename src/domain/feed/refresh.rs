use super::paginator::Paginator;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Periodic revalidation of whatever page the paginator currently shows.
///
/// Owned by the view that started it; cancelled on `cancel` or drop.
pub struct RefreshTask {
    handle: JoinHandle<()>,
}

impl RefreshTask {
    /// Spawn on the current tokio runtime. The first tick fires one full
    /// `interval` after spawning.
    pub fn spawn(paginator: Paginator, interval: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let key = paginator.current_key();
                tracing::debug!(key = ?key, "Background page refresh");

                let state = paginator.refresh().await;
                if let Some(err) = &state.error {
                    tracing::warn!(error = %err, key = ?key, "Background refresh failed");
                }
            }
        });

        tracing::info!(interval_ms = interval.as_millis() as u64, "Background refresh started");
        Self { handle }
    }

    pub fn cancel(&self) {
        if !self.handle.is_finished() {
            self.handle.abort();
            tracing::info!("Background refresh cancelled");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
