use crate::error::{AppError, AppResult};
use std::time::Duration;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(60);
pub const DEFAULT_RETENTION_WINDOW: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_BACKGROUND_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Tuning knobs for paging, caching and background refresh
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSettings {
    pub page_size: u32,
    /// How long a fetched page is served without revalidation
    pub freshness_window: Duration,
    /// How long an unused page stays in memory
    pub retention_window: Duration,
    pub background_refresh_interval: Duration,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            freshness_window: DEFAULT_FRESHNESS_WINDOW,
            retention_window: DEFAULT_RETENTION_WINDOW,
            background_refresh_interval: DEFAULT_BACKGROUND_REFRESH_INTERVAL,
        }
    }
}

impl FeedSettings {
    pub fn from_millis(
        page_size: u32,
        freshness_window_ms: u64,
        retention_window_ms: u64,
        background_refresh_interval_ms: u64,
    ) -> Self {
        Self {
            page_size,
            freshness_window: Duration::from_millis(freshness_window_ms),
            retention_window: Duration::from_millis(retention_window_ms),
            background_refresh_interval: Duration::from_millis(background_refresh_interval_ms),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.page_size == 0 {
            return Err(AppError::Config("page size must be positive".to_string()));
        }
        if self.background_refresh_interval.is_zero() {
            return Err(AppError::Config(
                "background refresh interval must be positive".to_string(),
            ));
        }
        if self.retention_window < self.freshness_window {
            return Err(AppError::Config(format!(
                "retention window ({}ms) must not be shorter than freshness window ({}ms)",
                self.retention_window.as_millis(),
                self.freshness_window.as_millis()
            )));
        }
        Ok(())
    }
}
