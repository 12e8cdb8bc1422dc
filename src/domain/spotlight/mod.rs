pub mod error;
pub mod model;
pub mod selector;
pub mod service;

pub use error::SpotlightError;
pub use model::{prefer_latest_created, SpotlightPayload, SpotlightRecord};
pub use selector::select_spotlight;
pub use service::{SpotlightService, SpotlightView};

use crate::error::AppResult;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Date-keyed spotlight series. When several records share a date,
/// implementations return the one `prefer_latest_created` would pick.
#[async_trait]
pub trait SpotlightSource: Send + Sync {
    async fn get_by_date(&self, date: NaiveDate) -> AppResult<Option<SpotlightRecord>>;

    /// Most recent record dated strictly before `date`
    async fn get_latest_before(&self, date: NaiveDate) -> AppResult<Option<SpotlightRecord>>;
}
