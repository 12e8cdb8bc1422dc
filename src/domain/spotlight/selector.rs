use super::{SpotlightRecord, SpotlightSource};
use crate::error::AppResult;
use chrono::{DateTime, Timelike, TimeZone};

/// Choose the spotlight to surface at `now`.
///
/// Today's record wins at any hour. Without one, the latest record dated
/// before today is used. `None` means nothing exists for today or earlier.
/// The calendar day and hour are read in `now`'s own time zone.
///
/// Morning and afternoon are evaluated by separate branches that currently
/// agree. Whether a morning view should ever fall back to a past record is
/// pending product clarification; keep the branches distinct until then.
#[allow(clippy::if_same_then_else)]
pub async fn select_spotlight<Tz: TimeZone>(
    now: &DateTime<Tz>,
    series: &dyn SpotlightSource,
) -> AppResult<Option<SpotlightRecord>> {
    let today = now.date_naive();
    let hour = now.hour();

    let todays = series.get_by_date(today).await?;

    if hour < 12 {
        if let Some(record) = todays {
            return Ok(Some(record));
        }
        series.get_latest_before(today).await
    } else {
        if let Some(record) = todays {
            return Ok(Some(record));
        }
        series.get_latest_before(today).await
    }
}
