pub mod apps;
pub mod timeline;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Resolve the effective clock: a pinned date at midnight UTC, or now.
pub fn resolve_now(pinned: Option<NaiveDate>) -> DateTime<Utc> {
    match pinned {
        Some(date) => date.and_time(NaiveTime::MIN).and_utc(),
        None => Utc::now(),
    }
}
