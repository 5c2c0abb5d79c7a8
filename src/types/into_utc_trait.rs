//! Loose chrono inputs for request windows and frame filters.
//!
//! [`RequestWindow`](crate::RequestWindow) bounds and the
//! [`MeteogramFrame`](crate::MeteogramFrame) filters take `impl IntoUtcDateTime`, so
//! callers can pass whatever chrono value they already hold. The ASOS service is
//! always queried with `tz=UTC` and the converted frame stores naive UTC times, so
//! everything is normalised here before it reaches a URL or a filter expression.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Anything that names an instant which can be expressed in UTC.
///
/// Naive values are taken to already be UTC.
pub trait IntoUtcDateTime {
    fn into_utc(self) -> DateTime<Utc>;
}

impl IntoUtcDateTime for NaiveDateTime {
    fn into_utc(self) -> DateTime<Utc> {
        self.and_utc()
    }
}

/// Midnight UTC at the start of the date.
impl IntoUtcDateTime for NaiveDate {
    fn into_utc(self) -> DateTime<Utc> {
        self.and_time(NaiveTime::MIN).and_utc()
    }
}

/// Zoned values (`Utc`, `Local`, `FixedOffset`, ...) keep their instant.
impl<Tz: TimeZone> IntoUtcDateTime for DateTime<Tz> {
    fn into_utc(self) -> DateTime<Utc> {
        self.with_timezone(&Utc)
    }
}
