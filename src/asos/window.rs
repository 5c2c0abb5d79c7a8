//! Resolution of the time window an ASOS request covers.

use crate::asos::error::RequestError;
use crate::clock::Clock;
use crate::types::into_utc_trait::IntoUtcDateTime;
use chrono::{DateTime, Duration, Timelike, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

/// Inclusive UTC time window, both bounds truncated to whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl RequestWindow {
    /// Creates a window from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidWindow`] if `start` is after `end` once both are
    /// truncated to the minute. Equal bounds are allowed.
    pub fn new(
        start: impl IntoUtcDateTime,
        end: impl IntoUtcDateTime,
    ) -> Result<Self, RequestError> {
        let start = truncate_to_minute(start.into_utc());
        let end = truncate_to_minute(end.into_utc());
        if start > end {
            return Err(RequestError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Fills in missing bounds.
    ///
    /// A missing `end` is read from `clock` (the only time the clock is consulted);
    /// a missing `start` is one day before the end.
    pub fn resolve(
        start: Option<impl IntoUtcDateTime>,
        end: Option<impl IntoUtcDateTime>,
        clock: &dyn Clock,
    ) -> Result<Self, RequestError> {
        let end = match end {
            Some(end) => end.into_utc(),
            None => {
                let now = clock.now();
                debug!("No end date given, using current time {}", now);
                now
            }
        };
        let start = match start {
            Some(start) => start.into_utc(),
            None => end - Duration::days(1),
        };
        Self::new(start, end)
    }
}

fn truncate_to_minute(datetime: DateTime<Utc>) -> DateTime<Utc> {
    // Zeroing the nanoseconds first also clears a leap second, so neither step can
    // produce an invalid time in UTC.
    datetime
        .with_nanosecond(0)
        .and_then(|dt| dt.with_second(0))
        .unwrap_or(datetime)
}
