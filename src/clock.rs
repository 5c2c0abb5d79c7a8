//! Sources of "now" for request windows that omit their end date.
//!
//! The clock is handed to [`crate::AsosClient`] explicitly, so tests pin time by
//! constructing a [`FixedClock`] (or passing a closure) instead of patching globals.

use chrono::{DateTime, Utc};

/// Returns the current UTC time.
pub fn current_utc_time() -> DateTime<Utc> {
    Utc::now()
}

/// Supplies the current UTC time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The wall clock, backed by [`current_utc_time`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        current_utc_time()
    }
}

/// A clock stuck at one instant.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use meteogram::{Clock, FixedClock};
///
/// let noon = Utc.with_ymd_and_hms(2018, 3, 26, 12, 0, 0).unwrap();
/// assert_eq!(FixedClock(noon).now(), noon);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<Utc> + Send + Sync,
{
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}
