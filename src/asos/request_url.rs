//! Request URLs for the Iowa Environmental Mesonet one-minute ASOS download service.
//!
//! The service expects its parameters in a fixed order with bracketed array names
//! already escaped, so the query string is assembled literally rather than through a
//! generic key/value encoder.

use crate::asos::error::RequestError;
use crate::asos::window::RequestWindow;
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::fmt::Write;
use url::form_urlencoded::byte_serialize;

pub const ASOS_BASE_URL: &str = "https://mesonet.agron.iastate.edu/request/asos/1min_dl.php";

/// Observation variables requested, in request order: temperature, dewpoint,
/// wind speed (knots) and wind direction.
pub const ASOS_VARIABLES: [&str; 4] = ["tmpf", "dwpf", "sknt", "drct"];

const TRAILING_PARAMS: &str = "sample=1min&what=view&delim=comma&gis=yes";

/// Builds the download URL for `station` covering `window`.
///
/// # Errors
///
/// Returns [`RequestError::EmptyStation`] if `station` is empty or only whitespace.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use meteogram::{build_asos_request_url, RequestWindow};
///
/// let window = RequestWindow::new(
///     Utc.with_ymd_and_hms(2018, 1, 5, 1, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2018, 1, 9, 1, 0, 0).unwrap(),
/// )
/// .unwrap();
/// let url = build_asos_request_url("FSD", &window).unwrap();
/// assert!(url.starts_with(
///     "https://mesonet.agron.iastate.edu/request/asos/1min_dl.php?station%5B%5D=FSD&tz=UTC&year1=2018&month1=01"
/// ));
/// ```
pub fn build_asos_request_url(
    station: &str,
    window: &RequestWindow,
) -> Result<String, RequestError> {
    let station = station.trim();
    if station.is_empty() {
        return Err(RequestError::EmptyStation);
    }

    let mut url = String::with_capacity(ASOS_BASE_URL.len() + 256);
    url.push_str(ASOS_BASE_URL);
    url.push_str("?station%5B%5D=");
    url.extend(byte_serialize(station.as_bytes()));
    url.push_str("&tz=UTC");
    push_time_params(&mut url, '1', window.start);
    push_time_params(&mut url, '2', window.end);
    for variable in ASOS_VARIABLES {
        url.push_str("&vars%5B%5D=");
        url.push_str(variable);
    }
    url.push('&');
    url.push_str(TRAILING_PARAMS);
    Ok(url)
}

fn push_time_params(url: &mut String, suffix: char, time: DateTime<Utc>) {
    // Writing into a String cannot fail.
    let _ = write!(
        url,
        "&year{s}={:04}&month{s}={:02}&day{s}={:02}&hour{s}={:02}&minute{s}={:02}",
        time.year(),
        time.month(),
        time.day(),
        time.hour(),
        time.minute(),
        s = suffix,
    );
}
