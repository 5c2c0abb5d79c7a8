//! The main entry point: request URLs, downloads and unit-converted frames for ASOS
//! stations.

use crate::asos::extractor::extract_observations;
use crate::asos::loader::AsosDataLoader;
use crate::asos::request_url::build_asos_request_url;
use crate::asos::source::AsosSource;
use crate::asos::window::RequestWindow;
use crate::clock::{Clock, SystemClock};
use crate::frame::MeteogramFrame;
use crate::{MeteogramError, RequestError};
use bon::bon;
use chrono::{DateTime, Utc};
use log::info;
use std::sync::Arc;

/// Client for the Iowa Environmental Mesonet one-minute ASOS service.
///
/// The client owns the [`Clock`] used to fill in a missing request end date. Use
/// [`AsosClient::new`] for the wall clock or [`AsosClient::with_clock`] to pin time.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use meteogram::{AsosClient, FixedClock};
///
/// let client = AsosClient::with_clock(FixedClock(
///     Utc.with_ymd_and_hms(2018, 3, 26, 12, 0, 0).unwrap(),
/// ));
/// let url = client.request_url("FSD").call().unwrap();
/// assert!(url.contains("&year1=2018&month1=03&day1=25&hour1=12&minute1=00"));
/// assert!(url.contains("&year2=2018&month2=03&day2=26&hour2=12&minute2=00"));
/// ```
#[derive(Clone)]
pub struct AsosClient {
    loader: AsosDataLoader,
    clock: Arc<dyn Clock>,
}

impl Default for AsosClient {
    fn default() -> Self {
        Self::new()
    }
}

#[bon]
impl AsosClient {
    /// Creates a client reading the current time from the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Creates a client that reads "now" from `clock`.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            loader: AsosDataLoader::new(),
            clock: Arc::new(clock),
        }
    }

    /// Replaces the HTTP client used for downloads (timeouts, proxies, user agent).
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.loader = AsosDataLoader::with_client(http_client);
        self
    }

    /// Builds the download URL for a station.
    ///
    /// # Optional Builder Methods
    ///
    /// * `.start_date(DateTime<Utc>)`: first minute requested. Defaults to one day
    ///   before the end date.
    /// * `.end_date(DateTime<Utc>)`: last minute requested. Defaults to the client's
    ///   clock, which is only read when this is omitted.
    ///
    /// Both bounds are truncated to whole minutes.
    ///
    /// # Errors
    ///
    /// * [`RequestError::EmptyStation`] for a blank station identifier.
    /// * [`RequestError::InvalidWindow`] when the start lies after the end.
    #[builder(start_fn = request_url)]
    pub fn build_request_url(
        &self,
        #[builder(start_fn)] station: &str,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<String, MeteogramError> {
        if station.trim().is_empty() {
            return Err(RequestError::EmptyStation.into());
        }
        let window = RequestWindow::resolve(start_date, end_date, self.clock.as_ref())?;
        Ok(build_asos_request_url(station, &window)?)
    }

    /// Downloads one-minute observations for a station and converts them.
    ///
    /// Accepts the same optional `.start_date()` / `.end_date()` setters as
    /// [`AsosClient::request_url`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use meteogram::{AsosClient, MeteogramError};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), MeteogramError> {
    /// let client = AsosClient::new();
    /// let last_day = client.station("AMW").call().await?.collect()?;
    /// println!("{}", last_day);
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = station)]
    pub async fn build_station(
        &self,
        #[builder(start_fn)] station: &str,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<MeteogramFrame, MeteogramError> {
        let url = self
            .request_url(station)
            .maybe_start_date(start_date)
            .maybe_end_date(end_date)
            .call()?;
        info!("Fetching one-minute observations for station {}", station);
        self.load(AsosSource::Url(url)).await
    }

    /// Loads observations from a URL or local CSV file and converts them.
    pub async fn load(
        &self,
        source: impl Into<AsosSource>,
    ) -> Result<MeteogramFrame, MeteogramError> {
        let source = source.into();
        let raw = self.loader.get_frame(&source).await?;
        let observations = extract_observations(&raw)?;
        MeteogramFrame::from_observations(&observations)
    }
}

/// Loads a one-minute ASOS CSV from a URL or local path with a default client.
///
/// ```no_run
/// # use meteogram::{download_asos_data, MeteogramError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), MeteogramError> {
/// let frame = download_asos_data("data/AMW_example_data.csv").await?;
/// println!("{}", frame.collect()?);
/// # Ok(())
/// # }
/// ```
pub async fn download_asos_data(
    source: impl Into<AsosSource>,
) -> Result<MeteogramFrame, MeteogramError> {
    AsosClient::new().load(source).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::frame::{AIR_TEMPERATURE, DEWPOINT, U_WIND, V_WIND, WIND_SPEED};
    use crate::test_data::example_data_path;
    use chrono::TimeZone;

    fn mocked_current_utc_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2018, 3, 26, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_build_asos_request_url_defaults() -> Result<(), MeteogramError> {
        let client = AsosClient::with_clock(mocked_current_utc_time);

        let url = client.request_url("FSD").call()?;

        let desired = "https://mesonet.agron.iastate.edu/request/asos/1min_dl.php?station%5B%5D=FSD&tz=UTC&year1=2018&month1=03&day1=25&hour1=12&minute1=00&year2=2018&month2=03&day2=26&hour2=12&minute2=00&vars%5B%5D=tmpf&vars%5B%5D=dwpf&vars%5B%5D=sknt&vars%5B%5D=drct&sample=1min&what=view&delim=comma&gis=yes";
        assert_eq!(url, desired);
        Ok(())
    }

    #[test]
    fn test_explicit_dates_ignore_clock() -> Result<(), MeteogramError> {
        let client = AsosClient::with_clock(FixedClock(mocked_current_utc_time()));

        let url = client
            .request_url("FSD")
            .start_date(Utc.with_ymd_and_hms(2018, 1, 5, 1, 0, 0).unwrap())
            .end_date(Utc.with_ymd_and_hms(2018, 1, 9, 1, 0, 0).unwrap())
            .call()?;

        let desired = "https://mesonet.agron.iastate.edu/request/asos/1min_dl.php?station%5B%5D=FSD&tz=UTC&year1=2018&month1=01&day1=05&hour1=01&minute1=00&year2=2018&month2=01&day2=09&hour2=01&minute2=00&vars%5B%5D=tmpf&vars%5B%5D=dwpf&vars%5B%5D=sknt&vars%5B%5D=drct&sample=1min&what=view&delim=comma&gis=yes";
        assert_eq!(url, desired);
        Ok(())
    }

    #[test]
    fn test_request_url_is_stable() -> Result<(), MeteogramError> {
        let client = AsosClient::new();
        let start = Utc.with_ymd_and_hms(2018, 10, 11, 11, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2018, 10, 16, 11, 0, 0).unwrap();

        let first = client.request_url("FSD").start_date(start).end_date(end).call()?;
        let second = client.request_url("FSD").start_date(start).end_date(end).call()?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_start_after_end_rejected() {
        let client = AsosClient::with_clock(mocked_current_utc_time);
        let result = client
            .request_url("FSD")
            .start_date(Utc.with_ymd_and_hms(2018, 3, 27, 0, 0, 0).unwrap())
            .call();
        assert!(matches!(
            result,
            Err(MeteogramError::Request(RequestError::InvalidWindow { .. }))
        ));
    }

    #[test]
    fn test_empty_station_rejected() {
        let client = AsosClient::new();
        let result = client.request_url("").call();
        assert!(matches!(
            result,
            Err(MeteogramError::Request(RequestError::EmptyStation))
        ));
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("value should be present");
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    #[tokio::test]
    async fn test_load_example_data() -> Result<(), Box<dyn std::error::Error>> {
        let df = download_asos_data(example_data_path()).await?.collect()?;
        assert_eq!(df.height(), 120);

        let temperature = df.column(AIR_TEMPERATURE)?.f64()?;
        let dewpoint = df.column(DEWPOINT)?.f64()?;
        let wind_speed = df.column(WIND_SPEED)?.f64()?;
        let u = df.column(U_WIND)?.f64()?;
        let v = df.column(V_WIND)?.f64()?;

        // 12:00 row: 38°F, dewpoint 29°F, 10 kt from 293°.
        assert_close(temperature.get(0), 3.333);
        assert_close(dewpoint.get(0), -1.667);
        assert_close(wind_speed.get(0), 10.0);
        assert_close(u.get(0), 9.205);
        assert_close(v.get(0), -3.907);

        // 12:17 row has missing temperature and dewpoint but a valid wind.
        assert_eq!(temperature.get(17), None);
        assert_eq!(dewpoint.get(17), None);
        assert!(u.get(17).is_some());

        // 13:04 row has missing wind speed and direction.
        assert_close(temperature.get(64), 6.667);
        assert_eq!(u.get(64), None);
        assert_eq!(v.get(64), None);

        assert_eq!(temperature.null_count(), 2);
        assert_eq!(u.null_count(), 1);
        Ok(())
    }
}
