//! Contains [`MeteogramFrame`], the unit-converted observation table plots are drawn from.

use crate::asos::observation::Observation;
use crate::conversions::{convert_to_wind_components, degf_to_degc};
use crate::types::into_utc_trait::IntoUtcDateTime;
use crate::MeteogramError;
use chrono::NaiveDateTime;
use log::debug;
use polars::prelude::*;

pub const STATION: &str = "station";
/// Observation time, timezone-naive UTC.
pub const DATE_TIME: &str = "date_time";
/// Air temperature, °C.
pub const AIR_TEMPERATURE: &str = "air_temperature";
/// Dewpoint, °C.
pub const DEWPOINT: &str = "dewpoint";
/// Wind speed, knots.
pub const WIND_SPEED: &str = "wind_speed";
/// Wind direction, degrees.
pub const WIND_DIRECTION: &str = "wind_direction";
/// Eastward wind component, knots.
pub const U_WIND: &str = "u_wind";
/// Northward wind component, knots.
pub const V_WIND: &str = "v_wind";

/// A Polars `LazyFrame` of ASOS observations converted to plotting units.
///
/// Columns: [`STATION`], [`DATE_TIME`], [`AIR_TEMPERATURE`], [`DEWPOINT`],
/// [`WIND_SPEED`], [`WIND_DIRECTION`], [`U_WIND`], [`V_WIND`]. Measured columns are
/// nullable; a gap in speed or direction leaves both wind components null.
#[derive(Clone)]
pub struct MeteogramFrame {
    /// The underlying Polars LazyFrame.
    pub frame: LazyFrame,
}

impl MeteogramFrame {
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Converts Fahrenheit temperatures to Celsius and derives wind components.
    ///
    /// # Errors
    ///
    /// Returns [`MeteogramError::Conversion`] when a wind value is outside its domain
    /// (e.g. a negative speed) and [`MeteogramError::PolarsError`] if the frame cannot
    /// be assembled.
    pub fn from_observations(observations: &[Observation]) -> Result<Self, MeteogramError> {
        let column = |field: fn(&Observation) -> Option<f64>| -> Vec<Option<f64>> {
            observations.iter().map(field).collect()
        };

        let stations: Vec<&str> = observations.iter().map(|o| o.station.as_str()).collect();
        let times: Vec<NaiveDateTime> = observations.iter().map(|o| o.valid.naive_utc()).collect();
        let air_temperature = degf_to_degc(column(|o| o.temperature_f));
        let dewpoint = degf_to_degc(column(|o| o.dewpoint_f));
        let wind_speed = column(|o| o.wind_speed_kt);
        let wind_direction = column(|o| o.wind_direction_deg);
        let (u_wind, v_wind) =
            convert_to_wind_components(wind_direction.clone(), wind_speed.clone())?;

        let df = df!(
            STATION => stations,
            DATE_TIME => times,
            AIR_TEMPERATURE => air_temperature,
            DEWPOINT => dewpoint,
            WIND_SPEED => wind_speed,
            WIND_DIRECTION => wind_direction,
            U_WIND => u_wind,
            V_WIND => v_wind
        )?;
        debug!("Built meteogram frame with {} rows", df.height());
        Ok(Self::new(df.lazy()))
    }

    pub fn filter(&self, predicate: Expr) -> MeteogramFrame {
        MeteogramFrame::new(self.frame.clone().filter(predicate))
    }

    /// Keeps rows whose observation time lies in `[start, end]`.
    pub fn filter_window(
        &self,
        start: impl IntoUtcDateTime,
        end: impl IntoUtcDateTime,
    ) -> MeteogramFrame {
        self.filter(observed_at_or_after(start).and(observed_at_or_before(end)))
    }

    /// Keeps rows observed at or after `start`.
    pub fn filter_from(&self, start: impl IntoUtcDateTime) -> MeteogramFrame {
        self.filter(observed_at_or_after(start))
    }

    /// Keeps rows observed at or before `end`.
    pub fn filter_until(&self, end: impl IntoUtcDateTime) -> MeteogramFrame {
        self.filter(observed_at_or_before(end))
    }

    pub fn collect(self) -> Result<DataFrame, MeteogramError> {
        Ok(self.frame.collect()?)
    }
}

fn date_time_ms() -> Expr {
    col(DATE_TIME).cast(DataType::Datetime(TimeUnit::Milliseconds, None))
}

fn observed_at_or_after(start: impl IntoUtcDateTime) -> Expr {
    date_time_ms().gt_eq(lit(start.into_utc().naive_utc()))
}

fn observed_at_or_before(end: impl IntoUtcDateTime) -> Expr {
    date_time_ms().lt_eq(lit(end.into_utc().naive_utc()))
}
