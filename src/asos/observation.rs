use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of a one-minute ASOS download, in the service's native units.
///
/// Measured fields are optional because the service reports gaps as `M` or blanks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub station: String,
    pub valid: DateTime<Utc>,
    /// Air temperature, °F.
    pub temperature_f: Option<f64>,
    /// Dewpoint, °F.
    pub dewpoint_f: Option<f64>,
    /// Wind speed, knots.
    pub wind_speed_kt: Option<f64>,
    /// Direction the wind blows from, degrees.
    pub wind_direction_deg: Option<f64>,
}
