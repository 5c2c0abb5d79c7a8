use crate::asos::error::AsosDataError;
use crate::asos::observation::Observation;
use chrono::{DateTime, NaiveDateTime, Utc};
use log::debug;
use polars::prelude::*;

pub(crate) const STATION_COLUMN: &str = "station";
pub(crate) const VALID_COLUMN: &str = "valid(UTC)";
pub(crate) const TEMPERATURE_COLUMN: &str = "tmpf";
pub(crate) const DEWPOINT_COLUMN: &str = "dwpf";
pub(crate) const WIND_SPEED_COLUMN: &str = "sknt";
pub(crate) const WIND_DIRECTION_COLUMN: &str = "drct";

fn get_str_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked, AsosDataError> {
    let column = df
        .column(name)
        .map_err(|e| AsosDataError::MissingColumn(name.to_string(), e))?;
    Ok(column.str()?)
}

fn parse_opt_float(value: Option<&str>) -> Option<f64> {
    value
        .map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn parse_valid(value: &str, row: usize) -> Result<DateTime<Utc>, AsosDataError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .map(|naive| naive.and_utc())
        .map_err(|source| AsosDataError::TimestampParse {
            value: value.to_string(),
            row,
            source,
        })
}

/// Converts a raw one-minute download (all string columns) into typed rows.
///
/// Unparsable numbers become `None`; an unparsable or missing timestamp is an error
/// because the row could not be placed on the time axis.
pub fn extract_observations(df: &DataFrame) -> Result<Vec<Observation>, AsosDataError> {
    let station = get_str_column(df, STATION_COLUMN)?;
    let valid = get_str_column(df, VALID_COLUMN)?;
    let temperature = get_str_column(df, TEMPERATURE_COLUMN)?;
    let dewpoint = get_str_column(df, DEWPOINT_COLUMN)?;
    let wind_speed = get_str_column(df, WIND_SPEED_COLUMN)?;
    let wind_direction = get_str_column(df, WIND_DIRECTION_COLUMN)?;

    let mut observations = Vec::with_capacity(df.height());
    for (row, (((((station, valid), tmpf), dwpf), sknt), drct)) in station
        .into_iter()
        .zip(valid.into_iter())
        .zip(temperature.into_iter())
        .zip(dewpoint.into_iter())
        .zip(wind_speed.into_iter())
        .zip(wind_direction.into_iter())
        .enumerate()
    {
        let valid = parse_valid(valid.unwrap_or_default(), row)?;
        observations.push(Observation {
            station: station.unwrap_or_default().trim().to_string(),
            valid,
            temperature_f: parse_opt_float(tmpf),
            dewpoint_f: parse_opt_float(dwpf),
            wind_speed_kt: parse_opt_float(sknt),
            wind_direction_deg: parse_opt_float(drct),
        });
    }
    debug!("Extracted {} observations", observations.len());
    Ok(observations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw_frame(valid: &[&str], tmpf: &[&str]) -> DataFrame {
        let n = valid.len();
        df!(
            STATION_COLUMN => vec!["AMW"; n],
            VALID_COLUMN => valid,
            TEMPERATURE_COLUMN => tmpf,
            DEWPOINT_COLUMN => vec!["20"; n],
            WIND_SPEED_COLUMN => vec!["M"; n],
            WIND_DIRECTION_COLUMN => vec!["270"; n]
        )
        .unwrap()
    }

    #[test]
    fn test_extracts_typed_rows() {
        let df = raw_frame(&["2018-03-26 12:00", "2018-03-26 12:01"], &["32", " 35.5 "]);

        let observations = extract_observations(&df).unwrap();

        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].station, "AMW");
        assert_eq!(
            observations[0].valid,
            Utc.with_ymd_and_hms(2018, 3, 26, 12, 0, 0).unwrap()
        );
        assert_eq!(observations[1].temperature_f, Some(35.5));
        assert_eq!(observations[1].dewpoint_f, Some(20.0));
        assert_eq!(observations[1].wind_direction_deg, Some(270.0));
    }

    #[test]
    fn test_missing_markers_become_none() {
        let df = raw_frame(&["2018-03-26 12:00"], &["M"]);
        let observations = extract_observations(&df).unwrap();
        assert_eq!(observations[0].temperature_f, None);
        assert_eq!(observations[0].wind_speed_kt, None);
    }

    #[test]
    fn test_seconds_in_timestamp_accepted() {
        let df = raw_frame(&["2018-03-26 12:00:00"], &["40"]);
        let observations = extract_observations(&df).unwrap();
        assert_eq!(
            observations[0].valid,
            Utc.with_ymd_and_hms(2018, 3, 26, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_bad_timestamp_reports_row() {
        let df = raw_frame(&["2018-03-26 12:00", "yesterday"], &["40", "41"]);
        let result = extract_observations(&df);
        assert!(matches!(
            result,
            Err(AsosDataError::TimestampParse { row: 1, ref value, .. }) if value == "yesterday"
        ));
    }

    #[test]
    fn test_missing_column() {
        let df = df!("station" => ["AMW"]).unwrap();
        let result = extract_observations(&df);
        assert!(matches!(result, Err(AsosDataError::MissingColumn(ref name, _)) if name == VALID_COLUMN));
    }
}
