//! Meteogram rendering with `plotlars`, behind the `plotting` feature.

use crate::asos::window::RequestWindow;
use crate::frame::{
    MeteogramFrame, AIR_TEMPERATURE, DATE_TIME, DEWPOINT, U_WIND, V_WIND, WIND_SPEED,
};
use crate::MeteogramError;
use chrono::{DateTime, Utc};
use log::info;
use plotlars::{Axis, Legend, Line, Plot, Rgb, Text, TimeSeriesPlot};
use polars::prelude::DataFrame;

const TEMPERATURE_COLOR: Rgb = Rgb(220, 50, 32);
const DEWPOINT_COLOR: Rgb = Rgb(0, 128, 0);
const WIND_SPEED_COLOR: Rgb = Rgb(31, 119, 180);
const U_WIND_COLOR: Rgb = Rgb(235, 117, 0);
const V_WIND_COLOR: Rgb = Rgb(69, 157, 230);

/// The three panels of a meteogram, sharing one time axis.
pub struct MeteogramFigure {
    /// Air temperature and dewpoint, °C.
    pub temperature: TimeSeriesPlot,
    /// Wind speed, knots.
    pub wind_speed: TimeSeriesPlot,
    /// Eastward and northward wind components, knots.
    pub wind_components: TimeSeriesPlot,
    /// The observations the panels were drawn from.
    pub data: DataFrame,
}

impl MeteogramFigure {
    /// Renders every panel (opens them in the browser).
    pub fn show(self) {
        self.temperature.plot();
        self.wind_speed.plot();
        self.wind_components.plot();
    }
}

/// Builds a meteogram from converted observations.
///
/// `plot_start` and `plot_end` narrow the plotted period; either may be omitted to
/// keep the data's own first or last observation.
///
/// # Errors
///
/// * [`MeteogramError::Request`] if `plot_start` lies after `plot_end`.
/// * [`MeteogramError::NoDataInWindow`] if no observation falls in the period.
pub fn plot_meteogram(
    frame: &MeteogramFrame,
    plot_start: Option<DateTime<Utc>>,
    plot_end: Option<DateTime<Utc>>,
) -> Result<MeteogramFigure, MeteogramError> {
    let mut selected = frame.clone();
    if let (Some(start), Some(end)) = (plot_start, plot_end) {
        RequestWindow::new(start, end)?;
    }
    if let Some(start) = plot_start {
        selected = selected.filter_from(start);
    }
    if let Some(end) = plot_end {
        selected = selected.filter_until(end);
    }

    let data = selected.collect()?;
    if data.height() == 0 {
        let describe = |bound: Option<DateTime<Utc>>| {
            bound.map_or_else(|| "unbounded".to_string(), |b| b.to_string())
        };
        return Err(MeteogramError::NoDataInWindow {
            start: describe(plot_start),
            end: describe(plot_end),
        });
    }
    info!("Plotting meteogram from {} observations", data.height());

    Ok(MeteogramFigure {
        temperature: temperature_panel(&data),
        wind_speed: wind_speed_panel(&data),
        wind_components: wind_components_panel(&data),
        data,
    })
}

fn value_axis() -> Axis {
    Axis::new()
        .value_color(Rgb(0, 0, 0))
        .show_grid(true)
        .zero_line_color(Rgb(0, 0, 0))
}

fn temperature_panel(data: &DataFrame) -> TimeSeriesPlot {
    TimeSeriesPlot::builder()
        .data(data)
        .x(DATE_TIME)
        .y(AIR_TEMPERATURE)
        .additional_series(vec![DEWPOINT])
        .colors(vec![TEMPERATURE_COLOR, DEWPOINT_COLOR])
        .lines(vec![Line::Solid, Line::Solid])
        .plot_title(Text::from("Temperature and dewpoint").size(18))
        .legend(&Legend::new().x(0.05).y(0.9))
        .x_title("Time (UTC)")
        .y_title(Text::from("°C").color(Rgb(0, 0, 0)))
        .y_axis(&value_axis())
        .build()
}

fn wind_speed_panel(data: &DataFrame) -> TimeSeriesPlot {
    TimeSeriesPlot::builder()
        .data(data)
        .x(DATE_TIME)
        .y(WIND_SPEED)
        .colors(vec![WIND_SPEED_COLOR])
        .lines(vec![Line::Solid])
        .plot_title(Text::from("Wind speed").size(18))
        .x_title("Time (UTC)")
        .y_title(Text::from("kt").color(Rgb(0, 0, 0)))
        .y_axis(&value_axis())
        .build()
}

fn wind_components_panel(data: &DataFrame) -> TimeSeriesPlot {
    TimeSeriesPlot::builder()
        .data(data)
        .x(DATE_TIME)
        .y(U_WIND)
        .additional_series(vec![V_WIND])
        .colors(vec![U_WIND_COLOR, V_WIND_COLOR])
        .lines(vec![Line::Solid, Line::Dash])
        .plot_title(Text::from("Wind components").size(18))
        .legend(&Legend::new().x(0.05).y(0.9))
        .x_title("Time (UTC)")
        .y_title(Text::from("kt").color(Rgb(0, 0, 0)))
        .y_axis(&value_axis())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::download_asos_data;
    use crate::frame::STATION;
    use crate::test_data::example_data_path;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_plotting_meteogram_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let frame = download_asos_data(example_data_path()).await?;
        let figure = plot_meteogram(&frame, None, None)?;

        assert_eq!(figure.data.height(), 120);
        for name in [STATION, DATE_TIME, AIR_TEMPERATURE, DEWPOINT, WIND_SPEED, U_WIND, V_WIND] {
            assert!(figure.data.column(name).is_ok(), "missing column {name}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_plotting_meteogram_window() -> Result<(), MeteogramError> {
        let frame = download_asos_data(example_data_path()).await?;
        let start = Utc.with_ymd_and_hms(2018, 3, 26, 12, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2018, 3, 26, 12, 9, 0).unwrap();

        let figure = plot_meteogram(&frame, Some(start), Some(end))?;
        assert_eq!(figure.data.height(), 10);

        let from_half_past = Utc.with_ymd_and_hms(2018, 3, 26, 13, 30, 0).unwrap();
        let figure = plot_meteogram(&frame, Some(from_half_past), None)?;
        assert_eq!(figure.data.height(), 30);
        Ok(())
    }

    #[tokio::test]
    async fn test_plot_window_without_data() -> Result<(), MeteogramError> {
        let frame = download_asos_data(example_data_path()).await?;
        let start = Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(1999, 1, 2, 0, 0, 0).unwrap();

        let result = plot_meteogram(&frame, Some(start), Some(end));
        assert!(matches!(result, Err(MeteogramError::NoDataInWindow { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_plot_window_reversed() -> Result<(), MeteogramError> {
        let frame = download_asos_data(example_data_path()).await?;
        let start = Utc.with_ymd_and_hms(2018, 3, 27, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2018, 3, 26, 0, 0, 0).unwrap();

        let result = plot_meteogram(&frame, Some(start), Some(end));
        assert!(matches!(result, Err(MeteogramError::Request(_))));
        Ok(())
    }
}
