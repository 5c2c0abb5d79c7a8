mod asos;
mod client;
mod clock;
mod conversions;
mod error;
mod frame;
#[cfg(feature = "plotting")]
mod plot;
mod types;

#[cfg(test)]
mod test_data;

pub use error::MeteogramError;

pub use client::{download_asos_data, AsosClient};
pub use clock::{current_utc_time, Clock, FixedClock, SystemClock};

pub use conversions::elementwise::Elementwise;
pub use conversions::error::ConversionError;
pub use conversions::{
    convert_to_wind_components, degf_to_degc, exner_function, potential_temperature,
    DRY_AIR_GAS_CONSTANT, DRY_AIR_SPECIFIC_HEAT, POISSON_EXPONENT, REFERENCE_PRESSURE_HPA,
};

pub use asos::error::{AsosDataError, RequestError};
pub use asos::extractor::extract_observations;
pub use asos::loader::AsosDataLoader;
pub use asos::observation::Observation;
pub use asos::request_url::{build_asos_request_url, ASOS_BASE_URL, ASOS_VARIABLES};
pub use asos::source::AsosSource;
pub use asos::window::RequestWindow;

pub use frame::MeteogramFrame;
/// Column names of [`MeteogramFrame`].
pub mod columns {
    pub use crate::frame::{
        AIR_TEMPERATURE, DATE_TIME, DEWPOINT, STATION, U_WIND, V_WIND, WIND_DIRECTION,
        WIND_SPEED,
    };
}

#[cfg(feature = "plotting")]
pub use plot::{plot_meteogram, MeteogramFigure};

pub use types::into_utc_trait::IntoUtcDateTime;
