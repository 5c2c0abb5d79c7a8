use crate::asos::error::{AsosDataError, RequestError};
use crate::conversions::error::ConversionError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeteogramError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    AsosData(#[from] AsosDataError),

    #[error("Polars operation failed: {0}")]
    PolarsError(#[from] PolarsError),

    #[error("No observations to plot between {start} and {end}")]
    NoDataInWindow { start: String, end: String },
}
