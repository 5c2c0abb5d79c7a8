use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Pressure must be positive, got {0} hPa")]
    NonPositivePressure(f64),

    #[error("Non-finite {quantity} value: {value}")]
    NonFinite { quantity: &'static str, value: f64 },

    #[error("Wind speed must not be negative, got {0}")]
    NegativeWindSpeed(f64),

    #[error("Input lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
}
