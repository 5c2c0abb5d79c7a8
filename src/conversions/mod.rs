//! Elementary meteorological unit conversions.
//!
//! All functions accept anything implementing [`Elementwise`]: a single `f64`, an
//! `Option<f64>`, or `Vec`/array columns of those. Output shape always matches input
//! shape, so a whole observation column can be converted in one call.
//!
//! ```
//! use meteogram::{convert_to_wind_components, degf_to_degc};
//!
//! assert_eq!(degf_to_degc(212.0), 100.0);
//! assert_eq!(degf_to_degc(vec![32.0, 212.0]), vec![0.0, 100.0]);
//!
//! let (u, v) = convert_to_wind_components(0.0, 1.0).unwrap();
//! assert_eq!((u, v), (0.0, -1.0));
//! ```

pub mod elementwise;
pub mod error;

use crate::conversions::elementwise::Elementwise;
use crate::conversions::error::ConversionError;

/// Specific gas constant of dry air, J kg⁻¹ K⁻¹.
pub const DRY_AIR_GAS_CONSTANT: f64 = 287.058;
/// Specific heat of dry air at constant pressure, J kg⁻¹ K⁻¹.
pub const DRY_AIR_SPECIFIC_HEAT: f64 = 1005.0;
/// Poisson exponent `R_d / c_p`.
pub const POISSON_EXPONENT: f64 = DRY_AIR_GAS_CONSTANT / DRY_AIR_SPECIFIC_HEAT;
/// Reference pressure for potential temperature, hPa.
pub const REFERENCE_PRESSURE_HPA: f64 = 1000.0;

/// Converts degrees Fahrenheit to degrees Celsius.
///
/// # Examples
///
/// ```
/// use meteogram::degf_to_degc;
///
/// assert_eq!(degf_to_degc(32.0), 0.0);
/// assert_eq!(degf_to_degc([Some(212.0), None]), [Some(100.0), None]);
/// ```
pub fn degf_to_degc<T: Elementwise>(temperature_f: T) -> T {
    temperature_f.map_values(&mut |f| (f - 32.0) * 5.0 / 9.0)
}

/// Splits wind direction (degrees, direction the wind blows *from*) and speed into
/// eastward `u` and northward `v` components.
///
/// Directions are reduced modulo 360 first, so 0° and 360° give identical results.
/// Components carry the speed's units.
///
/// # Errors
///
/// * [`ConversionError::NegativeWindSpeed`] for a speed below zero.
/// * [`ConversionError::NonFinite`] for NaN or infinite inputs.
/// * [`ConversionError::LengthMismatch`] when `Vec` inputs differ in length.
pub fn convert_to_wind_components<T: Elementwise>(
    direction_deg: T,
    speed: T,
) -> Result<(T, T), ConversionError> {
    direction_deg.try_zip_values(speed, &mut wind_components)
}

fn wind_components(direction_deg: f64, speed: f64) -> Result<(f64, f64), ConversionError> {
    let direction_deg = finite("wind direction", direction_deg)?;
    let speed = finite("wind speed", speed)?;
    if speed < 0.0 {
        return Err(ConversionError::NegativeWindSpeed(speed));
    }
    let radians = direction_deg.rem_euclid(360.0).to_radians();
    Ok((-speed * radians.sin(), -speed * radians.cos()))
}

/// Potential temperature (K) of air at `pressure_hpa` with temperature `temperature_k`.
///
/// Both inputs must share a shape; the temperature column is divided by the Exner
/// function of the matching pressure.
///
/// # Errors
///
/// Fails for non-positive or non-finite pressure and non-finite temperature.
pub fn potential_temperature<T: Elementwise>(
    pressure_hpa: T,
    temperature_k: T,
) -> Result<T, ConversionError> {
    pressure_hpa.try_zip_map_values(temperature_k, &mut |p, t| {
        let t = finite("temperature", t)?;
        Ok(t / exner(p)?)
    })
}

/// Exner function `(p / 1000 hPa)^(R_d / c_p)`.
///
/// # Errors
///
/// Fails for non-positive or non-finite pressure.
pub fn exner_function<T: Elementwise>(pressure_hpa: T) -> Result<T, ConversionError> {
    pressure_hpa.try_map_values(&mut exner)
}

fn exner(pressure_hpa: f64) -> Result<f64, ConversionError> {
    let pressure_hpa = finite("pressure", pressure_hpa)?;
    if pressure_hpa <= 0.0 {
        return Err(ConversionError::NonPositivePressure(pressure_hpa));
    }
    Ok((pressure_hpa / REFERENCE_PRESSURE_HPA).powf(POISSON_EXPONENT))
}

fn finite(quantity: &'static str, value: f64) -> Result<f64, ConversionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConversionError::NonFinite { quantity, value })
    }
}
