//! Shape-preserving application of scalar formulas.
//!
//! Every conversion in [`crate::conversions`] is written once for a single `f64`
//! and lifted onto whole columns through [`Elementwise`]. Implementations exist for
//! plain scalars, `Option<f64>` (missing observations stay missing), `Vec<T>` and
//! fixed-size arrays `[T; N]`, nested arbitrarily.

use crate::conversions::error::ConversionError;

/// A value or homogeneous collection of values that a scalar formula can be applied to.
pub trait Elementwise: Sized {
    /// Applies an infallible formula to every element.
    fn map_values<F>(self, f: &mut F) -> Self
    where
        F: FnMut(f64) -> f64;

    /// Applies a fallible formula to every element, stopping at the first error.
    fn try_map_values<F>(self, f: &mut F) -> Result<Self, ConversionError>
    where
        F: FnMut(f64) -> Result<f64, ConversionError>;

    /// Combines two inputs of the same shape into one output of that shape.
    fn try_zip_map_values<F>(self, other: Self, f: &mut F) -> Result<Self, ConversionError>
    where
        F: FnMut(f64, f64) -> Result<f64, ConversionError>;

    /// Combines two inputs of the same shape into two outputs of that shape.
    fn try_zip_values<F>(self, other: Self, f: &mut F) -> Result<(Self, Self), ConversionError>
    where
        F: FnMut(f64, f64) -> Result<(f64, f64), ConversionError>;
}

impl Elementwise for f64 {
    fn map_values<F>(self, f: &mut F) -> Self
    where
        F: FnMut(f64) -> f64,
    {
        f(self)
    }

    fn try_map_values<F>(self, f: &mut F) -> Result<Self, ConversionError>
    where
        F: FnMut(f64) -> Result<f64, ConversionError>,
    {
        f(self)
    }

    fn try_zip_map_values<F>(self, other: Self, f: &mut F) -> Result<Self, ConversionError>
    where
        F: FnMut(f64, f64) -> Result<f64, ConversionError>,
    {
        f(self, other)
    }

    fn try_zip_values<F>(self, other: Self, f: &mut F) -> Result<(Self, Self), ConversionError>
    where
        F: FnMut(f64, f64) -> Result<(f64, f64), ConversionError>,
    {
        f(self, other)
    }
}

impl Elementwise for Option<f64> {
    fn map_values<F>(self, f: &mut F) -> Self
    where
        F: FnMut(f64) -> f64,
    {
        self.map(f)
    }

    fn try_map_values<F>(self, f: &mut F) -> Result<Self, ConversionError>
    where
        F: FnMut(f64) -> Result<f64, ConversionError>,
    {
        self.map(f).transpose()
    }

    fn try_zip_map_values<F>(self, other: Self, f: &mut F) -> Result<Self, ConversionError>
    where
        F: FnMut(f64, f64) -> Result<f64, ConversionError>,
    {
        match (self, other) {
            (Some(a), Some(b)) => f(a, b).map(Some),
            _ => Ok(None),
        }
    }

    /// A missing value on either side makes both outputs missing.
    fn try_zip_values<F>(self, other: Self, f: &mut F) -> Result<(Self, Self), ConversionError>
    where
        F: FnMut(f64, f64) -> Result<(f64, f64), ConversionError>,
    {
        match (self, other) {
            (Some(a), Some(b)) => f(a, b).map(|(x, y)| (Some(x), Some(y))),
            _ => Ok((None, None)),
        }
    }
}

impl<T: Elementwise> Elementwise for Vec<T> {
    fn map_values<F>(self, f: &mut F) -> Self
    where
        F: FnMut(f64) -> f64,
    {
        self.into_iter().map(|v| v.map_values(&mut *f)).collect()
    }

    fn try_map_values<F>(self, f: &mut F) -> Result<Self, ConversionError>
    where
        F: FnMut(f64) -> Result<f64, ConversionError>,
    {
        self.into_iter().map(|v| v.try_map_values(&mut *f)).collect()
    }

    fn try_zip_map_values<F>(self, other: Self, f: &mut F) -> Result<Self, ConversionError>
    where
        F: FnMut(f64, f64) -> Result<f64, ConversionError>,
    {
        check_lengths(self.len(), other.len())?;
        self.into_iter()
            .zip(other)
            .map(|(a, b)| a.try_zip_map_values(b, &mut *f))
            .collect()
    }

    fn try_zip_values<F>(self, other: Self, f: &mut F) -> Result<(Self, Self), ConversionError>
    where
        F: FnMut(f64, f64) -> Result<(f64, f64), ConversionError>,
    {
        check_lengths(self.len(), other.len())?;
        let mut first = Vec::with_capacity(self.len());
        let mut second = Vec::with_capacity(self.len());
        for (a, b) in self.into_iter().zip(other) {
            let (x, y) = a.try_zip_values(b, &mut *f)?;
            first.push(x);
            second.push(y);
        }
        Ok((first, second))
    }
}

impl<T: Elementwise, const N: usize> Elementwise for [T; N] {
    fn map_values<F>(self, f: &mut F) -> Self
    where
        F: FnMut(f64) -> f64,
    {
        self.map(|v| v.map_values(&mut *f))
    }

    fn try_map_values<F>(self, f: &mut F) -> Result<Self, ConversionError>
    where
        F: FnMut(f64) -> Result<f64, ConversionError>,
    {
        let mapped = Vec::from(self).try_map_values(f)?;
        into_array(mapped)
    }

    fn try_zip_map_values<F>(self, other: Self, f: &mut F) -> Result<Self, ConversionError>
    where
        F: FnMut(f64, f64) -> Result<f64, ConversionError>,
    {
        let combined = Vec::from(self).try_zip_map_values(Vec::from(other), f)?;
        into_array(combined)
    }

    fn try_zip_values<F>(self, other: Self, f: &mut F) -> Result<(Self, Self), ConversionError>
    where
        F: FnMut(f64, f64) -> Result<(f64, f64), ConversionError>,
    {
        let (first, second) = Vec::from(self).try_zip_values(Vec::from(other), f)?;
        Ok((into_array(first)?, into_array(second)?))
    }
}

fn check_lengths(left: usize, right: usize) -> Result<(), ConversionError> {
    if left != right {
        return Err(ConversionError::LengthMismatch { left, right });
    }
    Ok(())
}

fn into_array<T, const N: usize>(values: Vec<T>) -> Result<[T; N], ConversionError> {
    values
        .try_into()
        .map_err(|rest: Vec<T>| ConversionError::LengthMismatch {
            left: N,
            right: rest.len(),
        })
}
