//! Input checks applied before a request reaches the query engine.
//!
//! The analytics functions accept any finite number, so this is the only
//! place coordinates and radii are range-checked.

use thiserror::Error;

/// A request parameter that cannot be used.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Neither a full coordinate pair nor an address was supplied.
    #[error("Provide both lat and lng, or an address")]
    MissingLocation,

    /// A coordinate is not finite or outside its valid range.
    #[error("{name} must be a finite number between {min} and {max}")]
    OutOfRange {
        /// Parameter name.
        name: &'static str,
        /// Smallest accepted value.
        min: f64,
        /// Largest accepted value.
        max: f64,
    },

    /// A distance or weight is negative or not finite.
    #[error("{name} must be a finite, non-negative number")]
    NotNonNegative {
        /// Parameter name.
        name: &'static str,
    },

    /// A required text parameter is blank.
    #[error("{name} must not be empty")]
    Empty {
        /// Parameter name.
        name: &'static str,
    },
}

/// Checks that `lat`/`lng` are finite WGS84 coordinates.
///
/// # Errors
///
/// Returns [`ValidationError::OutOfRange`] naming the first bad coordinate.
pub fn check_coordinates(lat: f64, lng: f64) -> Result<(), ValidationError> {
    check_range("lat", lat, -90.0, 90.0)?;
    check_range("lng", lng, -180.0, 180.0)
}

fn check_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange { name, min, max })
    }
}

/// Returns `value`, or `default` when absent, after checking it is a
/// finite non-negative number.
///
/// # Errors
///
/// Returns [`ValidationError::NotNonNegative`] for negative or non-finite
/// values.
pub fn non_negative(
    name: &'static str,
    value: Option<f64>,
    default: f64,
) -> Result<f64, ValidationError> {
    let value = value.unwrap_or(default);
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotNonNegative { name })
    }
}

/// Converts a signed count parameter, clamping negatives to zero.
#[must_use]
pub fn clamp_count(value: Option<i64>, default: usize) -> usize {
    value.map_or(default, |v| usize::try_from(v).unwrap_or(0))
}

/// Trims `value` and rejects it when nothing is left.
///
/// # Errors
///
/// Returns [`ValidationError::Empty`] for blank input.
pub fn non_blank<'a>(name: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Empty { name })
    } else {
        Ok(trimmed)
    }
}
