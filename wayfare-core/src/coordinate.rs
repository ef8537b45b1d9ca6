//! Coordinates and the loosely typed values providers hand us.
//!
//! Provider payloads and the static catalog carry latitude and longitude as
//! either JSON numbers or strings, and sometimes as garbage. Only values that
//! parse into finite, in-range numbers become a [`Coordinate`].

use geo::Coord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A validated WGS84 position.
///
/// # Examples
///
/// ```
/// use wayfare_core::Coordinate;
///
/// # fn main() -> Result<(), wayfare_core::CoordinateError> {
/// let paris = Coordinate::new(48.8566, 2.3522)?;
/// assert_eq!(paris.as_coord().x, 2.3522);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, `-90.0..=90.0`.
    pub lat: f64,
    /// Longitude in degrees, `-180.0..=180.0`.
    pub lon: f64,
}

/// Errors returned by [`Coordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    /// Either component was NaN or infinite.
    #[error("coordinate components must be finite")]
    NonFinite,
    /// Latitude outside `-90.0..=90.0`.
    #[error("latitude {0} is out of range")]
    LatitudeOutOfRange(f64),
    /// Longitude outside `-180.0..=180.0`.
    #[error("longitude {0} is out of range")]
    LongitudeOutOfRange(f64),
}

impl Coordinate {
    /// Validates and constructs a [`Coordinate`].
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }

    /// Build a coordinate from a pair of raw values.
    ///
    /// Returns `None` when either value is missing or does not parse; this
    /// is the single filter deciding whether an entity can appear on a map.
    #[must_use]
    pub fn from_values(lat: Option<&CoordinateValue>, lon: Option<&CoordinateValue>) -> Option<Self> {
        let lat = lat?.parse()?;
        let lon = lon?.parse()?;
        Self::new(lat, lon).ok()
    }

    /// The position as a `geo` coordinate (`x = longitude`, `y = latitude`).
    #[must_use]
    pub const fn as_coord(&self) -> Coord<f64> {
        Coord {
            x: self.lon,
            y: self.lat,
        }
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        value.as_coord()
    }
}

/// A coordinate component as received from a provider or the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoordinateValue {
    /// A JSON number.
    Number(f64),
    /// A JSON string, possibly numeric.
    Text(String),
}

impl CoordinateValue {
    /// Parse the value into a finite number.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfare_core::CoordinateValue;
    ///
    /// assert_eq!(CoordinateValue::from("10").parse(), Some(10.0));
    /// assert_eq!(CoordinateValue::from("bad").parse(), None);
    /// ```
    #[must_use]
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            Self::Number(number) => *number,
            Self::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for CoordinateValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for CoordinateValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CoordinateValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
