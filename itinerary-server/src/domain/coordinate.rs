//! Geographic coordinate value type.

use std::fmt;

use serde::Serialize;

/// Error returned when constructing an out-of-range coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

/// A validated WGS84 coordinate.
///
/// Latitude is in [-90, 90], longitude in [-180, 180], and both components
/// are finite. Any `Coordinate` value is valid by construction.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::Coordinate;
///
/// let algiers = Coordinate::new(36.75, 3.06).unwrap();
/// assert_eq!(algiers.lat(), 36.75);
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    /// Construct a coordinate, rejecting out-of-range or non-finite input.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(InvalidCoordinate {
                reason: "components must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate {
                reason: "latitude must be in [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidCoordinate {
                reason: "longitude must be in [-180, 180]",
            });
        }
        Ok(Coordinate { lat, lng })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.lat, self.lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}
