//! Geodesic helpers for itinerary planning.
//!
//! Pure distance, travel-time and radius-sizing functions. Everything here
//! is total: no failure modes, no I/O.

use serde::{Deserialize, Serialize};

use crate::domain::Coordinate;

/// Earth radius in kilometers (mean radius, WGS84).
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Fraction of the time budget assumed to be spent travelling rather than
/// on site when sizing a search radius.
const TRAVEL_BUDGET_FRACTION: f64 = 0.7;

/// How a visitor moves between stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Walking,
    Cycling,
    Driving,
}

impl TransportMode {
    /// Assumed average speed for this mode, in km/h.
    pub fn average_speed_kmh(self) -> f64 {
        match self {
            TransportMode::Walking => 5.0,
            TransportMode::Cycling => 15.0,
            TransportMode::Driving => 50.0,
        }
    }
}

impl Default for TransportMode {
    fn default() -> Self {
        TransportMode::Walking
    }
}

/// Great-circle distance between two coordinates in kilometers.
///
/// Uses the haversine formula. Symmetric, and zero for identical points.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.lat().to_radians();
    let lat_b = b.lat().to_radians();
    let delta_lat = (b.lat() - a.lat()).to_radians();
    let delta_lng = (b.lng() - a.lng()).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Travel time in whole minutes for a distance at a given speed.
pub fn travel_time_minutes(distance_km: f64, speed_kmh: f64) -> u32 {
    (distance_km / speed_kmh * 60.0).round() as u32
}

/// Search radius for a transport mode and total time budget.
///
/// Reserves 30% of the budget for on-site time, then halves the reachable
/// distance to allow for the return leg.
pub fn search_radius_km(mode: TransportMode, duration_minutes: u32) -> f64 {
    let hours = f64::from(duration_minutes) / 60.0;
    mode.average_speed_kmh() * hours * TRAVEL_BUDGET_FRACTION / 2.0
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_coordinate() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0)
            .prop_map(|(lat, lng)| Coordinate::new(lat, lng).unwrap())
    }

    proptest! {
        /// distance_km(a, a) == 0 for any coordinate.
        #[test]
        fn zero_distance_to_self(a in any_coordinate()) {
            prop_assert!(distance_km(a, a) < 1e-9);
        }

        /// distance_km is symmetric.
        #[test]
        fn symmetric(a in any_coordinate(), b in any_coordinate()) {
            let ab = distance_km(a, b);
            let ba = distance_km(b, a);
            prop_assert!((ab - ba).abs() < 1e-6);
        }

        /// Distances are non-negative and bounded by half the Earth's
        /// circumference.
        #[test]
        fn bounded(a in any_coordinate(), b in any_coordinate()) {
            let d = distance_km(a, b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= EARTH_RADIUS_KM * std::f64::consts::PI + 1.0);
        }
    }
}
