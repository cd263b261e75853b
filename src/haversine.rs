//! Haversine great-circle distance.
//!
//! Straight-line distance over the Earth's surface. Ignores roads, so travel
//! time derived from it is an estimate at a constant average speed.

use crate::traits::DistanceProvider;

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate haversine distance between two `(lat, lng)` points in kilometers.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1.0 for antipodal points.
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Great-circle distance provider used for real route plans.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineDistance;

impl DistanceProvider for HaversineDistance {
    fn distance_km(&self, from: (f64, f64), to: (f64, f64)) -> f64 {
        haversine_km(from, to)
    }
}
