//! Test fixtures for beat-planner.
//!
//! Provides:
//! - Real Coimbatore-area locations
//! - A builder for raw outlet rows

#![allow(dead_code)]

pub mod coimbatore_locations;

use beat_planner::outlet::RawOutletRow;

/// Builder for raw outlet rows with sensible defaults.
#[derive(Clone, Debug)]
pub struct OutletRow {
    row: RawOutletRow,
}

impl OutletRow {
    pub fn new(name: &str) -> Self {
        Self {
            row: RawOutletRow {
                name: Some(name.to_string()),
                market: Some("north".to_string()),
                dealer: Some("saleem brothers".to_string()),
                ..Default::default()
            },
        }
    }

    pub fn market(mut self, market: &str) -> Self {
        self.row.market = Some(market.to_string());
        self
    }

    pub fn dealer(mut self, dealer: &str) -> Self {
        self.row.dealer = Some(dealer.to_string());
        self
    }

    pub fn at(mut self, lat: f64, lng: f64) -> Self {
        self.row.latitude = Some(lat.to_string());
        self.row.longitude = Some(lng.to_string());
        self
    }

    pub fn raw_location(mut self, lat: &str, lng: &str) -> Self {
        self.row.latitude = Some(lat.to_string());
        self.row.longitude = Some(lng.to_string());
        self
    }

    pub fn salesperson_at(mut self, lat: f64, lng: f64) -> Self {
        self.row.salesperson_latitude = Some(lat.to_string());
        self.row.salesperson_longitude = Some(lng.to_string());
        self
    }

    pub fn visited(mut self, date: &str) -> Self {
        self.row.last_visited = Some(date.to_string());
        self
    }

    pub fn build(self) -> RawOutletRow {
        self.row
    }
}

/// Degrees of latitude covering `km` along a meridian.
pub fn km_to_lat_degrees(km: f64) -> f64 {
    km * 180.0 / (std::f64::consts::PI * beat_planner::haversine::EARTH_RADIUS_KM)
}
