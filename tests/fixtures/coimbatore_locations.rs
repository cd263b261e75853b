//! Coimbatore-area landmarks for realistic fixtures.
//!
//! Coordinates are approximate (to roughly 100 m), good enough for
//! great-circle routing tests.

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

/// Good start points for a salesperson.
pub const DEPOTS: &[Location] = &[
    Location::new("Gandhipuram Bus Stand", 11.0183, 76.9686),
    Location::new("Coimbatore Junction", 10.9960, 76.9671),
];

/// Retail areas spread across the city.
pub const SHOPPING_AREAS: &[Location] = &[
    Location::new("Cross Cut Road", 11.0176, 76.9592),
    Location::new("RS Puram", 11.0085, 76.9504),
    Location::new("Town Hall", 10.9937, 76.9610),
    Location::new("Ukkadam", 10.9880, 76.9610),
    Location::new("Peelamedu", 11.0268, 77.0227),
    Location::new("Saibaba Colony", 11.0250, 76.9420),
    Location::new("Singanallur", 10.9996, 77.0325),
    Location::new("Ganapathy", 11.0410, 76.9780),
    Location::new("Saravanampatti", 11.0790, 76.9980),
    Location::new("Kuniyamuthur", 10.9640, 76.9530),
    Location::new("Podanur", 10.9590, 76.9900),
    Location::new("Vadavalli", 11.0240, 76.9020),
];

/// Places well outside the city, for budget tests.
pub const OUT_OF_TOWN: &[Location] = &[
    Location::new("Pollachi", 10.6589, 77.0089),
    Location::new("Tiruppur", 11.1085, 77.3411),
    Location::new("Ooty", 11.4102, 76.6950),
    Location::new("Chennai Central", 13.0827, 80.2707),
];
