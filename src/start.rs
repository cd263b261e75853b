//! Start point selection.

use serde::Serialize;

use crate::outlet::Outlet;

/// Where the agent's day starts and ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Outlet whose salesperson coordinates were used.
    pub source_outlet: String,
}

impl StartPoint {
    pub fn location(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// First outlet, in priority order, that carries a usable salesperson
/// location. `None` means no plan can be made.
pub fn locate_start<'a>(prioritized: impl IntoIterator<Item = &'a Outlet>) -> Option<StartPoint> {
    prioritized.into_iter().find_map(|outlet| {
        let (latitude, longitude) = outlet.salesperson_location()?;
        Some(StartPoint {
            latitude,
            longitude,
            source_outlet: outlet.name.clone(),
        })
    })
}
