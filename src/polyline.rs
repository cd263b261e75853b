//! Map payload for a planned route.
//!
//! Rendering happens elsewhere; this module only produces what a renderer
//! needs: the closed point sequence and a labelled marker per point.

use serde::{Deserialize, Serialize};

use crate::solver::Stop;

pub const START_LABEL: &str = "Salesperson Start/End";

/// A polyline as decoded `(lat, lng)` coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Start, every stop in visiting order, then back to start.
    pub fn for_route(start: (f64, f64), stops: &[Stop<'_>]) -> Self {
        let mut points = Vec::with_capacity(stops.len() + 2);
        points.push(start);
        points.extend(stops.iter().map(|stop| stop.location));
        points.push(start);
        Self { points }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Start,
    Shop,
}

/// A labelled point on the route map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteMarker {
    pub label: String,
    pub lat: f64,
    pub lng: f64,
    pub kind: MarkerKind,
}

/// Start marker first, then `"<n>. <outlet>"` for each stop.
pub fn route_markers(start: (f64, f64), stops: &[Stop<'_>]) -> Vec<RouteMarker> {
    let start_marker = RouteMarker {
        label: START_LABEL.to_string(),
        lat: start.0,
        lng: start.1,
        kind: MarkerKind::Start,
    };

    std::iter::once(start_marker)
        .chain(stops.iter().enumerate().map(|(i, stop)| RouteMarker {
            label: format!("{}. {}", i + 1, stop.name()),
            lat: stop.location.0,
            lng: stop.location.1,
            kind: MarkerKind::Shop,
        }))
        .collect()
}
