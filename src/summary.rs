//! Route totals and duration formatting.

use serde::Serialize;

use crate::solver::{RouteOptions, Stop};

/// Aggregate distance and time for one route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub stop_count: usize,
    pub total_distance_km: f64,
    pub total_travel_minutes: f64,
    pub total_visit_minutes: f64,
    pub total_break_minutes: f64,
    /// Travel + visits + breaks.
    pub total_workday_minutes: f64,
}

impl RouteSummary {
    pub fn from_stops(stops: &[Stop<'_>], options: &RouteOptions) -> Self {
        // Fold from +0.0; an empty f64 `sum` is -0.0.
        let total_distance_km = stops.iter().fold(0.0, |acc, stop| acc + stop.distance_from_previous_km);
        let total_travel_minutes = stops.iter().fold(0.0, |acc, stop| acc + stop.travel_minutes_from_previous);
        let total_visit_minutes = stops.len() as f64 * options.visit_minutes_per_stop;

        Self {
            stop_count: stops.len(),
            total_distance_km,
            total_travel_minutes,
            total_visit_minutes,
            total_break_minutes: options.total_break_minutes,
            total_workday_minutes: total_travel_minutes + total_visit_minutes + options.total_break_minutes,
        }
    }
}

/// Render minutes as `"<H> hr <M> min"`.
///
/// Zero parts are left out; zero, sub-minute and negative inputs give
/// `"0 min"`. Both parts are truncated, not rounded.
pub fn format_duration(minutes: f64) -> String {
    if minutes.is_nan() || minutes <= 0.0 {
        return "0 min".to_string();
    }

    let hours = (minutes / 60.0).floor() as u64;
    let mins = (minutes % 60.0).floor() as u64;

    let mut parts = Vec::with_capacity(2);
    if hours > 0 {
        parts.push(format!("{hours} hr"));
    }
    if mins > 0 {
        parts.push(format!("{mins} min"));
    }

    if parts.is_empty() {
        "0 min".to_string()
    } else {
        parts.join(" ")
    }
}
