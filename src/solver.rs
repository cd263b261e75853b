//! Route builder: greedy nearest-neighbor under a daily time ceiling.
//!
//! From the current position the closest remaining outlet is taken next, as
//! long as travelling there and visiting it still fits in the day. The first
//! outlet that does not fit ends the route; the rest are never tried.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::outlet::Outlet;
use crate::traits::DistanceProvider;

/// Fixed per-plan timing constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteOptions {
    /// Minutes spent at each outlet.
    pub visit_minutes_per_stop: f64,
    /// Total break time in the day, in minutes.
    pub total_break_minutes: f64,
    /// Assumed average travel speed in km/h.
    pub average_speed_kmh: f64,
    /// Length of the working day in minutes, breaks included.
    pub total_workday_minutes: f64,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            visit_minutes_per_stop: 20.0,
            total_break_minutes: 75.0,
            average_speed_kmh: 25.0,
            total_workday_minutes: 9.0 * 60.0,
        }
    }
}

impl RouteOptions {
    /// Minutes available for travel and visits.
    pub fn available_minutes(&self) -> f64 {
        self.total_workday_minutes - self.total_break_minutes
    }

    /// Travel time in minutes for a distance at the average speed.
    pub fn travel_minutes(&self, distance_km: f64) -> f64 {
        (distance_km / self.average_speed_kmh) * 60.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("visit_minutes_per_stop", self.visit_minutes_per_stop),
            ("total_break_minutes", self.total_break_minutes),
            ("average_speed_kmh", self.average_speed_kmh),
            ("total_workday_minutes", self.total_workday_minutes),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::Invalid(format!("{name} must be a finite number")));
        }
        if self.average_speed_kmh <= 0.0 {
            return Err(ConfigError::Invalid("average_speed_kmh must be positive".to_string()));
        }
        if self.visit_minutes_per_stop < 0.0 {
            return Err(ConfigError::Invalid("visit_minutes_per_stop must not be negative".to_string()));
        }
        if self.total_break_minutes < 0.0 {
            return Err(ConfigError::Invalid("total_break_minutes must not be negative".to_string()));
        }
        if self.total_workday_minutes <= self.total_break_minutes {
            return Err(ConfigError::Invalid(
                "total_workday_minutes must exceed total_break_minutes".to_string(),
            ));
        }
        Ok(())
    }
}

/// An outlet that can be routed to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    pub outlet: &'a Outlet,
    pub location: (f64, f64),
}

impl<'a> Candidate<'a> {
    /// `None` when the outlet lacks a usable latitude or longitude.
    pub fn from_outlet(outlet: &'a Outlet) -> Option<Self> {
        outlet.location().map(|location| Self { outlet, location })
    }
}

/// Routable candidates, in input order. Outlets without coordinates are skipped.
pub fn candidates_from<'a>(outlets: impl IntoIterator<Item = &'a Outlet>) -> Vec<Candidate<'a>> {
    outlets.into_iter().filter_map(Candidate::from_outlet).collect()
}

/// One committed visit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop<'a> {
    pub outlet: &'a Outlet,
    pub location: (f64, f64),
    pub distance_from_previous_km: f64,
    pub travel_minutes_from_previous: f64,
}

impl Stop<'_> {
    pub fn name(&self) -> &str {
        &self.outlet.name
    }

    /// Travel plus visit time charged for this stop.
    pub fn step_minutes(&self, options: &RouteOptions) -> f64 {
        self.travel_minutes_from_previous + options.visit_minutes_per_stop
    }
}

/// Build the visiting order starting from `start`.
///
/// Runs at most `candidates.len()` iterations. The result may be empty when
/// even the nearest candidate does not fit in the day.
pub fn build_route<'a, D>(
    candidates: &[Candidate<'a>],
    start: (f64, f64),
    options: &RouteOptions,
    distance: &D,
) -> Vec<Stop<'a>>
where
    D: DistanceProvider + ?Sized,
{
    let available = options.available_minutes();
    let mut remaining = candidates.to_vec();
    let mut route = Vec::with_capacity(remaining.len());
    let mut current = start;
    let mut used = 0.0;

    while !remaining.is_empty() && used < available {
        let Some((index, distance_km)) = nearest(&remaining, current, distance) else {
            break;
        };

        let travel_minutes = options.travel_minutes(distance_km);
        let step = travel_minutes + options.visit_minutes_per_stop;

        if used + step > available {
            debug!(
                outlet = %remaining[index].outlet.name,
                step,
                used,
                available,
                "Nearest outlet does not fit, route complete"
            );
            break;
        }

        let candidate = remaining.remove(index);
        debug!(outlet = %candidate.outlet.name, distance_km, travel_minutes, "Committed stop");

        used += step;
        current = candidate.location;
        route.push(Stop {
            outlet: candidate.outlet,
            location: candidate.location,
            distance_from_previous_km: distance_km,
            travel_minutes_from_previous: travel_minutes,
        });
    }

    route
}

/// Index and distance of the closest candidate. Ties go to the earliest entry.
fn nearest<D>(candidates: &[Candidate<'_>], from: (f64, f64), distance: &D) -> Option<(usize, f64)>
where
    D: DistanceProvider + ?Sized,
{
    let mut best: Option<(usize, f64)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let km = distance.distance_km(from, candidate.location);
        match best {
            Some((_, best_km)) if km >= best_km => {}
            _ => best = Some((index, km)),
        }
    }
    best
}
