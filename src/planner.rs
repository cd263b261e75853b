//! Plan pipeline: request → filtered outlets → start point → route → totals.

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::{OutletCatalog, prioritize};
use crate::error::{FormatterError, InputError};
use crate::haversine::HaversineDistance;
use crate::outlet::normalize_text;
use crate::polyline::{Polyline, RouteMarker, route_markers};
use crate::report;
use crate::solver::{RouteOptions, Stop, build_route, candidates_from};
use crate::start::{StartPoint, locate_start};
use crate::summary::RouteSummary;
use crate::traits::{DistanceProvider, ReportFormatter};

const BLOCKED_PLACEHOLDER: &str = "Report generation failed because the content was blocked by safety filters. \
Please check the data for any sensitive information.";

const API_FAILURE_PLACEHOLDER: &str = "Could not generate the final report due to an API error. \
This is often caused by exceeding the usage quota. Please try again later or check your API plan.";

/// Normalized market/dealer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanRequest {
    market: String,
    dealer: String,
}

impl PlanRequest {
    /// Collapse whitespace, trim and lowercase both fields. Both are required.
    pub fn new(market: &str, dealer: &str) -> Result<Self, InputError> {
        let market = normalize_text(market);
        let dealer = normalize_text(dealer);

        if market.is_empty() {
            return Err(InputError::EmptyMarket);
        }
        if dealer.is_empty() {
            return Err(InputError::EmptyDealer);
        }
        Ok(Self { market, dealer })
    }

    pub fn market(&self) -> &str {
        &self.market
    }

    pub fn dealer(&self) -> &str {
        &self.dealer
    }
}

/// Why no route was produced. None of these are failures of the engine.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoRouteReason {
    #[error("no outlets found for the market")]
    NoMarketMatch,

    #[error("no outlets found for the market and dealer combination")]
    NoDealerMatch,

    #[error("no matching outlets have valid coordinates")]
    NoCandidatesWithCoordinates,

    #[error("no valid salesperson start coordinates were found")]
    NoValidStartPoint,
}

impl NoRouteReason {
    pub const fn code(self) -> &'static str {
        match self {
            NoRouteReason::NoMarketMatch => "no-market-match",
            NoRouteReason::NoDealerMatch => "no-dealer-match",
            NoRouteReason::NoCandidatesWithCoordinates => "no-candidates-with-coordinates",
            NoRouteReason::NoValidStartPoint => "no-valid-start-point",
        }
    }
}

/// A planned day. Borrows outlets from the catalog it was planned against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan<'a> {
    pub market: String,
    pub dealer: String,
    pub start: StartPoint,
    pub stops: Vec<Stop<'a>>,
    pub summary: RouteSummary,
}

impl RoutePlan<'_> {
    pub fn polyline(&self) -> Polyline {
        Polyline::for_route(self.start.location(), &self.stops)
    }

    pub fn markers(&self) -> Vec<RouteMarker> {
        route_markers(self.start.location(), &self.stops)
    }
}

/// Plan a day using great-circle distances.
pub fn plan<'a>(
    catalog: &'a OutletCatalog,
    request: &PlanRequest,
    options: &RouteOptions,
) -> Result<RoutePlan<'a>, NoRouteReason> {
    plan_with_distance(catalog, request, options, &HaversineDistance)
}

pub fn plan_with_distance<'a, D>(
    catalog: &'a OutletCatalog,
    request: &PlanRequest,
    options: &RouteOptions,
    distance: &D,
) -> Result<RoutePlan<'a>, NoRouteReason>
where
    D: DistanceProvider + ?Sized,
{
    let (market, dealer) = (request.market(), request.dealer());
    info!(%market, %dealer, "Generating route");

    let filtered = catalog.filter(market, dealer);
    info!(matched = filtered.len(), "Filtered outlets");
    if filtered.is_empty() {
        let reason = if catalog.matches_market(market) {
            NoRouteReason::NoDealerMatch
        } else {
            NoRouteReason::NoMarketMatch
        };
        warn!(%market, %dealer, reason = reason.code(), "No outlets matched");
        return Err(reason);
    }

    let prioritized = prioritize(filtered);
    info!(unique = prioritized.len(), "Prioritized outlets by last visit");

    let Some(start) = locate_start(prioritized.iter().copied()) else {
        warn!(%market, %dealer, "No valid salesperson start coordinates");
        return Err(NoRouteReason::NoValidStartPoint);
    };
    info!(
        lat = start.latitude,
        lng = start.longitude,
        source = %start.source_outlet,
        "Selected start point"
    );

    let candidates = candidates_from(prioritized.iter().copied());
    info!(candidates = candidates.len(), "Prepared outlets with valid coordinates");
    if candidates.is_empty() {
        warn!(%market, %dealer, "No outlets with valid coordinates");
        return Err(NoRouteReason::NoCandidatesWithCoordinates);
    }

    let stops = build_route(&candidates, start.location(), options, distance);
    let summary = RouteSummary::from_stops(&stops, options);
    info!(
        stops = summary.stop_count,
        distance_km = summary.total_distance_km,
        workday_minutes = summary.total_workday_minutes,
        "Route complete"
    );

    Ok(RoutePlan {
        market: market.to_string(),
        dealer: dealer.to_string(),
        start,
        stops,
        summary,
    })
}

/// Plan independent requests in parallel against one shared catalog.
/// Results are in request order.
pub fn plan_many<'a>(
    catalog: &'a OutletCatalog,
    requests: &[PlanRequest],
    options: &RouteOptions,
) -> Vec<Result<RoutePlan<'a>, NoRouteReason>> {
    requests
        .par_iter()
        .map(|request| plan(catalog, request, options))
        .collect()
}

/// Narrative report text, or why it could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Narrative {
    Generated { text: String },
    Failed { reason: String, placeholder: String },
}

impl Narrative {
    pub fn failed(err: &FormatterError) -> Self {
        let placeholder = match err {
            FormatterError::Blocked(_) => BLOCKED_PLACEHOLDER,
            _ => API_FAILURE_PLACEHOLDER,
        };
        Narrative::Failed {
            reason: err.to_string(),
            placeholder: placeholder.to_string(),
        }
    }

    /// Text to show the user: the report, or the placeholder.
    pub fn text(&self) -> &str {
        match self {
            Narrative::Generated { text } => text,
            Narrative::Failed { placeholder, .. } => placeholder,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Narrative::Generated { .. })
    }
}

/// Ask the formatter for a narrative report. Never fails: formatter errors
/// become [`Narrative::Failed`] and the plan is untouched.
pub fn narrate<F>(plan: &RoutePlan<'_>, formatter: &F) -> Narrative
where
    F: ReportFormatter + ?Sized,
{
    let (system_prompt, user_prompt) = report::build_prompt(plan);
    info!("Sending route to text service for formatting");

    match formatter.format_report(&system_prompt, &user_prompt) {
        Ok(text) => Narrative::Generated {
            text: text.trim().to_string(),
        },
        Err(err) => {
            warn!(error = %err, "Report formatting failed");
            Narrative::failed(&err)
        }
    }
}
