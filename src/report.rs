//! Plain-text rendering of a plan, and the prompt built from it.

use std::fmt::Write;

use crate::planner::RoutePlan;
use crate::summary::format_duration;

const SYSTEM_PROMPT: &str = "\
You are a route planning assistant. You reformat a travel plan that has already been calculated.
The stops are given in their final visiting order together with the travel details for each stop.
Use only the data provided and follow the requested layout exactly.
Do not add explanations, commentary or summaries beyond what the layout asks for.";

/// Stop-by-stop rendering followed by the day's totals.
pub fn render_route_text(plan: &RoutePlan<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Market Name: {}", plan.market);
    let _ = writeln!(out, "Dealer Name: {}", plan.dealer);
    let _ = writeln!(out);
    out.push_str(&render_stops(plan));
    out.push_str(&render_totals(plan));
    out
}

fn render_stops(plan: &RoutePlan<'_>) -> String {
    let mut out = String::new();
    if plan.stops.is_empty() {
        let _ = writeln!(out, "No stops fit within the working day.");
        let _ = writeln!(out);
    }
    for (i, stop) in plan.stops.iter().enumerate() {
        let _ = writeln!(out, "Stop {}:", i + 1);
        let _ = writeln!(out, "  Shop Name: {}", stop.name());
        let _ = writeln!(out, "  Last Visit: {}", stop.outlet.last_visit_display());
        let _ = writeln!(out, "  Distance from Previous: {:.2} km", stop.distance_from_previous_km);
        let _ = writeln!(out, "  Travel Time: {:.0} min", stop.travel_minutes_from_previous);
        let _ = writeln!(out);
    }
    out
}

fn render_totals(plan: &RoutePlan<'_>) -> String {
    let summary = &plan.summary;
    let mut out = String::new();
    let _ = writeln!(out, "Total Distance: {:.2} km", summary.total_distance_km);
    let _ = writeln!(out, "Total Travel Time: {}", format_duration(summary.total_travel_minutes));
    let _ = writeln!(out, "Total Visit Time: {}", format_duration(summary.total_visit_minutes));
    let _ = writeln!(out, "Break Time: {}", format_duration(summary.total_break_minutes));
    let _ = writeln!(out, "Total Workday Time: {}", format_duration(summary.total_workday_minutes));
    out
}

/// `(system, user)` prompt pair for the text service.
pub fn build_prompt(plan: &RoutePlan<'_>) -> (String, String) {
    let mut user = String::new();
    let _ = writeln!(user, "TASK:");
    let _ = writeln!(user, "Format the route below exactly in this layout.");
    let _ = writeln!(user);
    let _ = writeln!(user, "LAYOUT:");
    let _ = writeln!(user, "- Market Name: {}", plan.market);
    let _ = writeln!(user, "- Dealer Name: {}", plan.dealer);
    let _ = writeln!(user, "1) First Stop");
    let _ = writeln!(user, "   Shop Name: [Shop Name]");
    let _ = writeln!(user, "   Last Visit: [Date]");
    let _ = writeln!(user, "   Distance from Previous: [km]");
    let _ = writeln!(user, "   Travel Time: [min]");
    let _ = writeln!(user, "[repeat for every stop]");
    let _ = writeln!(user);
    let _ = writeln!(user, "Then finish with:");
    let _ = writeln!(user, "- Total Distance: [km]");
    let _ = writeln!(user, "- Total Travel Time: [hr min]");
    let _ = writeln!(user, "- Total Visit Time: [hr min]");
    let _ = writeln!(user, "- Break Time: [hr min]");
    let _ = writeln!(user, "- Total Workday Time: [hr min]");
    let _ = writeln!(user);
    let _ = writeln!(user, "ROUTE DATA:");
    user.push_str(&render_stops(plan));
    let _ = writeln!(user, "SUMMARY TOTALS:");
    user.push_str(&render_totals(plan));
    let _ = writeln!(user);
    let _ = writeln!(user, "Do not add any explanation or extra text.");

    (SYSTEM_PROMPT.to_string(), user)
}
