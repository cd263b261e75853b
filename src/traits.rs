//! Seams between the route engine and its collaborators.
//!
//! Kept deliberately small: a distance metric for the route builder and a
//! text formatter for the narrative report.

use crate::error::FormatterError;

/// Provides the distance in kilometers between two `(lat, lng)` points.
///
/// Implementations must be pure: the same inputs always yield the same
/// distance, otherwise route construction is not deterministic.
pub trait DistanceProvider {
    fn distance_km(&self, from: (f64, f64), to: (f64, f64)) -> f64;
}

/// Turns a pre-computed route rendering into a narrative report.
///
/// This is usually a remote, slow and fallible service. Callers treat any
/// error as non-fatal.
pub trait ReportFormatter {
    fn format_report(&self, system_prompt: &str, user_prompt: &str) -> Result<String, FormatterError>;
}
