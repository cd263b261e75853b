//! beat-planner core
//!
//! Builds a single-day visiting route for a field agent over the outlets of
//! one market/dealer combination, bounded by a fixed working-day budget.

pub mod traits;
pub mod error;
pub mod config;
pub mod outlet;
pub mod catalog;
pub mod start;
pub mod solver;
pub mod summary;
pub mod planner;
pub mod report;
pub mod haversine;
pub mod polyline;
pub mod textgen;
