//! College Crossref - groups medical, pharmacy and MFA programs by proximity
//!
//! This library loads a table of institutions, finds every triplet with one
//! institution per category whose members are all within a distance tier of
//! each other, and renders the ranked tiers as a report.

pub mod config;
pub mod core;
pub mod models;
pub mod pipeline;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, GroupingResult, distance::{haversine_distance, EARTH_RADIUS_MILES}};
pub use models::{Catalog, Category, Coordinate, Institution, ScoreMode, TierGroup, Triplet};
pub use pipeline::{run, RunOutcome, PipelineError};
