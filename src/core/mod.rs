// Core algorithm exports
pub mod dedup;
pub mod distance;
pub mod matcher;
pub mod scoring;

pub use dedup::{prune_against, prune_tiers};
pub use distance::{haversine_distance, haversine_distance_with_radius, pair_distances, EARTH_RADIUS_MILES};
pub use matcher::{match_triplets, triplets_within, GroupingResult, Matcher, DEFAULT_TIERS};
pub use scoring::{calculate_triplet_score, rank_score, rank_triplets};
