use crate::core::{
    dedup::prune_tiers,
    distance::{pair_distances, EARTH_RADIUS_MILES},
    scoring::rank_triplets,
};
use crate::models::{Catalog, Institution, ScoreMode, TierGroup, Triplet};

/// Default tier thresholds in miles, tightest first
pub const DEFAULT_TIERS: [f64; 4] = [25.0, 50.0, 75.0, 100.0];

/// Result of the grouping process
#[derive(Debug)]
pub struct GroupingResult<'a> {
    /// Ranked, deduplicated tiers in increasing threshold order
    pub tiers: Vec<TierGroup<'a>>,
    /// Combinations examined per tier
    pub total_combinations: usize,
}

impl<'a> GroupingResult<'a> {
    pub fn total_triplets(&self) -> usize {
        self.tiers.iter().map(TierGroup::len).sum()
    }
}

/// Main grouping orchestrator
///
/// # Pipeline Stages
/// 1. Triplet enumeration, once per tier threshold
/// 2. Cross-tier deduplication
/// 3. Ranking within each tier
#[derive(Debug, Clone)]
pub struct Matcher {
    tiers: Vec<f64>,
    earth_radius: f64,
    score_mode: ScoreMode,
}

impl Matcher {
    /// `tiers` must be positive and strictly increasing; `Settings` validates
    /// this before a matcher is built from configuration.
    pub fn new(tiers: Vec<f64>, earth_radius: f64, score_mode: ScoreMode) -> Self {
        Self {
            tiers,
            earth_radius,
            score_mode,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_TIERS.to_vec(), EARTH_RADIUS_MILES, ScoreMode::default())
    }

    pub fn tiers(&self) -> &[f64] {
        &self.tiers
    }

    pub fn score_mode(&self) -> ScoreMode {
        self.score_mode
    }

    pub fn earth_radius(&self) -> f64 {
        self.earth_radius
    }

    /// Group a catalog into ranked, non-overlapping distance tiers
    ///
    /// # Arguments
    /// * `catalog` - Institutions split by category
    ///
    /// # Returns
    /// GroupingResult borrowing from `catalog`
    pub fn find_groupings<'a>(&self, catalog: &'a Catalog) -> GroupingResult<'a> {
        let total_combinations = catalog.combinations();

        // Stage 1: raw candidates per tier
        let raw: Vec<Vec<Triplet<'a>>> = self
            .tiers
            .iter()
            .map(|&threshold| {
                let candidates: Vec<Triplet<'a>> = triplets_within(
                    &catalog.medical,
                    &catalog.pharmacy,
                    &catalog.mfa,
                    threshold,
                    self.earth_radius,
                )
                .collect();
                tracing::debug!(
                    "Found {} raw triplets within {} of {} combinations",
                    candidates.len(),
                    threshold,
                    total_combinations
                );
                candidates
            })
            .collect();

        // Stage 2 & 3: dedup across tiers, then rank each tier
        let tiers = prune_tiers(raw)
            .into_iter()
            .zip(&self.tiers)
            .map(|(triplets, &threshold)| TierGroup {
                threshold,
                triplets: rank_triplets(triplets, self.score_mode, self.earth_radius),
            })
            .collect();

        GroupingResult {
            tiers,
            total_combinations,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Lazily enumerate every (medical, pharmacy, mfa) triplet whose three
/// pairwise distances are all strictly below `threshold`
///
/// Iteration order is the nested cross product with `medical` outermost and
/// `mfa` innermost. No pruning or early exit: every combination is tested.
pub fn triplets_within<'a>(
    medical: &'a [Institution],
    pharmacy: &'a [Institution],
    mfa: &'a [Institution],
    threshold: f64,
    radius: f64,
) -> impl Iterator<Item = Triplet<'a>> + 'a {
    medical.iter().flat_map(move |a| {
        pharmacy.iter().flat_map(move |b| {
            mfa.iter().filter_map(move |c| {
                let triplet = Triplet::new(a, b, c);
                let distances = pair_distances(&triplet, radius);
                if !distances.all_below(threshold) {
                    return None;
                }
                tracing::trace!(
                    "Triplet {:?} within {}: ab={:.4} bc={:.4} ac={:.4}",
                    triplet.key(),
                    threshold,
                    distances.ab,
                    distances.bc,
                    distances.ac
                );
                Some(triplet)
            })
        })
    })
}

/// Collect every triplet within `threshold` miles, in emission order
pub fn match_triplets<'a>(
    medical: &'a [Institution],
    pharmacy: &'a [Institution],
    mfa: &'a [Institution],
    threshold: f64,
) -> Vec<Triplet<'a>> {
    triplets_within(medical, pharmacy, mfa, threshold, EARTH_RADIUS_MILES).collect()
}
