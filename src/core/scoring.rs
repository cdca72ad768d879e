use crate::core::distance::pair_distances;
use crate::models::{PairDistances, ScoreMode, Triplet};

/// Ranking score for a set of pairwise distances
///
/// Scoring formulas:
/// literal = ab + bc + ac / 3     # historical ordering, only `ac` is divided
/// mean    = (ab + bc + ac) / 3
///
/// Lower is better.
#[inline]
pub fn rank_score(distances: &PairDistances, mode: ScoreMode) -> f64 {
    match mode {
        ScoreMode::Literal => distances.ab + distances.bc + distances.ac / 3.0,
        ScoreMode::Mean => distances.mean(),
    }
}

/// Score a triplet directly from its members
pub fn calculate_triplet_score(triplet: &Triplet<'_>, mode: ScoreMode, radius: f64) -> f64 {
    rank_score(&pair_distances(triplet, radius), mode)
}

/// Sort triplets ascending by score
///
/// The sort is stable, so equal scores keep their emission order. Scores are
/// computed once per triplet rather than on every comparison.
pub fn rank_triplets<'a>(
    triplets: Vec<Triplet<'a>>,
    mode: ScoreMode,
    radius: f64,
) -> Vec<Triplet<'a>> {
    let mut scored: Vec<(f64, Triplet<'a>)> = triplets
        .into_iter()
        .map(|triplet| (calculate_triplet_score(&triplet, mode, radius), triplet))
        .collect();

    scored.sort_by(|(a, _), (b, _)| a.total_cmp(b));

    scored.into_iter().map(|(_, triplet)| triplet).collect()
}
