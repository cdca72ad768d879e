use std::collections::HashSet;

use crate::models::{Triplet, TripletKey};

/// Remove from `looser` every triplet whose key appears in `tighter`
///
/// Survivors keep their relative order.
pub fn prune_against<'a>(looser: &[Triplet<'a>], tighter: &[Triplet<'a>]) -> Vec<Triplet<'a>> {
    let seen: HashSet<TripletKey> = tighter.iter().map(Triplet::key).collect();

    looser
        .iter()
        .filter(|triplet| !seen.contains(&triplet.key()))
        .copied()
        .collect()
}

/// Partition raw per-tier candidates so each triplet is kept only in the
/// tightest tier it qualifies for
///
/// `raw` must be ordered tightest first. The first tier is returned as is;
/// every later tier is pruned against the unpruned candidates of the tier
/// directly before it. Since a looser tier's candidates always contain the
/// tighter tier's, this is equivalent to pruning against all tighter tiers.
pub fn prune_tiers<'a>(raw: Vec<Vec<Triplet<'a>>>) -> Vec<Vec<Triplet<'a>>> {
    let mut pruned = Vec::with_capacity(raw.len());

    for (i, candidates) in raw.iter().enumerate() {
        if i == 0 {
            pruned.push(candidates.clone());
            continue;
        }

        let kept = prune_against(candidates, &raw[i - 1]);
        tracing::debug!(
            "Tier {} pruned {} of {} triplets",
            i,
            candidates.len() - kept.len(),
            candidates.len()
        );
        pruned.push(kept);
    }

    pruned
}
