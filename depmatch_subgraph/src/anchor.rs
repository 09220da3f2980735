use depmatch_graph::{GraphIndex, NodeId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::config::AnchorPolicy;
use crate::semantics::Accepts;

/// Choose the pattern node the search starts from.
///
/// Policies:
/// 1) First: lowest node id (insertion order).
/// 2) Rarest: the node accepted by the fewest target nodes. A rare anchor
///    prunes the outer loop over target anchors early. Ties go to the
///    lowest id.
/// 3) Random: uniform choice from a seeded RNG.
///
/// Returns None only for an empty pattern.
pub(crate) fn choose_pattern_anchor<PV, PE, TV, TE, S>(
    pattern: &GraphIndex<'_, PV, PE>,
    target: &GraphIndex<'_, TV, TE>,
    policy: AnchorPolicy,
) -> Option<NodeId>
where
    S: Accepts<PV, TV>,
{
    match policy {
        AnchorPolicy::First => pattern.node_ids().next(),
        AnchorPolicy::Rarest => pattern
            .nodes()
            .map(|(p_id, p_val)| {
                let accepted = target
                    .nodes()
                    .filter(|&(_, t_val)| <S as Accepts<PV, TV>>::accepts(p_val, t_val))
                    .count();
                (p_id, accepted)
            })
            .min_by_key(|&(p_id, accepted)| (accepted, p_id))
            .map(|(p_id, _)| p_id),
        AnchorPolicy::Random { seed } => {
            let mut rng = StdRng::seed_from_u64(seed);
            let ids: Vec<NodeId> = pattern.node_ids().collect();
            ids.choose(&mut rng).copied()
        }
    }
}
