#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use std::collections::BTreeSet;

use depmatch_graph::{GraphIndex, Indexed, IndexedGraph, NodeId};
use depmatch_subgraph::{MatchError, PayloadMatcher};
use itertools::Itertools;
use quickcheck::{Arbitrary, Gen, quickcheck};

mod common;

use common::setup_test_logging;

type Token = Indexed<u8>;
type Sentence = IndexedGraph<Token, Token>;

/// Random small graph: at most `N` vertices, payloads from a two-letter
/// alphabet so that many embeddings exist.
#[derive(Clone, Debug)]
struct SmallGraph<const N: usize> {
    payloads: Vec<u8>,
    edges: Vec<(usize, usize, u8)>,
}

impl<const N: usize> Arbitrary for SmallGraph<N> {
    fn arbitrary(g: &mut Gen) -> Self {
        let n = usize::arbitrary(g) % (N + 1);
        let payloads: Vec<u8> = (0..n).map(|_| u8::arbitrary(g) % 2).collect();
        let edge_count = if n == 0 { 0 } else { usize::arbitrary(g) % (N + 2) };
        let edges = (0..edge_count)
            .map(|_| {
                (
                    usize::arbitrary(g) % n,
                    usize::arbitrary(g) % n,
                    u8::arbitrary(g) % 2,
                )
            })
            .collect();
        Self { payloads, edges }
    }
}

impl<const N: usize> SmallGraph<N> {
    /// Vertices take indices `0..n`, edges the indices after them.
    fn build(&self) -> Sentence {
        let mut g = Sentence::new();
        for (i, &p) in self.payloads.iter().enumerate() {
            g.add_vertex(Indexed::new(i, p)).unwrap();
        }
        let offset = self.payloads.len();
        for (k, &(s, t, label)) in self.edges.iter().enumerate() {
            let source = Indexed::new(s, self.payloads[s]);
            let target = Indexed::new(t, self.payloads[t]);
            let label = Indexed::new(offset + k, label);
            if s == t {
                g.add_self_loop(&source, label).unwrap();
            } else {
                g.add_edge(&source, &target, label).unwrap();
            }
        }
        g
    }
}

/// Every injective map checked directly against the definition.
fn brute_force(
    pattern: &GraphIndex<'_, Token, Token>,
    target: &GraphIndex<'_, Token, Token>,
) -> BTreeSet<Vec<(NodeId, NodeId)>> {
    target
        .node_ids()
        .permutations(pattern.node_count())
        .filter(|images| {
            let vertices_ok = pattern
                .nodes()
                .all(|(p, value)| target.node(images[p.as_usize()]).payload == value.payload);
            let edges_ok = pattern.edges().all(|p_edge| {
                let source = images[p_edge.source.as_usize()];
                let dest = images[p_edge.target.as_usize()];
                target.outgoing(source).iter().any(|&idx| {
                    let t_edge = target.edge(idx);
                    t_edge.target == dest && t_edge.label.payload == p_edge.label.payload
                })
            });
            vertices_ok && edges_ok
        })
        .map(|images| {
            images
                .into_iter()
                .enumerate()
                .map(|(p, t)| (NodeId::new(p), t))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn signatures(
    pattern: &Sentence,
    target: &Sentence,
) -> Result<BTreeSet<Vec<(NodeId, NodeId)>>, MatchError> {
    let matcher = PayloadMatcher::new(pattern.graph(), target.graph());
    Ok(matcher
        .enumerate_matches()?
        .iter()
        .map(|m| m.signature())
        .collect())
}

quickcheck! {
    fn prop_matches_agree_with_brute_force(pattern: SmallGraph<3>, target: SmallGraph<5>) -> bool {
        setup_test_logging();
        let (pattern, target) = (pattern.build(), target.build());
        match signatures(&pattern, &target) {
            Err(MatchError::PatternTooLarge { .. }) => {
                pattern.vertex_count() > target.vertex_count()
            }
            Err(_) => false,
            Ok(found) => found == brute_force(&pattern.index(), &target.index()),
        }
    }

    fn prop_exists_iff_enumerate_nonempty(pattern: SmallGraph<3>, target: SmallGraph<5>) -> bool {
        let (pattern, target) = (pattern.build(), target.build());
        let matcher = PayloadMatcher::new(pattern.graph(), target.graph());
        match matcher.enumerate_matches() {
            Ok(found) => matcher.exists_match() == !found.is_empty(),
            Err(_) => !matcher.exists_match(),
        }
    }

    fn prop_embeddings_are_injective(pattern: SmallGraph<3>, target: SmallGraph<5>) -> bool {
        let (pattern, target) = (pattern.build(), target.build());
        let matcher = PayloadMatcher::new(pattern.graph(), target.graph());
        let Ok(found) = matcher.enumerate_matches() else {
            return true;
        };
        found.iter().all(|m| {
            let images: BTreeSet<usize> = m.iter().map(|(_, t)| t.index).collect();
            images.len() == m.len() && m.len() == pattern.vertex_count()
        })
    }

    fn prop_isomorphism_requires_equal_size(a: SmallGraph<4>, b: SmallGraph<4>) -> bool {
        let (a, b) = (a.build(), b.build());
        let matcher = PayloadMatcher::new(a.graph(), b.graph());
        let iso = matcher.is_isomorphic();
        if a.vertex_count() != b.vertex_count() {
            !iso && matcher.progress().steps == 0
        } else {
            true
        }
    }

    fn prop_graph_is_isomorphic_to_itself(a: SmallGraph<4>) -> bool {
        let a = a.build();
        PayloadMatcher::new(a.graph(), a.graph()).is_isomorphic()
    }
}
