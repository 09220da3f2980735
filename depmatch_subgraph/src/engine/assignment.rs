//! Mapping between pattern and target nodes.

use std::collections::HashMap;

use contracts::*;
use depmatch_graph::NodeId;

/// How a proposed (pattern, target) pair relates to an assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Binding {
    /// Both sides are already mapped to each other.
    Consistent,
    /// Neither side is mapped yet.
    Free,
    /// One side is mapped to something else.
    Conflict,
}

/// An injective, partial mapping of pattern nodes onto target nodes.
///
/// Two maps are kept in lockstep so both directions can be checked in
/// constant time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SingleAssignment {
    /// Pattern to target node mapping
    pattern_to_target: HashMap<NodeId, NodeId>,
    /// Target to pattern node mapping
    target_to_pattern: HashMap<NodeId, NodeId>,
}

impl SingleAssignment {
    /// Checks that both maps describe the same bijection.
    pub fn is_consistent(&self) -> bool {
        self.pattern_to_target.len() == self.target_to_pattern.len()
            && self
                .pattern_to_target
                .iter()
                .all(|(p, t)| self.target_to_pattern.get(t) == Some(p))
    }

    /// Creates a new, empty assignment.
    #[debug_ensures(ret.is_consistent() && ret.is_empty())]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Classify a proposed pair.
    pub(crate) fn check(&self, pattern: NodeId, target: NodeId) -> Binding {
        match (
            self.pattern_to_target.get(&pattern),
            self.target_to_pattern.get(&target),
        ) {
            (None, None) => Binding::Free,
            (Some(&t), Some(&p)) if t == target && p == pattern => Binding::Consistent,
            _ => Binding::Conflict,
        }
    }

    /// Record a pair. Both sides must be unmapped.
    #[debug_requires(self.check(pattern, target) == Binding::Free)]
    #[debug_ensures(self.is_consistent())]
    pub(crate) fn assign(&mut self, pattern: NodeId, target: NodeId) {
        tracing::event!(
            tracing::Level::TRACE,
            "SingleAssignment::assign P{} -> T{} (before size={})",
            pattern,
            target,
            self.pattern_to_target.len()
        );
        self.pattern_to_target.insert(pattern, target);
        self.target_to_pattern.insert(target, pattern);
    }

    /// The target node a pattern node is mapped to.
    #[must_use]
    pub fn target_of(&self, pattern: NodeId) -> Option<NodeId> {
        self.pattern_to_target.get(&pattern).copied()
    }

    /// The pattern node mapped onto a target node.
    #[must_use]
    pub fn pattern_of(&self, target: NodeId) -> Option<NodeId> {
        self.target_to_pattern.get(&target).copied()
    }

    /// Returns true if the target node is not yet used.
    #[must_use]
    pub fn target_is_free(&self, target: NodeId) -> bool {
        !self.target_to_pattern.contains_key(&target)
    }

    /// Lowest pattern node id in `0..pattern_count` that is not mapped.
    pub(crate) fn first_unmapped(&self, pattern_count: usize) -> Option<NodeId> {
        (0..pattern_count)
            .map(NodeId::new)
            .find(|p| !self.pattern_to_target.contains_key(p))
    }

    /// Returns the number of mapped pattern nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pattern_to_target.len()
    }

    /// Returns true if nothing is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pattern_to_target.is_empty()
    }

    /// Access the raw pattern-to-target mapping.
    #[must_use]
    pub const fn pattern_mapping(&self) -> &HashMap<NodeId, NodeId> {
        &self.pattern_to_target
    }

    /// Access the raw target-to-pattern mapping.
    #[must_use]
    pub const fn target_mapping(&self) -> &HashMap<NodeId, NodeId> {
        &self.target_to_pattern
    }

    /// Pairs sorted by pattern node: equal signatures mean equal maps.
    #[must_use]
    pub fn signature(&self) -> Vec<(NodeId, NodeId)> {
        let mut sig: Vec<(NodeId, NodeId)> = self
            .pattern_to_target
            .iter()
            .map(|(&p, &t)| (p, t))
            .collect();
        sig.sort_unstable();
        sig
    }

    /// Sorted set of mapped target nodes, ignoring which pattern node maps
    /// where.
    #[must_use]
    pub fn target_set_signature(&self) -> Vec<NodeId> {
        let mut sig: Vec<NodeId> = self.target_to_pattern.keys().copied().collect();
        sig.sort_unstable();
        sig
    }
}
