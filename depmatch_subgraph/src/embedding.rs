use std::fmt;

use depmatch_graph::{GraphIndex, NodeId};

use crate::engine::assignment::SingleAssignment;

/// One occurrence of the pattern inside the target.
///
/// Pairs borrow the vertex values of both graphs and are ordered by pattern
/// node id, i.e. pattern insertion order.
pub struct Embedding<'p, 't, PV, TV> {
    assignment: SingleAssignment,
    pairs: Vec<(&'p PV, &'t TV)>,
}

impl<'p, 't, PV, TV> Embedding<'p, 't, PV, TV> {
    /// Resolve a complete assignment against both snapshots.
    pub(crate) fn from_assignment<PE, TE>(
        assignment: SingleAssignment,
        pattern: &GraphIndex<'p, PV, PE>,
        target: &GraphIndex<'t, TV, TE>,
    ) -> Self {
        let pairs = assignment
            .signature()
            .into_iter()
            .filter_map(|(p, t)| Some((pattern.try_node(p)?, target.try_node(t)?)))
            .collect();
        Self { assignment, pairs }
    }

    /// Number of mapped pattern vertices.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True for the empty pattern's embedding.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Target vertex the given pattern vertex is mapped to.
    pub fn get(&self, pattern_vertex: &PV) -> Option<&'t TV>
    where
        PV: PartialEq,
    {
        self.pairs
            .iter()
            .find(|(p, _)| *p == pattern_vertex)
            .map(|(_, t)| *t)
    }

    /// (pattern, target) pairs in pattern order.
    pub fn iter(&self) -> impl Iterator<Item = (&'p PV, &'t TV)> + '_ {
        self.pairs.iter().copied()
    }

    /// Target node id for a pattern node id.
    pub fn target_of(&self, pattern: NodeId) -> Option<NodeId> {
        self.assignment.target_of(pattern)
    }

    /// The underlying node id assignment.
    pub fn assignment(&self) -> &SingleAssignment {
        &self.assignment
    }

    /// Sorted (pattern, target) node id pairs.
    pub fn signature(&self) -> Vec<(NodeId, NodeId)> {
        self.assignment.signature()
    }
}

impl<PV, TV> Clone for Embedding<'_, '_, PV, TV> {
    fn clone(&self) -> Self {
        Self {
            assignment: self.assignment.clone(),
            pairs: self.pairs.clone(),
        }
    }
}

impl<PV, TV> PartialEq for Embedding<'_, '_, PV, TV> {
    fn eq(&self, other: &Self) -> bool {
        self.assignment == other.assignment
    }
}

impl<PV, TV> Eq for Embedding<'_, '_, PV, TV> {}

impl<PV: fmt::Debug, TV: fmt::Debug> fmt::Debug for Embedding<'_, '_, PV, TV> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.pairs.iter().copied()).finish()
    }
}
