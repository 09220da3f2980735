//! Dense, read-only graph snapshot used by the matcher.
//!
//! A [`GraphIndex`] borrows the vertex and edge values of a graph and
//! renumbers them densely, so the search can work with small copyable ids
//! and flat adjacency lists instead of identity keys.

use std::fmt;

/// Dense vertex id inside one [`GraphIndex`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Wraps a raw position.
    #[must_use]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// The raw position.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Dense edge id inside one [`GraphIndex`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIdx(usize);

impl EdgeIdx {
    /// The raw position.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0
    }
}

/// One edge of the snapshot.
#[derive(Debug)]
pub struct IndexedEdge<'g, E> {
    /// Tail node.
    pub source: NodeId,
    /// Head node.
    pub target: NodeId,
    /// Borrowed label.
    pub label: &'g E,
}

impl<E> Clone for IndexedEdge<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for IndexedEdge<'_, E> {}

/// Snapshot of a graph with dense node and edge ids.
#[derive(Debug)]
pub struct GraphIndex<'g, V, E> {
    nodes: Vec<&'g V>,
    edges: Vec<IndexedEdge<'g, E>>,
    outgoing: Vec<Vec<EdgeIdx>>,
    incoming: Vec<Vec<EdgeIdx>>,
}

impl<V, E> Clone for GraphIndex<'_, V, E> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            outgoing: self.outgoing.clone(),
            incoming: self.incoming.clone(),
        }
    }
}

impl<'g, V, E> GraphIndex<'g, V, E> {
    /// Builds a snapshot from nodes and `(source, target, label)` triples
    /// whose endpoints are positions into `nodes`.
    ///
    /// Endpoints must be in range; [`Graph::index`](crate::Graph::index) is
    /// the only producer.
    pub(crate) fn from_parts(
        nodes: Vec<&'g V>,
        edges: impl IntoIterator<Item = (usize, usize, &'g E)>,
    ) -> Self {
        let mut outgoing = vec![Vec::new(); nodes.len()];
        let mut incoming = vec![Vec::new(); nodes.len()];
        let mut indexed = Vec::new();

        for (source, target, label) in edges {
            debug_assert!(source < nodes.len() && target < nodes.len());
            let idx = EdgeIdx(indexed.len());
            outgoing[source].push(idx);
            incoming[target].push(idx);
            indexed.push(IndexedEdge {
                source: NodeId(source),
                target: NodeId(target),
                label,
            });
        }

        Self {
            nodes,
            edges: indexed,
            outgoing,
            incoming,
        }
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True if there are no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + use<'g, V, E> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Nodes with their ids.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &'g V)> + '_ {
        self.nodes.iter().enumerate().map(|(i, v)| (NodeId(i), *v))
    }

    /// Edges in id order.
    pub fn edges(&self) -> impl Iterator<Item = IndexedEdge<'g, E>> + '_ {
        self.edges.iter().copied()
    }

    /// The value of a node.
    ///
    /// # Panics
    ///
    /// If `id` does not belong to this snapshot.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &'g V {
        self.nodes[id.0]
    }

    /// The value of a node, if `id` is in range.
    #[must_use]
    pub fn try_node(&self, id: NodeId) -> Option<&'g V> {
        self.nodes.get(id.0).copied()
    }

    /// An edge.
    ///
    /// # Panics
    ///
    /// If `idx` does not belong to this snapshot.
    #[must_use]
    pub fn edge(&self, idx: EdgeIdx) -> IndexedEdge<'g, E> {
        self.edges[idx.0]
    }

    /// Edges leaving a node.
    #[must_use]
    pub fn outgoing(&self, id: NodeId) -> &[EdgeIdx] {
        self.outgoing.get(id.0).map_or(&[], Vec::as_slice)
    }

    /// Edges entering a node.
    #[must_use]
    pub fn incoming(&self, id: NodeId) -> &[EdgeIdx] {
        self.incoming.get(id.0).map_or(&[], Vec::as_slice)
    }

    /// Id of the first node equal to `value`.
    pub fn position_of(&self, value: &V) -> Option<NodeId>
    where
        V: PartialEq,
    {
        self.nodes.iter().position(|v| *v == value).map(NodeId)
    }
}
