//! Directed multigraph over caller-supplied vertex and edge values.

use std::marker::PhantomData;

use indexmap::{IndexMap, IndexSet};
use tracing::trace;

use crate::error::GraphError;
use crate::identity::{ByValue, Identity};
use crate::index::GraphIndex;

/// A vertex together with the keys of the edges touching it.
#[derive(Clone, Debug)]
struct VertexSlot<V, K> {
    value: V,
    outgoing: IndexSet<K>,
    incoming: IndexSet<K>,
}

#[derive(Clone, Debug)]
struct EdgeRecord<K, E> {
    source: K,
    target: K,
    label: E,
}

/// Borrowed view of one edge.
#[derive(Debug)]
pub struct EdgeView<'g, V, E, K> {
    /// Identity key of the edge.
    pub key: &'g K,
    /// Tail vertex.
    pub source: &'g V,
    /// Head vertex.
    pub target: &'g V,
    /// Edge label value.
    pub label: &'g E,
}

impl<V, E, K> Clone for EdgeView<'_, V, E, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V, E, K> Copy for EdgeView<'_, V, E, K> {}

impl<V, E, K> EdgeView<'_, V, E, K> {
    /// True if the edge starts and ends at the same vertex.
    pub fn is_self_loop(&self) -> bool
    where
        V: PartialEq,
    {
        self.source == self.target
    }
}

/// Alias for the edge view type produced by a graph with identity `I`.
pub type EdgeOf<'g, V, E, I> = EdgeView<'g, V, E, <I as Identity<V, E>>::EdgeKey>;

/// A directed multigraph with self-loops.
///
/// Vertices and edges are kept in insertion order; element identity comes
/// from the identity strategy `I`. Regular edges must join two distinct
/// vertices, loops go through [`Graph::add_self_loop`].
#[derive(Clone, Debug)]
pub struct Graph<V, E, I = ByValue>
where
    I: Identity<V, E>,
{
    vertices: IndexMap<I::VertexKey, VertexSlot<V, I::EdgeKey>>,
    edges: IndexMap<I::EdgeKey, EdgeRecord<I::VertexKey, E>>,
    _identity: PhantomData<I>,
}

impl<V, E, I: Identity<V, E>> Default for Graph<V, E, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E, I: Identity<V, E>> Graph<V, E, I> {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vertices: IndexMap::new(),
            edges: IndexMap::new(),
            _identity: PhantomData,
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges, self-loops included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True if the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// True if a vertex with the same identity is present.
    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertices.contains_key(&I::vertex_key(vertex))
    }

    /// True if an edge with this key is present.
    pub fn contains_edge(&self, key: &I::EdgeKey) -> bool {
        self.edges.contains_key(key)
    }

    /// Looks up a vertex by its identity key.
    pub fn vertex_by_key(&self, key: &I::VertexKey) -> Option<&V> {
        self.vertices.get(key).map(|slot| &slot.value)
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.vertices.values().map(|slot| &slot.value)
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeOf<'_, V, E, I>> + '_ {
        self.edges.keys().filter_map(|key| self.edge(key))
    }

    /// Adds a vertex. Returns false if an equal-identity vertex already exists.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        let key = I::vertex_key(&vertex);
        if self.vertices.contains_key(&key) {
            return false;
        }
        trace!("Graph::add_vertex {:?}", key);
        self.vertices.insert(
            key,
            VertexSlot {
                value: vertex,
                outgoing: IndexSet::new(),
                incoming: IndexSet::new(),
            },
        );
        true
    }

    /// Adds a regular edge from `source` to `target`.
    ///
    /// # Errors
    ///
    /// [`GraphError::SelfLoop`] if both endpoints are the same vertex,
    /// [`GraphError::MissingVertex`] if an endpoint is absent,
    /// [`GraphError::DuplicateEdge`] if the edge is already present.
    pub fn add_edge(&mut self, source: &V, target: &V, label: E) -> Result<I::EdgeKey, GraphError> {
        let source_key = I::vertex_key(source);
        let target_key = I::vertex_key(target);
        if source_key == target_key {
            return Err(GraphError::self_loop(&source_key));
        }
        self.insert_edge(source_key, target_key, label)
    }

    /// Adds an edge from `vertex` to itself.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingVertex`] if the vertex is absent,
    /// [`GraphError::DuplicateEdge`] if the loop is already present.
    pub fn add_self_loop(&mut self, vertex: &V, label: E) -> Result<I::EdgeKey, GraphError> {
        let key = I::vertex_key(vertex);
        self.insert_edge(key.clone(), key, label)
    }

    fn insert_edge(
        &mut self,
        source: I::VertexKey,
        target: I::VertexKey,
        label: E,
    ) -> Result<I::EdgeKey, GraphError> {
        for endpoint in [&source, &target] {
            if !self.vertices.contains_key(endpoint) {
                return Err(GraphError::missing_vertex(endpoint));
            }
        }
        let edge_key = I::edge_key(&source, &target, &label);
        if self.edges.contains_key(&edge_key) {
            return Err(GraphError::duplicate_edge(&edge_key));
        }
        trace!("Graph::insert_edge {:?}: {:?} -> {:?}", edge_key, source, target);

        if let Some(slot) = self.vertices.get_mut(&source) {
            slot.outgoing.insert(edge_key.clone());
        }
        if let Some(slot) = self.vertices.get_mut(&target) {
            slot.incoming.insert(edge_key.clone());
        }
        self.edges.insert(
            edge_key.clone(),
            EdgeRecord {
                source,
                target,
                label,
            },
        );
        Ok(edge_key)
    }

    /// Removes a vertex and every edge touching it.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingVertex`] if the vertex is absent.
    pub fn remove_vertex(&mut self, vertex: &V) -> Result<V, GraphError> {
        self.remove_vertex_with_edges(vertex).map(|(value, _)| value)
    }

    /// Removes a vertex, returning it along with the labels of the removed edges.
    pub(crate) fn remove_vertex_with_edges(&mut self, vertex: &V) -> Result<(V, Vec<E>), GraphError> {
        let key = I::vertex_key(vertex);
        let Some(slot) = self.vertices.get(&key) else {
            return Err(GraphError::missing_vertex(&key));
        };
        let incident: IndexSet<I::EdgeKey> = slot
            .outgoing
            .iter()
            .chain(slot.incoming.iter())
            .cloned()
            .collect();

        let mut labels = Vec::with_capacity(incident.len());
        for edge_key in &incident {
            labels.push(self.remove_edge(edge_key)?);
        }

        let slot = self
            .vertices
            .shift_remove(&key)
            .ok_or_else(|| GraphError::missing_vertex(&key))?;
        trace!("Graph::remove_vertex {:?} ({} edges)", key, labels.len());
        Ok((slot.value, labels))
    }

    /// Removes an edge.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingEdge`] if no edge has this key.
    pub fn remove_edge(&mut self, key: &I::EdgeKey) -> Result<E, GraphError> {
        let record = self
            .edges
            .shift_remove(key)
            .ok_or_else(|| GraphError::missing_edge(key))?;
        if let Some(slot) = self.vertices.get_mut(&record.source) {
            slot.outgoing.shift_remove(key);
        }
        if let Some(slot) = self.vertices.get_mut(&record.target) {
            slot.incoming.shift_remove(key);
        }
        Ok(record.label)
    }

    /// Looks up an edge by key.
    pub fn edge<'g>(&'g self, key: &I::EdgeKey) -> Option<EdgeOf<'g, V, E, I>> {
        let (key, record) = self.edges.get_key_value(key)?;
        Some(EdgeView {
            key,
            source: self.vertex_by_key(&record.source)?,
            target: self.vertex_by_key(&record.target)?,
            label: &record.label,
        })
    }

    /// Tail vertex of an edge.
    pub fn edge_source(&self, key: &I::EdgeKey) -> Option<&V> {
        let record = self.edges.get(key)?;
        self.vertex_by_key(&record.source)
    }

    /// Head vertex of an edge.
    pub fn edge_target(&self, key: &I::EdgeKey) -> Option<&V> {
        let record = self.edges.get(key)?;
        self.vertex_by_key(&record.target)
    }

    /// Edges leaving `vertex`, in insertion order.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingVertex`] if the vertex is absent.
    pub fn outgoing_edges_of(&self, vertex: &V) -> Result<Vec<EdgeOf<'_, V, E, I>>, GraphError> {
        let key = I::vertex_key(vertex);
        let slot = self
            .vertices
            .get(&key)
            .ok_or_else(|| GraphError::missing_vertex(&key))?;
        Ok(slot.outgoing.iter().filter_map(|e| self.edge(e)).collect())
    }

    /// Edges entering `vertex`, in insertion order.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingVertex`] if the vertex is absent.
    pub fn incoming_edges_of(&self, vertex: &V) -> Result<Vec<EdgeOf<'_, V, E, I>>, GraphError> {
        let key = I::vertex_key(vertex);
        let slot = self
            .vertices
            .get(&key)
            .ok_or_else(|| GraphError::missing_vertex(&key))?;
        Ok(slot.incoming.iter().filter_map(|e| self.edge(e)).collect())
    }

    /// All edges from `source` to `target`. Empty if either is absent.
    pub fn edges_between(&self, source: &V, target: &V) -> Vec<EdgeOf<'_, V, E, I>> {
        let target_key = I::vertex_key(target);
        let Some(slot) = self.vertices.get(&I::vertex_key(source)) else {
            return Vec::new();
        };
        slot.outgoing
            .iter()
            .filter(|e| self.edges.get(*e).is_some_and(|r| r.target == target_key))
            .filter_map(|e| self.edge(e))
            .collect()
    }

    /// Builds a dense, read-only snapshot for matching.
    ///
    /// Node ids follow vertex insertion order.
    pub fn index(&self) -> GraphIndex<'_, V, E> {
        let nodes: Vec<&V> = self.vertices.values().map(|slot| &slot.value).collect();
        let edges = self.edges.values().filter_map(|record| {
            let source = self.vertices.get_index_of(&record.source)?;
            let target = self.vertices.get_index_of(&record.target)?;
            Some((source, target, &record.label))
        });
        GraphIndex::from_parts(nodes, edges)
    }
}
