//! Graph whose vertices and edges share one index space.

use std::ops::Deref;

use indexmap::IndexMap;
use tracing::trace;

use crate::error::{ElementKind, GraphError};
use crate::graph::{EdgeOf, Graph};
use crate::identity::{ByIndex, HasIndex};

/// A [`Graph`] keyed by element index, where no vertex index may equal any
/// other vertex or edge index.
///
/// Read-only queries are available through `Deref`; all mutation goes
/// through the checked operations on this type.
#[derive(Clone, Debug)]
pub struct IndexedGraph<V, E>
where
    V: HasIndex,
    E: HasIndex,
{
    graph: Graph<V, E, ByIndex>,
    /// Every index in use and the kind of element holding it.
    owners: IndexMap<usize, ElementKind>,
    max_index: Option<usize>,
}

impl<V: HasIndex, E: HasIndex> Default for IndexedGraph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: HasIndex, E: HasIndex> Deref for IndexedGraph<V, E> {
    type Target = Graph<V, E, ByIndex>;

    fn deref(&self) -> &Self::Target {
        &self.graph
    }
}

impl<V: HasIndex, E: HasIndex> AsRef<Graph<V, E, ByIndex>> for IndexedGraph<V, E> {
    fn as_ref(&self) -> &Graph<V, E, ByIndex> {
        &self.graph
    }
}

impl<V: HasIndex, E: HasIndex> IndexedGraph<V, E> {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            owners: IndexMap::new(),
            max_index: None,
        }
    }

    /// The wrapped graph.
    #[must_use]
    pub const fn graph(&self) -> &Graph<V, E, ByIndex> {
        &self.graph
    }

    /// Largest index held by any vertex or edge.
    #[must_use]
    pub const fn max_index(&self) -> Option<usize> {
        self.max_index
    }

    fn claim(&mut self, index: usize, kind: ElementKind) -> Result<(), GraphError> {
        if let Some(&held_by) = self.owners.get(&index) {
            return Err(GraphError::DuplicateIndex { index, held_by });
        }
        self.owners.insert(index, kind);
        self.max_index = Some(self.max_index.map_or(index, |m| m.max(index)));
        Ok(())
    }

    /// Frees every index in `indices`, rescanning for the maximum at most
    /// once.
    fn release(&mut self, indices: impl IntoIterator<Item = usize>) {
        let mut lost_max = false;
        for index in indices {
            self.owners.swap_remove(&index);
            lost_max |= self.max_index == Some(index);
        }
        if lost_max {
            self.max_index = self.owners.keys().copied().max();
        }
    }

    /// Adds a vertex.
    ///
    /// # Errors
    ///
    /// [`GraphError::DuplicateIndex`] if any vertex or edge already holds
    /// the vertex's index.
    pub fn add_vertex(&mut self, vertex: V) -> Result<(), GraphError> {
        let index = vertex.index();
        self.claim(index, ElementKind::Vertex)?;
        self.graph.add_vertex(vertex);
        trace!("IndexedGraph::add_vertex {}", index);
        Ok(())
    }

    /// Adds a regular edge.
    ///
    /// # Errors
    ///
    /// In order of checking: [`GraphError::SelfLoop`],
    /// [`GraphError::DuplicateEdge`] when an edge with this index exists,
    /// [`GraphError::DuplicateIndex`] when a vertex holds the index,
    /// [`GraphError::MissingVertex`].
    pub fn add_edge(&mut self, source: &V, target: &V, label: E) -> Result<usize, GraphError> {
        if source.index() == target.index() {
            return Err(GraphError::self_loop(&source.index()));
        }
        self.checked_insert(source, target, label)
    }

    /// Adds an edge from `vertex` to itself.
    ///
    /// # Errors
    ///
    /// As [`IndexedGraph::add_edge`], minus the self-loop check.
    pub fn add_self_loop(&mut self, vertex: &V, label: E) -> Result<usize, GraphError> {
        self.checked_insert(vertex, vertex, label)
    }

    fn checked_insert(&mut self, source: &V, target: &V, label: E) -> Result<usize, GraphError> {
        let index = label.index();
        if self.graph.contains_edge(&index) {
            return Err(GraphError::duplicate_edge(&index));
        }
        if let Some(&held_by) = self.owners.get(&index) {
            return Err(GraphError::DuplicateIndex { index, held_by });
        }
        let key = if source.index() == target.index() {
            self.graph.add_self_loop(source, label)?
        } else {
            self.graph.add_edge(source, target, label)?
        };
        self.claim(index, ElementKind::Edge)?;
        Ok(key)
    }

    /// Removes a vertex with its incident edges, releasing their indices.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingVertex`] if the vertex is absent.
    pub fn remove_vertex(&mut self, vertex: &V) -> Result<V, GraphError> {
        let (removed, edges) = self.graph.remove_vertex_with_edges(vertex)?;
        self.release(
            edges
                .iter()
                .map(HasIndex::index)
                .chain(std::iter::once(removed.index())),
        );
        Ok(removed)
    }

    /// Removes an edge by index, releasing the index.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingEdge`] if no edge holds the index.
    pub fn remove_edge(&mut self, index: usize) -> Result<E, GraphError> {
        let label = self.graph.remove_edge(&index)?;
        self.release([index]);
        Ok(label)
    }

    /// The vertex holding `index`.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownIndex`] if no vertex holds it.
    pub fn vertex_by_index(&self, index: usize) -> Result<&V, GraphError> {
        self.graph
            .vertex_by_key(&index)
            .ok_or(GraphError::UnknownIndex {
                index,
                kind: ElementKind::Vertex,
            })
    }

    /// The edge holding `index`.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownIndex`] if no edge holds it.
    pub fn edge_by_index(&self, index: usize) -> Result<EdgeOf<'_, V, E, ByIndex>, GraphError> {
        self.graph.edge(&index).ok_or(GraphError::UnknownIndex {
            index,
            kind: ElementKind::Edge,
        })
    }

    /// Which kind of element holds `index`, if any.
    #[must_use]
    pub fn owner_of(&self, index: usize) -> Option<ElementKind> {
        self.owners.get(&index).copied()
    }

    /// Re-derives the combined index set from the stored elements and
    /// checks it against the registry.
    ///
    /// # Errors
    ///
    /// [`GraphError::DuplicateIndex`] for the first index seen twice, or
    /// [`GraphError::IndexRegistryMismatch`] if the registry or the cached
    /// maximum disagree with the elements.
    pub fn validate_indices(&self) -> Result<(), GraphError> {
        let mut seen: IndexMap<usize, ElementKind> = IndexMap::new();
        let vertices = self.graph.vertices().map(|v| (v.index(), ElementKind::Vertex));
        let edges = self.graph.edges().map(|e| (e.label.index(), ElementKind::Edge));

        for (index, kind) in vertices.chain(edges) {
            if let Some(&held_by) = seen.get(&index) {
                return Err(GraphError::DuplicateIndex { index, held_by });
            }
            seen.insert(index, kind);
        }

        if seen.len() != self.owners.len() {
            return Err(GraphError::IndexRegistryMismatch(format!(
                "{} elements, {} registered indices",
                seen.len(),
                self.owners.len()
            )));
        }
        if let Some((index, kind)) = seen
            .iter()
            .find(|(index, kind)| self.owners.get(*index) != Some(*kind))
        {
            return Err(GraphError::IndexRegistryMismatch(format!(
                "{kind} index {index} not registered as such"
            )));
        }
        if seen.keys().copied().max() != self.max_index {
            return Err(GraphError::IndexRegistryMismatch(format!(
                "cached maximum {:?} is stale",
                self.max_index
            )));
        }
        Ok(())
    }
}
