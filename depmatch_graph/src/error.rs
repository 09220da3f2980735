//! Construction errors for graphs.
//!
//! Every variant describes a violated graph invariant and is raised at the
//! moment of insertion or removal. Matching never produces a `GraphError`.

use std::fmt;

use thiserror::Error;

/// The kind of graph element holding (or expected to hold) an index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A vertex.
    Vertex,
    /// An edge, including self-loops.
    Edge,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Edge => write!(f, "edge"),
        }
    }
}

/// Errors raised while building or editing a graph.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// A regular edge was requested between a vertex and itself.
    #[error("Self-loop on {vertex} must be added with add_self_loop")]
    SelfLoop {
        /// Rendered vertex.
        vertex: String,
    },

    /// The edge is already part of the graph.
    #[error("Edge {edge} already exists")]
    DuplicateEdge {
        /// Rendered edge key.
        edge: String,
    },

    /// The index is already held by another element.
    #[error("Duplicate index {index}: already held by a {held_by}")]
    DuplicateIndex {
        /// The colliding index.
        index: usize,
        /// Which kind of element already holds it.
        held_by: ElementKind,
    },

    /// A vertex referenced by the operation is not in the graph.
    #[error("Vertex {vertex} is not in the graph")]
    MissingVertex {
        /// Rendered vertex.
        vertex: String,
    },

    /// An edge referenced by the operation is not in the graph.
    #[error("Edge {edge} is not in the graph")]
    MissingEdge {
        /// Rendered edge key.
        edge: String,
    },

    /// No element of the requested kind holds this index.
    #[error("No {kind} with index {index}")]
    UnknownIndex {
        /// The index looked up.
        index: usize,
        /// The kind of element requested.
        kind: ElementKind,
    },

    /// The index registry disagrees with the stored elements.
    #[error("Index registry out of sync: {0}")]
    IndexRegistryMismatch(String),
}

impl GraphError {
    pub(crate) fn self_loop(vertex: &impl fmt::Debug) -> Self {
        Self::SelfLoop {
            vertex: format!("{vertex:?}"),
        }
    }

    pub(crate) fn duplicate_edge(edge: &impl fmt::Debug) -> Self {
        Self::DuplicateEdge {
            edge: format!("{edge:?}"),
        }
    }

    pub(crate) fn missing_vertex(vertex: &impl fmt::Debug) -> Self {
        Self::MissingVertex {
            vertex: format!("{vertex:?}"),
        }
    }

    pub(crate) fn missing_edge(edge: &impl fmt::Debug) -> Self {
        Self::MissingEdge {
            edge: format!("{edge:?}"),
        }
    }
}
