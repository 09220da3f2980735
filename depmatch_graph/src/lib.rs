//! Directed multigraphs for dependency-graph matching.
//!
//! This crate provides the graph side of the `depmatch` workspace:
//!
//! - [`Graph`]: a directed multigraph over caller values, with identity
//!   supplied by an [`Identity`] strategy.
//! - [`IndexedGraph`]: a graph whose vertices and edges carry indices that
//!   are unique across both element kinds.
//! - [`GraphIndex`]: a dense read-only snapshot that the matcher in
//!   `depmatch_subgraph` searches over.

mod error;
mod graph;
mod identity;
mod index;
mod indexed;

pub use error::{ElementKind, GraphError};
pub use graph::{EdgeOf, EdgeView, Graph};
pub use identity::{ByIndex, ByValue, HasIndex, Identity, Indexed};
pub use index::{EdgeIdx, GraphIndex, IndexedEdge, NodeId};
pub use indexed::IndexedGraph;
