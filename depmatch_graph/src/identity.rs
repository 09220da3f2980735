//! Identity strategies.
//!
//! A [`Graph`](crate::Graph) never compares vertices or edges directly.
//! It asks its identity strategy for a key and stores elements under that
//! key, so the same graph code serves both value-identified elements
//! ([`ByValue`]) and index-identified elements ([`ByIndex`]).

use std::fmt::Debug;
use std::hash::Hash;

/// Supplies the identity keys a graph stores its elements under.
pub trait Identity<V, E> {
    /// Key identifying a vertex.
    type VertexKey: Clone + Eq + Hash + Debug;
    /// Key identifying an edge.
    type EdgeKey: Clone + Eq + Hash + Debug;

    /// Identity of a vertex.
    fn vertex_key(vertex: &V) -> Self::VertexKey;

    /// Identity of an edge, given the keys of its endpoints.
    fn edge_key(source: &Self::VertexKey, target: &Self::VertexKey, label: &E) -> Self::EdgeKey;
}

/// Identity by caller equality.
///
/// A vertex is its own key. An edge is keyed by the full
/// `(source, target, label)` triple, so one relation label may appear on
/// many vertex pairs while the exact same edge cannot be inserted twice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ByValue;

impl<V, E> Identity<V, E> for ByValue
where
    V: Clone + Eq + Hash + Debug,
    E: Clone + Eq + Hash + Debug,
{
    type VertexKey = V;
    type EdgeKey = (V, V, E);

    fn vertex_key(vertex: &V) -> V {
        vertex.clone()
    }

    fn edge_key(source: &V, target: &V, label: &E) -> (V, V, E) {
        (source.clone(), target.clone(), label.clone())
    }
}

/// Identity by a stable, caller-assigned integer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ByIndex;

impl<V: HasIndex, E: HasIndex> Identity<V, E> for ByIndex {
    type VertexKey = usize;
    type EdgeKey = usize;

    fn vertex_key(vertex: &V) -> usize {
        vertex.index()
    }

    fn edge_key(_source: &usize, _target: &usize, label: &E) -> usize {
        label.index()
    }
}

/// An element carrying an index assigned once at creation.
pub trait HasIndex {
    /// The element's index. Must not change while the element is in a graph.
    fn index(&self) -> usize;
}

impl<T: HasIndex + ?Sized> HasIndex for &T {
    fn index(&self) -> usize {
        (**self).index()
    }
}

/// Minimal index-carrying wrapper around an arbitrary payload.
///
/// Equality and hashing consider the index only: two `Indexed` values are
/// the same element exactly when their indices agree.
#[derive(Clone, Debug)]
pub struct Indexed<T> {
    /// Stable identity.
    pub index: usize,
    /// Caller data, e.g. a token or a relation name.
    pub payload: T,
}

impl<T> Indexed<T> {
    /// Wrap `payload` under `index`.
    pub const fn new(index: usize, payload: T) -> Self {
        Self { index, payload }
    }

    /// Borrow the payload.
    pub const fn payload(&self) -> &T {
        &self.payload
    }
}

impl<T> HasIndex for Indexed<T> {
    fn index(&self) -> usize {
        self.index
    }
}

impl<T> PartialEq for Indexed<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Indexed<T> {}

impl<T> Hash for Indexed<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}
