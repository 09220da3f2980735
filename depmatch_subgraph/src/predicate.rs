//! Named boolean tests used as pattern values in predicate mode.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use depmatch_graph::Graph;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// A named test over target values.
///
/// Every constructed predicate is a distinct pattern vertex (or edge), even
/// when it shares a name or a test with another one. Clones are the same
/// predicate, so a clone can look up its image in an embedding. The name is
/// for display only. Cloning is cheap.
pub struct Predicate<T> {
    id: u64,
    name: Arc<str>,
    test: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

/// A pattern graph whose vertices and edges are predicates over the target's
/// vertex and edge types.
pub type PredicateGraph<V, E> = Graph<Predicate<V>, Predicate<E>>;

impl<T> Predicate<T> {
    /// Wrap a closure under `name`.
    pub fn new(name: impl Into<String>, test: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            name: Arc::from(name.into()),
            test: Arc::new(test),
        }
    }

    /// Accepts every value.
    pub fn any(name: impl Into<String>) -> Self {
        Self::new(name, |_| true)
    }

    /// Apply the test.
    pub fn test(&self, candidate: &T) -> bool {
        (self.test)(candidate)
    }

    /// The predicate's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accepts what either predicate accepts.
    #[must_use]
    pub fn or(&self, other: &Self) -> Self
    where
        T: 'static,
    {
        let (lhs, rhs) = (Arc::clone(&self.test), Arc::clone(&other.test));
        Self::new(format!("({} | {})", self.name, other.name), move |v| {
            lhs(v) || rhs(v)
        })
    }

    /// Accepts what both predicates accept.
    #[must_use]
    pub fn and(&self, other: &Self) -> Self
    where
        T: 'static,
    {
        let (lhs, rhs) = (Arc::clone(&self.test), Arc::clone(&other.test));
        Self::new(format!("({} & {})", self.name, other.name), move |v| {
            lhs(v) && rhs(v)
        })
    }

    /// Accepts what this predicate rejects.
    #[must_use]
    pub fn not(&self) -> Self
    where
        T: 'static,
    {
        let inner = Arc::clone(&self.test);
        Self::new(format!("!{}", self.name), move |v| !inner(v))
    }

    /// A new predicate with the same test under a different name.
    #[must_use]
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            name: Arc::from(name.into()),
            test: Arc::clone(&self.test),
        }
    }
}

impl<T> Predicate<T>
where
    T: PartialEq + fmt::Debug + Send + Sync + 'static,
{
    /// Accepts values equal to `value`. Named after the value.
    pub fn equals(value: T) -> Self {
        Self::new(format!("{value:?}"), move |v| *v == value)
    }

    /// Accepts values equal to any of `values`.
    pub fn any_of(values: impl IntoIterator<Item = T>) -> Self {
        let values: Vec<T> = values.into_iter().collect();
        Self::new(format!("{values:?}"), move |v| values.contains(v))
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: Arc::clone(&self.name),
            test: Arc::clone(&self.test),
        }
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({})", self.name)
    }
}

impl<T> fmt::Display for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<T> PartialEq for Predicate<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Predicate<T> {}

impl<T> Hash for Predicate<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
