//! Subgraph matching engine.

pub(crate) mod assignment;
mod matcher;
mod search;

pub use assignment::SingleAssignment;
pub use matcher::{ExactMatcher, PayloadMatcher, PredicateMatcher, SubgraphMatcher};
