//! Subgraph matching over dependency-style multigraphs.
//!
//! A [`SubgraphMatcher`] searches a target [`depmatch_graph::Graph`] for
//! injective, edge-preserving embeddings of a smaller pattern graph. Three
//! matching semantics are provided:
//!
//! - [`ExactMatcher`]: pattern values are compared with `==`.
//! - [`PredicateMatcher`]: pattern values are [`Predicate`]s over target
//!   values.
//! - [`PayloadMatcher`]: indexed values compared by payload.
//!
//! Search behaviour (anchor choice, deduplication, step limits and
//! cancellation) is controlled by [`Config`].

mod anchor;
mod config;
mod embedding;
mod engine;
mod error;
mod predicate;
mod semantics;
mod util;

pub use config::{AnchorPolicy, CancelToken, Config, ConfigBuilder, DedupeMode};
pub use embedding::Embedding;
pub use engine::{ExactMatcher, PayloadMatcher, PredicateMatcher, SingleAssignment, SubgraphMatcher};
pub use error::{AbortReason, MatchError};
pub use predicate::{Predicate, PredicateGraph};
pub use semantics::{Accepts, ByPayload, ByPredicate, Exact};
pub use util::progress::ProgressSnapshot;
