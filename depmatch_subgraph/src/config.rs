//! Configuration for the subgraph matching search.
//!
//! The main knobs are:
//! - anchor: how the pattern vertex the search starts from is chosen when
//!   none is set explicitly. This only affects exploration order.
//! - dedupe: how matches are deduplicated after search.
//! - step_limit / cancel: optional ways to stop a search that is taking too
//!   long. The search is exponential in the worst case.
//!
//! Quick examples
//!
//! Default (first pattern vertex as anchor, exact dedupe, unbounded):
//! ```
//! use depmatch_subgraph::Config;
//! let cfg = Config::default();
//! ```
//!
//! Collapse automorphisms and cap the search:
//! ```
//! use depmatch_subgraph::{Config, DedupeMode};
//! let cfg = Config::builder()
//!     .dedupe(DedupeMode::TargetSet)
//!     .step_limit(10_000)
//!     .build();
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Global search configuration.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// How to pick the pattern anchor when none is set on the matcher.
    pub anchor: AnchorPolicy,
    /// How to deduplicate matches after search.
    pub dedupe: DedupeMode,
    /// Maximum number of search steps per entry-point call.
    pub step_limit: Option<u64>,
    /// Cooperative cancellation flag checked at every step.
    pub cancel: Option<CancelToken>,
}

impl Config {
    /// Start building a configuration from the defaults.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for [`Config`].
#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the anchor policy.
    #[must_use]
    pub fn anchor(mut self, anchor: AnchorPolicy) -> Self {
        self.config.anchor = anchor;
        self
    }

    /// Pick the pattern vertex with the fewest accepting target vertices.
    #[must_use]
    pub fn rarest_anchor(self) -> Self {
        self.anchor(AnchorPolicy::Rarest)
    }

    /// Pick the pattern anchor at random, reproducibly from `seed`.
    #[must_use]
    pub fn random_anchor(self, seed: u64) -> Self {
        self.anchor(AnchorPolicy::Random { seed })
    }

    /// Set the dedupe mode.
    #[must_use]
    pub fn dedupe(mut self, dedupe: DedupeMode) -> Self {
        self.config.dedupe = dedupe;
        self
    }

    /// Stop after `steps` search steps.
    #[must_use]
    pub fn step_limit(mut self, steps: u64) -> Self {
        self.config.step_limit = Some(steps);
        self
    }

    /// Stop when `token` is cancelled.
    #[must_use]
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.config.cancel = Some(token);
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }
}

/// How the pattern anchor is chosen when not set explicitly.
///
/// The anchor never changes which matches are found, only the order in
/// which the search space is explored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnchorPolicy {
    /// First pattern vertex in insertion order.
    #[default]
    First,
    /// Pattern vertex accepted by the fewest target vertices; ties go to
    /// the earlier vertex.
    Rarest,
    /// Seeded random pattern vertex.
    Random {
        /// RNG seed.
        seed: u64,
    },
}

/// Control how matches are deduplicated.
///
/// - Exact:
///   Two matches are the same if they have the same size and the same
///   pattern -> target pairs.
/// - TargetSet:
///   Two matches are the same if they cover the same SET of target
///   vertices, regardless of which pattern vertex maps where (collapses
///   automorphisms of the pattern).
/// - None:
///   Keep every match the search emits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DedupeMode {
    /// Structural map equality.
    #[default]
    Exact,
    /// Same mapped target vertex set.
    TargetSet,
    /// No deduplication.
    None,
}

/// Shared flag for cancelling a running search from elsewhere.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// A fresh, untriggered token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
