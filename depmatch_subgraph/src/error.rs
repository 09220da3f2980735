//! Error types for matching operations.
//!
//! Graph construction problems are reported by `depmatch_graph::GraphError`
//! before a matcher exists. The errors here cover the matcher itself:
//! preconditions checked before the search, anchors that cannot be
//! resolved, and searches stopped by a step limit or cancellation.

use thiserror::Error;

/// Why a search stopped before exploring every branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbortReason {
    /// The configured step limit was reached.
    StepLimit,
    /// The cancel token was triggered.
    Cancelled,
}

impl std::fmt::Display for AbortReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StepLimit => write!(f, "step limit reached"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Errors that can occur while preparing or running a match.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    /// The pattern has more vertices than the target, so no injective
    /// mapping exists.
    #[error("Pattern has {pattern} vertices but target only has {target}")]
    PatternTooLarge {
        /// Pattern vertex count.
        pattern: usize,
        /// Target vertex count.
        target: usize,
    },

    /// An anchor value is not a vertex of its graph.
    #[error("Anchor {0} is not a vertex of the {1} graph")]
    UnknownAnchor(String, &'static str),

    /// The search stopped early.
    #[error("Search aborted after {steps} steps: {reason}")]
    SearchAborted {
        /// Steps taken before stopping.
        steps: u64,
        /// What stopped it.
        reason: AbortReason,
    },
}

impl MatchError {
    /// Create an unknown pattern anchor error.
    pub fn unknown_pattern_anchor(anchor: &impl std::fmt::Debug) -> Self {
        Self::UnknownAnchor(format!("{anchor:?}"), "pattern")
    }

    /// Create an unknown target anchor error.
    pub fn unknown_target_anchor(anchor: &impl std::fmt::Debug) -> Self {
        Self::UnknownAnchor(format!("{anchor:?}"), "target")
    }
}
