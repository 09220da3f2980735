use std::sync::atomic::{AtomicU64, Ordering};

/// Counters updated while a search runs.
///
/// Atomic so a matcher can record progress through `&self` and another
/// thread can poll a snapshot.
#[derive(Debug, Default)]
pub struct Progress {
    steps: AtomicU64,
    branches: AtomicU64,
    matches: AtomicU64,
}

/// Point-in-time copy of [`Progress`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Work-list expansions performed.
    pub steps: u64,
    /// Candidate branches opened.
    pub branches: u64,
    /// Complete assignments emitted (before dedupe).
    pub matches: u64,
}

impl Progress {
    /// All counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every counter; called at the start of each search.
    pub fn reset(&self) {
        self.steps.store(0, Ordering::Relaxed);
        self.branches.store(0, Ordering::Relaxed);
        self.matches.store(0, Ordering::Relaxed);
    }

    /// Count one step, returning the new total.
    pub fn inc_steps(&self) -> u64 {
        self.steps.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Count `by` candidate branches.
    pub fn add_branches(&self, by: u64) {
        self.branches.fetch_add(by, Ordering::Relaxed);
    }

    /// Count one complete match.
    pub fn inc_matches(&self) {
        self.matches.fetch_add(1, Ordering::Relaxed);
    }

    /// Read a snapshot for display/reporting.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            steps: self.steps.load(Ordering::Relaxed),
            branches: self.branches.load(Ordering::Relaxed),
            matches: self.matches.load(Ordering::Relaxed),
        }
    }
}
