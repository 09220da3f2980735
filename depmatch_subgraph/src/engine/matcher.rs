//! Subgraph matching entry points.
//!
//! A matcher borrows a pattern and a target graph, snapshots both into
//! dense [`GraphIndex`]es and runs the backtracking search from
//! the search module. How pattern values are tested against target values
//! is chosen by the semantics parameter `S`.

use std::collections::HashSet;
use std::marker::PhantomData;

use depmatch_graph::{Graph, GraphIndex, Identity, Indexed, NodeId};
use itertools::Itertools;
use tracing::{debug, warn};

use crate::anchor::choose_pattern_anchor;
use crate::config::{Config, DedupeMode};
use crate::embedding::Embedding;
use crate::engine::assignment::SingleAssignment;
use crate::engine::search::{Search, SearchMode};
use crate::error::MatchError;
use crate::predicate::Predicate;
use crate::semantics::{Accepts, ByPayload, ByPredicate, Exact};
use crate::util::progress::{Progress, ProgressSnapshot};

/// Searches a target graph for occurrences of a pattern graph.
///
/// ```
/// use depmatch_graph::Graph;
/// use depmatch_subgraph::ExactMatcher;
///
/// let mut target: Graph<&str, &str> = Graph::new();
/// for v in ["a", "b", "c"] {
///     target.add_vertex(v);
/// }
/// target.add_edge(&"b", &"a", "NSUBJ")?;
/// target.add_edge(&"b", &"c", "DOBJ")?;
///
/// let mut pattern: Graph<&str, &str> = Graph::new();
/// pattern.add_vertex("a");
/// pattern.add_vertex("b");
/// pattern.add_edge(&"b", &"a", "NSUBJ")?;
///
/// let matcher = ExactMatcher::new(&pattern, &target);
/// assert!(matcher.exists_match());
/// # Ok::<(), depmatch_graph::GraphError>(())
/// ```
pub struct SubgraphMatcher<'p, 't, PV, PE, TV, TE, S = Exact> {
    /// Snapshot of the pattern graph.
    pattern: GraphIndex<'p, PV, PE>,
    /// Snapshot of the target graph.
    target: GraphIndex<'t, TV, TE>,
    /// Pattern node the search starts from. None for an empty pattern.
    pattern_anchor: Option<NodeId>,
    /// Target nodes tried for the anchor. None means every target node.
    target_anchors: Option<Vec<NodeId>>,
    config: Config,
    progress: Progress,
    _semantics: PhantomData<S>,
}

/// Pattern values compared with `==` against target values.
pub type ExactMatcher<'p, 't, V, E> = SubgraphMatcher<'p, 't, V, E, V, E, Exact>;

/// Pattern values are predicates over the target's values.
pub type PredicateMatcher<'p, 't, V, E> =
    SubgraphMatcher<'p, 't, Predicate<V>, Predicate<E>, V, E, ByPredicate>;

/// Indexed values on both sides, compared by payload.
pub type PayloadMatcher<'p, 't, V, E> =
    SubgraphMatcher<'p, 't, Indexed<V>, Indexed<E>, Indexed<V>, Indexed<E>, ByPayload>;

impl<'p, 't, PV, PE, TV, TE, S> SubgraphMatcher<'p, 't, PV, PE, TV, TE, S>
where
    S: Accepts<PV, TV> + Accepts<PE, TE>,
{
    /// Matcher with the default configuration.
    pub fn new<PI, TI>(pattern: &'p Graph<PV, PE, PI>, target: &'t Graph<TV, TE, TI>) -> Self
    where
        PI: Identity<PV, PE>,
        TI: Identity<TV, TE>,
    {
        Self::with_config(pattern, target, Config::default())
    }

    /// Matcher with an explicit configuration.
    pub fn with_config<PI, TI>(
        pattern: &'p Graph<PV, PE, PI>,
        target: &'t Graph<TV, TE, TI>,
        config: Config,
    ) -> Self
    where
        PI: Identity<PV, PE>,
        TI: Identity<TV, TE>,
    {
        Self::from_indices(pattern.index(), target.index(), config)
    }

    /// Matcher over prebuilt snapshots.
    ///
    /// Useful when one target is searched with many patterns: the target
    /// snapshot can be cloned instead of rebuilt.
    pub fn from_indices(
        pattern: GraphIndex<'p, PV, PE>,
        target: GraphIndex<'t, TV, TE>,
        config: Config,
    ) -> Self {
        let pattern_anchor =
            choose_pattern_anchor::<PV, PE, TV, TE, S>(&pattern, &target, config.anchor);
        debug!(
            "SubgraphMatcher: pattern {} nodes / {} edges, target {} nodes / {} edges, anchor {:?} ({:?})",
            pattern.node_count(),
            pattern.edge_count(),
            target.node_count(),
            target.edge_count(),
            pattern_anchor,
            config.anchor
        );
        Self {
            pattern,
            target,
            pattern_anchor,
            target_anchors: None,
            config,
            progress: Progress::new(),
            _semantics: PhantomData,
        }
    }

    /// Start the search from this pattern vertex.
    ///
    /// # Errors
    ///
    /// [`MatchError::UnknownAnchor`] if `anchor` is not a pattern vertex.
    pub fn set_anchor(&mut self, anchor: &PV) -> Result<(), MatchError>
    where
        PV: PartialEq + std::fmt::Debug,
    {
        let id = self
            .pattern
            .position_of(anchor)
            .ok_or_else(|| MatchError::unknown_pattern_anchor(anchor))?;
        debug!("SubgraphMatcher: pattern anchor set to {:?} ({})", anchor, id);
        self.pattern_anchor = Some(id);
        Ok(())
    }

    /// Only try these target vertices as images of the pattern anchor.
    ///
    /// # Errors
    ///
    /// [`MatchError::UnknownAnchor`] for the first value that is not a
    /// target vertex. The previous candidates are kept in that case.
    pub fn set_candidate_anchors<'a>(
        &mut self,
        anchors: impl IntoIterator<Item = &'a TV>,
    ) -> Result<(), MatchError>
    where
        TV: PartialEq + std::fmt::Debug + 'a,
    {
        let ids: Vec<NodeId> = anchors
            .into_iter()
            .map(|anchor| {
                self.target
                    .position_of(anchor)
                    .ok_or_else(|| MatchError::unknown_target_anchor(anchor))
            })
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .unique()
            .collect();
        debug!("SubgraphMatcher: {} candidate target anchors", ids.len());
        self.target_anchors = Some(ids);
        Ok(())
    }

    /// The pattern vertex the search starts from, if the pattern is not empty.
    pub fn pattern_anchor(&self) -> Option<&'p PV> {
        self.pattern_anchor.map(|id| self.pattern.node(id))
    }

    /// Counters from the most recent entry-point call.
    pub fn progress(&self) -> ProgressSnapshot {
        self.progress.snapshot()
    }

    /// The configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn check_size(&self) -> Result<(), MatchError> {
        let (pattern, target) = (self.pattern.node_count(), self.target.node_count());
        if pattern > target {
            return Err(MatchError::PatternTooLarge { pattern, target });
        }
        Ok(())
    }

    fn search(&self, mode: SearchMode) -> Result<Vec<SingleAssignment>, MatchError> {
        self.progress.reset();
        self.check_size()?;

        let all_targets: Vec<NodeId>;
        let target_anchors: &[NodeId] = match &self.target_anchors {
            Some(anchors) => anchors,
            None => {
                all_targets = self.target.node_ids().collect();
                &all_targets
            }
        };

        Search::<PV, PE, TV, TE, S>::new(
            &self.pattern,
            &self.target,
            &self.config,
            &self.progress,
            mode,
        )
        .run(self.pattern_anchor, target_anchors)
    }

    /// All distinct embeddings of the pattern in the target.
    ///
    /// Embeddings are deduplicated according to [`Config::dedupe`].
    ///
    /// # Errors
    ///
    /// [`MatchError::PatternTooLarge`] if the pattern has more vertices than
    /// the target, [`MatchError::SearchAborted`] if the step limit or the
    /// cancel token stopped the search.
    pub fn enumerate_matches(&self) -> Result<Vec<Embedding<'p, 't, PV, TV>>, MatchError> {
        let mut results = self.search(SearchMode::All)?;
        let total_found = results.len();

        match self.config.dedupe {
            DedupeMode::Exact => {
                let mut seen: HashSet<Vec<(NodeId, NodeId)>> = HashSet::new();
                results.retain(|a| seen.insert(a.signature()));
            }
            DedupeMode::TargetSet => {
                let mut seen: HashSet<Vec<NodeId>> = HashSet::new();
                results.retain(|a| seen.insert(a.target_set_signature()));
            }
            DedupeMode::None => {}
        }

        let progress = self.progress.snapshot();
        debug!(
            "enumerate_matches: {} raw matches, {} after dedupe, {} steps, {} branches",
            total_found,
            results.len(),
            progress.steps,
            progress.branches
        );

        Ok(results
            .into_iter()
            .map(|a| Embedding::from_assignment(a, &self.pattern, &self.target))
            .collect())
    }

    /// True if at least one embedding exists. Stops at the first one found.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::enumerate_matches`].
    pub fn try_exists_match(&self) -> Result<bool, MatchError> {
        let found = !self.search(SearchMode::First)?.is_empty();
        debug!(
            "exists_match: {} after {} steps",
            found,
            self.progress.snapshot().steps
        );
        Ok(found)
    }

    /// True if at least one embedding exists.
    ///
    /// An oversized pattern or an aborted search is logged as a warning and
    /// reported as no match.
    pub fn exists_match(&self) -> bool {
        self.try_exists_match().unwrap_or_else(|e| {
            warn!("exists_match: {}", e);
            false
        })
    }
}

impl<'p, 't, V, E, S> SubgraphMatcher<'p, 't, V, E, V, E, S>
where
    S: Accepts<V, V> + Accepts<E, E>,
{
    /// Mutual embedding test between two graphs of equal vertex count.
    ///
    /// False without searching when the vertex counts differ. Otherwise the
    /// pattern must embed in the target and the target in the pattern. The
    /// reverse search uses default anchors.
    pub fn is_isomorphic(&self) -> bool {
        self.progress.reset();
        if self.pattern.node_count() != self.target.node_count() {
            debug!(
                "is_isomorphic: vertex counts differ ({} vs {})",
                self.pattern.node_count(),
                self.target.node_count()
            );
            return false;
        }
        if !self.exists_match() {
            return false;
        }

        let reverse = SubgraphMatcher::<'t, 'p, V, E, V, E, S>::from_indices(
            self.target.clone(),
            self.pattern.clone(),
            self.config.clone(),
        );
        reverse.exists_match()
    }
}
