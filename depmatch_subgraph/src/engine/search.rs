//! Backtracking search over a work-list of pending binds and edge checks.
//!
//! Every branch owns its assignment and work-list. Branching clones both, so
//! a failed branch never leaks state into its siblings.

use std::collections::VecDeque;
use std::marker::PhantomData;
use std::ops::ControlFlow;

use depmatch_graph::{EdgeIdx, GraphIndex, NodeId};
use itertools::Itertools;
use tracing::trace;

use crate::config::{CancelToken, Config};
use crate::engine::assignment::{Binding, SingleAssignment};
use crate::error::{AbortReason, MatchError};
use crate::semantics::Accepts;
use crate::util::progress::Progress;

/// Which side of a pattern edge the bound endpoint is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    /// The edge leaves the bound endpoint.
    Outgoing,
    /// The edge enters the bound endpoint.
    Incoming,
}

#[derive(Clone, Copy, Debug)]
enum Pending {
    Bind { pattern: NodeId, target: NodeId },
    Edge { edge: EdgeIdx, direction: Direction },
}

/// Whether the search stops at the first complete assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SearchMode {
    First,
    All,
}

pub(crate) struct Search<'a, 'p, 't, PV, PE, TV, TE, S> {
    pattern: &'a GraphIndex<'p, PV, PE>,
    target: &'a GraphIndex<'t, TV, TE>,
    config: &'a Config,
    progress: &'a Progress,
    mode: SearchMode,
    found: Vec<SingleAssignment>,
    aborted: Option<AbortReason>,
    _semantics: PhantomData<S>,
}

impl<'a, 'p, 't, PV, PE, TV, TE, S> Search<'a, 'p, 't, PV, PE, TV, TE, S>
where
    S: Accepts<PV, TV> + Accepts<PE, TE>,
{
    pub(crate) fn new(
        pattern: &'a GraphIndex<'p, PV, PE>,
        target: &'a GraphIndex<'t, TV, TE>,
        config: &'a Config,
        progress: &'a Progress,
        mode: SearchMode,
    ) -> Self {
        Self {
            pattern,
            target,
            config,
            progress,
            mode,
            found: Vec::new(),
            aborted: None,
            _semantics: PhantomData,
        }
    }

    /// Run from `anchor` against each target anchor in turn.
    ///
    /// `anchor` is None only for an empty pattern, which has one empty
    /// assignment.
    pub(crate) fn run(
        mut self,
        anchor: Option<NodeId>,
        target_anchors: &[NodeId],
    ) -> Result<Vec<SingleAssignment>, MatchError> {
        match anchor {
            None => {
                let _ = self.extend(SingleAssignment::new(), VecDeque::new());
            }
            Some(anchor) => {
                for &target in target_anchors {
                    trace!("anchor P{} -> T{}", anchor, target);
                    let seed = VecDeque::from([Pending::Bind {
                        pattern: anchor,
                        target,
                    }]);
                    if self.extend(SingleAssignment::new(), seed).is_break() {
                        break;
                    }
                }
            }
        }

        if let Some(reason) = self.aborted {
            return Err(MatchError::SearchAborted {
                steps: self.progress.snapshot().steps,
                reason,
            });
        }
        Ok(self.found)
    }

    fn vertex_accepted(&self, pattern: NodeId, target: NodeId) -> bool {
        <S as Accepts<PV, TV>>::accepts(self.pattern.node(pattern), self.target.node(target))
    }

    fn label_accepted(&self, pattern: &PE, target: &TE) -> bool {
        <S as Accepts<PE, TE>>::accepts(pattern, target)
    }

    fn tick(&mut self) -> ControlFlow<()> {
        let steps = self.progress.inc_steps();
        if self.config.step_limit.is_some_and(|limit| steps > limit) {
            self.aborted = Some(AbortReason::StepLimit);
            return ControlFlow::Break(());
        }
        if self
            .config
            .cancel
            .as_ref()
            .is_some_and(CancelToken::is_cancelled)
        {
            self.aborted = Some(AbortReason::Cancelled);
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }

    /// Drain one branch's work-list. `Break` stops the whole search.
    fn extend(
        &mut self,
        mut assignment: SingleAssignment,
        mut pending: VecDeque<Pending>,
    ) -> ControlFlow<()> {
        loop {
            self.tick()?;

            let Some(item) = pending.pop_front() else {
                return self.complete(assignment);
            };

            match item {
                Pending::Bind { pattern, target } => match assignment.check(pattern, target) {
                    Binding::Consistent => {}
                    Binding::Conflict => {
                        trace!("conflict P{} -> T{}", pattern, target);
                        return ControlFlow::Continue(());
                    }
                    Binding::Free => {
                        if !self.vertex_accepted(pattern, target) {
                            trace!("reject P{} -> T{}", pattern, target);
                            return ControlFlow::Continue(());
                        }
                        assignment.assign(pattern, target);
                        pending.extend(self.pattern.outgoing(pattern).iter().map(|&edge| {
                            Pending::Edge {
                                edge,
                                direction: Direction::Outgoing,
                            }
                        }));
                        pending.extend(self.pattern.incoming(pattern).iter().map(|&edge| {
                            Pending::Edge {
                                edge,
                                direction: Direction::Incoming,
                            }
                        }));
                    }
                },
                Pending::Edge { edge, direction } => {
                    let p_edge = self.pattern.edge(edge);
                    let (near, far) = match direction {
                        Direction::Outgoing => (p_edge.source, p_edge.target),
                        Direction::Incoming => (p_edge.target, p_edge.source),
                    };
                    let Some(near_target) = assignment.target_of(near) else {
                        continue;
                    };

                    let target_edges = match direction {
                        Direction::Outgoing => self.target.outgoing(near_target),
                        Direction::Incoming => self.target.incoming(near_target),
                    };
                    let candidates: Vec<NodeId> = target_edges
                        .iter()
                        .map(|&idx| self.target.edge(idx))
                        .filter(|t_edge| self.label_accepted(p_edge.label, t_edge.label))
                        .map(|t_edge| match direction {
                            Direction::Outgoing => t_edge.target,
                            Direction::Incoming => t_edge.source,
                        })
                        .unique()
                        .collect();

                    if let Some(far_target) = assignment.target_of(far) {
                        if !candidates.contains(&far_target) {
                            trace!("edge {:?} unsatisfied at T{}", edge, near_target);
                            return ControlFlow::Continue(());
                        }
                        continue;
                    }

                    let free: Vec<NodeId> = candidates
                        .into_iter()
                        .filter(|&t| assignment.target_is_free(t))
                        .collect();
                    self.progress.add_branches(free.len() as u64);
                    trace!("branch P{} over {} candidates", far, free.len());

                    for target in free {
                        let mut branch = pending.clone();
                        branch.push_front(Pending::Bind {
                            pattern: far,
                            target,
                        });
                        self.extend(assignment.clone(), branch)?;
                    }
                    return ControlFlow::Continue(());
                }
            }
        }
    }

    /// Called when a branch's work-list is empty.
    fn complete(&mut self, assignment: SingleAssignment) -> ControlFlow<()> {
        let Some(unreached) = assignment.first_unmapped(self.pattern.node_count()) else {
            self.progress.inc_matches();
            trace!("match of size {}", assignment.len());
            self.found.push(assignment);
            return match self.mode {
                SearchMode::First => ControlFlow::Break(()),
                SearchMode::All => ControlFlow::Continue(()),
            };
        };

        // Disconnected pattern: seed the next component.
        let free: Vec<NodeId> = self
            .target
            .node_ids()
            .filter(|&t| assignment.target_is_free(t))
            .collect();
        self.progress.add_branches(free.len() as u64);
        for target in free {
            let seed = VecDeque::from([Pending::Bind {
                pattern: unreached,
                target,
            }]);
            self.extend(assignment.clone(), seed)?;
        }
        ControlFlow::Continue(())
    }
}
