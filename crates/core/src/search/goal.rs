//! The decider contract consumed by the search engine, plus composition.
//! This module exists to keep destination policy separate from frontier
//! expansion. It does not own cost accounting or passability rules.

use std::fmt;
use std::rc::Rc;

use crate::state::{Unit, World};

use super::path_node::PathNode;

/// Caller-supplied policy deciding which reachable locations are acceptable
/// destinations and which of several acceptable destinations is preferred.
///
/// One instance serves one search: `check` accumulates best-so-far state, and
/// the best path only ever improves over the lifetime of the instance.
pub trait GoalDecider {
    /// Evaluate one candidate path. May update internal best-so-far state.
    ///
    /// Returns true exactly when this call made (or reaffirmed) the candidate
    /// the preferred terminal. The engine uses the result to decide early-exit
    /// eligibility together with [`GoalDecider::has_sub_goals`].
    fn check(&mut self, world: &World, mover: &Unit, candidate: &Rc<PathNode>) -> bool;

    /// The best path accepted so far, or `None` before any acceptance.
    /// Idempotent; never returns a path that was not previously passed to an
    /// accepting `check` call.
    fn goal(&self) -> Option<Rc<PathNode>>;

    /// True when acceptance is necessary but not sufficient: a better
    /// candidate may still appear, so the engine must keep searching.
    fn has_sub_goals(&self) -> bool;
}

/// Constructing a composite from fewer than two sub-deciders.
#[derive(Debug, PartialEq, Eq)]
pub struct ComposeError {
    pub provided: usize,
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "composed goal decider needs at least two sub-deciders, got {}", self.provided)
    }
}

/// An ordered chain of sub-deciders; earlier entries have higher priority.
pub struct ComposedDecider {
    deciders: Vec<Box<dyn GoalDecider>>,
}

impl ComposedDecider {
    pub fn new(deciders: Vec<Box<dyn GoalDecider>>) -> Result<Self, ComposeError> {
        if deciders.len() < 2 {
            return Err(ComposeError { provided: deciders.len() });
        }
        Ok(Self { deciders })
    }
}

impl GoalDecider for ComposedDecider {
    /// Every sub-decider sees every candidate, lowest priority first.
    /// Only the final call's verdict survives, so the boolean handed back to
    /// the engine is the first-in-list sub-decider's.
    fn check(&mut self, world: &World, mover: &Unit, candidate: &Rc<PathNode>) -> bool {
        let mut accepted = false;
        for decider in self.deciders.iter_mut().rev() {
            accepted = decider.check(world, mover, candidate);
        }
        accepted
    }

    /// Priority resolves at retrieval time: the first sub-decider with a goal
    /// wins, independent of which sub-decider most recently accepted.
    fn goal(&self) -> Option<Rc<PathNode>> {
        self.deciders.iter().find_map(|decider| decider.goal())
    }

    fn has_sub_goals(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests;
