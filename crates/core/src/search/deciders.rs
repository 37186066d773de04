//! Ready-made goal deciders for common destination policies.

use std::rc::Rc;

use crate::state::{Unit, World};
use crate::types::Pos;

use super::goal::GoalDecider;
use super::path_node::PathNode;

/// Seeks the closest settlement owned by the mover's player, with connected
/// ports weighted double.
///
/// A two-turn connected port (value 2/3) beats a one-turn inland settlement
/// (value 1/2). Turn costs are discovered incrementally, so a better
/// settlement can surface late and the search must run exhaustively.
pub struct ClosestOwnedSettlement {
    best_path: Option<Rc<PathNode>>,
    best_value: f32,
}

impl ClosestOwnedSettlement {
    pub fn new() -> Self {
        Self { best_path: None, best_value: 0.0 }
    }
}

impl Default for ClosestOwnedSettlement {
    fn default() -> Self {
        Self::new()
    }
}

impl GoalDecider for ClosestOwnedSettlement {
    fn check(&mut self, world: &World, mover: &Unit, candidate: &Rc<PathNode>) -> bool {
        let Some(settlement) = world.settlement_at(candidate.pos) else {
            return false;
        };
        // Ownership follows the mover's current owner, so play-time transfer
        // of either the unit or the settlement is respected.
        if settlement.owner != mover.owner {
            return false;
        }
        let weight = if settlement.connected_port { 2.0 } else { 1.0 };
        let value = weight / (candidate.turns + 1) as f32;
        if self.best_value < value {
            self.best_value = value;
            self.best_path = Some(Rc::clone(candidate));
            return true;
        }
        false
    }

    fn goal(&self) -> Option<Rc<PathNode>> {
        self.best_path.clone()
    }

    fn has_sub_goals(&self) -> bool {
        true
    }
}

/// Point-to-point goal: accept the target tile, improving only on strictly
/// fewer turns. Cheapest-first expansion makes the first acceptance optimal,
/// so the engine may stop there.
pub struct ReachTarget {
    target: Pos,
    best_path: Option<Rc<PathNode>>,
}

impl ReachTarget {
    pub fn new(target: Pos) -> Self {
        Self { target, best_path: None }
    }
}

impl GoalDecider for ReachTarget {
    fn check(&mut self, _world: &World, _mover: &Unit, candidate: &Rc<PathNode>) -> bool {
        if candidate.pos != self.target {
            return false;
        }
        let improves = match &self.best_path {
            None => true,
            Some(best) => candidate.turns < best.turns,
        };
        if improves {
            self.best_path = Some(Rc::clone(candidate));
        }
        improves
    }

    fn goal(&self) -> Option<Rc<PathNode>> {
        self.best_path.clone()
    }

    fn has_sub_goals(&self) -> bool {
        false
    }
}

/// Accepts the first candidate satisfying a caller-supplied predicate, then
/// any later candidate satisfying it in strictly fewer turns.
pub struct FirstMatch<Matches>
where
    Matches: Fn(&World, &Unit, Pos) -> bool,
{
    matches: Matches,
    best_path: Option<Rc<PathNode>>,
}

impl<Matches> FirstMatch<Matches>
where
    Matches: Fn(&World, &Unit, Pos) -> bool,
{
    pub fn new(matches: Matches) -> Self {
        Self { matches, best_path: None }
    }
}

impl<Matches> GoalDecider for FirstMatch<Matches>
where
    Matches: Fn(&World, &Unit, Pos) -> bool,
{
    fn check(&mut self, world: &World, mover: &Unit, candidate: &Rc<PathNode>) -> bool {
        if !(self.matches)(world, mover, candidate.pos) {
            return false;
        }
        let improves = match &self.best_path {
            None => true,
            Some(best) => candidate.turns < best.turns,
        };
        if improves {
            self.best_path = Some(Rc::clone(candidate));
        }
        improves
    }

    fn goal(&self) -> Option<Rc<PathNode>> {
        self.best_path.clone()
    }

    fn has_sub_goals(&self) -> bool {
        false
    }
}
