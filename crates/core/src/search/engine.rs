//! Cheapest-first search over `(position, aboard-carrier)` states.
//! This module exists to keep frontier expansion and cost accounting separate
//! from destination policy. It does not own goal selection; that belongs to
//! the decider passed in by the caller.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::ruleset::{MoveProfile, Ruleset};
use crate::state::{Unit, World};
use crate::types::{Pos, Terrain};

use super::goal::GoalDecider;
use super::path_node::PathNode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    turns: u32,
    used: u32,
    y: i32,
    x: i32,
    on_carrier: bool,
}

/// Outcome of one search: the decider's goal plus expansion statistics.
#[derive(Debug)]
pub struct SearchReport {
    pub goal: Option<Rc<PathNode>>,
    pub nodes_expanded: u32,
    pub acceptances: u32,
    pub stopped_early: bool,
}

struct MoveRules<'a> {
    ruleset: &'a Ruleset,
    own: MoveProfile,
    carrier: Option<MoveProfile>,
}

impl MoveRules<'_> {
    fn allowance(&self, on_carrier: bool) -> u32 {
        match (on_carrier, self.carrier) {
            (true, Some(profile)) => profile.moves_per_turn,
            _ => self.own.moves_per_turn,
        }
    }
}

struct StepOutcome {
    turns: u32,
    moves_left: u32,
    on_carrier: bool,
}

/// Expand reachable states cheapest-first, consulting `decider` on every
/// popped node (the start included).
///
/// Nodes are ordered by `(turns, move points used this turn)` with `(y, x)`
/// tie-breaks, so expansion order is deterministic. When a `check` accepts
/// and the decider has no sub-goals the search stops at that node; otherwise
/// it exhausts the frontier, subject to the optional `max_turns` budget.
pub fn find_path(
    world: &World,
    ruleset: &Ruleset,
    mover: &Unit,
    decider: &mut dyn GoalDecider,
    max_turns: Option<u32>,
) -> SearchReport {
    let carrier =
        mover.carrier.and_then(|id| world.units.get(id)).map(|unit| ruleset.profile(unit.kind));
    let rules = MoveRules { ruleset, own: ruleset.profile(mover.kind), carrier };

    let start_aboard = rules.carrier.is_some();
    let start = PathNode::origin(mover.pos, rules.allowance(start_aboard), start_aboard);

    let mut open: BTreeMap<OpenNode, Rc<PathNode>> = BTreeMap::new();
    let mut queued: BTreeMap<(Pos, bool), OpenNode> = BTreeMap::new();
    let mut best: BTreeMap<(Pos, bool), (u32, u32)> = BTreeMap::new();

    let start_key =
        OpenNode { turns: 0, used: 0, y: start.pos.y, x: start.pos.x, on_carrier: start_aboard };
    open.insert(start_key, Rc::clone(&start));
    queued.insert((start.pos, start_aboard), start_key);
    best.insert((start.pos, start_aboard), (0, 0));

    let mut report =
        SearchReport { goal: None, nodes_expanded: 0, acceptances: 0, stopped_early: false };

    while let Some((_, node)) = open.pop_first() {
        queued.remove(&(node.pos, node.on_carrier));
        report.nodes_expanded += 1;

        if decider.check(world, mover, &node) {
            report.acceptances += 1;
            if !decider.has_sub_goals() {
                report.stopped_early = true;
                break;
            }
        }

        for next in neighbors(node.pos) {
            if !world.map.in_bounds(next) {
                continue;
            }
            let Some(outcome) = step_into(world, &rules, &node, next) else {
                continue;
            };
            if max_turns.is_some_and(|budget| outcome.turns > budget) {
                continue;
            }

            let used = rules.allowance(outcome.on_carrier) - outcome.moves_left;
            let state = (next, outcome.on_carrier);
            let cost = (outcome.turns, used);
            if best.get(&state).is_none_or(|existing| cost < *existing) {
                let successor = PathNode::step(
                    &node,
                    next,
                    outcome.turns,
                    outcome.moves_left,
                    outcome.on_carrier,
                );
                if let Some(stale) = queued.remove(&state) {
                    open.remove(&stale);
                }
                let key = OpenNode {
                    turns: outcome.turns,
                    used,
                    y: next.y,
                    x: next.x,
                    on_carrier: outcome.on_carrier,
                };
                open.insert(key, successor);
                queued.insert(state, key);
                best.insert(state, cost);
            }
        }
    }

    report.goal = decider.goal();
    report
}

fn step_into(
    world: &World,
    rules: &MoveRules<'_>,
    from: &PathNode,
    next: Pos,
) -> Option<StepOutcome> {
    let terrain = world.map.tile_at(next);
    let has_port = world.settlement_at(next).is_some_and(|s| s.connected_port);

    if from.on_carrier {
        // Ocean keeps the passenger aboard; any land entry is a disembark.
    } else if rules.own.naval {
        if terrain != Terrain::Ocean && !has_port {
            return None;
        }
    } else if terrain == Terrain::Ocean {
        return None;
    }

    let mut turns = from.turns;
    let mut moves = from.moves_left;
    if moves == 0 {
        // A unit with no points left begins the next turn at full allowance.
        turns += 1;
        moves = rules.allowance(from.on_carrier);
    }

    if from.on_carrier && terrain != Terrain::Ocean {
        // Disembarking drops the carrier flag and spends the turn's movement.
        return Some(StepOutcome { turns, moves_left: 0, on_carrier: false });
    }

    let cost = rules.ruleset.terrain_cost(terrain);
    // Any remaining allowance permits the move; the remainder is consumed.
    Some(StepOutcome { turns, moves_left: moves.saturating_sub(cost), on_carrier: from.on_carrier })
}

fn neighbors(p: Pos) -> [Pos; 4] {
    [
        Pos { y: p.y - 1, x: p.x },
        Pos { y: p.y, x: p.x + 1 },
        Pos { y: p.y + 1, x: p.x },
        Pos { y: p.y, x: p.x - 1 },
    ]
}
