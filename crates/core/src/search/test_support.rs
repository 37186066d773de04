//! Shared test fixtures for the search test suites.
//! This module exists to avoid repeating world and ruleset setup across many
//! tests. It does not own production search logic.

use std::rc::Rc;

use crate::state::{Map, World};
use crate::types::{Pos, UnitId, UnitKind};

use super::path_node::PathNode;

/// A candidate node as a decider would see it mid-search.
pub(crate) fn candidate(pos: Pos, turns: u32) -> Rc<PathNode> {
    Rc::new(PathNode { pos, turns, moves_left: 0, on_carrier: false, previous: None })
}

/// Open plains with an ocean border, one player, one colonist at (4, 2).
pub(crate) fn simple_world() -> (World, UnitId) {
    let mut world = World::new(Map::new(10, 8));
    let player = world.add_player("Crown", 0);
    let mover = world.spawn_unit(player, UnitKind::Colonist, Pos { y: 4, x: 2 });
    (world, mover)
}

/// [`simple_world`] plus two owned settlements: a connected port at (1, 1)
/// and an inland settlement at (4, 6).
pub(crate) fn settlement_pair_world() -> (World, UnitId) {
    let (mut world, mover) = simple_world();
    let player = world.units[mover].owner;
    world.found_settlement(player, Pos { y: 1, x: 1 }, "Harbor");
    world.found_settlement(player, Pos { y: 4, x: 6 }, "Crossing");
    assert!(world.settlement_at(Pos { y: 1, x: 1 }).expect("port").connected_port);
    assert!(!world.settlement_at(Pos { y: 4, x: 6 }).expect("inland").connected_port);
    (world, mover)
}
