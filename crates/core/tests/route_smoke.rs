use std::fs;

use tempfile::tempdir;

use core::{
    ClosestOwnedSettlement, ComposedDecider, GoalDecider, Pos, ReachTarget, Ruleset, Scenario,
    find_path, generate_scenario, load_ruleset,
};

fn meadow_scenario() -> Scenario {
    serde_json::from_str(
        r#"{
            "name": "meadow",
            "rows": [
                "~~~~~~~~~~",
                "~........~",
                "~........~",
                "~...ff...~",
                "~........~",
                "~~~~~~~~~~"
            ],
            "players": [{"name": "Crown"}],
            "settlements": [{"player": 0, "name": "Crossing", "y": 2, "x": 5}],
            "units": [{"player": 0, "kind": "colonist", "y": 2, "x": 2}]
        }"#,
    )
    .unwrap()
}

#[test]
fn composed_goals_fall_through_to_the_settlement_fallback() {
    let rules = Ruleset::base();
    let built = meadow_scenario().build(&rules).unwrap();
    let mover = built.world.units[built.units[0]].clone();

    // The primary goal is an ocean corner no land unit can reach; the
    // fallback settlement decider must supply the composite's goal.
    let mut decider = ComposedDecider::new(vec![
        Box::new(ReachTarget::new(Pos { y: 0, x: 0 })) as Box<dyn GoalDecider>,
        Box::new(ClosestOwnedSettlement::new()),
    ])
    .unwrap();
    let report = find_path(&built.world, &rules, &mover, &mut decider, None);

    assert!(!report.stopped_early, "composites always search exhaustively");
    let goal = report.goal.expect("fallback goal");
    assert_eq!(goal.pos, Pos { y: 2, x: 5 });
    assert_eq!(goal.route().first(), Some(&Pos { y: 2, x: 2 }));
}

#[test]
fn the_primary_goal_dominates_when_both_sub_deciders_succeed() {
    let rules = Ruleset::base();
    let built = meadow_scenario().build(&rules).unwrap();
    let mover = built.world.units[built.units[0]].clone();

    let target = Pos { y: 1, x: 8 };
    let mut decider = ComposedDecider::new(vec![
        Box::new(ReachTarget::new(target)) as Box<dyn GoalDecider>,
        Box::new(ClosestOwnedSettlement::new()),
    ])
    .unwrap();
    let report = find_path(&built.world, &rules, &mover, &mut decider, None);

    // The settlement is nearer, but the first-in-list goal is authoritative.
    let goal = report.goal.expect("primary goal");
    assert_eq!(goal.pos, target);
}

#[test]
fn a_ruleset_overlay_changes_route_pacing() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("march.toml"),
        "[unit_profiles.colonist]\nmoves_per_turn = 6\n",
    )
    .unwrap();
    let march = load_ruleset(dir.path(), "march").unwrap();
    let base = Ruleset::base();
    assert_ne!(base.content_hash(), march.content_hash());

    let scenario = meadow_scenario();
    let target = Pos { y: 2, x: 8 };

    // Six plains steps: two turns for a three-move colonist.
    let built = scenario.build(&base).unwrap();
    let mover = built.world.units[built.units[0]].clone();
    let mut decider = ReachTarget::new(target);
    let report = find_path(&built.world, &base, &mover, &mut decider, None);
    assert_eq!(report.goal.expect("route under base rules").turns, 1);

    // One turn once the overlay doubles the allowance.
    let built = scenario.build(&march).unwrap();
    let mover = built.world.units[built.units[0]].clone();
    let mut decider = ReachTarget::new(target);
    let report = find_path(&built.world, &march, &mover, &mut decider, None);
    assert_eq!(report.goal.expect("route under march rules").turns, 0);
}

#[test]
fn a_generated_world_routes_its_passenger_home() {
    let rules = Ruleset::base();
    let scenario = generate_scenario(11);
    let built = scenario.build(&rules).unwrap();

    let passenger = built
        .world
        .units
        .values()
        .find(|unit| unit.carrier.is_some())
        .expect("the demo scenario ships a carried colonist")
        .clone();

    let mut decider = ClosestOwnedSettlement::new();
    let report = find_path(&built.world, &rules, &passenger, &mut decider, None);

    let goal = report.goal.expect("an owned settlement is reachable by sea");
    let settlement = built.world.settlement_at(goal.pos).expect("goal tile holds a settlement");
    assert_eq!(settlement.owner, passenger.owner);
}
