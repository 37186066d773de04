use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::search::test_support::{candidate, simple_world};
use crate::types::Pos;

/// Test double with a fixed verdict and goal that records its calls.
struct Scripted {
    name: &'static str,
    verdict: bool,
    goal: Option<Rc<PathNode>>,
    sub_goals: bool,
    calls: Rc<RefCell<Vec<&'static str>>>,
}

impl Scripted {
    fn boxed(
        name: &'static str,
        verdict: bool,
        goal: Option<Rc<PathNode>>,
        calls: &Rc<RefCell<Vec<&'static str>>>,
    ) -> Box<Self> {
        Box::new(Self { name, verdict, goal, sub_goals: false, calls: Rc::clone(calls) })
    }
}

impl GoalDecider for Scripted {
    fn check(&mut self, _world: &World, _mover: &Unit, _candidate: &Rc<PathNode>) -> bool {
        self.calls.borrow_mut().push(self.name);
        self.verdict
    }

    fn goal(&self) -> Option<Rc<PathNode>> {
        self.goal.clone()
    }

    fn has_sub_goals(&self) -> bool {
        self.sub_goals
    }
}

#[test]
fn construction_requires_at_least_two_sub_deciders() {
    let calls = Rc::new(RefCell::new(Vec::new()));

    let err = ComposedDecider::new(Vec::new()).err().expect("zero must be rejected");
    assert_eq!(err, ComposeError { provided: 0 });

    let single: Vec<Box<dyn GoalDecider>> = vec![Scripted::boxed("a", false, None, &calls)];
    let err = ComposedDecider::new(single).err().expect("one must be rejected");
    assert_eq!(err, ComposeError { provided: 1 });

    let pair: Vec<Box<dyn GoalDecider>> = vec![
        Scripted::boxed("a", false, None, &calls),
        Scripted::boxed("b", false, None, &calls),
    ];
    assert!(ComposedDecider::new(pair).is_ok());
}

#[test]
fn fresh_composite_has_no_goal() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let composite = ComposedDecider::new(vec![
        Scripted::boxed("a", false, None, &calls) as Box<dyn GoalDecider>,
        Scripted::boxed("b", false, None, &calls),
    ])
    .unwrap();

    assert!(composite.goal().is_none());
}

#[test]
fn first_sub_decider_goal_wins_regardless_of_later_state() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let goal_a = candidate(Pos { y: 1, x: 1 }, 4);
    let goal_b = candidate(Pos { y: 2, x: 2 }, 1);

    let composite = ComposedDecider::new(vec![
        Scripted::boxed("a", false, Some(Rc::clone(&goal_a)), &calls) as Box<dyn GoalDecider>,
        Scripted::boxed("b", true, Some(Rc::clone(&goal_b)), &calls),
    ])
    .unwrap();

    // Both sub-deciders hold goals; the first in the list is authoritative
    // even though the second accepted more recently and in fewer turns.
    assert!(Rc::ptr_eq(&composite.goal().unwrap(), &goal_a));
}

#[test]
fn goal_falls_through_to_lower_priority_when_higher_has_none() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let goal_b = candidate(Pos { y: 2, x: 2 }, 1);

    let composite = ComposedDecider::new(vec![
        Scripted::boxed("a", false, None, &calls) as Box<dyn GoalDecider>,
        Scripted::boxed("b", false, Some(Rc::clone(&goal_b)), &calls),
    ])
    .unwrap();

    assert!(Rc::ptr_eq(&composite.goal().unwrap(), &goal_b));
}

#[test]
fn check_calls_every_sub_decider_in_reverse_list_order() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut composite = ComposedDecider::new(vec![
        Scripted::boxed("a", false, None, &calls) as Box<dyn GoalDecider>,
        Scripted::boxed("b", false, None, &calls),
        Scripted::boxed("c", false, None, &calls),
    ])
    .unwrap();

    let (world, mover_id) = simple_world();
    let mover = world.units[mover_id].clone();
    composite.check(&world, &mover, &candidate(Pos { y: 1, x: 1 }, 0));

    assert_eq!(*calls.borrow(), vec!["c", "b", "a"]);
}

#[test]
fn check_returns_the_first_in_list_sub_deciders_verdict() {
    let (world, mover_id) = simple_world();
    let mover = world.units[mover_id].clone();
    let node = candidate(Pos { y: 1, x: 1 }, 0);

    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut rejecting_head = ComposedDecider::new(vec![
        Scripted::boxed("a", false, None, &calls) as Box<dyn GoalDecider>,
        Scripted::boxed("b", true, None, &calls),
    ])
    .unwrap();
    // The lower-priority sub-decider accepted, but the head's verdict is what
    // the engine sees.
    assert!(!rejecting_head.check(&world, &mover, &node));

    let mut accepting_head = ComposedDecider::new(vec![
        Scripted::boxed("a", true, None, &calls) as Box<dyn GoalDecider>,
        Scripted::boxed("b", false, None, &calls),
    ])
    .unwrap();
    assert!(accepting_head.check(&world, &mover, &node));
}

#[test]
fn composite_always_reports_sub_goals() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let composite = ComposedDecider::new(vec![
        // Neither child needs exhaustive search on its own.
        Scripted::boxed("a", false, None, &calls) as Box<dyn GoalDecider>,
        Scripted::boxed("b", false, None, &calls),
    ])
    .unwrap();

    assert!(composite.has_sub_goals());
}
