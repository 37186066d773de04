pub mod options;
pub mod ruleset;
pub mod ruleset_file;
pub mod scenario;
pub mod search;
pub mod state;
pub mod types;
pub mod worldgen;

pub use options::{GameOptions, OptionError};
pub use ruleset::{MoveProfile, Ruleset};
pub use ruleset_file::{RulesetLoadError, load_ruleset};
pub use scenario::{BuiltWorld, Scenario, ScenarioError, load_scenario};
pub use search::{
    ClosestOwnedSettlement, ComposeError, ComposedDecider, FirstMatch, GoalDecider, PathNode,
    ReachTarget, SearchReport, find_path,
};
pub use state::{Map, Player, Settlement, Unit, World};
pub use types::*;
pub use worldgen::generate_scenario;
