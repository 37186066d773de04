//! TOML ruleset files with parent overlay chaining.
//!
//! A ruleset lives at `<rules_dir>/<id>.toml`. Every field is optional; a file
//! overlays its parent (`parent = "<id>"`, another file in the same
//! directory), and a file without a parent overlays the built-in base rules.
//! Overlays are applied parent first, local last, so child values override
//! parent values field by field.
//!
//! Loading validates the resolved result: terrain costs and move allowances
//! must be non-zero, and option values must be in range.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::options::OptionError;
use crate::ruleset::Ruleset;
use crate::types::{Terrain, UnitKind};

// ---------------------------------------------------------------------------
// File format structs
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct RulesetFile {
    name: Option<String>,
    parent: Option<String>,
    #[serde(default)]
    terrain_costs: BTreeMap<Terrain, u32>,
    #[serde(default)]
    unit_profiles: BTreeMap<UnitKind, ProfileOverlay>,
    options: Option<OptionsOverlay>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct ProfileOverlay {
    moves_per_turn: Option<u32>,
    naval: Option<bool>,
    cargo_capacity: Option<u32>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct OptionsOverlay {
    starting_gold: Option<u32>,
    hammer_price: Option<u32>,
    fog_of_war: Option<bool>,
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Describes why a ruleset chain could not be resolved.
#[derive(Debug)]
pub enum RulesetLoadError {
    /// Underlying I/O failure reading a ruleset file.
    Io { id: String, error: io::Error },
    /// A file could not be parsed as TOML matching the ruleset schema.
    Parse { id: String, message: String },
    /// A file names a parent id with no file in the rules directory.
    MissingParent { id: String, parent: String },
    /// Following `parent` links revisited an id.
    ParentCycle { id: String },
    /// A resolved terrain cost is zero.
    ZeroTerrainCost { id: String, terrain: Terrain },
    /// A resolved move allowance is zero.
    ZeroMoveAllowance { id: String, kind: UnitKind },
    /// A resolved option value is out of range.
    Option { id: String, error: OptionError },
}

impl fmt::Display for RulesetLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { id, error } => write!(f, "ruleset `{id}`: I/O error: {error}"),
            Self::Parse { id, message } => write!(f, "ruleset `{id}`: {message}"),
            Self::MissingParent { id, parent } => {
                write!(f, "ruleset `{id}` names missing parent `{parent}`")
            }
            Self::ParentCycle { id } => {
                write!(f, "ruleset parent chain revisits `{id}`")
            }
            Self::ZeroTerrainCost { id, terrain } => {
                write!(f, "ruleset `{id}`: zero move cost for {terrain:?}")
            }
            Self::ZeroMoveAllowance { id, kind } => {
                write!(f, "ruleset `{id}`: zero move allowance for {kind:?}")
            }
            Self::Option { id, error } => write!(f, "ruleset `{id}`: {error}"),
        }
    }
}

/// Load and resolve the ruleset `id` from `rules_dir`.
///
/// Follows `parent` links to the root of the chain, overlays the files onto
/// the built-in base rules, and validates the resolved result.
pub fn load_ruleset(rules_dir: &Path, id: &str) -> Result<Ruleset, RulesetLoadError> {
    let mut chain: Vec<RulesetFile> = Vec::new();
    let mut visited = BTreeSet::new();
    let mut current = id.to_string();
    let mut child: Option<String> = None;

    loop {
        if !visited.insert(current.clone()) {
            return Err(RulesetLoadError::ParentCycle { id: current });
        }

        let path = rules_dir.join(format!("{current}.toml"));
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(error) => {
                return Err(match (&child, error.kind()) {
                    (Some(child_id), io::ErrorKind::NotFound) => RulesetLoadError::MissingParent {
                        id: child_id.clone(),
                        parent: current,
                    },
                    _ => RulesetLoadError::Io { id: current, error },
                });
            }
        };

        let file: RulesetFile = toml::from_str(&text)
            .map_err(|e| RulesetLoadError::Parse { id: current.clone(), message: e.to_string() })?;
        let parent = file.parent.clone();
        chain.push(file);

        match parent {
            Some(next) => {
                child = Some(current);
                current = next;
            }
            None => break,
        }
    }

    let mut rules = Ruleset::base();
    for file in chain.iter().rev() {
        apply_overlay(&mut rules, file);
    }
    rules.id = id.to_string();

    validate(&rules)?;
    Ok(rules)
}

fn apply_overlay(rules: &mut Ruleset, file: &RulesetFile) {
    if let Some(name) = &file.name {
        rules.name = name.clone();
    }
    for (terrain, cost) in &file.terrain_costs {
        rules.terrain_costs.insert(*terrain, *cost);
    }
    for (kind, overlay) in &file.unit_profiles {
        let mut profile = rules.profile(*kind);
        if let Some(moves) = overlay.moves_per_turn {
            profile.moves_per_turn = moves;
        }
        if let Some(naval) = overlay.naval {
            profile.naval = naval;
        }
        if let Some(cargo) = overlay.cargo_capacity {
            profile.cargo_capacity = cargo;
        }
        rules.unit_profiles.insert(*kind, profile);
    }
    if let Some(options) = &file.options {
        if let Some(gold) = options.starting_gold {
            rules.options.starting_gold = gold;
        }
        if let Some(price) = options.hammer_price {
            rules.options.hammer_price = price;
        }
        if let Some(fog) = options.fog_of_war {
            rules.options.fog_of_war = fog;
        }
    }
}

fn validate(rules: &Ruleset) -> Result<(), RulesetLoadError> {
    for (terrain, cost) in &rules.terrain_costs {
        if *cost == 0 {
            return Err(RulesetLoadError::ZeroTerrainCost {
                id: rules.id.clone(),
                terrain: *terrain,
            });
        }
    }
    for (kind, profile) in &rules.unit_profiles {
        if profile.moves_per_turn == 0 {
            return Err(RulesetLoadError::ZeroMoveAllowance { id: rules.id.clone(), kind: *kind });
        }
    }
    rules
        .options
        .validate()
        .map_err(|error| RulesetLoadError::Option { id: rules.id.clone(), error })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
