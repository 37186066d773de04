//! JSON scenario files describing a complete world.
//!
//! A scenario is a single JSON document: a name, the terrain as ASCII rows
//! (one glyph per tile), and lists of players, settlements, and units.
//! Settlements and units reference players by list index; a unit may name
//! another unit as its carrier via `aboard`.
//!
//! Building a world validates the document: rows must be rectangular, every
//! glyph known, every index in range, settlements on land, and carriers
//! naval and co-located with their passengers.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ruleset::Ruleset;
use crate::state::{Map, World};
use crate::types::{PlayerId, Pos, SettlementId, Terrain, UnitId, UnitKind};

pub fn terrain_glyph(terrain: Terrain) -> char {
    match terrain {
        Terrain::Ocean => '~',
        Terrain::Plains => '.',
        Terrain::Grassland => ',',
        Terrain::Forest => 'f',
        Terrain::Hills => 'h',
        Terrain::Mountains => 'm',
        Terrain::Swamp => 'w',
    }
}

fn glyph_terrain(glyph: char) -> Option<Terrain> {
    match glyph {
        '~' => Some(Terrain::Ocean),
        '.' => Some(Terrain::Plains),
        ',' => Some(Terrain::Grassland),
        'f' => Some(Terrain::Forest),
        'h' => Some(Terrain::Hills),
        'm' => Some(Terrain::Mountains),
        'w' => Some(Terrain::Swamp),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// File format structs
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub rows: Vec<String>,
    #[serde(default)]
    pub players: Vec<PlayerSpec>,
    #[serde(default)]
    pub settlements: Vec<SettlementSpec>,
    #[serde(default)]
    pub units: Vec<UnitSpec>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlayerSpec {
    pub name: String,
    /// Falls back to the ruleset's `starting_gold` option when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gold: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SettlementSpec {
    pub player: usize,
    pub name: String,
    pub y: i32,
    pub x: i32,
    /// Overrides the ocean-adjacency derivation when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_port: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UnitSpec {
    pub player: usize,
    pub kind: UnitKind,
    pub y: i32,
    pub x: i32,
    /// Index of the carrier unit this unit starts aboard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aboard: Option<usize>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Describes why a scenario could not be loaded or built into a world.
#[derive(Debug)]
pub enum ScenarioError {
    /// Underlying I/O failure.
    Io(io::Error),
    /// The file is not valid JSON matching the scenario schema.
    Parse { message: String },
    /// The scenario has no terrain rows.
    EmptyMap,
    /// A terrain row differs in length from the first row.
    RaggedRow { row: usize, expected: usize, found: usize },
    /// A terrain glyph is not one of the known characters.
    UnknownGlyph { row: usize, column: usize, glyph: char },
    /// A settlement or unit names a player index outside the list.
    BadPlayerIndex { index: usize },
    /// A settlement or unit position is outside the map.
    OutOfMap { y: i32, x: i32 },
    /// A settlement stands on an ocean tile.
    SettlementAtSea { y: i32, x: i32 },
    /// A unit names a carrier index outside the list, or itself.
    BadCarrierIndex { index: usize },
    /// A unit's named carrier is not a naval unit.
    CarrierNotNaval { index: usize },
    /// A unit is not at its named carrier's position.
    CarrierElsewhere { index: usize },
    /// A land unit stands on open water with no carrier.
    LandUnitAtSea { index: usize },
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "scenario I/O error: {e}"),
            Self::Parse { message } => write!(f, "invalid scenario: {message}"),
            Self::EmptyMap => write!(f, "scenario has no terrain rows"),
            Self::RaggedRow { row, expected, found } => {
                write!(f, "terrain row {row} has {found} tiles, expected {expected}")
            }
            Self::UnknownGlyph { row, column, glyph } => {
                write!(f, "unknown terrain glyph `{glyph}` at row {row}, column {column}")
            }
            Self::BadPlayerIndex { index } => write!(f, "player index {index} is out of range"),
            Self::OutOfMap { y, x } => write!(f, "position ({y}, {x}) is outside the map"),
            Self::SettlementAtSea { y, x } => {
                write!(f, "settlement at ({y}, {x}) stands on ocean")
            }
            Self::BadCarrierIndex { index } => {
                write!(f, "carrier index {index} is out of range")
            }
            Self::CarrierNotNaval { index } => {
                write!(f, "unit {index} is aboard a carrier that is not naval")
            }
            Self::CarrierElsewhere { index } => {
                write!(f, "unit {index} is not at its carrier's position")
            }
            Self::LandUnitAtSea { index } => {
                write!(f, "land unit {index} stands on open water without a carrier")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Loading and building
// ---------------------------------------------------------------------------

/// A world built from a scenario, with list-index to id mappings.
#[derive(Debug)]
pub struct BuiltWorld {
    pub world: World,
    pub players: Vec<PlayerId>,
    pub settlements: Vec<SettlementId>,
    pub units: Vec<UnitId>,
}

/// Load a scenario document from a JSON file.
pub fn load_scenario(path: &Path) -> Result<Scenario, ScenarioError> {
    let text = fs::read_to_string(path).map_err(ScenarioError::Io)?;
    serde_json::from_str(&text).map_err(|e| ScenarioError::Parse { message: e.to_string() })
}

impl Scenario {
    /// Validate the document and build the world it describes.
    pub fn build(&self, rules: &Ruleset) -> Result<BuiltWorld, ScenarioError> {
        let map = self.parse_map()?;
        let mut world = World::new(map);

        let mut players = Vec::with_capacity(self.players.len());
        for spec in &self.players {
            let gold = spec.gold.unwrap_or(rules.options.starting_gold);
            players.push(world.add_player(&spec.name, gold));
        }

        let mut settlements = Vec::with_capacity(self.settlements.len());
        for spec in &self.settlements {
            let owner = *players
                .get(spec.player)
                .ok_or(ScenarioError::BadPlayerIndex { index: spec.player })?;
            let pos = Pos { y: spec.y, x: spec.x };
            if !world.map.in_bounds(pos) {
                return Err(ScenarioError::OutOfMap { y: spec.y, x: spec.x });
            }
            if world.map.tile_at(pos) == Terrain::Ocean {
                return Err(ScenarioError::SettlementAtSea { y: spec.y, x: spec.x });
            }
            let id = world.found_settlement(owner, pos, &spec.name);
            if let Some(flag) = spec.connected_port {
                world.settlements[id].connected_port = flag;
            }
            settlements.push(id);
        }

        let mut units = Vec::with_capacity(self.units.len());
        for spec in &self.units {
            let owner = *players
                .get(spec.player)
                .ok_or(ScenarioError::BadPlayerIndex { index: spec.player })?;
            let pos = Pos { y: spec.y, x: spec.x };
            if !world.map.in_bounds(pos) {
                return Err(ScenarioError::OutOfMap { y: spec.y, x: spec.x });
            }
            units.push(world.spawn_unit(owner, spec.kind, pos));
        }

        // Carrier links resolve in a second pass so a passenger may precede
        // its carrier in the list.
        for (index, spec) in self.units.iter().enumerate() {
            let Some(carrier_index) = spec.aboard else {
                let afloat = rules.profile(spec.kind).naval;
                let at_sea =
                    world.map.tile_at(Pos { y: spec.y, x: spec.x }) == Terrain::Ocean;
                if at_sea && !afloat {
                    return Err(ScenarioError::LandUnitAtSea { index });
                }
                continue;
            };
            if carrier_index == index {
                return Err(ScenarioError::BadCarrierIndex { index: carrier_index });
            }
            let carrier_spec = self
                .units
                .get(carrier_index)
                .ok_or(ScenarioError::BadCarrierIndex { index: carrier_index })?;
            if !rules.profile(carrier_spec.kind).naval {
                return Err(ScenarioError::CarrierNotNaval { index });
            }
            if (carrier_spec.y, carrier_spec.x) != (spec.y, spec.x) {
                return Err(ScenarioError::CarrierElsewhere { index });
            }
            world.units[units[index]].carrier = Some(units[carrier_index]);
        }

        Ok(BuiltWorld { world, players, settlements, units })
    }

    fn parse_map(&self) -> Result<Map, ScenarioError> {
        let Some(first) = self.rows.first() else {
            return Err(ScenarioError::EmptyMap);
        };
        let width = first.chars().count();
        if width == 0 {
            return Err(ScenarioError::EmptyMap);
        }
        let height = self.rows.len();

        let mut map = Map::new(width, height);
        for (y, row) in self.rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(ScenarioError::RaggedRow { row: y, expected: width, found });
            }
            for (x, glyph) in row.chars().enumerate() {
                let terrain = glyph_terrain(glyph).ok_or(ScenarioError::UnknownGlyph {
                    row: y,
                    column: x,
                    glyph,
                })?;
                map.set_tile(Pos { y: y as i32, x: x as i32 }, terrain);
            }
        }
        Ok(map)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
