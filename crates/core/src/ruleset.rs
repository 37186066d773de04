use std::collections::BTreeMap;
use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use crate::options::GameOptions;
use crate::types::{Terrain, UnitKind};

/// Per-kind movement characteristics resolved through the active ruleset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveProfile {
    pub moves_per_turn: u32,
    pub naval: bool,
    pub cargo_capacity: u32,
}

/// Fully resolved game rules: terrain costs, unit profiles, and options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ruleset {
    pub id: String,
    pub name: String,
    pub terrain_costs: BTreeMap<Terrain, u32>,
    pub unit_profiles: BTreeMap<UnitKind, MoveProfile>,
    pub options: GameOptions,
}

impl Ruleset {
    /// The built-in base rules every ruleset file ultimately overlays.
    pub fn base() -> Self {
        let terrain_costs = BTreeMap::from([
            (Terrain::Ocean, 1),
            (Terrain::Plains, 1),
            (Terrain::Grassland, 1),
            (Terrain::Forest, 2),
            (Terrain::Hills, 2),
            (Terrain::Mountains, 3),
            (Terrain::Swamp, 3),
        ]);
        let unit_profiles = BTreeMap::from([
            (UnitKind::Colonist, MoveProfile { moves_per_turn: 3, naval: false, cargo_capacity: 0 }),
            (UnitKind::Scout, MoveProfile { moves_per_turn: 4, naval: false, cargo_capacity: 0 }),
            (UnitKind::Wagon, MoveProfile { moves_per_turn: 2, naval: false, cargo_capacity: 2 }),
            (UnitKind::Caravel, MoveProfile { moves_per_turn: 4, naval: true, cargo_capacity: 2 }),
            (UnitKind::Galleon, MoveProfile { moves_per_turn: 6, naval: true, cargo_capacity: 6 }),
        ]);
        Self {
            id: "base".to_string(),
            name: "Base Rules".to_string(),
            terrain_costs,
            unit_profiles,
            options: GameOptions::default(),
        }
    }

    pub fn terrain_cost(&self, terrain: Terrain) -> u32 {
        self.terrain_costs.get(&terrain).copied().unwrap_or(1)
    }

    pub fn profile(&self, kind: UnitKind) -> MoveProfile {
        self.unit_profiles
            .get(&kind)
            .copied()
            .unwrap_or(MoveProfile { moves_per_turn: 1, naval: false, cargo_capacity: 0 })
    }

    /// Stable hash over every resolved field, for cross-checking which rules a
    /// scenario or run was using.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write(self.id.as_bytes());
        hasher.write(self.name.as_bytes());
        for (terrain, cost) in &self.terrain_costs {
            hasher.write_u8(*terrain as u8);
            hasher.write_u32(*cost);
        }
        for (kind, profile) in &self.unit_profiles {
            hasher.write_u8(*kind as u8);
            hasher.write_u32(profile.moves_per_turn);
            hasher.write_u8(u8::from(profile.naval));
            hasher.write_u32(profile.cargo_capacity);
        }
        hasher.write_u32(self.options.starting_gold);
        hasher.write_u32(self.options.hammer_price);
        hasher.write_u8(u8::from(self.options.fog_of_war));
        hasher.finish()
    }
}
