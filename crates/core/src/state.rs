use std::collections::BTreeMap;

use slotmap::SlotMap;

use crate::types::*;

#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub gold: u32,
}

#[derive(Clone, Debug)]
pub struct Settlement {
    pub id: SettlementId,
    pub owner: PlayerId,
    pub pos: Pos,
    pub name: String,
    pub connected_port: bool,
}

#[derive(Clone, Debug)]
pub struct Unit {
    pub id: UnitId,
    pub owner: PlayerId,
    pub kind: UnitKind,
    pub pos: Pos,
    pub carrier: Option<UnitId>,
}

#[derive(Clone, Debug)]
pub struct Map {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Terrain>,
}

impl Map {
    pub fn new(width: usize, height: usize) -> Self {
        let mut tiles = vec![Terrain::Plains; width * height];
        for x in 0..width {
            tiles[x] = Terrain::Ocean;
            tiles[(height - 1) * width + x] = Terrain::Ocean;
        }
        for y in 0..height {
            tiles[y * width] = Terrain::Ocean;
            tiles[y * width + (width - 1)] = Terrain::Ocean;
        }
        Self { width, height, tiles }
    }

    pub fn tile_at(&self, pos: Pos) -> Terrain {
        if pos.x < 0 || pos.y < 0 {
            return Terrain::Ocean;
        }
        let xu = pos.x as usize;
        let yu = pos.y as usize;
        if xu >= self.width || yu >= self.height {
            return Terrain::Ocean;
        }
        self.tiles[yu * self.width + xu]
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn set_tile(&mut self, pos: Pos, terrain: Terrain) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = terrain;
    }

    pub fn adjacent_to_ocean(&self, pos: Pos) -> bool {
        let sides = [
            Pos { y: pos.y - 1, x: pos.x },
            Pos { y: pos.y, x: pos.x + 1 },
            Pos { y: pos.y + 1, x: pos.x },
            Pos { y: pos.y, x: pos.x - 1 },
        ];
        // Out-of-bounds reads as Ocean; only real sea tiles count as access.
        sides.iter().any(|side| self.in_bounds(*side) && self.tile_at(*side) == Terrain::Ocean)
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

#[derive(Debug)]
pub struct World {
    pub map: Map,
    pub players: SlotMap<PlayerId, Player>,
    pub units: SlotMap<UnitId, Unit>,
    pub settlements: SlotMap<SettlementId, Settlement>,
    pub settlement_index: BTreeMap<Pos, SettlementId>,
}

impl World {
    pub fn new(map: Map) -> Self {
        Self {
            map,
            players: SlotMap::with_key(),
            units: SlotMap::with_key(),
            settlements: SlotMap::with_key(),
            settlement_index: BTreeMap::new(),
        }
    }

    pub fn add_player(&mut self, name: &str, gold: u32) -> PlayerId {
        let player = Player { id: PlayerId::default(), name: name.to_string(), gold };
        let id = self.players.insert(player);
        self.players[id].id = id;
        id
    }

    /// Founds a settlement and derives its port flag from ocean adjacency.
    pub fn found_settlement(&mut self, owner: PlayerId, pos: Pos, name: &str) -> SettlementId {
        let connected_port = self.map.adjacent_to_ocean(pos);
        let settlement = Settlement {
            id: SettlementId::default(),
            owner,
            pos,
            name: name.to_string(),
            connected_port,
        };
        let id = self.settlements.insert(settlement);
        self.settlements[id].id = id;
        self.settlement_index.insert(pos, id);
        id
    }

    pub fn spawn_unit(&mut self, owner: PlayerId, kind: UnitKind, pos: Pos) -> UnitId {
        let unit = Unit { id: UnitId::default(), owner, kind, pos, carrier: None };
        let id = self.units.insert(unit);
        self.units[id].id = id;
        id
    }

    pub fn settlement_at(&self, pos: Pos) -> Option<&Settlement> {
        self.settlement_index.get(&pos).map(|id| &self.settlements[*id])
    }
}
