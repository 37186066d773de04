use slotmap::new_key_type;

new_key_type! {
    pub struct PlayerId;
    pub struct UnitId;
    pub struct SettlementId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    Ocean,
    Plains,
    Grassland,
    Forest,
    Hills,
    Mountains,
    Swamp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Colonist,
    Scout,
    Wagon,
    Caravel,
    Galleon,
}
