//! Seeded demo-world generation for CLI experimentation.
//! Output is deterministic per seed and always builds into a valid world.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use crate::scenario::{PlayerSpec, Scenario, SettlementSpec, UnitSpec, terrain_glyph};
use crate::types::{Pos, Terrain, UnitKind};

const WIDTH: usize = 24;
const HEIGHT: usize = 16;
const WALK_STEPS: usize = 90;

fn roll(rng: &mut ChaCha8Rng, min: usize, max: usize) -> usize {
    debug_assert!(min <= max);
    min + (rng.next_u64() as usize) % (max - min + 1)
}

/// Generate a small two-player scenario: one continent per player, a coastal
/// and an inland settlement each, and a starter caravel with a passenger.
pub fn generate_scenario(seed: u64) -> Scenario {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut tiles = vec![Terrain::Ocean; WIDTH * HEIGHT];

    // One continent per player, grown by random walk on each map half.
    let continents = [
        grow_continent(&mut rng, &mut tiles, WIDTH / 4),
        grow_continent(&mut rng, &mut tiles, 3 * WIDTH / 4),
    ];

    let rows = tiles
        .chunks(WIDTH)
        .map(|row| row.iter().map(|t| terrain_glyph(*t)).collect())
        .collect();

    let mut scenario = Scenario {
        name: format!("demo-{seed}"),
        rows,
        players: vec![
            PlayerSpec { name: "Amber Crown".to_string(), gold: Some(100) },
            PlayerSpec { name: "Silver League".to_string(), gold: Some(100) },
        ],
        settlements: Vec::new(),
        units: Vec::new(),
    };

    for (player, continent) in continents.iter().enumerate() {
        let coastal = continent[roll(&mut rng, 0, continent.len() - 1)];
        let coastal = nearest_coastal(&tiles, continent, coastal);
        let inland = *continent
            .iter()
            .filter(|pos| **pos != coastal)
            .max_by_key(|pos| manhattan(**pos, coastal))
            .unwrap_or(&coastal);

        scenario.settlements.push(SettlementSpec {
            player,
            name: format!("Port {}", ["Anna", "Bryn"][player]),
            y: coastal.y,
            x: coastal.x,
            connected_port: None,
        });
        if inland != coastal {
            scenario.settlements.push(SettlementSpec {
                player,
                name: format!("Fort {}", ["Ash", "Birch"][player]),
                y: inland.y,
                x: inland.x,
                connected_port: None,
            });
            scenario.units.push(UnitSpec {
                player,
                kind: UnitKind::Scout,
                y: inland.y,
                x: inland.x,
                aboard: None,
            });
        }
        scenario.units.push(UnitSpec {
            player,
            kind: UnitKind::Colonist,
            y: coastal.y,
            x: coastal.x,
            aboard: None,
        });
    }

    // Player 0 additionally gets a caravel off its port, with a passenger.
    if let Some(port) = scenario.settlements.first()
        && let Some(anchorage) = ocean_neighbor(&tiles, Pos { y: port.y, x: port.x })
    {
        let carrier_index = scenario.units.len();
        scenario.units.push(UnitSpec {
            player: 0,
            kind: UnitKind::Caravel,
            y: anchorage.y,
            x: anchorage.x,
            aboard: None,
        });
        scenario.units.push(UnitSpec {
            player: 0,
            kind: UnitKind::Colonist,
            y: anchorage.y,
            x: anchorage.x,
            aboard: Some(carrier_index),
        });
    }

    scenario
}

/// Random-walk a land blob around `center_x`, then roughen it with varied
/// terrain. Returns the blob's tiles in row-major order.
fn grow_continent(
    rng: &mut ChaCha8Rng,
    tiles: &mut [Terrain],
    center_x: usize,
) -> Vec<Pos> {
    let mut y = HEIGHT / 2;
    let mut x = center_x;
    for _ in 0..WALK_STEPS {
        tiles[y * WIDTH + x] = match roll(rng, 0, 9) {
            0 | 1 => Terrain::Grassland,
            2 => Terrain::Forest,
            3 => Terrain::Hills,
            4 => Terrain::Swamp,
            _ => Terrain::Plains,
        };
        // The border ring stays ocean so every continent has a coast.
        match roll(rng, 0, 3) {
            0 => y = (y - 1).max(1),
            1 => y = (y + 1).min(HEIGHT - 2),
            2 => x = (x - 1).max(1),
            _ => x = (x + 1).min(WIDTH - 2),
        }
    }

    let mut blob = Vec::new();
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let half = if center_x < WIDTH / 2 { x < WIDTH / 2 } else { x >= WIDTH / 2 };
            if half && tiles[y * WIDTH + x] != Terrain::Ocean {
                blob.push(Pos { y: y as i32, x: x as i32 });
            }
        }
    }
    blob
}

fn tile(tiles: &[Terrain], pos: Pos) -> Terrain {
    if pos.y < 0 || pos.x < 0 || pos.y as usize >= HEIGHT || pos.x as usize >= WIDTH {
        return Terrain::Ocean;
    }
    tiles[pos.y as usize * WIDTH + pos.x as usize]
}

fn neighbors(pos: Pos) -> [Pos; 4] {
    [
        Pos { y: pos.y - 1, x: pos.x },
        Pos { y: pos.y, x: pos.x + 1 },
        Pos { y: pos.y + 1, x: pos.x },
        Pos { y: pos.y, x: pos.x - 1 },
    ]
}

fn in_bounds(pos: Pos) -> bool {
    pos.y >= 0 && pos.x >= 0 && (pos.y as usize) < HEIGHT && (pos.x as usize) < WIDTH
}

fn ocean_neighbor(tiles: &[Terrain], pos: Pos) -> Option<Pos> {
    neighbors(pos).into_iter().find(|n| in_bounds(*n) && tile(tiles, *n) == Terrain::Ocean)
}

/// The blob tile closest to `from` that touches the sea.
fn nearest_coastal(tiles: &[Terrain], blob: &[Pos], from: Pos) -> Pos {
    blob.iter()
        .filter(|pos| ocean_neighbor(tiles, **pos).is_some())
        .min_by_key(|pos| (manhattan(**pos, from), pos.y, pos.x))
        .copied()
        .unwrap_or(from)
}

fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}
