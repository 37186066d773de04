//! Headless debugging surface over the game core: route inspection,
//! ruleset resolution, and demo-scenario generation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use game_core::scenario::terrain_glyph;
use game_core::{
    ClosestOwnedSettlement, ComposedDecider, GoalDecider, Pos, ReachTarget, Ruleset, World,
    find_path, generate_scenario, load_ruleset, load_scenario,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a unit's route and print the map with the route overlaid
    Route {
        /// Path to the scenario JSON file
        scenario: PathBuf,
        /// Index of the moving unit in the scenario's unit list
        #[arg(long, default_value_t = 0)]
        unit: usize,
        /// Target tile as `y,x`; without it, seek the nearest owned settlement
        #[arg(long)]
        target: Option<String>,
        /// With --target, fall back to the nearest owned settlement
        #[arg(long)]
        fallback_settlement: bool,
        /// Stop exploring past this many turns
        #[arg(long)]
        max_turns: Option<u32>,
        /// Directory of ruleset TOML files
        #[arg(long)]
        rules_dir: Option<PathBuf>,
        /// Ruleset id to resolve (from --rules-dir, or the built-in base)
        #[arg(long, default_value = "base")]
        ruleset: String,
    },
    /// Resolve a ruleset chain and print its values and content hash
    Rules {
        /// Directory of ruleset TOML files
        #[arg(long)]
        rules_dir: Option<PathBuf>,
        /// Ruleset id to resolve (from --rules-dir, or the built-in base)
        #[arg(long, default_value = "base")]
        ruleset: String,
    },
    /// Emit a generated demo scenario as JSON
    Demo {
        /// World seed
        #[arg(long, default_value_t = 7)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Route {
            scenario,
            unit,
            target,
            fallback_settlement,
            max_turns,
            rules_dir,
            ruleset,
        } => run_route(&scenario, unit, target, fallback_settlement, max_turns, rules_dir, &ruleset),
        Commands::Rules { rules_dir, ruleset } => run_rules(rules_dir, &ruleset),
        Commands::Demo { seed } => run_demo(seed),
    }
}

fn resolve_rules(rules_dir: Option<PathBuf>, id: &str) -> Result<Ruleset> {
    match rules_dir {
        Some(dir) => load_ruleset(&dir, id)
            .map_err(|e| anyhow::anyhow!("Failed to resolve ruleset `{id}`: {e}")),
        None if id == "base" => Ok(Ruleset::base()),
        None => bail!("Ruleset `{id}` needs --rules-dir"),
    }
}

fn parse_target(raw: &str) -> Result<Pos> {
    let (y, x) = raw
        .split_once(',')
        .with_context(|| format!("Target `{raw}` is not of the form `y,x`"))?;
    Ok(Pos {
        y: y.trim().parse().with_context(|| format!("Bad target row in `{raw}`"))?,
        x: x.trim().parse().with_context(|| format!("Bad target column in `{raw}`"))?,
    })
}

fn run_route(
    scenario_path: &Path,
    unit: usize,
    target: Option<String>,
    fallback_settlement: bool,
    max_turns: Option<u32>,
    rules_dir: Option<PathBuf>,
    ruleset_id: &str,
) -> Result<()> {
    let rules = resolve_rules(rules_dir, ruleset_id)?;
    let scenario = load_scenario(scenario_path)
        .map_err(|e| anyhow::anyhow!("Failed to load scenario: {e}"))?;
    let built = scenario.build(&rules).map_err(|e| anyhow::anyhow!("Bad scenario: {e}"))?;

    let mover_id = *built
        .units
        .get(unit)
        .with_context(|| format!("Unit index {unit} out of range (0..{})", built.units.len()))?;
    let mover = built.world.units[mover_id].clone();

    let mut decider: Box<dyn GoalDecider> = match target {
        Some(raw) => {
            let target = parse_target(&raw)?;
            if fallback_settlement {
                let composed = ComposedDecider::new(vec![
                    Box::new(ReachTarget::new(target)) as Box<dyn GoalDecider>,
                    Box::new(ClosestOwnedSettlement::new()),
                ])
                .map_err(|e| anyhow::anyhow!("{e}"))?;
                Box::new(composed)
            } else {
                Box::new(ReachTarget::new(target))
            }
        }
        None => Box::new(ClosestOwnedSettlement::new()),
    };

    let report = find_path(&built.world, &rules, &mover, decider.as_mut(), max_turns);

    match &report.goal {
        Some(goal) => {
            let route = goal.route();
            for row in render_route(&built.world, &route) {
                println!("{row}");
            }
            println!();
            println!(
                "Goal: ({}, {}) in {} turn(s), {} move point(s) left",
                goal.pos.y, goal.pos.x, goal.turns, goal.moves_left
            );
            println!("Route length: {} tile(s)", route.len());
        }
        None => println!("No goal found."),
    }
    println!("Nodes expanded: {}", report.nodes_expanded);
    println!("Acceptances: {}", report.acceptances);
    println!("Stopped early: {}", report.stopped_early);

    Ok(())
}

/// The scenario map with settlements as `#`, the route as `*`, the start as
/// `@`, and the goal as `X`.
fn render_route(world: &World, route: &[Pos]) -> Vec<String> {
    let mut rows: Vec<Vec<char>> = (0..world.map.height)
        .map(|y| {
            (0..world.map.width)
                .map(|x| terrain_glyph(world.map.tile_at(Pos { y: y as i32, x: x as i32 })))
                .collect()
        })
        .collect();
    for settlement in world.settlements.values() {
        rows[settlement.pos.y as usize][settlement.pos.x as usize] = '#';
    }
    for pos in route {
        rows[pos.y as usize][pos.x as usize] = '*';
    }
    if let Some(goal) = route.last() {
        rows[goal.y as usize][goal.x as usize] = 'X';
    }
    if let Some(start) = route.first() {
        rows[start.y as usize][start.x as usize] = '@';
    }
    rows.into_iter().map(|row| row.into_iter().collect()).collect()
}

fn run_rules(rules_dir: Option<PathBuf>, ruleset_id: &str) -> Result<()> {
    let rules = resolve_rules(rules_dir, ruleset_id)?;

    println!("Ruleset: {} ({})", rules.id, rules.name);
    println!("Terrain costs:");
    for (terrain, cost) in &rules.terrain_costs {
        println!("  {terrain:?}: {cost}");
    }
    println!("Unit profiles:");
    for (kind, profile) in &rules.unit_profiles {
        println!(
            "  {kind:?}: {} move(s)/turn, naval: {}, cargo: {}",
            profile.moves_per_turn, profile.naval, profile.cargo_capacity
        );
    }
    println!("Options:");
    println!("  starting_gold: {}", rules.options.starting_gold);
    println!("  hammer_price: {}", rules.options.hammer_price);
    println!("  fog_of_war: {}", rules.options.fog_of_war);
    println!("Content hash: {:016x}", rules.content_hash());

    Ok(())
}

fn run_demo(seed: u64) -> Result<()> {
    let scenario = generate_scenario(seed);
    // Prove the emitted document builds before handing it out.
    scenario
        .build(&Ruleset::base())
        .map_err(|e| anyhow::anyhow!("Generated scenario failed to build: {e}"))?;
    let json = serde_json::to_string_pretty(&scenario)
        .with_context(|| "Failed to serialize the scenario")?;
    println!("{json}");
    Ok(())
}
