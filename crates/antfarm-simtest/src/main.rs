//! AntFarm Headless Simulation Harness
//!
//! Runs seeded colonies for thousands of ticks and checks the engine's
//! invariants without a renderer. Exits nonzero if anything fails.
//!
//! Usage:
//!   cargo run -p antfarm-simtest
//!   cargo run -p antfarm-simtest -- --verbose

use std::collections::HashMap;

use antfarm_core::components::{Ant, Behavior, FoodType, Role, Tier, Vec2};
use antfarm_core::engine::ColonyEngine;
use antfarm_core::farm::{AntFarm, ItemCatalog};
use antfarm_core::population::{PopulationManager, Progress, MAX_COLONY_SIZE, MIN_COLONY_SIZE};
use rand::rngs::StdRng;
use rand::SeedableRng;

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: String) -> Self {
        Self {
            name: name.to_string(),
            passed,
            detail,
        }
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== AntFarm Simulation Harness ===\n");

    let mut results = Vec::new();

    results.extend(sweep_engine_invariants(verbose));
    results.extend(sweep_population(verbose));
    results.extend(sweep_determinism(verbose));
    results.extend(check_snapshot_shape(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn harness_ant(id: u32, x: f32, y: f32) -> Ant {
    Ant {
        id,
        name: format!("Ant {id}"),
        color: "#8b4513".into(),
        tier: Tier::Common,
        role: Role::Worker,
        speed: 1.0,
        stamina: 1.0,
        strength: 1.0,
        intelligence: 1.0,
        x,
        y,
        energy: 100.0,
        hunger: 40.0,
        behavior: Behavior::Idle,
        target: None,
        spawned_at: 0,
    }
}

fn seeded_engine(seed: u64, ants: usize) -> ColonyEngine {
    let farm = AntFarm {
        ants: (0..ants)
            .map(|i| harness_ant(i as u32, 50.0 + (i as f32 * 61.0) % 700.0, 40.0 + (i as f32 * 43.0) % 500.0))
            .collect(),
        ..Default::default()
    };
    let mut engine = ColonyEngine::with_seed(&farm, &ItemCatalog::new(), seed);
    engine.add_food_source(150.0, 120.0, 400.0, FoodType::Sugar);
    engine.add_food_source(650.0, 480.0, 400.0, FoodType::Water);
    engine.add_food_source(400.0, 300.0, 200.0, FoodType::Boost);
    engine
}

/// Run several seeded colonies and check every per-tick invariant
fn sweep_engine_invariants(verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();
    let ticks = 6000;

    for seed in [1_u64, 42, 1337] {
        let mut engine = seeded_engine(seed, 12);
        let mut vitals_ok = true;
        let mut bounds_ok = true;
        let mut pheromone_ok = true;
        let mut tunnels_ok = true;
        let mut food_ok = true;
        let mut previous_tunnels: HashMap<u32, Vec<Vec2>> = HashMap::new();
        let mut previous_food: HashMap<u32, f32> = HashMap::new();

        for _ in 0..ticks {
            engine.tick(1.0 / 60.0);
            let snapshot = engine.snapshot();

            for ant in &snapshot.ants {
                if !(0.0..=100.0).contains(&ant.energy) || !(0.0..=100.0).contains(&ant.hunger) {
                    vitals_ok = false;
                }
                if !engine.bounds().contains(&Vec2::new(ant.x, ant.y)) {
                    bounds_ok = false;
                }
            }

            for cell in &snapshot.pheromones {
                if cell.strength <= 0.0 || cell.strength > 5.0 {
                    pheromone_ok = false;
                }
            }

            for tunnel in &snapshot.tunnels {
                if tunnel.points.len() < 2 {
                    tunnels_ok = false;
                }
                if let Some(old) = previous_tunnels.get(&tunnel.id) {
                    if tunnel.points.len() < old.len()
                        || &tunnel.points[..old.len()] != old.as_slice()
                    {
                        tunnels_ok = false;
                    }
                }
                previous_tunnels.insert(tunnel.id, tunnel.points.clone());
            }

            for food in engine.food_sources() {
                if food.amount < 0.0 {
                    food_ok = false;
                }
                if let Some(old) = previous_food.get(&food.id) {
                    if food.amount > *old {
                        food_ok = false;
                    }
                }
                previous_food.insert(food.id, food.amount);
            }
        }

        let chambers = engine.chamber_count();
        if verbose {
            println!(
                "  seed {}: {} ticks, {} tunnels, {} chambers, {} pheromone cells",
                seed,
                ticks,
                engine.tunnel_count(),
                chambers,
                engine.pheromone_count()
            );
        }

        results.push(TestResult::new(
            &format!("vitals in range (seed {seed})"),
            vitals_ok,
            format!("{ticks} ticks"),
        ));
        results.push(TestResult::new(
            &format!("positions in bounds (seed {seed})"),
            bounds_ok,
            format!("{ticks} ticks"),
        ));
        results.push(TestResult::new(
            &format!("pheromone strength in (0, 5] (seed {seed})"),
            pheromone_ok,
            format!("{ticks} ticks"),
        ));
        results.push(TestResult::new(
            &format!("tunnels append-only (seed {seed})"),
            tunnels_ok,
            format!("{} tunnels", engine.tunnel_count()),
        ));
        results.push(TestResult::new(
            &format!("food never grows or goes negative (seed {seed})"),
            food_ok,
            "3 sources".into(),
        ));
        results.push(TestResult::new(
            &format!("colony has a home (seed {seed})"),
            chambers >= 1,
            format!("{chambers} chambers"),
        ));
    }

    results
}

/// Population formula and growth invariants
fn sweep_population(verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(9);

    // Monotone, saturating target size
    let mut monotone = true;
    let mut in_range = true;
    let mut previous = 0;
    for level in 0..120 {
        let size = PopulationManager::target_size(&Progress {
            best_score: level * 800,
            current_level: level,
        });
        if size < previous {
            monotone = false;
        }
        if !(MIN_COLONY_SIZE..=MAX_COLONY_SIZE).contains(&size) {
            in_range = false;
        }
        previous = size;
    }
    results.push(TestResult::new(
        "target size monotone",
        monotone,
        "levels 0..120".into(),
    ));
    results.push(TestResult::new(
        "target size within [2, 100]",
        in_range,
        format!("saturates at {previous}"),
    ));

    // Growth never shrinks and respects the cap
    let mut manager = PopulationManager::new();
    let mut roster = Vec::new();
    let mut never_shrinks = true;
    for step in 0..40_u32 {
        let progress = Progress {
            best_score: step * 3000,
            current_level: step,
        };
        let before = roster.len();
        roster = manager.grow(roster, &progress, &mut rng);
        if roster.len() < before || roster.len() > MAX_COLONY_SIZE {
            never_shrinks = false;
        }
    }
    if verbose {
        println!("  grown roster: {} ants", roster.len());
    }
    results.push(TestResult::new(
        "grow never shrinks, caps at 100",
        never_shrinks,
        format!("{} ants", roster.len()),
    ));

    // Grown rosters fold into a running engine
    let mut engine = seeded_engine(3, 2);
    engine.sync_population(&roster);
    results.push(TestResult::new(
        "sync_population adopts grown roster",
        engine.ant_count() == roster.len().min(MAX_COLONY_SIZE),
        format!("{} ants in engine", engine.ant_count()),
    ));

    results
}

/// Same seed, same farm: identical history
fn sweep_determinism(verbose: bool) -> Vec<TestResult> {
    let mut a = seeded_engine(7, 8);
    let mut b = seeded_engine(7, 8);

    let mut identical = true;
    for tick in 0..3000 {
        a.tick(1.0 / 60.0);
        b.tick(1.0 / 60.0);
        if tick % 500 == 0 && a.snapshot() != b.snapshot() {
            identical = false;
        }
    }
    if a.snapshot() != b.snapshot() {
        identical = false;
    }

    if verbose {
        println!(
            "  determinism run: {} tunnels, {} chambers",
            a.tunnel_count(),
            a.chamber_count()
        );
    }

    vec![TestResult::new(
        "seeded replay is deterministic",
        identical,
        "3000 ticks".into(),
    )]
}

/// Snapshot serializes to the JSON shape the renderer expects
fn check_snapshot_shape(verbose: bool) -> Vec<TestResult> {
    let mut engine = seeded_engine(13, 4);
    for _ in 0..600 {
        engine.tick(1.0 / 60.0);
    }

    let snapshot = engine.snapshot();
    let value = match serde_json::to_value(&snapshot) {
        Ok(v) => v,
        Err(e) => {
            return vec![TestResult::new(
                "snapshot serializes",
                false,
                format!("{e}"),
            )]
        }
    };

    let has_keys = value.get("ants").is_some()
        && value.get("tunnels").is_some()
        && value.get("chambers").is_some()
        && value.get("pheromones").is_some();

    let behavior_is_string = value["ants"]
        .as_array()
        .map(|ants| ants.iter().all(|a| a["behavior"].is_string()))
        .unwrap_or(false);

    if verbose {
        println!(
            "  snapshot digest: {} ants, {} pheromone cells",
            snapshot.ants.len(),
            snapshot.pheromones.len()
        );
    }

    vec![
        TestResult::new("snapshot serializes", true, "serde_json".into()),
        TestResult::new(
            "snapshot has renderer keys",
            has_keys,
            "ants/tunnels/chambers/pheromones".into(),
        ),
        TestResult::new(
            "behaviors serialize as strings",
            behavior_is_string,
            "snake_case".into(),
        ),
    ]
}
