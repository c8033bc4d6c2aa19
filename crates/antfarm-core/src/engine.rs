//! Colony engine - owns the authoritative simulation state and advances it
//! one tick at a time.
//!
//! The engine is the sole mutator of colony state. The host drives it from
//! an animation-frame loop, calling [`ColonyEngine::tick`] once per frame
//! and reading an immutable [`ColonySnapshot`] back for rendering. Rosters
//! grown by the population manager are folded in through
//! [`ColonyEngine::sync_population`]; the engine copies ants in and never
//! hands out live references.

use std::time::{SystemTime, UNIX_EPOCH};

use hecs::World;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::components::{
    Ant, Bounds, Chamber, ColonyLayout, FoodSource, FoodType, Mind, Position, Profile, Stats,
    Tunnel, Vec2, Vitals,
};
use crate::farm::{AntFarm, ItemCatalog};
use crate::field::{PheromoneCell, PheromoneField};
use crate::population::MAX_COLONY_SIZE;
use crate::systems::{behavior_system, physiology_system, structures_system};

/// Largest simulated step per tick; shields the colony from tab-background
/// or frame-drop time jumps
pub const MAX_TICK_SECONDS: f32 = 0.1;

/// How far from the nest newly adopted ants are placed
const PLACEMENT_SPREAD: f32 = 40.0;

/// Read-only state copy handed to the renderer
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColonySnapshot {
    pub ants: Vec<Ant>,
    pub tunnels: Vec<Tunnel>,
    pub chambers: Vec<Chamber>,
    pub pheromones: Vec<PheromoneCell>,
}

/// The colony simulation engine
pub struct ColonyEngine {
    /// ECS world holding the ant roster
    world: World,
    bounds: Bounds,
    layout: ColonyLayout,
    food: Vec<FoodSource>,
    pheromones: PheromoneField,
    rng: StdRng,
    /// Simulated seconds since construction
    sim_time: f64,
    next_food_id: u32,
}

impl ColonyEngine {
    /// Build an engine from the host's farm snapshot, seeding initial food
    /// sources from placed items that generate food
    pub fn new(farm: &AntFarm, catalog: &ItemCatalog) -> Self {
        Self::with_rng(farm, catalog, StdRng::from_entropy())
    }

    /// Deterministic construction for replay and testing
    pub fn with_seed(farm: &AntFarm, catalog: &ItemCatalog, seed: u64) -> Self {
        Self::with_rng(farm, catalog, StdRng::seed_from_u64(seed))
    }

    fn with_rng(farm: &AntFarm, catalog: &ItemCatalog, rng: StdRng) -> Self {
        let (width, height) = farm.layout.dimensions();

        let mut engine = Self {
            world: World::new(),
            bounds: Bounds::new(width, height),
            layout: ColonyLayout::new(farm.layout.tunnels.clone(), farm.layout.chambers.clone()),
            food: Vec::new(),
            pheromones: PheromoneField::new(),
            rng,
            sim_time: 0.0,
            next_food_id: 0,
        };

        for ant in &farm.ants {
            engine.adopt(ant.clone());
        }

        for item in &farm.items {
            if let Some(effect) = catalog.get(&item.kind) {
                if let Some(amount) = effect.food_generation {
                    engine.add_food_source(item.x, item.y, amount, effect.food_type);
                }
            }
        }

        engine
    }

    /// Advance the simulation by one step. The elapsed time is capped so a
    /// backgrounded tab cannot fast-forward the colony.
    pub fn tick(&mut self, delta_seconds: f32) {
        let dt = delta_seconds.clamp(0.0, MAX_TICK_SECONDS);
        if dt <= 0.0 {
            return;
        }
        self.sim_time += dt as f64;

        // Decay first so trail strength reflects only recent reinforcement
        self.pheromones.decay(dt);

        physiology_system(&mut self.world, dt);

        behavior_system(
            &mut self.world,
            &mut self.layout,
            &mut self.food,
            &mut self.pheromones,
            self.bounds,
            &mut self.rng,
            dt,
        );

        structures_system(&mut self.world, &mut self.layout, &mut self.rng);
    }

    /// Immutable state copy for rendering. Ants are ordered by id so equal
    /// states produce equal snapshots.
    pub fn snapshot(&self) -> ColonySnapshot {
        let mut ants: Vec<Ant> = self
            .world
            .query::<(&Profile, &Stats, &Position, &Vitals, &Mind)>()
            .iter()
            .map(|(_, (profile, stats, position, vitals, mind))| {
                Ant::from_components(profile, stats, position, vitals, mind)
            })
            .collect();
        ants.sort_by_key(|a| a.id);

        ColonySnapshot {
            ants,
            tunnels: self.layout.tunnels.clone(),
            chambers: self.layout.chambers.clone(),
            pheromones: self.pheromones.cells(),
        }
    }

    /// Drop a food source into the world (player placement). Non-positive
    /// amounts are tolerated as inert sources rather than rejected.
    pub fn add_food_source(&mut self, x: f32, y: f32, amount: f32, kind: FoodType) {
        let id = self.next_food_id;
        self.next_food_id += 1;
        let amount = amount.max(0.0);

        self.food.push(FoodSource {
            id,
            kind,
            position: self.bounds.clamp(Vec2::new(x, y)),
            amount,
            max_amount: amount,
            placed_at: unix_millis(),
        });
    }

    /// Current food sources, copied out for rendering
    pub fn food_sources(&self) -> Vec<FoodSource> {
        self.food.clone()
    }

    /// Fold in a roster grown by the population manager: ants with unseen
    /// ids are adopted (up to the colony cap), existing ants are untouched,
    /// and nothing is ever removed.
    pub fn sync_population(&mut self, roster: &[Ant]) {
        let known: std::collections::HashSet<u32> = self
            .world
            .query::<&Profile>()
            .iter()
            .map(|(_, p)| p.id)
            .collect();

        for ant in roster {
            if self.ant_count() >= MAX_COLONY_SIZE {
                break;
            }
            if !known.contains(&ant.id) {
                self.adopt(ant.clone());
            }
        }
    }

    /// Copy one ant into the world, placing (0, 0) sentinels near the nest
    /// or randomly in the world when there is no nest yet
    fn adopt(&mut self, mut ant: Ant) {
        if ant.x == 0.0 && ant.y == 0.0 {
            let spot = match self.layout.chambers.first() {
                Some(chamber) => self.bounds.clamp(Vec2::new(
                    chamber.center.x + self.rng.gen_range(-PLACEMENT_SPREAD..=PLACEMENT_SPREAD),
                    chamber.center.y + self.rng.gen_range(-PLACEMENT_SPREAD..=PLACEMENT_SPREAD),
                )),
                None => Vec2::new(
                    self.rng.gen_range(0.0..=self.bounds.width),
                    self.rng.gen_range(0.0..=self.bounds.height),
                ),
            };
            ant.x = spot.x;
            ant.y = spot.y;
        } else {
            let clamped = self.bounds.clamp(Vec2::new(ant.x, ant.y));
            ant.x = clamped.x;
            ant.y = clamped.y;
        }

        let (profile, stats, position, vitals, mind) = ant.into_components();
        self.world.spawn((profile, stats, position, vitals, mind));
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn ant_count(&self) -> usize {
        self.world.query::<&Profile>().iter().count()
    }

    pub fn tunnel_count(&self) -> usize {
        self.layout.tunnels.len()
    }

    pub fn chamber_count(&self) -> usize {
        self.layout.chambers.len()
    }

    pub fn pheromone_count(&self) -> usize {
        self.pheromones.len()
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Behavior, Role, Tier};
    use crate::farm::{FarmLayout, ItemEffect, PlacedItem};

    fn test_ant(id: u32, x: f32, y: f32) -> Ant {
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
            hunger: 0.0,
            behavior: Behavior::Idle,
            target: None,
            spawned_at: 0,
        }
    }

    fn farm_with_ants(ants: Vec<Ant>) -> AntFarm {
        AntFarm {
            ants,
            layout: FarmLayout::default(),
            items: Vec::new(),
        }
    }

    #[test]
    fn test_empty_engine() {
        let engine = ColonyEngine::with_seed(&AntFarm::default(), &ItemCatalog::new(), 1);
        assert_eq!(engine.ant_count(), 0);
        assert_eq!(engine.sim_time(), 0.0);
        assert!(engine.snapshot().ants.is_empty());
    }

    #[test]
    fn test_roster_copied_in() {
        let farm = farm_with_ants(vec![test_ant(1, 100.0, 100.0), test_ant(2, 200.0, 150.0)]);
        let engine = ColonyEngine::with_seed(&farm, &ItemCatalog::new(), 1);

        assert_eq!(engine.ant_count(), 2);
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.ants[0].x, 100.0);
        assert_eq!(snapshot.ants[1].id, 2);
    }

    #[test]
    fn test_sentinel_ants_get_placed() {
        let farm = farm_with_ants(vec![test_ant(1, 0.0, 0.0)]);
        let engine = ColonyEngine::with_seed(&farm, &ItemCatalog::new(), 1);

        let ant = &engine.snapshot().ants[0];
        assert!(engine.bounds().contains(&Vec2::new(ant.x, ant.y)));
        assert_ne!((ant.x, ant.y), (0.0, 0.0));
    }

    #[test]
    fn test_items_seed_food() {
        let mut catalog = ItemCatalog::new();
        catalog.insert(
            "sugar_cube".into(),
            ItemEffect {
                food_generation: Some(30.0),
                food_type: FoodType::Sugar,
            },
        );
        catalog.insert("pebble".into(), ItemEffect::default());

        let farm = AntFarm {
            ants: Vec::new(),
            layout: FarmLayout::default(),
            items: vec![
                PlacedItem {
                    id: "i-1".into(),
                    kind: "sugar_cube".into(),
                    x: 250.0,
                    y: 200.0,
                },
                PlacedItem {
                    id: "i-2".into(),
                    kind: "pebble".into(),
                    x: 10.0,
                    y: 10.0,
                },
                PlacedItem {
                    id: "i-3".into(),
                    kind: "unknown_item".into(),
                    x: 20.0,
                    y: 20.0,
                },
            ],
        };

        let engine = ColonyEngine::with_seed(&farm, &catalog, 1);
        let food = engine.food_sources();

        // Only the sugar cube generates food
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].kind, FoodType::Sugar);
        assert_eq!(food[0].amount, 30.0);
    }

    #[test]
    fn test_tick_caps_delta() {
        let farm = farm_with_ants(vec![test_ant(1, 100.0, 100.0)]);
        let mut engine = ColonyEngine::with_seed(&farm, &ItemCatalog::new(), 1);

        engine.tick(5.0);
        assert!((engine.sim_time() - 0.1).abs() < 1e-9);

        engine.tick(-1.0);
        assert!((engine.sim_time() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_vitals_and_positions_stay_bounded() {
        let farm = farm_with_ants((0..10).map(|i| test_ant(i, 50.0 * i as f32, 30.0)).collect());
        let mut engine = ColonyEngine::with_seed(&farm, &ItemCatalog::new(), 99);
        engine.add_food_source(300.0, 200.0, 100.0, FoodType::Sugar);

        for _ in 0..2000 {
            engine.tick(0.016);
        }

        let bounds = engine.bounds();
        for ant in engine.snapshot().ants {
            assert!((0.0..=100.0).contains(&ant.energy));
            assert!((0.0..=100.0).contains(&ant.hunger));
            assert!(bounds.contains(&Vec2::new(ant.x, ant.y)));
        }
        for cell in engine.snapshot().pheromones {
            assert!(cell.strength > 0.0);
            assert!(cell.strength <= crate::field::MAX_STRENGTH);
        }
    }

    #[test]
    fn test_fresh_colony_builds_a_home() {
        // Two ants, no chambers: the first tick founds a nest in their midst
        let farm = farm_with_ants(vec![test_ant(1, 100.0, 100.0), test_ant(2, 300.0, 200.0)]);
        let mut engine = ColonyEngine::with_seed(&farm, &ItemCatalog::new(), 5);

        engine.tick(0.016);

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.chambers.len(), 1);
        let center = snapshot.chambers[0].center;
        assert!(center.x >= 99.0 && center.x <= 301.0);
        assert!(center.y >= 99.0 && center.y <= 201.0);
    }

    #[test]
    fn test_hungry_ant_feeds_in_one_tick() {
        let mut ant = test_ant(1, 100.0, 100.0);
        ant.hunger = 95.0;
        let farm = farm_with_ants(vec![ant]);
        let mut engine = ColonyEngine::with_seed(&farm, &ItemCatalog::new(), 5);
        engine.add_food_source(105.0, 100.0, 50.0, FoodType::Water);

        // Forced foraging finds the water 5 units away and feeds this tick
        engine.tick(0.016);

        let ant = &engine.snapshot().ants[0];
        assert!(ant.hunger <= 55.1, "hunger was {}", ant.hunger);
        assert_eq!(engine.food_sources()[0].amount, 40.0);
    }

    #[test]
    fn test_add_food_source_visible() {
        let mut engine = ColonyEngine::with_seed(&AntFarm::default(), &ItemCatalog::new(), 1);

        engine.add_food_source(100.0, 100.0, 50.0, FoodType::Boost);

        let food = engine.food_sources();
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].amount, 50.0);
        assert_eq!(food[0].kind, FoodType::Boost);

        // Inert but present
        engine.add_food_source(10.0, 10.0, -3.0, FoodType::Food);
        let food = engine.food_sources();
        assert_eq!(food.len(), 2);
        assert_eq!(food[1].amount, 0.0);
        assert!(food[1].is_depleted());
    }

    #[test]
    fn test_snapshot_idempotent() {
        let farm = farm_with_ants(vec![test_ant(1, 100.0, 100.0), test_ant(2, 300.0, 200.0)]);
        let mut engine = ColonyEngine::with_seed(&farm, &ItemCatalog::new(), 11);
        for _ in 0..50 {
            engine.tick(0.016);
        }

        assert_eq!(engine.snapshot(), engine.snapshot());
    }

    #[test]
    fn test_tunnels_append_only() {
        let farm = farm_with_ants((0..8).map(|i| test_ant(i, 100.0 + 40.0 * i as f32, 200.0)).collect());
        let mut engine = ColonyEngine::with_seed(&farm, &ItemCatalog::new(), 21);

        let mut previous: std::collections::HashMap<u32, Vec<Vec2>> =
            std::collections::HashMap::new();

        for _ in 0..500 {
            engine.tick(0.016);
            for tunnel in engine.snapshot().tunnels {
                if let Some(old) = previous.get(&tunnel.id) {
                    assert!(tunnel.points.len() >= old.len());
                    assert_eq!(&tunnel.points[..old.len()], old.as_slice());
                }
                previous.insert(tunnel.id, tunnel.points);
            }
        }
    }

    #[test]
    fn test_same_seed_same_history() {
        let farm = farm_with_ants(vec![test_ant(1, 100.0, 100.0), test_ant(2, 300.0, 200.0)]);

        let mut a = ColonyEngine::with_seed(&farm, &ItemCatalog::new(), 77);
        let mut b = ColonyEngine::with_seed(&farm, &ItemCatalog::new(), 77);

        for _ in 0..300 {
            a.tick(0.016);
            b.tick(0.016);
        }

        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_sync_population_adopts_only_new() {
        let farm = farm_with_ants(vec![test_ant(1, 100.0, 100.0)]);
        let mut engine = ColonyEngine::with_seed(&farm, &ItemCatalog::new(), 1);

        let roster = vec![test_ant(1, 100.0, 100.0), test_ant(2, 0.0, 0.0)];
        engine.sync_population(&roster);
        assert_eq!(engine.ant_count(), 2);

        // Same roster again: nothing changes
        engine.sync_population(&roster);
        assert_eq!(engine.ant_count(), 2);
    }
}
