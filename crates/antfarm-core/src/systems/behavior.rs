//! Behavior system - the per-ant state machine dispatch.
//!
//! Each tick every ant runs the handler for its current behavior, which may
//! move it, deposit pheromone, consume food, dig tunnel segments, or found
//! a chamber. Positions are clamped to world bounds after each update.
//!
//! The probabilities here were tuned for visual pacing, not derived from a
//! model; keep relative magnitudes when adjusting.

use hecs::World;
use rand::Rng;

use crate::components::{
    Behavior, Bounds, ChamberKind, ColonyLayout, FoodSource, FoodType, Mind, Position, Profile,
    Stats, Vec2, Vitals,
};
use crate::field::{PheromoneField, SEARCH_RADIUS};

/// World units per second per point of the speed stat
pub const MOVE_SPEED_SCALE: f32 = 30.0;
/// An ant this close to a food source starts feeding
pub const FOOD_REACH_DIST: f32 = 10.0;

const WANDER_RADIUS: f32 = 60.0;
const TUNNEL_WANDER_RADIUS: f32 = 80.0;

// Per-tick dig chances by state
const IDLE_DIG_CHANCE: f32 = 0.05;
const FORAGE_DIG_CHANCE: f32 = 0.15;
const EXPLORE_DIG_CHANCE: f32 = 0.10;
const BUILD_DIG_CHANCE: f32 = 0.20;
const TUNNEL_DIG_CHANCE: f32 = 0.30;
const DIG_ENERGY_COST: f32 = 2.0;

// Idle transition rolls
const IDLE_FORAGE_HUNGER: f32 = 60.0;
const IDLE_FORAGE_CHANCE: f32 = 0.10;
const IDLE_BUILD_ENERGY: f32 = 70.0;
const IDLE_BUILD_CHANCE: f32 = 0.02;
const IDLE_TUNNEL_ENERGY: f32 = 50.0;
const IDLE_TUNNEL_CHANCE: f32 = 0.01;
const PLANNED_CHAMBER_CAP: usize = 3;

// Food preference urgency cutoffs
const VERY_THIRSTY_HUNGER: f32 = 90.0;
const BOOST_SEEK_ENERGY: f32 = 40.0;

// Pheromone deposits per tick
const FORAGE_DEPOSIT: f32 = 1.0;
const TRAIL_DEPOSIT: f32 = 0.5;
const FEED_DEPOSIT: f32 = 2.0;
const TRAIL_FOLLOW_CHANCE: f32 = 0.70;

// Feeding
const FEED_DEPLETE_PER_TICK: f32 = 10.0;
const FEED_FULL_HUNGER: f32 = 30.0;
const FEED_CONTENT_HUNGER: f32 = 60.0;

// Returning
const REST_RANGE: f32 = 20.0;
const REST_RECOVERY_PER_SEC: f32 = 20.0;
const RESTED_ENERGY: f32 = 80.0;

// Building
const BUILD_CHAMBER_CHANCE: f32 = 0.02;
const BUILD_CLEARANCE: f32 = 50.0;
const BUILD_CHAMBER_COST: f32 = 15.0;
const BUILD_MIN_ENERGY: f32 = 50.0;
const BUILD_EXHAUSTED_ENERGY: f32 = 30.0;
const BUILD_TARGET_JITTER: f32 = 30.0;

/// Run every ant's behavior handler for one tick
pub fn behavior_system(
    world: &mut World,
    layout: &mut ColonyLayout,
    food: &mut [FoodSource],
    field: &mut PheromoneField,
    bounds: Bounds,
    rng: &mut impl Rng,
    delta_seconds: f32,
) {
    for (_, (profile, stats, position, vitals, mind)) in
        world.query_mut::<(&Profile, &Stats, &mut Position, &mut Vitals, &mut Mind)>()
    {
        match mind.behavior {
            Behavior::Idle => {
                idle_behavior(stats, position, vitals, mind, layout, bounds, rng, delta_seconds)
            }
            Behavior::Foraging => foraging_behavior(
                stats,
                position,
                vitals,
                mind,
                layout,
                food,
                field,
                bounds,
                rng,
                delta_seconds,
            ),
            Behavior::Tunneling => tunneling_behavior(
                stats,
                position,
                vitals,
                mind,
                layout,
                bounds,
                rng,
                delta_seconds,
            ),
            Behavior::FollowingTrail => {
                trail_behavior(stats, position, mind, field, delta_seconds)
            }
            Behavior::Returning => {
                returning_behavior(stats, position, vitals, mind, layout, delta_seconds)
            }
            Behavior::Feeding => feeding_step(position, vitals, mind, food, field),
            Behavior::Building => building_behavior(
                profile,
                stats,
                position,
                vitals,
                mind,
                layout,
                bounds,
                rng,
                delta_seconds,
            ),
        }

        position.set(bounds.clamp(position.vec()));
    }
}

/// Straight-line seek toward a target, never overshooting within one tick.
/// Returns true once the ant stands on the target.
fn seek(position: &mut Position, target: Vec2, speed_stat: f32, delta_seconds: f32) -> bool {
    let current = position.vec();
    let offset = target - current;
    let distance = offset.length();
    let step = speed_stat * MOVE_SPEED_SCALE * delta_seconds;

    if distance <= step {
        position.set(target);
        true
    } else {
        position.set(current + offset.normalize() * step);
        false
    }
}

/// Random local wander destination, kept inside the world
fn wander_target(from: Vec2, radius: f32, bounds: Bounds, rng: &mut impl Rng) -> Vec2 {
    bounds.clamp(Vec2::new(
        from.x + rng.gen_range(-radius..=radius),
        from.y + rng.gen_range(-radius..=radius),
    ))
}

fn tunnel_width(rng: &mut impl Rng) -> f32 {
    rng.gen_range(2.0..5.0)
}

/// Carve a short segment from `from` ahead along the direction of travel.
/// Per-frame displacement is well under a unit, so digs reach a few units
/// forward rather than recording the raw step.
fn dig_along(layout: &mut ColonyLayout, from: Vec2, toward: Vec2, rng: &mut impl Rng) {
    let direction = (toward - from).normalize();
    if direction == Vec2::ZERO {
        return;
    }
    let reach = rng.gen_range(4.0..=12.0);
    let width = tunnel_width(rng);
    layout.dig(from, from + direction * reach, width);
}

/// Nearest live food source, optionally restricted to one type
fn nearest_food(food: &[FoodSource], from: Vec2, kind: Option<FoodType>) -> Option<(u32, Vec2)> {
    food.iter()
        .filter(|f| !f.is_depleted())
        .filter(|f| kind.map_or(true, |k| f.kind == k))
        .min_by(|a, b| {
            a.position
                .distance_squared(&from)
                .partial_cmp(&b.position.distance_squared(&from))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|f| (f.id, f.position))
}

#[allow(clippy::too_many_arguments)]
fn idle_behavior(
    stats: &Stats,
    position: &mut Position,
    vitals: &mut Vitals,
    mind: &mut Mind,
    layout: &mut ColonyLayout,
    bounds: Bounds,
    rng: &mut impl Rng,
    delta_seconds: f32,
) {
    let target = match mind.target {
        Some(t) => t,
        None => {
            let t = wander_target(position.vec(), WANDER_RADIUS, bounds, rng);
            mind.target = Some(t);
            t
        }
    };

    let before = position.vec();
    if seek(position, target, stats.speed, delta_seconds) {
        mind.target = None;
    }

    if before != position.vec() && rng.gen::<f32>() < IDLE_DIG_CHANCE {
        dig_along(layout, before, position.vec(), rng);
    }

    if vitals.energy > IDLE_BUILD_ENERGY
        && layout.chambers.len() < PLANNED_CHAMBER_CAP
        && rng.gen::<f32>() < IDLE_BUILD_CHANCE
    {
        mind.switch(Behavior::Building);
        return;
    }

    if vitals.energy > IDLE_TUNNEL_ENERGY && rng.gen::<f32>() < IDLE_TUNNEL_CHANCE {
        mind.switch(Behavior::Tunneling);
        return;
    }

    if vitals.hunger > IDLE_FORAGE_HUNGER && rng.gen::<f32>() < IDLE_FORAGE_CHANCE {
        mind.switch(Behavior::Foraging);
    }
}

/// Food type an ant wants most, by urgency
fn preferred_food(vitals: &Vitals) -> FoodType {
    if vitals.hunger > VERY_THIRSTY_HUNGER {
        FoodType::Water
    } else if vitals.energy < BOOST_SEEK_ENERGY {
        FoodType::Boost
    } else {
        FoodType::Sugar
    }
}

#[allow(clippy::too_many_arguments)]
fn foraging_behavior(
    stats: &Stats,
    position: &mut Position,
    vitals: &mut Vitals,
    mind: &mut Mind,
    layout: &mut ColonyLayout,
    food: &mut [FoodSource],
    field: &mut PheromoneField,
    bounds: Bounds,
    rng: &mut impl Rng,
    delta_seconds: f32,
) {
    // Foragers always mark where they have been
    field.reinforce(position.x, position.y, FORAGE_DEPOSIT);

    let here = position.vec();
    let candidate = nearest_food(food, here, Some(preferred_food(vitals)))
        .or_else(|| nearest_food(food, here, None));

    if let Some((food_id, food_pos)) = candidate {
        if here.distance(&food_pos) < FOOD_REACH_DIST {
            // Arrived: start feeding this tick
            mind.behavior = Behavior::Feeding;
            mind.target = None;
            mind.food = Some(food_id);
            feeding_step(position, vitals, mind, food, field);
            return;
        }

        mind.target = Some(food_pos);
        mind.food = Some(food_id);
        let before = position.vec();
        seek(position, food_pos, stats.speed, delta_seconds);
        if before != position.vec() && rng.gen::<f32>() < FORAGE_DIG_CHANCE {
            dig_along(layout, before, position.vec(), rng);
        }
        return;
    }

    // Nothing to eat in sight: usually fall back to the colony's trails
    if rng.gen::<f32>() < TRAIL_FOLLOW_CHANCE {
        if let Some(spot) = field.strongest_within(position.x, position.y, SEARCH_RADIUS) {
            mind.behavior = Behavior::FollowingTrail;
            mind.target = Some(spot);
            mind.food = None;
            mind.trail = Some(PheromoneField::cell_key(spot.x, spot.y));
            return;
        }
    }

    // Otherwise explore
    let target = match mind.target {
        Some(t) => t,
        None => {
            let t = wander_target(position.vec(), WANDER_RADIUS, bounds, rng);
            mind.target = Some(t);
            t
        }
    };
    let before = position.vec();
    if seek(position, target, stats.speed, delta_seconds) {
        mind.target = None;
    }
    if before != position.vec() && rng.gen::<f32>() < EXPLORE_DIG_CHANCE {
        dig_along(layout, before, position.vec(), rng);
    }
}

fn trail_behavior(
    stats: &Stats,
    position: &mut Position,
    mind: &mut Mind,
    field: &mut PheromoneField,
    delta_seconds: f32,
) {
    match field.strongest_within(position.x, position.y, SEARCH_RADIUS) {
        None => {
            // Trail lost
            mind.switch(Behavior::Foraging);
        }
        Some(spot) => {
            mind.target = Some(spot);
            mind.trail = Some(PheromoneField::cell_key(spot.x, spot.y));
            field.reinforce(position.x, position.y, TRAIL_DEPOSIT);

            if seek(position, spot, stats.speed, delta_seconds) {
                // Reached the strongest cell; go look for food around it
                mind.switch(Behavior::Foraging);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn tunneling_behavior(
    stats: &Stats,
    position: &mut Position,
    vitals: &mut Vitals,
    mind: &mut Mind,
    layout: &mut ColonyLayout,
    bounds: Bounds,
    rng: &mut impl Rng,
    delta_seconds: f32,
) {
    let target = match mind.target {
        Some(t) => t,
        None => {
            let t = wander_target(position.vec(), TUNNEL_WANDER_RADIUS, bounds, rng);
            mind.target = Some(t);
            t
        }
    };

    let before = position.vec();
    let arrived = seek(position, target, stats.speed, delta_seconds);

    if before != position.vec() && rng.gen::<f32>() < TUNNEL_DIG_CHANCE {
        dig_along(layout, before, position.vec(), rng);
        vitals.spend_energy(DIG_ENERGY_COST);
    }

    if arrived {
        mind.switch(Behavior::Idle);
    }
}

fn returning_behavior(
    stats: &Stats,
    position: &mut Position,
    vitals: &mut Vitals,
    mind: &mut Mind,
    layout: &ColonyLayout,
    delta_seconds: f32,
) {
    match layout.nearest_chamber(position.vec()) {
        Some(chamber) => {
            let center = chamber.center;
            if position.vec().distance(&center) > REST_RANGE {
                mind.target = Some(center);
                seek(position, center, stats.speed, delta_seconds);
            } else {
                mind.target = None;
                vitals.gain_energy(REST_RECOVERY_PER_SEC * delta_seconds);
            }
        }
        None => {
            // No home yet: rest where we stand
            vitals.gain_energy(REST_RECOVERY_PER_SEC * delta_seconds);
        }
    }

    if vitals.energy > RESTED_ENERGY {
        mind.switch(Behavior::Idle);
    }
}

/// One tick of feeding: apply the food type's effect, deplete the source,
/// and mark the spot strongly for the rest of the colony.
fn feeding_step(
    position: &Position,
    vitals: &mut Vitals,
    mind: &mut Mind,
    food: &mut [FoodSource],
    field: &mut PheromoneField,
) {
    let source = mind
        .food
        .and_then(|id| food.iter_mut().find(|f| f.id == id));

    let source = match source {
        Some(s) if !s.is_depleted() => s,
        _ => {
            // Source gone or empty: back to searching
            mind.switch(Behavior::Foraging);
            return;
        }
    };

    source.kind.feed(vitals);
    source.deplete(FEED_DEPLETE_PER_TICK);
    field.reinforce(position.x, position.y, FEED_DEPOSIT);

    if vitals.hunger < FEED_FULL_HUNGER {
        mind.switch(Behavior::Returning);
    } else if vitals.hunger < FEED_CONTENT_HUNGER {
        mind.switch(Behavior::Foraging);
    }
}

#[allow(clippy::too_many_arguments)]
fn building_behavior(
    profile: &Profile,
    stats: &Stats,
    position: &mut Position,
    vitals: &mut Vitals,
    mind: &mut Mind,
    layout: &mut ColonyLayout,
    bounds: Bounds,
    rng: &mut impl Rng,
    delta_seconds: f32,
) {
    let target = match mind.target {
        Some(t) => t,
        None => {
            // Head for a spot near the densest digging so far
            let base = layout
                .nearest_tunnel(position.vec())
                .map(|t| t.midpoint())
                .unwrap_or_else(|| position.vec());
            let t = bounds.clamp(Vec2::new(
                base.x + rng.gen_range(-BUILD_TARGET_JITTER..=BUILD_TARGET_JITTER),
                base.y + rng.gen_range(-BUILD_TARGET_JITTER..=BUILD_TARGET_JITTER),
            ));
            mind.target = Some(t);
            t
        }
    };

    let before = position.vec();
    if seek(position, target, stats.speed, delta_seconds) {
        mind.target = None;
    }

    if before != position.vec() && rng.gen::<f32>() < BUILD_DIG_CHANCE {
        dig_along(layout, before, position.vec(), rng);
        vitals.spend_energy(DIG_ENERGY_COST);
    }

    let clear = layout
        .chamber_clearance(position.vec())
        .map_or(true, |d| d >= BUILD_CLEARANCE);

    if clear && vitals.energy > BUILD_MIN_ENERGY && rng.gen::<f32>() < BUILD_CHAMBER_CHANCE {
        layout.add_chamber(
            position.vec(),
            rng.gen_range(15.0..30.0),
            ChamberKind::for_builder(profile.role),
        );
        vitals.spend_energy(BUILD_CHAMBER_COST);
        mind.switch(Behavior::Idle);
        return;
    }

    if vitals.energy < BUILD_EXHAUSTED_ENERGY {
        mind.switch(Behavior::Returning);
    }
}
