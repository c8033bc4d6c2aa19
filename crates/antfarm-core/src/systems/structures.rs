//! Colony structure bookkeeping - runs after all ants have acted.
//!
//! The colony always needs a home: the first chamber appears at the
//! centroid of the roster as soon as any ants exist. Later, once the
//! colony is established, a second chamber can be founded away from the
//! first.

use hecs::World;
use rand::Rng;

use crate::components::{ChamberKind, ColonyLayout, Position, Vec2};

/// Roster size required before a second chamber can appear
const SECOND_CHAMBER_MIN_ANTS: usize = 5;
/// Per-tick chance of founding the second chamber once eligible
const SECOND_CHAMBER_CHANCE: f32 = 0.01;
/// A candidate spot must be at least this far from every chamber
const SECOND_CHAMBER_CLEARANCE: f32 = 80.0;

pub fn structures_system(world: &mut World, layout: &mut ColonyLayout, rng: &mut impl Rng) {
    let positions: Vec<Vec2> = world
        .query_mut::<&Position>()
        .into_iter()
        .map(|(_, pos)| pos.vec())
        .collect();

    if positions.is_empty() {
        return;
    }

    if layout.chambers.is_empty() {
        let centroid = positions
            .iter()
            .fold(Vec2::ZERO, |acc, p| acc + *p)
            * (1.0 / positions.len() as f32);
        layout.add_chamber(centroid, 25.0, ChamberKind::Nest);
        return;
    }

    if layout.chambers.len() == 1
        && positions.len() >= SECOND_CHAMBER_MIN_ANTS
        && rng.gen::<f32>() < SECOND_CHAMBER_CHANCE
    {
        // Candidate spot: where some ant happens to be standing
        let candidate = positions[rng.gen_range(0..positions.len())];
        let far_enough = layout
            .chamber_clearance(candidate)
            .map_or(true, |d| d >= SECOND_CHAMBER_CLEARANCE);

        if far_enough {
            layout.add_chamber(candidate, rng.gen_range(15.0..25.0), ChamberKind::Storage);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_first_chamber_at_centroid() {
        let mut world = World::new();
        world.spawn((Position::new(100.0, 100.0),));
        world.spawn((Position::new(300.0, 200.0),));
        let mut layout = ColonyLayout::default();
        let mut rng = StdRng::seed_from_u64(1);

        structures_system(&mut world, &mut layout, &mut rng);

        assert_eq!(layout.chambers.len(), 1);
        let chamber = &layout.chambers[0];
        assert_eq!(chamber.kind, ChamberKind::Nest);
        assert!((chamber.center.x - 200.0).abs() < 0.001);
        assert!((chamber.center.y - 150.0).abs() < 0.001);
    }

    #[test]
    fn test_no_chamber_without_ants() {
        let mut world = World::new();
        let mut layout = ColonyLayout::default();
        let mut rng = StdRng::seed_from_u64(1);

        structures_system(&mut world, &mut layout, &mut rng);

        assert!(layout.chambers.is_empty());
    }

    #[test]
    fn test_second_chamber_needs_clearance() {
        let mut world = World::new();
        // Five ants all on top of the nest: every candidate is too close
        for _ in 0..5 {
            world.spawn((Position::new(100.0, 100.0),));
        }
        let mut layout = ColonyLayout::default();
        layout.add_chamber(Vec2::new(100.0, 100.0), 25.0, ChamberKind::Nest);
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..2000 {
            structures_system(&mut world, &mut layout, &mut rng);
        }

        assert_eq!(layout.chambers.len(), 1);
    }

    #[test]
    fn test_second_chamber_eventually_founded() {
        let mut world = World::new();
        for i in 0..5 {
            world.spawn((Position::new(300.0 + i as f32, 300.0),));
        }
        let mut layout = ColonyLayout::default();
        layout.add_chamber(Vec2::new(100.0, 100.0), 25.0, ChamberKind::Nest);
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..2000 {
            structures_system(&mut world, &mut layout, &mut rng);
            if layout.chambers.len() > 1 {
                break;
            }
        }

        assert_eq!(layout.chambers.len(), 2);
        assert_eq!(layout.chambers[1].kind, ChamberKind::Storage);
    }

    #[test]
    fn test_small_colony_never_expands() {
        let mut world = World::new();
        for _ in 0..4 {
            world.spawn((Position::new(400.0, 400.0),));
        }
        let mut layout = ColonyLayout::default();
        layout.add_chamber(Vec2::new(100.0, 100.0), 25.0, ChamberKind::Nest);
        let mut rng = StdRng::seed_from_u64(4);

        for _ in 0..2000 {
            structures_system(&mut world, &mut layout, &mut rng);
        }

        assert_eq!(layout.chambers.len(), 1);
    }
}
