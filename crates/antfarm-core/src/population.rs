//! Population management - derives the target colony size from the
//! player's puzzle progress and grows the roster toward it.
//!
//! Growth is one-way: the roster is never shrunk, and the colony caps at
//! 100 ants. This runs every few seconds of play, not every tick - the
//! driving rate is the host's scheduling decision.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::{Ant, Role, Tier};
use crate::generation::AntGenerator;

/// Smallest colony the player ever sees
pub const MIN_COLONY_SIZE: usize = 2;
/// Hard cap on roster growth
pub const MAX_COLONY_SIZE: usize = 100;

/// External progression signal read from the word-puzzle game
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub best_score: u32,
    pub current_level: u32,
}

/// Grows the roster toward the progress-derived target size
#[derive(Debug, Clone, Default)]
pub struct PopulationManager {
    generator: AntGenerator,
}

impl PopulationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume id assignment after a roster loaded from the host
    pub fn resuming(roster: &[Ant]) -> Self {
        let max_id = roster.iter().map(|a| a.id).max().unwrap_or(0);
        Self {
            generator: AntGenerator::starting_after(max_id),
        }
    }

    /// Target colony size: monotone and saturating in both score and level,
    /// so the colony visibly grows with achievement but never unboundedly.
    pub fn target_size(progress: &Progress) -> usize {
        let raw = 2.0 + progress.best_score as f64 / 1000.0 + progress.current_level as f64 * 0.5;
        (raw.floor() as usize).clamp(MIN_COLONY_SIZE, MAX_COLONY_SIZE)
    }

    /// Append new ants until the roster reaches the target size. A no-op
    /// when already at or above target - growth is never reversed.
    pub fn grow(&mut self, mut roster: Vec<Ant>, progress: &Progress, rng: &mut impl Rng) -> Vec<Ant> {
        let target = Self::target_size(progress);

        while roster.len() < target {
            let tier = roll_tier(progress.current_level, rng);
            let role = roll_role(rng);
            roster.push(self.generator.generate(tier, role, rng));
        }

        roster
    }
}

/// Level-gated tier lottery: a single roll checked against the rarest
/// qualifying bracket first. Higher tiers unlock as the player levels up.
fn roll_tier(level: u32, rng: &mut impl Rng) -> Tier {
    let roll: f32 = rng.gen();
    if level >= 20 && roll < 0.05 {
        Tier::Legendary
    } else if level >= 10 && roll < 0.15 {
        Tier::Rare
    } else if level >= 5 && roll < 0.30 {
        Tier::Uncommon
    } else {
        Tier::Common
    }
}

/// Worker-heavy role lottery
fn roll_role(rng: &mut impl Rng) -> Role {
    match rng.gen_range(0..100) {
        0..=49 => Role::Worker,
        50..=69 => Role::Scout,
        70..=84 => Role::Soldier,
        85..=94 => Role::Nurse,
        _ => Role::Queen,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn progress(best_score: u32, current_level: u32) -> Progress {
        Progress {
            best_score,
            current_level,
        }
    }

    #[test]
    fn test_target_size_formula() {
        assert_eq!(PopulationManager::target_size(&progress(0, 0)), 2);
        assert_eq!(PopulationManager::target_size(&progress(3000, 4)), 7);
        assert_eq!(PopulationManager::target_size(&progress(1_000_000, 99)), 100);
    }

    #[test]
    fn test_target_size_monotone() {
        let mut previous = 0;
        for score in (0..20_000).step_by(500) {
            let size = PopulationManager::target_size(&progress(score, 3));
            assert!(size >= previous);
            assert!((MIN_COLONY_SIZE..=MAX_COLONY_SIZE).contains(&size));
            previous = size;
        }

        let mut previous = 0;
        for level in 0..60 {
            let size = PopulationManager::target_size(&progress(500, level));
            assert!(size >= previous);
            previous = size;
        }
    }

    #[test]
    fn test_grow_reaches_target() {
        let mut manager = PopulationManager::new();
        let mut rng = StdRng::seed_from_u64(7);

        let roster = manager.grow(Vec::new(), &progress(5000, 6), &mut rng);
        assert_eq!(roster.len(), 10);

        // Ids are unique
        let ids: std::collections::HashSet<u32> = roster.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), roster.len());
    }

    #[test]
    fn test_grow_never_shrinks() {
        let mut manager = PopulationManager::new();
        let mut rng = StdRng::seed_from_u64(7);

        let big = manager.grow(Vec::new(), &progress(50_000, 20), &mut rng);
        let before = big.len();

        // Progress regressed; roster must stay put
        let after = manager.grow(big, &progress(0, 0), &mut rng);
        assert_eq!(after.len(), before);
    }

    #[test]
    fn test_tier_gates() {
        let mut rng = StdRng::seed_from_u64(42);

        // Below level 5 everything is common
        for _ in 0..500 {
            assert_eq!(roll_tier(4, &mut rng), Tier::Common);
        }

        // Below level 20 legendary never appears
        for _ in 0..2000 {
            assert_ne!(roll_tier(19, &mut rng), Tier::Legendary);
        }

        // At level 20+ all tiers show up eventually
        let tiers: std::collections::HashSet<Tier> =
            (0..5000).map(|_| roll_tier(25, &mut rng)).collect();
        assert_eq!(tiers.len(), 4);
    }
}
