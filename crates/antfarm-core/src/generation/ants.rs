//! Ant generation - rolls identity, tier-scaled stats, and cosmetics for
//! new colony members.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

use crate::components::{Ant, Behavior, Role, Stats, Tier, Vitals};

use super::names::{generate_color, generate_name};

/// Produces new ant values with unique ids. A pure, always-succeeding
/// constructor: stats come from the tier's base vector with +/-10% jitter,
/// name and color from tier/role pools. New ants sit at (0, 0) - the
/// "not yet placed" sentinel; placement is the caller's job.
#[derive(Debug, Clone, Default)]
pub struct AntGenerator {
    next_id: u32,
}

impl AntGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume id assignment after an existing roster
    pub fn starting_after(roster_max_id: u32) -> Self {
        Self {
            next_id: roster_max_id + 1,
        }
    }

    pub fn generate(&mut self, tier: Tier, role: Role, rng: &mut impl Rng) -> Ant {
        let id = self.next_id;
        self.next_id += 1;

        let stats = Stats::roll(tier, rng);
        let vitals = Vitals::default();

        Ant {
            id,
            name: generate_name(tier, role, rng),
            color: generate_color(tier, rng),
            tier,
            role,
            speed: stats.speed,
            stamina: stats.stamina,
            strength: stats.strength,
            intelligence: stats.intelligence,
            x: 0.0,
            y: 0.0,
            energy: vitals.energy,
            hunger: vitals.hunger,
            behavior: Behavior::Idle,
            target: None,
            spawned_at: unix_millis(),
        }
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
