//! Ant-related components: identity, tier/role classification, stats,
//! vitals, and the behavior state machine data.

use serde::{Deserialize, Serialize};

use super::common::Vec2;

/// Rarity tier of an ant - scales stats and picks cosmetic pools
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Tier {
    /// Base stat value for this tier; jitter is applied on top
    pub fn base_stat(&self) -> f32 {
        match self {
            Tier::Common => 1.0,
            Tier::Uncommon => 1.2,
            Tier::Rare => 1.5,
            Tier::Legendary => 2.0,
        }
    }
}

/// Colony role of an ant - cosmetic except for chamber founding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Worker,
    Scout,
    Soldier,
    Nurse,
    Queen,
}

/// Behavior state - a closed set; every ant is in exactly one state per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    #[default]
    Idle,
    Foraging,
    Tunneling,
    FollowingTrail,
    Returning,
    Feeding,
    Building,
}

/// Stat vector - positive reals, tier-scaled with bounded jitter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Stats {
    pub speed: f32,
    pub stamina: f32,
    pub strength: f32,
    pub intelligence: f32,
}

impl Stats {
    /// Roll stats for a tier: per-stat base value with +/-10% uniform jitter
    pub fn roll(tier: Tier, rng: &mut impl rand::Rng) -> Self {
        let base = tier.base_stat();
        let mut jittered = || base * rng.gen_range(0.9..=1.1);
        Self {
            speed: jittered(),
            stamina: jittered(),
            strength: jittered(),
            intelligence: jittered(),
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            speed: 1.0,
            stamina: 1.0,
            strength: 1.0,
            intelligence: 1.0,
        }
    }
}

/// Physiological state - both values clamped to [0, 100]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Vitals {
    pub energy: f32,
    pub hunger: f32,
}

impl Vitals {
    const ENERGY_DRAIN_PER_SEC: f32 = 0.5;
    const HUNGER_GAIN_PER_SEC: f32 = 0.3;

    /// Apply passive drain over elapsed seconds
    pub fn drain(&mut self, delta_seconds: f32) {
        self.energy = (self.energy - Self::ENERGY_DRAIN_PER_SEC * delta_seconds).clamp(0.0, 100.0);
        self.hunger = (self.hunger + Self::HUNGER_GAIN_PER_SEC * delta_seconds).clamp(0.0, 100.0);
    }

    /// Add to energy, clamped
    pub fn gain_energy(&mut self, amount: f32) {
        self.energy = (self.energy + amount).clamp(0.0, 100.0);
    }

    /// Spend energy, clamped at zero
    pub fn spend_energy(&mut self, amount: f32) {
        self.energy = (self.energy - amount).clamp(0.0, 100.0);
    }

    /// Reduce hunger (negative amounts increase it), clamped
    pub fn sate(&mut self, amount: f32) {
        self.hunger = (self.hunger - amount).clamp(0.0, 100.0);
    }
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            energy: 100.0,
            hunger: 0.0,
        }
    }
}

/// Behavior working memory: current state, movement target, the food source
/// being sought/eaten, and the last pheromone cell followed
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Mind {
    pub behavior: Behavior,
    pub target: Option<Vec2>,
    pub food: Option<u32>,
    pub trail: Option<(i32, i32)>,
}

impl Mind {
    /// Switch behavior, dropping any stale target/food/trail reference
    pub fn switch(&mut self, behavior: Behavior) {
        self.behavior = behavior;
        self.target = None;
        self.food = None;
        self.trail = None;
    }
}

/// Identity component - stable for the life of the ant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: u32,
    pub name: String,
    pub color: String,
    pub tier: Tier,
    pub role: Role,
    /// Unix milliseconds at generation time; cosmetic only
    pub spawned_at: u64,
}

/// The full ant value exchanged with the host: what the roster holds, what
/// `sync_population` copies in, and what snapshots hand back. Inside the
/// engine this is split into (Profile, Stats, Position, Vitals, Mind)
/// components; the host never holds a live reference into the world.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ant {
    pub id: u32,
    pub name: String,
    pub color: String,
    pub tier: Tier,
    pub role: Role,
    pub speed: f32,
    pub stamina: f32,
    pub strength: f32,
    pub intelligence: f32,
    pub x: f32,
    pub y: f32,
    pub energy: f32,
    pub hunger: f32,
    pub behavior: Behavior,
    #[serde(default)]
    pub target: Option<Vec2>,
    pub spawned_at: u64,
}

impl Ant {
    /// Split into engine components
    pub fn into_components(self) -> (Profile, Stats, super::common::Position, Vitals, Mind) {
        (
            Profile {
                id: self.id,
                name: self.name,
                color: self.color,
                tier: self.tier,
                role: self.role,
                spawned_at: self.spawned_at,
            },
            Stats {
                speed: self.speed,
                stamina: self.stamina,
                strength: self.strength,
                intelligence: self.intelligence,
            },
            super::common::Position::new(self.x, self.y),
            Vitals {
                energy: self.energy.clamp(0.0, 100.0),
                hunger: self.hunger.clamp(0.0, 100.0),
            },
            Mind {
                behavior: self.behavior,
                target: self.target,
                food: None,
                trail: None,
            },
        )
    }

    /// Reassemble from engine components (snapshot path)
    pub fn from_components(
        profile: &Profile,
        stats: &Stats,
        position: &super::common::Position,
        vitals: &Vitals,
        mind: &Mind,
    ) -> Self {
        Self {
            id: profile.id,
            name: profile.name.clone(),
            color: profile.color.clone(),
            tier: profile.tier,
            role: profile.role,
            speed: stats.speed,
            stamina: stats.stamina,
            strength: stats.strength,
            intelligence: stats.intelligence,
            x: position.x,
            y: position.y,
            energy: vitals.energy,
            hunger: vitals.hunger,
            behavior: mind.behavior,
            target: mind.target,
            spawned_at: profile.spawned_at,
        }
    }
}
