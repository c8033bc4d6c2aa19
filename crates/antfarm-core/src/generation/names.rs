//! Name and color pools for generated ants.
//!
//! Pools are keyed by tier and role where a themed pool exists; anything
//! without a themed pool falls back to the generic lists. Purely cosmetic.

use rand::Rng;

use crate::components::{Role, Tier};

/// Pick a display name for a tier/role combination
pub fn generate_name(tier: Tier, role: Role, rng: &mut impl Rng) -> String {
    let pool = name_pool(tier, role);
    pool[rng.gen_range(0..pool.len())].to_string()
}

/// Pick a body color (hex string) for a tier
pub fn generate_color(tier: Tier, rng: &mut impl Rng) -> String {
    let pool = color_pool(tier);
    pool[rng.gen_range(0..pool.len())].to_string()
}

fn name_pool(tier: Tier, role: Role) -> &'static [&'static str] {
    match (tier, role) {
        (Tier::Legendary, Role::Queen) => QUEEN_NAMES,
        (Tier::Legendary, _) => LEGENDARY_NAMES,
        (Tier::Rare, Role::Soldier) => SOLDIER_NAMES,
        (Tier::Rare, _) => RARE_NAMES,
        (_, Role::Scout) => SCOUT_NAMES,
        _ => GENERIC_NAMES,
    }
}

fn color_pool(tier: Tier) -> &'static [&'static str] {
    match tier {
        Tier::Common => COMMON_COLORS,
        Tier::Uncommon => UNCOMMON_COLORS,
        Tier::Rare => RARE_COLORS,
        Tier::Legendary => LEGENDARY_COLORS,
    }
}

// Sample pools - would be loaded from data files in production
static GENERIC_NAMES: &[&str] = &[
    "Pip", "Dot", "Scurry", "Crumb", "Pepper", "Mite", "Twig", "Speck", "Nib", "Dash", "Clover",
    "Bramble", "Pebble", "Fern", "Thistle", "Maple", "Sage", "Juniper", "Willow", "Hazel",
];

static SCOUT_NAMES: &[&str] = &[
    "Ranger", "Compass", "Vista", "Trek", "Atlas", "Meander", "Drift", "Pathfinder", "Scurry",
    "Wander",
];

static SOLDIER_NAMES: &[&str] = &[
    "Mandible", "Bastion", "Pincer", "Garrison", "Rampart", "Vanguard", "Sentry", "Bulwark",
];

static RARE_NAMES: &[&str] = &[
    "Amber", "Garnet", "Cobalt", "Onyx", "Topaz", "Jasper", "Beryl", "Citrine", "Opal", "Flint",
];

static LEGENDARY_NAMES: &[&str] = &[
    "Aurelia", "Solstice", "Ember", "Zenith", "Tempest", "Aurora", "Titan", "Eclipse",
];

static QUEEN_NAMES: &[&str] = &[
    "Queen Mab", "Formica Regina", "Her Radiance", "Empress Tawny", "Matriarch Vela",
];

static COMMON_COLORS: &[&str] = &["#8b4513", "#a0522d", "#6b4423", "#7a5230", "#5c4033"];

static UNCOMMON_COLORS: &[&str] = &["#b22222", "#cd5c5c", "#8b0000", "#a52a2a"];

static RARE_COLORS: &[&str] = &["#4169e1", "#1e90ff", "#6a5acd", "#483d8b"];

static LEGENDARY_COLORS: &[&str] = &["#ffd700", "#daa520", "#ff8c00", "#e6be8a"];
