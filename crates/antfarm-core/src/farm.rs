//! Host-boundary types: the farm snapshot supplied at construction and the
//! placed-item effect catalog.
//!
//! The UI shell keeps the farm (roster, layout, placed items) in its own
//! store and hands a JSON-shaped copy over when the engine starts. Field
//! names are camelCase to match the host's records.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::components::{Ant, Chamber, FoodType, Tunnel};

/// The farm snapshot handed over at engine construction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AntFarm {
    #[serde(default)]
    pub ants: Vec<Ant>,
    #[serde(default)]
    pub layout: FarmLayout,
    #[serde(default)]
    pub items: Vec<PlacedItem>,
}

/// World geometry and any pre-existing structures
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmLayout {
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    #[serde(default)]
    pub tunnels: Vec<Tunnel>,
    #[serde(default)]
    pub chambers: Vec<Chamber>,
    #[serde(default)]
    pub background: String,
}

impl FarmLayout {
    /// World dimensions with unset/invalid values sanitized to defaults
    pub fn dimensions(&self) -> (f32, f32) {
        let width = if self.width > 0.0 { self.width } else { 800.0 };
        let height = if self.height > 0.0 { self.height } else { 600.0 };
        (width, height)
    }
}

impl Default for FarmLayout {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            tunnels: Vec::new(),
            chambers: Vec::new(),
            background: String::new(),
        }
    }
}

/// A decorative item the player has placed in the farm
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedItem {
    pub id: String,
    /// Catalog key, e.g. "sugar_cube" or "water_drop"
    pub kind: String,
    pub x: f32,
    pub y: f32,
}

/// Effect descriptor for one catalog item. Only food generation matters to
/// the engine; other item effects are the renderer's business.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemEffect {
    /// Units of food this item seeds when placed, if any
    #[serde(default)]
    pub food_generation: Option<f32>,
    /// What kind of food the item provides
    #[serde(default)]
    pub food_type: FoodType,
}

/// Lookup from placed-item kind to its effects
pub type ItemCatalog = HashMap<String, ItemEffect>;
