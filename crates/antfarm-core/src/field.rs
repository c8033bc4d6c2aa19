//! Pheromone field - a sparse, decaying scalar map ants deposit on and
//! follow to coordinate foraging without direct communication.
//!
//! Positions are quantized to a 10-unit grid before lookup so trails read
//! as thick paths rather than points, and so the map stays bounded. Cells
//! decay uniformly every tick and are evicted the moment they reach zero,
//! so the map never holds non-positive entries.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::components::Vec2;

/// Grid cell edge length in world units
pub const CELL_SIZE: f32 = 10.0;
/// Upper bound on a cell's strength
pub const MAX_STRENGTH: f32 = 5.0;
/// Uniform strength loss per second of simulated time
pub const DECAY_PER_SEC: f32 = 0.5;
/// Default radius for strongest-cell queries
pub const SEARCH_RADIUS: f32 = 50.0;

/// One cell of the field as exposed in snapshots
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PheromoneCell {
    pub x: f32,
    pub y: f32,
    pub strength: f32,
}

/// Sparse pheromone concentration map keyed by quantized grid cell
#[derive(Debug, Clone, Default)]
pub struct PheromoneField {
    cells: HashMap<(i32, i32), f32>,
}

impl PheromoneField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantize a world position to its grid cell key
    pub fn cell_key(x: f32, y: f32) -> (i32, i32) {
        (
            (x / CELL_SIZE).floor() as i32,
            (y / CELL_SIZE).floor() as i32,
        )
    }

    /// World-space center of a grid cell
    fn cell_center(key: (i32, i32)) -> Vec2 {
        Vec2::new(
            key.0 as f32 * CELL_SIZE + CELL_SIZE / 2.0,
            key.1 as f32 * CELL_SIZE + CELL_SIZE / 2.0,
        )
    }

    /// Deposit pheromone at a world position, capped at MAX_STRENGTH.
    /// Non-positive deposits are ignored.
    pub fn reinforce(&mut self, x: f32, y: f32, strength: f32) {
        if strength <= 0.0 {
            return;
        }
        let cell = self.cells.entry(Self::cell_key(x, y)).or_insert(0.0);
        *cell = (*cell + strength).min(MAX_STRENGTH);
    }

    /// Decay every cell by elapsed time and evict dead cells
    pub fn decay(&mut self, delta_seconds: f32) {
        let loss = DECAY_PER_SEC * delta_seconds;
        if loss <= 0.0 {
            return;
        }
        self.cells.retain(|_, strength| {
            *strength -= loss;
            *strength > 0.0
        });
    }

    /// Strongest cell within `radius` of a query point, as a world position.
    /// Linear scan over the sparse map; cell counts stay small because
    /// trails decay quickly.
    pub fn strongest_within(&self, x: f32, y: f32, radius: f32) -> Option<Vec2> {
        let query = Vec2::new(x, y);
        let radius_sq = radius * radius;

        // Ties broken by cell key so map iteration order never leaks into
        // the result
        self.cells
            .iter()
            .filter(|(key, _)| Self::cell_center(**key).distance_squared(&query) <= radius_sq)
            .max_by(|a, b| {
                a.1.partial_cmp(b.1)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.0.cmp(b.0))
            })
            .map(|(key, _)| Self::cell_center(*key))
    }

    /// Strength at a world position (0.0 for absent cells)
    pub fn strength_at(&self, x: f32, y: f32) -> f32 {
        self.cells
            .get(&Self::cell_key(x, y))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Snapshot view of every live cell, in stable cell order
    pub fn cells(&self) -> Vec<PheromoneCell> {
        let mut keyed: Vec<(&(i32, i32), &f32)> = self.cells.iter().collect();
        keyed.sort_by_key(|(key, _)| **key);
        keyed
            .into_iter()
            .map(|(key, strength)| {
                let center = Self::cell_center(*key);
                PheromoneCell {
                    x: center.x,
                    y: center.y,
                    strength: *strength,
                }
            })
            .collect()
    }
}
