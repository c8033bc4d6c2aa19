//! Colony structure records: tunnels, chambers, and food sources.
//!
//! These live outside the ECS world, owned by the engine the way a ship
//! layout is owned alongside its crew. Tunnels are append-only polylines;
//! chambers and food sources are never deleted during a session.

use serde::{Deserialize, Serialize};

use super::ants::{Role, Vitals};
use super::common::Vec2;

/// Food classification - decides the feeding effect on an ant's vitals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodType {
    Water,
    Sugar,
    Boost,
    #[default]
    Food,
}

impl FoodType {
    /// Apply one feeding tick's worth of effect to an ant's vitals
    pub fn feed(&self, vitals: &mut Vitals) {
        match self {
            FoodType::Water => vitals.sate(40.0),
            FoodType::Sugar => {
                vitals.sate(25.0);
                vitals.gain_energy(10.0);
            }
            FoodType::Boost => {
                vitals.gain_energy(30.0);
                vitals.sate(15.0);
            }
            FoodType::Food => vitals.sate(20.0),
        }
    }
}

/// How close a dig start must be to a tunnel's last point to extend it
pub const TUNNEL_EXTEND_DIST: f32 = 15.0;
/// Segments shorter than this never create a new tunnel
pub const TUNNEL_MIN_SEGMENT: f32 = 2.0;

/// An excavated tunnel: an append-only polyline with a width
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tunnel {
    pub id: u32,
    pub points: Vec<Vec2>,
    pub width: f32,
}

impl Tunnel {
    pub fn last_point(&self) -> Vec2 {
        // Invariant: a tunnel always has at least 2 points
        *self.points.last().unwrap_or(&Vec2::ZERO)
    }

    pub fn midpoint(&self) -> Vec2 {
        self.points[self.points.len() / 2]
    }
}

/// Chamber kind - affects nothing mechanically, rendered differently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChamberKind {
    Nest,
    Storage,
    Queen,
}

impl ChamberKind {
    /// Which kind of chamber an ant of a given role founds
    pub fn for_builder(role: Role) -> Self {
        match role {
            Role::Queen => ChamberKind::Queen,
            _ => ChamberKind::Storage,
        }
    }
}

/// A dug-out chamber
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chamber {
    pub id: u32,
    pub center: Vec2,
    pub radius: f32,
    pub kind: ChamberKind,
}

/// A placed or generated food source. Amount only ever decreases; depleted
/// sources stay in the list at amount 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodSource {
    pub id: u32,
    pub kind: FoodType,
    pub position: Vec2,
    pub amount: f32,
    pub max_amount: f32,
    /// Unix milliseconds when placed; cosmetic only
    pub placed_at: u64,
}

impl FoodSource {
    pub fn is_depleted(&self) -> bool {
        self.amount <= 0.0
    }

    /// Take up to `units` from the source, returning what was actually taken
    pub fn deplete(&mut self, units: f32) -> f32 {
        let taken = units.min(self.amount).max(0.0);
        self.amount -= taken;
        taken
    }
}

/// Tunnels and chambers plus their id counters - the dug-out shape of the
/// colony, mutated only by engine digging/bookkeeping during a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColonyLayout {
    pub tunnels: Vec<Tunnel>,
    pub chambers: Vec<Chamber>,
    next_tunnel_id: u32,
    next_chamber_id: u32,
}

impl ColonyLayout {
    pub fn new(tunnels: Vec<Tunnel>, chambers: Vec<Chamber>) -> Self {
        let next_tunnel_id = tunnels.iter().map(|t| t.id + 1).max().unwrap_or(0);
        let next_chamber_id = chambers.iter().map(|c| c.id + 1).max().unwrap_or(0);
        Self {
            tunnels,
            chambers,
            next_tunnel_id,
            next_chamber_id,
        }
    }

    /// Record a dug segment from `from` to `to`: extend the nearest tunnel
    /// whose last point is close to the dig start, otherwise open a new
    /// tunnel if the segment is long enough to be worth keeping.
    pub fn dig(&mut self, from: Vec2, to: Vec2, width: f32) {
        let nearest = self
            .tunnels
            .iter_mut()
            .map(|t| (t.last_point().distance(&from), t))
            .filter(|(d, _)| *d < TUNNEL_EXTEND_DIST)
            .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        if let Some((_, tunnel)) = nearest {
            tunnel.points.push(to);
        } else if from.distance(&to) > TUNNEL_MIN_SEGMENT {
            let id = self.next_tunnel_id;
            self.next_tunnel_id += 1;
            self.tunnels.push(Tunnel {
                id,
                points: vec![from, to],
                width,
            });
        }
    }

    pub fn add_chamber(&mut self, center: Vec2, radius: f32, kind: ChamberKind) -> u32 {
        let id = self.next_chamber_id;
        self.next_chamber_id += 1;
        self.chambers.push(Chamber {
            id,
            center,
            radius: radius.max(1.0),
            kind,
        });
        id
    }

    /// Nearest chamber to a point, if any
    pub fn nearest_chamber(&self, point: Vec2) -> Option<&Chamber> {
        self.chambers.iter().min_by(|a, b| {
            a.center
                .distance_squared(&point)
                .partial_cmp(&b.center.distance_squared(&point))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// Nearest tunnel to a point (by midpoint), if any
    pub fn nearest_tunnel(&self, point: Vec2) -> Option<&Tunnel> {
        self.tunnels.iter().min_by(|a, b| {
            a.midpoint()
                .distance_squared(&point)
                .partial_cmp(&b.midpoint().distance_squared(&point))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// Distance from a point to the closest chamber center, or None
    pub fn chamber_clearance(&self, point: Vec2) -> Option<f32> {
        self.nearest_chamber(point).map(|c| c.center.distance(&point))
    }
}
