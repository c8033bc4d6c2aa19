//! Component definitions for the colony simulation.
//!
//! Components are pure data structs attached to ant entities or owned by
//! the engine. They have no tick logic - that lives in systems.

mod ants;
mod common;
mod world;

pub use ants::*;
pub use common::*;
pub use world::*;
