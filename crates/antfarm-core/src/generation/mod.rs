//! Generation - procedural creation of ants and their cosmetics

mod ants;
mod names;

pub use ants::*;
pub use names::*;
