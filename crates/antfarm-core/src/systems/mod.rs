//! Systems - tick logic that operates on components

mod behavior;
mod physiology;
mod structures;

pub use behavior::*;
pub use physiology::*;
pub use structures::*;
