//! AntFarm Core - Colony Simulation Engine
//!
//! A decorative ant colony that lives alongside a word-puzzle game. The
//! player's progress grows the roster; the engine simulates each ant's
//! behavior tick by tick, laying pheromone trails and carving tunnels and
//! chambers as the colony settles in.
//!
//! # Architecture
//!
//! Ants are entities in a `hecs` world with pure-data components
//! (Profile, Stats, Position, Vitals, Mind); systems are free functions
//! that advance them one tick. Tunnels, chambers, food sources, and the
//! pheromone field are owned by the engine next to the world.
//!
//! # Example
//!
//! ```rust,no_run
//! use antfarm_core::prelude::*;
//! use antfarm_core::farm::{AntFarm, ItemCatalog};
//!
//! let mut engine = ColonyEngine::new(&AntFarm::default(), &ItemCatalog::new());
//!
//! // Drive from the host's frame loop
//! loop {
//!     engine.tick(1.0 / 60.0);
//!     let _state = engine.snapshot();
//! }
//! ```

pub mod components;
pub mod engine;
pub mod farm;
pub mod field;
pub mod generation;
pub mod population;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::{ColonyEngine, ColonySnapshot};
    pub use crate::field::PheromoneField;
    pub use crate::population::{PopulationManager, Progress};
}
