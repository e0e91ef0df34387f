//! # Glimmer Core
//!
//! Simulation engine for the evolution of honest and dishonest signalling.
//!
//! Agents wander a toroidal grid looking for food. Each one carries four
//! heritable traits: how bright its light is, how strongly the light tracks
//! whether it is standing on food (contrast), how often it moves (motility)
//! and how strongly it steers towards or away from lights of its own species
//! (directedness). Every trait has a fitness cost. Generations turn over by
//! fitness-proportional reproduction with occasional mutation, and each
//! mutation founds a new species.
//!
//! ## Example
//!
//! ```
//! use glimmer_core::world::World;
//!
//! let mut world = World::with_seed(42);
//! world.set_size(21, 21).unwrap();
//! world.assign_food(5);
//! world.assign_agents(50, 1.0, 1.0, 1.0, 1.0).unwrap();
//!
//! for _ in 0..100 {
//!     world.sweep();
//! }
//! world.regenerate_agents(0.0).unwrap();
//!
//! let summary = world.summary().unwrap();
//! assert_eq!(summary.mean.brightness, 1.0);
//! ```

/// Agents, behaviour updates and mutation
pub mod agent;
/// Run configuration loaded from TOML
pub mod config;
/// Engine error type
pub mod error;
/// Food grid and starting-food initialisers
pub mod food;
/// Species census and dominance tracking
pub mod lineage;
/// Performance metrics collection and logging
pub mod metrics;
/// Roulette-wheel parent selection
pub mod selection;
/// Lock-protected world handle for background runs
pub mod shared;
/// Toroidal wrap-around and minimum-image geometry
pub mod torus;
/// The world: grid, population and generational turnover
pub mod world;

pub use agent::Agent;
pub use config::AppConfig;
pub use error::{EngineError, Result};
pub use food::{BrightnessBiasedFood, FoodGrid, FoodInitializer, NoFood};
pub use lineage::{DominanceRecord, SpeciesCensus, DOMINANCE_THRESHOLD};
pub use metrics::{init_logging, Metrics};
pub use shared::{GenerationStats, JobOutcome, JobSpec, SharedWorld};
pub use world::World;
