//! Core data structures for the Glimmer simulation.

pub mod genotype;
pub mod world;
