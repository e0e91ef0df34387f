//! Core data structures for the Glimmer signalling simulation.
//!
//! Everything here is plain data: genotypes, trait vectors, cost and
//! mutability tables, and the read-only views handed to observers. The
//! behaviour that operates on these types lives in `glimmer_core`.

pub mod data;

pub use data::genotype::{Genotype, Trait, TraitValues};
pub use data::world::{CostWeights, Mutability, Offset, Site, Summary};
