//! Species census and dominance bookkeeping across generations.

use glimmer_data::Genotype;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Share of the population a species must reach to become dominant.
pub const DOMINANCE_THRESHOLD: f64 = 0.75;

/// Species head-count for one generation under construction.
///
/// Tracks the most recent birth that brought its species up to the
/// dominance threshold; that birth is the dominance candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeciesCensus {
    counts: BTreeMap<u32, usize>,
    threshold: usize,
    candidate: Option<usize>,
}

impl SpeciesCensus {
    /// Empty census for a generation of `population` agents.
    #[must_use]
    pub fn new(population: usize) -> Self {
        Self {
            counts: BTreeMap::new(),
            threshold: (DOMINANCE_THRESHOLD * population as f64).floor() as usize,
            candidate: None,
        }
    }

    /// Counts every agent's species in one go.
    #[must_use]
    pub fn from_species<I: IntoIterator<Item = u32>>(population: usize, species: I) -> Self {
        let mut census = Self::new(population);
        for (i, id) in species.into_iter().enumerate() {
            census.record_birth(id, i);
        }
        census
    }

    /// Records the birth at position `index` in the new population.
    ///
    /// Returns true if this birth became the dominance candidate.
    pub fn record_birth(&mut self, species_id: u32, index: usize) -> bool {
        let count = self.counts.entry(species_id).or_insert(0);
        *count += 1;
        if *count >= self.threshold {
            self.candidate = Some(index);
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Index of the last birth that met the threshold, if any.
    #[must_use]
    pub fn candidate(&self) -> Option<usize> {
        self.candidate
    }

    #[must_use]
    pub fn count(&self, species_id: u32) -> usize {
        self.counts.get(&species_id).copied().unwrap_or(0)
    }

    /// Head-count per species, ordered by species id.
    #[must_use]
    pub fn counts(&self) -> &BTreeMap<u32, usize> {
        &self.counts
    }

    /// Number of distinct species alive.
    #[must_use]
    pub fn species_count(&self) -> usize {
        self.counts.len()
    }
}

/// A change of dominant species.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DominanceRecord {
    /// Generation count right after the change (0 for the founders).
    pub generation: u64,
    pub species_id: u32,
    pub genotype: Genotype,
}
