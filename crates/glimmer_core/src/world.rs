//! The simulation world: grid, food, population and generational turnover.
//!
//! A [`World`] owns its random stream, so two worlds built with the same
//! seed and driven through the same calls produce identical histories.

use crate::agent::Agent;
use crate::error::{ensure_in_range, EngineError, Result};
use crate::food::{FoodGrid, FoodInitializer, NoFood};
use crate::lineage::{DominanceRecord, SpeciesCensus};
use crate::metrics::Metrics;
use crate::selection;
use crate::torus;
use glimmer_data::{CostWeights, Genotype, Mutability, Offset, Site, Summary, Trait, TraitValues};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::time::Instant;

pub struct World {
    food: FoodGrid,
    weights: CostWeights,
    mutability: Mutability,
    food_initializer: Box<dyn FoodInitializer>,
    agents: Vec<Agent>,
    max_species_id: u32,
    dominator: Option<Agent>,
    dominance_history: Vec<DominanceRecord>,
    generations: u64,
    rng: ChaCha8Rng,
    metrics: Metrics,
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("size", &self.food.size())
            .field("sites_with_food", &self.food.sites_with_food())
            .field("agents", &self.agents.len())
            .field("generations", &self.generations)
            .field("max_species_id", &self.max_species_id)
            .finish_non_exhaustive()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// An empty 0x0 world seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(ChaCha8Rng::from_entropy())
    }

    /// An empty 0x0 world with a reproducible random stream.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(rng: ChaCha8Rng) -> Self {
        Self {
            food: FoodGrid::new(0, 0),
            weights: CostWeights::default(),
            mutability: Mutability::default(),
            food_initializer: Box::new(NoFood),
            agents: Vec::new(),
            max_species_id: 0,
            dominator: None,
            dominance_history: Vec::new(),
            generations: 0,
            rng,
            metrics: Metrics::new(),
        }
    }

    // ---- configuration ----

    /// Resizes the grid. Food and agents outside the new bounds are dropped.
    pub fn set_size(&mut self, width: u16, height: u16) -> Result<()> {
        if width == 0 {
            return Err(EngineError::invalid("width", width, "> 0"));
        }
        if height == 0 {
            return Err(EngineError::invalid("height", height, "> 0"));
        }
        self.food.resize(width, height);
        let before = self.agents.len();
        self.agents.retain(|a| a.x() < width && a.y() < height);
        let dropped = before - self.agents.len();
        if dropped > 0 {
            tracing::debug!(dropped = dropped, width = width, height = height, "Agents outside resized grid removed");
        }
        Ok(())
    }

    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        self.food.size()
    }

    /// Sets the cost weight of one trait.
    ///
    /// Existing agents keep the efficiency they were created with.
    pub fn set_weight(&mut self, t: Trait, weight: f64) -> Result<()> {
        ensure_in_range(t.name(), weight, 0.0, f64::MAX, "finite and >= 0")?;
        self.weights.set(t, weight);
        Ok(())
    }

    pub fn set_weights(&mut self, weights: CostWeights) -> Result<()> {
        for t in Trait::ALL {
            ensure_in_range(t.name(), weights.get(t), 0.0, f64::MAX, "finite and >= 0")?;
        }
        self.weights = weights;
        Ok(())
    }

    #[must_use]
    pub fn weights(&self) -> &CostWeights {
        &self.weights
    }

    pub fn set_mutable(&mut self, t: Trait, mutable: bool) {
        self.mutability.set(t, mutable);
    }

    pub fn set_mutability(&mut self, mutability: Mutability) {
        self.mutability = mutability;
    }

    #[must_use]
    pub fn mutability(&self) -> &Mutability {
        &self.mutability
    }

    /// Replaces the hook that sets each new agent's starting food.
    pub fn set_food_initializer<F: FoodInitializer + 'static>(&mut self, initializer: F) {
        self.food_initializer = Box::new(initializer);
    }

    // ---- food ----

    /// Places food on `min(n, cells)` distinct random sites; returns the count placed.
    pub fn assign_food(&mut self, n: usize) -> usize {
        let placed = self.food.assign(n, &mut self.rng);
        if placed < n {
            tracing::debug!(requested = n, placed = placed, "Food request clamped to grid");
        }
        placed
    }

    /// Moves every food site to a new random position, keeping the count.
    pub fn shuffle_food(&mut self) {
        self.food.shuffle(&mut self.rng);
    }

    #[must_use]
    pub fn is_food_at(&self, x: u16, y: u16) -> bool {
        self.food.is_food_at(x, y)
    }

    #[must_use]
    pub fn sites_with_food(&self) -> usize {
        self.food.sites_with_food()
    }

    #[must_use]
    pub fn food(&self) -> &FoodGrid {
        &self.food
    }

    // ---- population ----

    /// Replaces the population with `n` identical founders of species 0.
    ///
    /// Resets the generation count; the species counter keeps running.
    pub fn assign_agents(
        &mut self,
        n: usize,
        brightness: f64,
        contrast: f64,
        motility: f64,
        directedness: f64,
    ) -> Result<()> {
        let genotype = Genotype::new(brightness, contrast, motility, directedness);
        if let Some((t, value)) = genotype.out_of_range() {
            let expected = match t.range() {
                (lo, _) if lo < 0.0 => "[-1, 1]",
                _ => "[0, 1]",
            };
            return Err(EngineError::invalid(t.name(), value, expected));
        }
        if n > 0 && self.food.cell_count() == 0 {
            return Err(EngineError::EmptyGrid);
        }

        self.agents.clear();
        self.generations = 0;
        let (width, height) = self.food.size();
        for _ in 0..n {
            let x = self.rng.gen_range(0..width);
            let y = self.rng.gen_range(0..height);
            let mut agent = Agent::new(x, y, genotype, &self.weights);
            self.food_initializer.assign(&mut agent, &mut self.rng);
            self.agents.push(agent);
        }

        self.dominator = self.agents.first().cloned();
        if let Some(founder) = &self.dominator {
            self.dominance_history.push(DominanceRecord {
                generation: 0,
                species_id: founder.species_id(),
                genotype: *founder.genotype(),
            });
        }
        tracing::debug!(agents = n, "Population seeded");
        Ok(())
    }

    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Mutable access to the live population, e.g. to adjust food counts.
    pub fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    // ---- dynamics ----

    /// Performs `|agents|` behaviour updates on uniformly drawn agents.
    pub fn sweep(&mut self) {
        let started = Instant::now();
        let n = self.agents.len();
        let size = self.food.size();
        for _ in 0..n {
            let idx = self.rng.gen_range(0..n);
            let light = nearest_light(&self.agents, idx, size);
            self.agents[idx].respond(light, &self.food, &mut self.rng);
        }
        self.metrics.record_sweep(started.elapsed(), n);
    }

    /// Replaces the population with a fitness-proportional sample of
    /// offspring of the same size.
    ///
    /// Each child mutates with probability `mutation_rate`, founding a new
    /// species. A species reaching the dominance threshold in the new
    /// population displaces the current dominator.
    pub fn regenerate_agents(&mut self, mutation_rate: f64) -> Result<()> {
        ensure_in_range("mutation_rate", mutation_rate, 0.0, 1.0, "[0, 1]")?;
        if mutation_rate > 0.0 && !self.mutability.any() {
            return Err(EngineError::NoMutableTrait);
        }

        let n = self.agents.len();
        if n == 0 {
            self.generations += 1;
            return Ok(());
        }

        let cumulative = selection::cumulative_fitness(&self.agents);
        let (width, height) = self.food.size();
        let mut children = Vec::with_capacity(n);
        let mut census = SpeciesCensus::new(n);
        let mut founded = 0;

        for i in 0..n {
            let x = self.rng.gen_range(0..width);
            let y = self.rng.gen_range(0..height);
            let parent = selection::select_parent(&cumulative, &mut self.rng);
            let mut child = Agent::offspring(&self.agents[parent], x, y);

            if self.rng.gen::<f64>() < mutation_rate {
                child.mutate(&self.mutability, &self.weights, &mut self.rng)?;
                self.max_species_id += 1;
                child.found_species(self.max_species_id);
                founded += 1;
            }

            self.food_initializer.assign(&mut child, &mut self.rng);
            census.record_birth(child.species_id(), i);
            children.push(child);
        }

        self.agents = children;
        self.generations += 1;

        if let Some(idx) = census.candidate() {
            let candidate = &self.agents[idx];
            let changed = self
                .dominator
                .as_ref()
                .map_or(true, |d| d.species_id() != candidate.species_id());
            if changed {
                tracing::info!(
                    generation = self.generations,
                    species = candidate.species_id(),
                    brightness = candidate.brightness(),
                    contrast = candidate.contrast(),
                    motility = candidate.motility(),
                    directedness = candidate.directedness(),
                    "Dominant species changed"
                );
                self.dominance_history.push(DominanceRecord {
                    generation: self.generations,
                    species_id: candidate.species_id(),
                    genotype: *candidate.genotype(),
                });
                self.dominator = Some(candidate.clone());
            }
        }

        self.metrics.record_generation(self.generations, founded);
        Ok(())
    }

    // ---- queries ----

    /// Snapshot of the representative of the dominant species.
    #[must_use]
    pub fn dominator(&self) -> Option<&Agent> {
        self.dominator.as_ref()
    }

    /// Every dominance change since the world was created, oldest first.
    #[must_use]
    pub fn dominance_history(&self) -> &[DominanceRecord] {
        &self.dominance_history
    }

    /// Regenerations since the population was last seeded.
    #[must_use]
    pub fn generations(&self) -> u64 {
        self.generations
    }

    #[must_use]
    pub fn max_species_id(&self) -> u32 {
        self.max_species_id
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Population trait means and the dominator's traits.
    ///
    /// `None` until a non-empty population has been seeded.
    #[must_use]
    pub fn summary(&self) -> Option<Summary> {
        let dominator = self.dominator.as_ref()?;
        if self.agents.is_empty() {
            return None;
        }
        let mut mean = TraitValues::default();
        for a in &self.agents {
            mean.contrast += a.contrast();
            mean.brightness += a.brightness();
            mean.motility += a.motility();
            mean.directedness += a.directedness();
        }
        let n = self.agents.len() as f64;
        mean.contrast /= n;
        mean.brightness /= n;
        mean.motility /= n;
        mean.directedness /= n;
        Some(Summary {
            mean,
            dominator: dominator.genotype().values(),
        })
    }

    /// Species head-count of the live population.
    #[must_use]
    pub fn species_counts(&self) -> SpeciesCensus {
        SpeciesCensus::from_species(self.agents.len(), self.agents.iter().map(Agent::species_id))
    }

    /// Per-site food, occupancy and lit counts, row-major.
    #[must_use]
    pub fn site_snapshot(&self) -> Vec<Site> {
        let (width, height) = self.food.size();
        let mut sites: Vec<Site> = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| Site {
                food: self.food.is_food_at(x, y),
                ..Site::default()
            })
            .collect();
        for a in &self.agents {
            let site = &mut sites[usize::from(a.y()) * usize::from(width) + usize::from(a.x())];
            site.agents += 1;
            if a.is_light_on() {
                site.lit += 1;
            }
        }
        sites
    }
}

/// Displacement from agent `idx` to the closest lit conspecific.
///
/// Scans in population order; the first of several equally close lights
/// wins. Lights on the agent's own site are ignored.
fn nearest_light(agents: &[Agent], idx: usize, size: (u16, u16)) -> Option<Offset> {
    let me = &agents[idx];
    let mut best: Option<Offset> = None;
    for (j, other) in agents.iter().enumerate() {
        if j == idx || !other.is_light_on() || other.species_id() != me.species_id() {
            continue;
        }
        let Some(d) = torus::displacement(me.position(), other.position(), size) else {
            continue;
        };
        if best.map_or(true, |b| d.squared_len() < b.squared_len()) {
            best = Some(d);
        }
    }
    best
}
