//! Run configuration for batch experiments.
//!
//! The engine itself never reads files; this module maps a `config.toml`
//! onto the calls a driver makes to set up a [`World`]. Defaults reproduce
//! the classic experiment: a 51x51 torus, 200 agents, 10 food sites, a
//! uniform cost of 0.25 and 1% mutation over 1000 generations of 1000 sweeps.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 51
//! height = 51
//! population = 200
//! food_sites = 10
//! seed = 42
//!
//! [costs]
//! contrast = 0.25
//! brightness = 0.25
//! motility = 0.25
//! directedness = 0.25
//!
//! [evolution]
//! mutation_rate = 0.01
//!
//! [food_init]
//! kind = "brightness_biased"
//! alpha = 0.96848
//! beta = 1.9094
//! ```

use crate::food::BrightnessBiasedFood;
use crate::world::World;
use glimmer_data::{CostWeights, Genotype, Mutability, Trait, TraitValues};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u16,
    pub height: u16,
    pub population: usize,
    pub food_sites: usize,
    /// Fixed seed for reproducible runs; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 51,
            height: 51,
            population: 200,
            food_sites: 10,
            seed: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EvolutionConfig {
    pub mutation_rate: f64,
    pub sweeps_per_generation: u32,
    pub generations: u32,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.01,
            sweeps_per_generation: 1000,
            generations: 1000,
        }
    }
}

/// How new agents receive their starting food.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FoodInitConfig {
    /// Every agent starts with nothing.
    #[default]
    Zero,
    /// Brightness-dependent head start; see [`BrightnessBiasedFood`].
    BrightnessBiased {
        alpha: f64,
        beta: f64,
        /// Defaults to the configured number of generations.
        horizon: Option<u32>,
    },
}

impl FoodInitConfig {
    #[must_use]
    pub fn brightness_biased() -> Self {
        Self::BrightnessBiased {
            alpha: BrightnessBiasedFood::DEFAULT_ALPHA,
            beta: BrightnessBiasedFood::DEFAULT_BETA,
            horizon: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub costs: CostWeights,
    pub mutability: Mutability,
    pub evolution: EvolutionConfig,
    /// Founder traits; directedness is signed.
    pub initial: TraitValues,
    pub food_init: FoodInitConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            costs: CostWeights::uniform(0.25),
            mutability: Mutability::all(),
            evolution: EvolutionConfig::default(),
            initial: TraitValues::default(),
            food_init: FoodInitConfig::Zero,
        }
    }
}

impl AppConfig {
    /// Checks every parameter, reporting the first violation.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.world.width > 0, "World width must be positive");
        anyhow::ensure!(self.world.height > 0, "World height must be positive");

        for t in Trait::ALL {
            let w = self.costs.get(t);
            anyhow::ensure!(
                w.is_finite() && w >= 0.0,
                "Cost weight for {} must be finite and non-negative (got {w})",
                t.name()
            );
        }

        let rate = self.evolution.mutation_rate;
        anyhow::ensure!(
            (0.0..=1.0).contains(&rate),
            "Mutation rate must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            rate == 0.0 || self.mutability.any(),
            "Mutation rate is positive but no trait is mutable"
        );

        let founder = self.founder_genotype();
        if let Some((t, v)) = founder.out_of_range() {
            anyhow::bail!("Initial {} out of range: {v}", t.name());
        }

        if let FoodInitConfig::BrightnessBiased { alpha, beta, .. } = self.food_init {
            anyhow::ensure!(
                (0.0..=1.0).contains(&alpha),
                "Food init alpha must be in [0.0, 1.0]"
            );
            anyhow::ensure!(
                beta.is_finite() && beta >= 0.0,
                "Food init beta must be finite and non-negative"
            );
        }

        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string(self)?)
    }

    #[must_use]
    pub fn founder_genotype(&self) -> Genotype {
        let i = &self.initial;
        Genotype::new(i.brightness, i.contrast, i.motility, i.directedness)
    }

    /// Food density of the configured grid, with the request clamped to the
    /// number of cells.
    #[must_use]
    pub fn food_density(&self) -> f64 {
        let cells = usize::from(self.world.width) * usize::from(self.world.height);
        density(self.world.food_sites.min(cells), cells)
    }

    /// Builds a world with food placed and founders seeded.
    pub fn build_world(&self) -> anyhow::Result<World> {
        self.validate()?;
        let mut world = match self.world.seed {
            Some(seed) => World::with_seed(seed),
            None => World::new(),
        };
        world.set_size(self.world.width, self.world.height)?;
        world.set_mutability(self.mutability);
        let placed = world.assign_food(self.world.food_sites);
        world.set_weights(self.costs)?;

        if let FoodInitConfig::BrightnessBiased {
            alpha,
            beta,
            horizon,
        } = self.food_init
        {
            let horizon = horizon.unwrap_or(self.evolution.generations);
            let cells = usize::from(self.world.width) * usize::from(self.world.height);
            world.set_food_initializer(BrightnessBiasedFood::new(
                density(placed, cells),
                alpha,
                beta,
                horizon,
            )?);
        }

        let i = &self.initial;
        world.assign_agents(
            self.world.population,
            i.brightness,
            i.contrast,
            i.motility,
            i.directedness,
        )?;
        tracing::debug!(
            width = self.world.width,
            height = self.world.height,
            population = self.world.population,
            food_sites = self.world.food_sites,
            "World built from config"
        );
        Ok(world)
    }
}

fn density(food_sites: usize, cells: usize) -> f64 {
    if cells == 0 {
        0.0
    } else {
        food_sites as f64 / cells as f64
    }
}
