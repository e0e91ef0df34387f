pub mod macros;

use glimmer_data::{CostWeights, Mutability};
use glimmer_lib::model::config::AppConfig;
use glimmer_lib::model::world::World;

type WorldMod = Box<dyn FnOnce(&mut World)>;

#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    world_mods: Vec<WorldMod>,
}

#[allow(dead_code)]
impl WorldBuilder {
    /// A small 21x21 world with 50 founders, 10 food sites, no costs and
    /// nothing mutable.
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.width = 21;
        config.world.height = 21;
        config.world.population = 50;
        config.world.food_sites = 10;
        config.world.seed = Some(0);
        config.costs = CostWeights::default();
        config.mutability = Mutability::default();
        config.evolution.mutation_rate = 0.0;
        Self {
            config,
            world_mods: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.config.world.width = width;
        self.config.world.height = height;
        self
    }

    pub fn with_population(mut self, n: usize) -> Self {
        self.config.world.population = n;
        self
    }

    pub fn with_food(mut self, sites: usize) -> Self {
        self.config.world.food_sites = sites;
        self
    }

    /// Founder traits; directedness is signed.
    pub fn with_traits(mut self, brightness: f64, contrast: f64, motility: f64, directedness: f64) -> Self {
        self.config.initial.brightness = brightness;
        self.config.initial.contrast = contrast;
        self.config.initial.motility = motility;
        self.config.initial.directedness = directedness;
        self
    }

    pub fn with_mutability(mut self, mutability: Mutability) -> Self {
        self.config.mutability = mutability;
        self
    }

    /// Food counts applied to the founders in population order.
    pub fn with_food_consumed(mut self, food: Vec<u32>) -> Self {
        self.world_mods.push(Box::new(move |world| {
            for (agent, f) in world.agents_mut().iter_mut().zip(food) {
                agent.set_food_consumed(f);
            }
        }));
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn build(self) -> World {
        let mut world = self
            .config
            .build_world()
            .expect("Failed to create world in test builder");
        for modifier in self.world_mods {
            modifier(&mut world);
        }
        world
    }
}

/// Runs `generations` rounds of food shuffle, sweeps and regeneration.
#[allow(dead_code)]
pub fn evolve(world: &mut World, generations: u32, sweeps: u32, mutation_rate: f64) {
    for _ in 0..generations {
        world.shuffle_food();
        for _ in 0..sweeps {
            world.sweep();
        }
        world
            .regenerate_agents(mutation_rate)
            .expect("regeneration failed");
    }
}
