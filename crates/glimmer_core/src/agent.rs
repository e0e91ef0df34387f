//! Stochastic signalling agents.
//!
//! An [`Agent`] couples a heritable [`Genotype`] with the transient state of
//! one generation: where it stands, how much food it has eaten and whether
//! its light is showing. All randomness comes from the caller's stream so a
//! fixed seed replays exactly.

use crate::error::{EngineError, Result};
use crate::food::FoodGrid;
use crate::torus;
use glimmer_data::{CostWeights, Genotype, Mutability, Offset, Trait};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Food-conversion efficiency of a genotype under the given cost weights.
///
/// Always in `(0, 1]`; exactly 1 when every weighted trait is zero.
#[must_use]
pub fn efficiency(genotype: &Genotype, weights: &CostWeights) -> f64 {
    let cost = weights.contrast * genotype.contrast.abs()
        + weights.brightness * genotype.brightness
        + weights.motility * genotype.motility
        + weights.directedness * genotype.directedness;
    let e = (-cost).exp();
    debug_assert!(e.is_finite(), "efficiency must be finite");
    e
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    genotype: Genotype,
    efficiency: f64,
    x: u16,
    y: u16,
    food: u32,
    light: bool,
    species_id: u32,
}

impl Agent {
    /// Creates a founder of species 0 at `(x, y)`.
    #[must_use]
    pub fn new(x: u16, y: u16, genotype: Genotype, weights: &CostWeights) -> Self {
        Self {
            efficiency: efficiency(&genotype, weights),
            genotype,
            x,
            y,
            food: 0,
            light: false,
            species_id: 0,
        }
    }

    /// Creates a child at `(x, y)` that copies the parent's genotype,
    /// efficiency, lineage and light state. Food starts at zero.
    #[must_use]
    pub fn offspring(parent: &Agent, x: u16, y: u16) -> Self {
        Self {
            genotype: parent.genotype,
            efficiency: parent.efficiency,
            x,
            y,
            food: 0,
            light: parent.light,
            species_id: parent.species_id,
        }
    }

    #[must_use]
    pub fn genotype(&self) -> &Genotype {
        &self.genotype
    }

    #[must_use]
    pub fn x(&self) -> u16 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> u16 {
        self.y
    }

    #[must_use]
    pub fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    #[must_use]
    pub fn contrast(&self) -> f64 {
        self.genotype.contrast
    }

    #[must_use]
    pub fn brightness(&self) -> f64 {
        self.genotype.brightness
    }

    #[must_use]
    pub fn motility(&self) -> f64 {
        self.genotype.motility
    }

    /// Signed directedness in `[-1, 1]`; negative moves away from light.
    #[must_use]
    pub fn directedness(&self) -> f64 {
        self.genotype.signed_directedness()
    }

    #[must_use]
    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    #[must_use]
    pub fn food_consumed(&self) -> u32 {
        self.food
    }

    /// Overwrites the food counter; used by food initialisers.
    pub fn set_food_consumed(&mut self, food: u32) {
        self.food = food;
    }

    #[must_use]
    pub fn fitness(&self) -> f64 {
        f64::from(self.food) * self.efficiency
    }

    #[must_use]
    pub fn is_light_on(&self) -> bool {
        self.light
    }

    #[must_use]
    pub fn species_id(&self) -> u32 {
        self.species_id
    }

    #[must_use]
    pub fn is_on_food(&self, food: &FoodGrid) -> bool {
        food.is_food_at(self.x, self.y)
    }

    pub(crate) fn found_species(&mut self, species_id: u32) {
        self.species_id = species_id;
    }

    /// One behaviour update: maybe move, eat, then set the light.
    ///
    /// `light` is the minimum-image displacement to the nearest visible
    /// conspecific light, or `None` if there is none.
    pub fn respond<R: Rng + ?Sized>(&mut self, light: Option<Offset>, food: &FoodGrid, rng: &mut R) {
        if rng.gen::<f64>() < self.genotype.motility {
            let step = self.choose_step(light, rng);
            self.x = torus::wrap(self.x, step.dx, food.width());
            self.y = torus::wrap(self.y, step.dy, food.height());
        }

        let on_food = self.is_on_food(food);
        if on_food {
            self.food = self.food.saturating_add(1);
        }

        let b = self.genotype.brightness;
        let c = self.genotype.contrast;
        let p = if on_food {
            0.5 * b * (1.0 + c)
        } else {
            0.5 * b * (1.0 - c)
        };
        self.light = rng.gen::<f64>() < p;
    }

    fn choose_step<R: Rng + ?Sized>(&self, light: Option<Offset>, rng: &mut R) -> Offset {
        let d = self.genotype.directedness;
        if let Some(target) = light {
            if d == 1.0 || rng.gen::<f64>() < d {
                let sign = if self.genotype.reversed { -1 } else { 1 };
                return Offset::new(sign * target.dx.signum(), sign * target.dy.signum());
            }
        }
        loop {
            let step = Offset::new(rng.gen_range(-1..=1), rng.gen_range(-1..=1));
            if !step.is_zero() {
                return step;
            }
        }
    }

    /// Resamples one uniformly chosen mutable trait and recomputes efficiency.
    ///
    /// Returns the trait that changed.
    pub fn mutate<R: Rng + ?Sized>(
        &mut self,
        mutability: &Mutability,
        weights: &CostWeights,
        rng: &mut R,
    ) -> Result<Trait> {
        let eligible = mutability.mutable_traits();
        if eligible.is_empty() {
            return Err(EngineError::NoMutableTrait);
        }
        let chosen = eligible[rng.gen_range(0..eligible.len())];
        match chosen {
            Trait::Contrast => self.genotype.contrast = 2.0 * rng.gen::<f64>() - 1.0,
            Trait::Brightness => self.genotype.brightness = rng.gen::<f64>(),
            Trait::Motility => self.genotype.motility = rng.gen::<f64>(),
            Trait::Directedness => {
                self.genotype.directedness = rng.gen::<f64>();
                self.genotype.reversed = rng.gen::<bool>();
            }
        }
        self.efficiency = efficiency(&self.genotype, weights);
        Ok(chosen)
    }
}
