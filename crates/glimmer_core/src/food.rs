//! Food layout and initial food allocation.
//!
//! [`FoodGrid`] is a boolean occupancy grid with a cached count of food
//! sites. [`FoodInitializer`] is the hook the world calls once for every
//! agent it creates, at seeding and at each birth.

use crate::agent::Agent;
use crate::error::{ensure_in_range, Result};
use rand::{Rng, RngCore};

/// Boolean food grid on a `width x height` torus, stored row-major.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodGrid {
    width: u16,
    height: u16,
    cells: Vec<bool>,
    sites: usize,
}

impl FoodGrid {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![false; usize::from(width) * usize::from(height)],
            sites: 0,
        }
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of sites currently holding food.
    #[must_use]
    pub fn sites_with_food(&self) -> usize {
        self.sites
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        usize::from(y) * usize::from(self.width) + usize::from(x)
    }

    /// Whether `(x, y)` holds food. Coordinates off the grid hold none.
    #[inline]
    #[must_use]
    pub fn is_food_at(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height && self.cells[self.index(x, y)]
    }

    /// Resizes the grid, keeping food in the overlapping region only.
    pub fn resize(&mut self, width: u16, height: u16) {
        let mut next = FoodGrid::new(width, height);
        for y in 0..height.min(self.height) {
            for x in 0..width.min(self.width) {
                if self.is_food_at(x, y) {
                    let idx = next.index(x, y);
                    next.cells[idx] = true;
                    next.sites += 1;
                }
            }
        }
        *self = next;
    }

    /// Clears all food and places it on `n` distinct random sites.
    ///
    /// `n` is clamped to the number of cells; the placed count is returned.
    /// Sites are drawn x then y and rejected if already occupied.
    pub fn assign<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> usize {
        let n = n.min(self.cells.len());
        self.cells.iter_mut().for_each(|c| *c = false);
        self.sites = n;
        let mut remaining = n;
        while remaining > 0 {
            let x = rng.gen_range(0..self.width);
            let y = rng.gen_range(0..self.height);
            let idx = self.index(x, y);
            if !self.cells[idx] {
                self.cells[idx] = true;
                remaining -= 1;
            }
        }
        n
    }

    /// Re-randomises food positions, keeping the number of food sites.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let n = self.sites;
        self.assign(n, rng);
    }

    /// Coordinates of every food site, row by row.
    pub fn food_sites(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        let width = usize::from(self.width.max(1));
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f)
            .map(move |(i, _)| ((i % width) as u16, (i / width) as u16))
    }
}

/// Assigns the starting food count of a newly created agent.
///
/// The world invokes this exactly once per agent it creates, passing its own
/// random stream so that sampled initialisers stay deterministic.
pub trait FoodInitializer: Send + Sync {
    fn assign(&self, agent: &mut Agent, rng: &mut dyn RngCore);
}

impl<F> FoodInitializer for F
where
    F: Fn(&mut Agent, &mut dyn RngCore) + Send + Sync,
{
    fn assign(&self, agent: &mut Agent, rng: &mut dyn RngCore) {
        self(agent, rng)
    }
}

/// Default initialiser: every agent starts with no food.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFood;

impl FoodInitializer for NoFood {
    fn assign(&self, agent: &mut Agent, _rng: &mut dyn RngCore) {
        agent.set_food_consumed(0);
    }
}

/// Samples starting food as a function of brightness, imitating the head
/// start that motility would otherwise earn.
///
/// Dark agents receive `horizon` food with probability `rho` and nothing
/// otherwise. Bright agents get nothing with probability
/// `p0 = alpha * exp(-beta * brightness)`, else an exponential draw with mean
/// `rho * horizon / (1 - p0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessBiasedFood {
    rho: f64,
    alpha: f64,
    beta: f64,
    horizon: u32,
}

impl BrightnessBiasedFood {
    /// Fitted constants for a 51x51 grid with 10 food sites.
    pub const DEFAULT_ALPHA: f64 = 0.96848;
    pub const DEFAULT_BETA: f64 = 1.9094;

    /// `rho` is the food density (food sites / cells) and `horizon` the
    /// number of steps the head start stands in for.
    pub fn new(rho: f64, alpha: f64, beta: f64, horizon: u32) -> Result<Self> {
        ensure_in_range("rho", rho, 0.0, 1.0, "[0, 1]")?;
        ensure_in_range("alpha", alpha, 0.0, 1.0, "[0, 1]")?;
        ensure_in_range("beta", beta, 0.0, f64::MAX, "finite and >= 0")?;
        Ok(Self {
            rho,
            alpha,
            beta,
            horizon,
        })
    }

    /// Probability that an agent of this brightness starts with no food.
    #[must_use]
    pub fn zero_probability(&self, brightness: f64) -> f64 {
        if brightness == 0.0 {
            1.0 - self.rho
        } else {
            self.alpha * (-self.beta * brightness).exp()
        }
    }

    fn sample(&self, brightness: f64, rng: &mut dyn RngCore) -> u32 {
        if brightness == 0.0 {
            return if rng.gen::<f64>() < self.rho {
                self.horizon
            } else {
                0
            };
        }
        let p0 = self.zero_probability(brightness);
        if rng.gen::<f64>() < p0 {
            return 0;
        }
        let scale = self.rho * f64::from(self.horizon) / (p0 - 1.0);
        let draw = scale * (1.0 - rng.gen::<f64>()).ln();
        // Truncation toward zero; NaN and negatives saturate to 0.
        draw as u32
    }
}

impl FoodInitializer for BrightnessBiasedFood {
    fn assign(&self, agent: &mut Agent, rng: &mut dyn RngCore) {
        let food = self.sample(agent.brightness(), rng);
        agent.set_food_consumed(food);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glimmer_data::{CostWeights, Genotype};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn count_food(grid: &FoodGrid) -> usize {
        let mut n = 0;
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if grid.is_food_at(x, y) {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn test_assign_places_exact_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut grid = FoodGrid::new(20, 7);
        assert_eq!(grid.assign(37, &mut rng), 37);
        assert_eq!(count_food(&grid), 37);
        assert_eq!(grid.sites_with_food(), 37);
    }

    #[test]
    fn test_assign_clamps_to_cell_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut grid = FoodGrid::new(4, 3);
        assert_eq!(grid.assign(100, &mut rng), 12);
        assert_eq!(count_food(&grid), 12);
    }

    #[test]
    fn test_shuffle_preserves_count_and_moves_food() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut grid = FoodGrid::new(51, 51);
        grid.assign(10, &mut rng);
        let before: Vec<_> = grid.food_sites().collect();
        grid.shuffle(&mut rng);
        let after: Vec<_> = grid.food_sites().collect();
        assert_eq!(after.len(), 10);
        assert_ne!(before, after);
    }

    #[test]
    fn test_resize_keeps_overlap_only() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut grid = FoodGrid::new(10, 10);
        grid.assign(100, &mut rng);
        grid.resize(4, 12);
        assert_eq!(grid.sites_with_food(), 40);
        assert_eq!(count_food(&grid), 40);
        assert!(!grid.is_food_at(0, 11));
        assert!(!grid.is_food_at(4, 0));
    }

    #[test]
    fn test_no_food_initializer_zeroes() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut agent = Agent::new(0, 0, Genotype::default(), &CostWeights::default());
        agent.set_food_consumed(9);
        NoFood.assign(&mut agent, &mut rng);
        assert_eq!(agent.food_consumed(), 0);
    }

    #[test]
    fn test_closure_initializer() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let init = |agent: &mut Agent, _rng: &mut dyn RngCore| agent.set_food_consumed(7);
        let mut agent = Agent::new(0, 0, Genotype::default(), &CostWeights::default());
        init.assign(&mut agent, &mut rng);
        assert_eq!(agent.food_consumed(), 7);
    }

    #[test]
    fn test_brightness_biased_dark_agents_are_bimodal() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let init = BrightnessBiasedFood::new(0.25, 0.9, 2.0, 1000).unwrap();
        let mut agent = Agent::new(0, 0, Genotype::new(0.0, 0.0, 0.0, 0.0), &CostWeights::default());
        let mut fed = 0;
        for _ in 0..4000 {
            init.assign(&mut agent, &mut rng);
            let f = agent.food_consumed();
            assert!(f == 0 || f == 1000);
            if f == 1000 {
                fed += 1;
            }
        }
        let share = f64::from(fed) / 4000.0;
        assert!((share - 0.25).abs() < 0.05, "share was {share}");
    }

    #[test]
    fn test_brightness_biased_bright_agents_eat_more_often() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let rho = 10.0 / (51.0 * 51.0);
        let init = BrightnessBiasedFood::new(
            rho,
            BrightnessBiasedFood::DEFAULT_ALPHA,
            BrightnessBiasedFood::DEFAULT_BETA,
            1000,
        )
        .unwrap();
        assert!(init.zero_probability(1.0) < init.zero_probability(0.1));
        let mut agent = Agent::new(0, 0, Genotype::new(1.0, 0.0, 0.0, 0.0), &CostWeights::default());
        let nonzero = (0..2000)
            .filter(|_| {
                init.assign(&mut agent, &mut rng);
                agent.food_consumed() > 0
            })
            .count();
        assert!(nonzero > 1000, "only {nonzero} draws were non-zero");
    }

    #[test]
    fn test_brightness_biased_certain_zero_and_certain_horizon() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        // alpha = 1, beta = 0: every lit agent starts empty.
        let init = BrightnessBiasedFood::new(1.0, 1.0, 0.0, 40).unwrap();
        assert_eq!(init.zero_probability(0.7), 1.0);
        assert_eq!(init.zero_probability(0.0), 0.0);
        let mut bright = Agent::new(0, 0, Genotype::new(0.7, 0.0, 0.0, 0.0), &CostWeights::default());
        let mut dark = Agent::new(0, 0, Genotype::new(0.0, 0.0, 0.0, 0.0), &CostWeights::default());
        for _ in 0..200 {
            init.assign(&mut bright, &mut rng);
            init.assign(&mut dark, &mut rng);
            assert_eq!(bright.food_consumed(), 0);
            assert_eq!(dark.food_consumed(), 40);
        }
    }

    #[test]
    fn test_brightness_biased_rejects_bad_parameters() {
        assert!(BrightnessBiasedFood::new(1.5, 0.9, 1.0, 10).is_err());
        assert!(BrightnessBiasedFood::new(0.1, 1.2, 1.0, 10).is_err());
        assert!(BrightnessBiasedFood::new(0.1, 0.9, -1.0, 10).is_err());
    }
}
