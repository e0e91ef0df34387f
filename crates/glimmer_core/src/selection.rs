//! Fitness-proportional (roulette wheel) parent selection.

use crate::agent::Agent;
use rand::Rng;

/// Running totals of fitness in population order.
#[must_use]
pub fn cumulative_fitness(agents: &[Agent]) -> Vec<f64> {
    agents
        .iter()
        .scan(0.0, |total, a| {
            *total += a.fitness();
            Some(*total)
        })
        .collect()
}

/// Picks a parent index from a prefix-sum table.
///
/// Draws `u = total * U[0,1)` and returns the first index whose cumulative
/// fitness exceeds `u`. When the population has no fitness at all every
/// index is equally likely. `cumulative` must be non-empty.
pub fn select_parent<R: Rng + ?Sized>(cumulative: &[f64], rng: &mut R) -> usize {
    let total = cumulative.last().copied().unwrap_or(0.0);
    if total > 0.0 {
        let u = total * rng.gen::<f64>();
        cumulative
            .partition_point(|&c| c <= u)
            .min(cumulative.len() - 1)
    } else {
        rng.gen_range(0..cumulative.len())
    }
}
