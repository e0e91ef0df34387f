//! Thread-safe handle for running a world in the background while other
//! threads observe it.
//!
//! Mutation happens under the write lock one whole sweep or regeneration at
//! a time, so readers only ever see complete states. Every read returns an
//! owned snapshot.

use crate::agent::Agent;
use crate::error::Result;
use crate::world::World;
use glimmer_data::{Site, Summary};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// Population summary taken just before a regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: u64,
    pub summary: Summary,
}

/// Work for one background run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JobSpec {
    pub generations: u32,
    pub sweeps_per_generation: u32,
    pub mutation_rate: f64,
}

/// How far a run got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JobOutcome {
    pub generations_completed: u32,
    pub sweeps_completed: u64,
    pub cancelled: bool,
}

#[derive(Debug, Clone)]
pub struct SharedWorld {
    world: Arc<RwLock<World>>,
    statistics: Arc<Mutex<Vec<GenerationStats>>>,
}

impl SharedWorld {
    #[must_use]
    pub fn new(world: World) -> Self {
        Self {
            world: Arc::new(RwLock::new(world)),
            statistics: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Runs `f` with shared access to the world.
    pub fn with_read<T>(&self, f: impl FnOnce(&World) -> T) -> T {
        let world = self.world.read().unwrap_or_else(|e| e.into_inner());
        f(&world)
    }

    /// Runs `f` with exclusive access to the world.
    pub fn with_write<T>(&self, f: impl FnOnce(&mut World) -> T) -> T {
        let mut world = self.world.write().unwrap_or_else(|e| e.into_inner());
        f(&mut world)
    }

    /// Owned copy of the population at a consistent point.
    #[must_use]
    pub fn agents_stable(&self) -> Vec<Agent> {
        self.with_read(|w| w.agents().to_vec())
    }

    #[must_use]
    pub fn summary(&self) -> Option<Summary> {
        self.with_read(World::summary)
    }

    #[must_use]
    pub fn site_snapshot(&self) -> Vec<Site> {
        self.with_read(World::site_snapshot)
    }

    /// Drains the per-generation statistics recorded so far.
    pub fn take_statistics(&self) -> Vec<GenerationStats> {
        let mut stats = self.statistics.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *stats)
    }

    /// Runs `spec.generations` generations of sweeps, regeneration and a
    /// food shuffle, recording a summary before each regeneration.
    ///
    /// `cancel` is polled between sweeps; a cancelled run leaves the current
    /// generation unfinished.
    pub fn run_job(&self, spec: &JobSpec, cancel: &AtomicBool) -> Result<JobOutcome> {
        let mut outcome = JobOutcome::default();
        tracing::info!(
            generations = spec.generations,
            sweeps = spec.sweeps_per_generation,
            "Batch job started"
        );

        for _ in 0..spec.generations {
            for _ in 0..spec.sweeps_per_generation {
                if cancel.load(Ordering::SeqCst) {
                    outcome.cancelled = true;
                    tracing::info!(
                        generations = outcome.generations_completed,
                        sweeps = outcome.sweeps_completed,
                        "Batch job cancelled"
                    );
                    return Ok(outcome);
                }
                self.with_write(World::sweep);
                outcome.sweeps_completed += 1;
            }

            self.with_write(|w| -> Result<()> {
                if let Some(summary) = w.summary() {
                    let mut stats = self.statistics.lock().unwrap_or_else(|e| e.into_inner());
                    stats.push(GenerationStats {
                        generation: w.generations(),
                        summary,
                    });
                }
                w.regenerate_agents(spec.mutation_rate)?;
                w.shuffle_food();
                Ok(())
            })?;
            outcome.generations_completed += 1;
        }

        tracing::info!(generations = outcome.generations_completed, "Batch job finished");
        Ok(outcome)
    }
}
