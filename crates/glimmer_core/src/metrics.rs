//! Run metrics and structured logging.
//!
//! Counts sweeps, generations and species foundings so long batch runs can
//! report progress through `tracing` without the engine printing anything.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Sweeps between progress lines.
const SWEEP_LOG_INTERVAL: u64 = 1000;

#[derive(Debug)]
pub struct Metrics {
    sweep_count: AtomicU64,
    generation_count: AtomicU64,
    population: AtomicU64,
    counters: Mutex<HashMap<String, u64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sweep_count: AtomicU64::new(0),
            generation_count: AtomicU64::new(0),
            population: AtomicU64::new(0),
            counters: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records a completed sweep over `population` agents.
    pub fn record_sweep(&self, duration: Duration, population: usize) {
        let sweep = self.sweep_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.population.store(population as u64, Ordering::Relaxed);

        if sweep % SWEEP_LOG_INTERVAL == 0 {
            tracing::info!(
                sweep = sweep,
                population = population,
                duration_us = duration.as_micros() as u64,
                "Sweep progress"
            );
        }
    }

    /// Records a generation turnover and how many new species it founded.
    pub fn record_generation(&self, generation: u64, founded: usize) {
        self.generation_count.fetch_add(1, Ordering::Relaxed);
        if founded > 0 {
            self.add_to_counter("species_founded", founded as u64);
        }
        tracing::debug!(generation = generation, founded = founded, "Generation complete");
    }

    pub fn increment_counter(&self, name: &str) {
        self.add_to_counter(name, 1);
    }

    fn add_to_counter(&self, name: &str, amount: u64) {
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        *counters.entry(name.to_string()).or_insert(0) += amount;
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters.get(name).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn sweep_count(&self) -> u64 {
        self.sweep_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn generation_count(&self) -> u64 {
        self.generation_count.load(Ordering::Relaxed)
    }

    /// Population size seen by the most recent sweep.
    #[must_use]
    pub fn population(&self) -> u64 {
        self.population.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Installs a stderr `tracing` subscriber honouring `RUST_LOG`, INFO by default.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}
