//! Batch experiments driven from the command line.
//!
//! Two experiments are supported: evolving a population from a chosen
//! initial condition while logging every change of dominant species, and
//! measuring how much food agents of a given motility collect per generation.

use crate::model::config::{AppConfig, FoodInitConfig};
use crate::model::world::World;
use anyhow::Context;
use glimmer_data::{CostWeights, Mutability, Trait, TraitValues};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InitialConditionError {
    #[error("unknown initial condition flag '{0}' (expected b, c, m, d, x, z or f)")]
    UnknownFlag(char),

    #[error("'x' must directly follow one of b, c, m or d")]
    DanglingLock,
}

/// Starting point of an evolution run, parsed from a short flag string.
///
/// `b`, `c`, `m` and `d` switch brightness, contrast, motility or
/// directedness fully on; an `x` straight after one of them locks that
/// trait against mutation. `z` makes every trait free and `f` gives
/// newborns a brightness-dependent head start of food.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialCondition {
    pub traits: TraitValues,
    pub mutability: Mutability,
    pub zero_cost: bool,
    pub biased_food: bool,
    label: String,
}

impl Default for InitialCondition {
    fn default() -> Self {
        Self {
            traits: TraitValues::default(),
            mutability: Mutability::all(),
            zero_cost: false,
            biased_food: false,
            label: String::new(),
        }
    }
}

impl InitialCondition {
    /// Parses a flag string; case and whitespace are ignored.
    pub fn parse(flags: &str) -> Result<Self, InitialConditionError> {
        let mut ic = Self::default();
        let mut chars = flags
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_lowercase())
            .peekable();

        while let Some(c) = chars.next() {
            let t = match c {
                'b' => Trait::Brightness,
                'c' => Trait::Contrast,
                'm' => Trait::Motility,
                'd' => Trait::Directedness,
                'z' => {
                    ic.zero_cost = true;
                    continue;
                }
                'f' => {
                    ic.biased_food = true;
                    continue;
                }
                'x' => return Err(InitialConditionError::DanglingLock),
                other => return Err(InitialConditionError::UnknownFlag(other)),
            };
            set_trait(&mut ic.traits, t, 1.0);
            ic.label.push(c.to_ascii_uppercase());
            if chars.next_if_eq(&'x').is_some() {
                ic.mutability.set(t, false);
                ic.label.push('x');
            }
        }
        Ok(ic)
    }

    /// Normalised form of the flags, e.g. `BxC`.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Writes this starting point into a run configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        config.initial = self.traits;
        config.mutability = self.mutability;
        if self.zero_cost {
            config.costs = CostWeights::default();
        }
        if self.biased_food {
            config.food_init = FoodInitConfig::brightness_biased();
        }
    }
}

fn set_trait(values: &mut TraitValues, t: Trait, v: f64) {
    match t {
        Trait::Contrast => values.contrast = v,
        Trait::Brightness => values.brightness = v,
        Trait::Motility => values.motility = v,
        Trait::Directedness => values.directedness = v,
    }
}

/// Output encoding for result rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `#` header plus tab-separated rows.
    #[default]
    Tsv,
    /// One JSON object per line, no header.
    Json,
}

/// Traits of a new dominant species, as printed by an evolution run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DominanceRow {
    pub generation: u64,
    pub brightness: f64,
    pub contrast: f64,
    pub motility: f64,
    pub directedness: f64,
}

impl DominanceRow {
    fn of(generation: u64, world: &World) -> Option<Self> {
        let d = world.dominator()?;
        Some(Self {
            generation,
            brightness: d.brightness(),
            contrast: d.contrast(),
            motility: d.motility(),
            directedness: d.directedness(),
        })
    }

    fn write<W: Write>(&self, format: OutputFormat, out: &mut W) -> anyhow::Result<()> {
        match format {
            OutputFormat::Tsv => writeln!(
                out,
                "{}\t{:?}\t{:?}\t{:?}\t{:?}",
                self.generation, self.brightness, self.contrast, self.motility, self.directedness
            )?,
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(self)?)?,
        }
        Ok(())
    }
}

/// Reads a TOML config from `path`, or returns the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            AppConfig::from_toml(&text)
                .with_context(|| format!("invalid config {}", path.display()))
        }
        None => Ok(AppConfig::default()),
    }
}

/// Evolves a population, writing the founders' traits and then a row
/// every time the dominant species changes.
///
/// Returns the rows written.
pub fn run_evolution<W: Write>(
    config: &AppConfig,
    label: &str,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<Vec<DominanceRow>> {
    let mut world = config.build_world()?;
    let evo = &config.evolution;
    let cost = config.costs.get(Trait::Brightness);
    let bodge = matches!(config.food_init, FoodInitConfig::BrightnessBiased { .. });

    if format == OutputFormat::Tsv {
        writeln!(
            out,
            "# ic={label} cost={cost:?} bodge={bodge} sweeps={} generations={}",
            evo.sweeps_per_generation, evo.generations
        )?;
    }

    let mut rows = Vec::new();
    if let Some(row) = DominanceRow::of(0, &world) {
        row.write(format, out)?;
        rows.push(row);
    }

    let mut changes_seen = world.dominance_history().len();
    for g in 0..evo.generations {
        world.shuffle_food();
        for _ in 0..evo.sweeps_per_generation {
            world.sweep();
        }
        world.regenerate_agents(evo.mutation_rate)?;

        if world.dominance_history().len() != changes_seen {
            changes_seen = world.dominance_history().len();
            if let Some(row) = DominanceRow::of(u64::from(g) + 1, &world) {
                row.write(format, out)?;
                rows.push(row);
            }
        }
    }

    tracing::info!(
        generations = evo.generations,
        changes = rows.len().saturating_sub(1),
        species = world.max_species_id(),
        "Evolution run finished"
    );
    Ok(rows)
}

/// Repeatedly seeds founders with the given motility and records how much
/// food each one eats in a generation, one number per line.
///
/// Returns the total food eaten.
pub fn run_food_benefit<W: Write>(
    config: &AppConfig,
    motility: f64,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<u64> {
    let mut world = config.build_world()?;
    let evo = &config.evolution;

    if format == OutputFormat::Tsv {
        writeln!(
            out,
            "# motility = {motility:?} sweeps={} generations={}",
            evo.sweeps_per_generation, evo.generations
        )?;
    }

    let mut total = 0u64;
    for g in 0..evo.generations {
        world.assign_agents(config.world.population, 0.0, 0.0, motility, 0.0)?;
        world.shuffle_food();
        for _ in 0..evo.sweeps_per_generation {
            world.sweep();
        }
        for agent in world.agents() {
            let food = agent.food_consumed();
            total += u64::from(food);
            match format {
                OutputFormat::Tsv => writeln!(out, "{food}")?,
                OutputFormat::Json => writeln!(
                    out,
                    "{}",
                    serde_json::json!({ "generation": g, "food": food })
                )?,
            }
        }
    }
    Ok(total)
}
