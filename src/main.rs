use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use glimmer_lib::batch::{self, InitialCondition, OutputFormat};
use glimmer_lib::model::metrics::init_logging;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Number of generations to run
    #[arg(long, global = true)]
    generations: Option<u32>,

    /// Sweeps per generation
    #[arg(long, global = true)]
    sweeps: Option<u32>,

    /// Row format on stdout
    #[arg(long, value_enum, default_value = "tsv", global = true)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evolve from an initial condition such as `BxC` and print dominance changes
    Evolve {
        /// Flags: b c m d switch a trait on, x locks the previous one, z zeroes costs, f biases starting food
        #[arg(num_args = 0.., trailing_var_arg = true)]
        ic: Vec<String>,
    },
    /// Print the food eaten by every agent per generation at a fixed motility
    FoodBenefit {
        #[arg(long, default_value_t = 0.0)]
        motility: f64,
    },
    /// Print the default configuration as TOML
    DumpDefaultConfig,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Tsv,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Tsv => OutputFormat::Tsv,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = batch::load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }
    if let Some(generations) = args.generations {
        config.evolution.generations = generations;
    }
    if let Some(sweeps) = args.sweeps {
        config.evolution.sweeps_per_generation = sweeps;
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let format = OutputFormat::from(args.format);

    match args.command {
        Command::Evolve { ic } => {
            let ic = InitialCondition::parse(&ic.concat())?;
            ic.apply(&mut config);
            batch::run_evolution(&config, ic.label(), format, &mut out)?;
        }
        Command::FoodBenefit { motility } => {
            batch::run_food_benefit(&config, motility, format, &mut out)?;
        }
        Command::DumpDefaultConfig => {
            write!(out, "{}", glimmer_lib::model::config::AppConfig::default().to_toml()?)?;
        }
    }

    out.flush()?;
    Ok(())
}
