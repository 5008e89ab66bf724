//! Command-line driver for the predator-prey simulation.

use anyhow::Result;
use clap::Parser;
use ecosim_core::{PopulationConfig, SimulationConfig, Species};
use ecosim_world::{Simulation, StepReport};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ecosim", about = "Predator-prey ecosystem simulation")]
struct Args {
    /// Field width (columns)
    #[arg(long, default_value_t = 120)]
    width: u32,

    /// Field depth (rows)
    #[arg(long, default_value_t = 80)]
    depth: u32,

    /// Random seed
    #[arg(long, default_value_t = 1111)]
    seed: u64,

    /// Number of steps to run
    #[arg(long, default_value_t = 500)]
    steps: u64,

    /// Initial rabbit density
    #[arg(long, default_value_t = 0.08)]
    rabbits: f64,

    /// Initial fox density
    #[arg(long, default_value_t = 0.02)]
    foxes: f64,

    /// Initial coyote density
    #[arg(long, default_value_t = 0.01)]
    coyotes: f64,

    /// Report every step as a JSON line instead of a text summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = SimulationConfig {
        width: args.width,
        depth: args.depth,
        seed: args.seed,
        population: PopulationConfig {
            rabbits: args.rabbits,
            foxes: args.foxes,
            coyotes: args.coyotes,
        },
    };

    let mut sim = Simulation::new(config)?;
    info!(
        seed = args.seed,
        steps = args.steps,
        "starting simulation run"
    );

    let mut last = sim.report();
    for _ in 0..args.steps {
        last = sim.step()?;
        print_report(&last, args.json)?;
        if last.total_alive == 0 {
            info!(step = last.step, "population extinct, stopping early");
            break;
        }
    }

    if !args.json {
        println!(
            "finished after {} steps with {} animals alive",
            last.step, last.total_alive
        );
    }
    Ok(())
}

fn print_report(report: &StepReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(report)?);
    } else {
        let counts: Vec<String> = Species::ALL
            .iter()
            .map(|species| {
                format!(
                    "{}: {}",
                    species,
                    report.counts.get(species).copied().unwrap_or(0)
                )
            })
            .collect();
        println!("step {:>5}  {}", report.step, counts.join("  "));
    }
    Ok(())
}
