//! Command line driver for the hunter/prey simulation.

mod telemetry;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use hunt_core::{Settings, SimulationConfig};
use hunt_world::{render_grid, Simulation, TickReport};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Status lines and optional grid
    Text,
    /// One JSON snapshot per tick
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "hunt")]
#[command(version)]
#[command(about = "Simulation of one hunter and one or multiple prey")]
struct Cli {
    /// Settings file with one `name=value` per line
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Grid size in X dimension
    #[arg(long)]
    grid_size_x: Option<i32>,

    /// Grid size in Y dimension
    #[arg(long)]
    grid_size_y: Option<i32>,

    /// Number of prey
    #[arg(long)]
    n_prey: Option<usize>,

    /// Number of simulation steps
    #[arg(long)]
    n_steps: Option<u64>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Render the grid after every step (`--show-grid false` turns it off)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    show_grid: Option<bool>,

    /// Pause between steps in milliseconds
    #[arg(long)]
    tick_delay_ms: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize telemetry
    telemetry::init_telemetry(cli.format == OutputFormat::Json)?;

    // Errors surface through main's return, independent of the log filter
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let config = build_config(cli)?;
    info!(?config, "Starting hunt");

    let mut sim = Simulation::new(&config).context("failed to set up the simulation")?;
    let delay = Duration::from_millis(config.tick_delay_ms);

    match cli.format {
        OutputFormat::Text => {
            println!(
                "Simulation parameters: {}",
                serde_json::to_string(&config)?
            );
            show_status(&sim, config.show_grid);

            for _ in 0..config.n_steps {
                thread::sleep(delay);
                println!("----------------------------");
                let report = sim.tick()?;
                show_captures(&report);
                show_status(&sim, config.show_grid);
            }
        }
        OutputFormat::Json => {
            for _ in 0..config.n_steps {
                thread::sleep(delay);
                let report = sim.tick()?;
                println!("{}", sim.snapshot(&report).to_json_line()?);
            }
        }
    }

    info!(
        ticks = sim.current_tick(),
        captures = sim.captures().len(),
        alive_prey = sim.alive_prey(),
        "Hunt finished"
    );
    Ok(())
}

/// Settings file (or defaults) with command line overrides on top
fn build_config(cli: &Cli) -> Result<SimulationConfig> {
    let mut config = match &cli.settings {
        Some(path) => {
            let settings = Settings::load(path)
                .with_context(|| format!("failed to read settings from {}", path.display()))?;
            SimulationConfig::from_settings(&settings)
                .with_context(|| format!("invalid settings in {}", path.display()))?
        }
        None => SimulationConfig::default(),
    };

    if let Some(x) = cli.grid_size_x {
        config.grid_size_x = x;
    }
    if let Some(y) = cli.grid_size_y {
        config.grid_size_y = y;
    }
    if let Some(n) = cli.n_prey {
        config.n_prey = n;
    }
    if let Some(n) = cli.n_steps {
        config.n_steps = n;
    }
    if let Some(seed) = cli.seed {
        config.random_seed = seed;
    }
    if let Some(delay) = cli.tick_delay_ms {
        config.tick_delay_ms = delay;
    }
    if let Some(show) = cli.show_grid {
        config.show_grid = show;
    }

    config.validate().context("invalid simulation parameters")?;
    Ok(config)
}

fn show_captures(report: &TickReport) {
    for capture in &report.captures {
        println!("{} is killed.", capture.prey);
    }
}

fn show_status(sim: &Simulation, show_grid: bool) {
    for prey in sim.prey() {
        println!("{prey}");
    }
    if let Some(hunter) = sim.hunter() {
        println!("{hunter}");
    }
    if show_grid {
        println!("{}", render_grid(sim.boundary(), &sim.agents()));
    }
}
