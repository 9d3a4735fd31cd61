/*
 * Boid Swarm
 *
 * Flocking simulation with live tuning. Each boid steers by three rules:
 * 1. Cohesion: fly toward the average position of nearby boids
 * 2. Separation: turn away from a boid that gets too close
 * 3. Alignment: once near the flock, match its average heading
 *
 * Startup settings come from a TOML file plus command-line overrides; the
 * rest is tuned with the on-screen sliders.
 */

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use boid_swarm::app;
use boid_swarm::config::SimConfig;

#[derive(Debug, Parser)]
#[command(version, about = "Grid-accelerated boid flocking simulation")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "boids.toml")]
    config: PathBuf,

    /// Number of boids to spawn
    #[arg(short, long)]
    boids: Option<usize>,

    /// Seed for reproducible spawns
    #[arg(long)]
    seed: Option<u64>,

    /// Start fullscreen
    #[arg(long)]
    fullscreen: bool,

    /// Start with edge wrapping enabled
    #[arg(long)]
    wrap: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = SimConfig::load(&cli.config)?;
    if let Some(boids) = cli.boids {
        config.flock.boid_count = boids;
    }
    if cli.seed.is_some() {
        config.flock.seed = cli.seed;
    }
    config.window.fullscreen |= cli.fullscreen;
    config.flock.wrap |= cli.wrap;
    config.validate().context("invalid configuration")?;

    info!("Starting boid swarm with {} boids", config.flock.boid_count);
    app::install_config(config)?;

    nannou::app(app::model).update(app::update).run();
    Ok(())
}
