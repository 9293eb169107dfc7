//! Headless combat simulator.
//!
//! Loads an encounter, plays it to the end with an auto-piloted human and
//! prints a JSON report on stdout. Logs go to stderr.
//!
//! ```bash
//! COMBAT_ENCOUNTER=orc_warband COMBAT_SEED=7 cargo run -p combat-runtime --bin combat-sim
//! RUST_LOG=narrative=info,warn COMBAT_DROP_ANIMATIONS=1 cargo run -p combat-runtime --bin combat-sim
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use combat_content::ContentFactory;
use combat_runtime::{SimConfig, Simulation};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = SimConfig::from_env();
    let factory = match &config.data_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::bundled(),
    };
    tracing::info!(data_dir = %factory.data_dir().display(), encounter = %config.encounter, "loading content");

    let combat_config = factory.load_config()?;
    let catalog = factory.load_catalog()?;
    let encounter = factory
        .load_encounter(&config.encounter, &catalog)
        .with_context(|| format!("Failed to load encounter '{}'", config.encounter))?;

    let mut simulation = Simulation::builder()
        .encounter(&encounter)
        .catalog(Arc::new(catalog))
        .config(combat_config)
        .seed(config.seed)
        .drop_animations(config.drop_animations)
        .frame(config.frame)
        .build()?;

    let report = if config.realtime {
        simulation.run_realtime(config.max_frames).await?
    } else {
        simulation.run(config.max_frames)?
    };

    match report.outcome {
        Some(outcome) => tracing::info!(%outcome, rounds = report.rounds, frames = report.frames, "simulation finished"),
        None => tracing::warn!(frames = report.frames, "simulation ended without an outcome"),
    }
    println!("{}", report.to_json()?);

    Ok(())
}

fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
