//! Driver binary: configures, runs, and exports one simulation.

use anyhow::Result;
use life_core::JobConfig;
use life_render::export;
use life_world::GameOfLife;
use std::fs;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    init_logging();

    let config = load_config()?;

    let mut gol = GameOfLife::new(&config.grid, config.run.clone());
    let summary = gol.run()?;

    info!(
        iterations = summary.iterations,
        early_stopped = summary.early_stopped,
        final_population = summary.final_population,
        "Run complete"
    );

    if config.output.save {
        let results = gol.results()?;
        match export::save_run(
            results,
            &summary,
            gol.rows(),
            gol.cols(),
            &config.render,
            &config.output.out_dir,
        ) {
            Ok(dir) => info!("Process finished with save: {}", dir.display()),
            // The computed history and potential are unaffected by an
            // export failure.
            Err(e) => error!("Export failed: {}", e),
        }
    } else {
        info!("Process finished without save");
    }

    Ok(())
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,life_world=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Load the job configuration from the JSON file given as the first
/// argument, falling back to defaults when no path is supplied.
fn load_config() -> Result<JobConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let raw = fs::read_to_string(&path)?;
            let config = serde_json::from_str(&raw)?;
            info!("Loaded configuration from {}", path);
            Ok(config)
        }
        None => Ok(JobConfig::default()),
    }
}
